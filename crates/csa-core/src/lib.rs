//! Core types shared by every create-shuttle-app crate.
//!
//! This crate provides the error type used across the config patching
//! pipeline and the scaffolding steps, plus byte-offset spans for
//! diagnostics on parsed config files.

pub mod error;
pub mod span;

pub use error::{Error, Result};
pub use span::Span;
