//! Command implementations for create-shuttle-app.

pub mod create;
