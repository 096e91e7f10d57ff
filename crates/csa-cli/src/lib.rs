//! create-shuttle-app library for testing and reusability.

pub mod cli;
pub mod commands;
pub mod pipeline;
pub mod process;
pub mod template;
pub mod toolchain;
pub mod utils;

pub use cli::Cli;
pub use commands::create::CreateOptions;
