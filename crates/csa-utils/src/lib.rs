//! Shared helpers for create-shuttle-app: constants, project files and
//! validation of user input.

pub mod config;
pub mod constants;
pub mod manifest;
pub mod name;
pub mod path;

pub use config::ShuttleConfig;
pub use manifest::{Manifest, PackageManager};
pub use name::{Validation, unique_name, validate};
pub use path::check_project_path;
