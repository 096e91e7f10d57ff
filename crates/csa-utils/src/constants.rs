//! Versions, download locations and documentation links.

/// Minimum rustc accepted without offering an install.
pub const RUSTC_VERSION: &str = ">=1.65.0";
/// Toolchain installed through rustup.
pub const RUSTC_TOOLCHAIN: &str = "1.65.0";

/// The cargo-shuttle release installed and checked for.
pub const SHUTTLE_VERSION: &str = "0.12.0";
pub const SHUTTLE_VERSION_REQ: &str = "^0.12.0";
pub const SHUTTLE_DOWNLOAD_URL: &str =
    "https://github.com/shuttle-hq/shuttle/releases/download/v0.12.0/";

pub const SHUTTLE_LINUX_TARGET: &str = "x86_64-unknown-linux-gnu";
pub const SHUTTLE_MAC_TARGET: &str = "x86_64-apple-darwin";
pub const SHUTTLE_WINDOWS_TARGET: &str = "x86_64-pc-windows-msvc";

pub const PROTOC_VERSION: &str = ">=3.21.9";
/// protoc release tag, which drops the leading `3.`.
pub const PROTOC_RELEASE: &str = "21.9";
pub const PROTOC_DOWNLOAD_URL: &str =
    "https://github.com/protocolbuffers/protobuf/releases/download/v21.9/";

pub const RUSTUP_SCRIPT_URL: &str = "https://sh.rustup.rs";
pub const RUSTUP_INIT_URL: &str =
    "https://static.rust-lang.org/rustup/dist/x86_64-pc-windows-msvc/rustup-init.exe";

pub const RUST_DOCS_URL: &str = "https://www.rust-lang.org/tools/install";
pub const SHUTTLE_DOCS_URL: &str = "https://docs.shuttle.rs/introduction/installation";
pub const PROTOC_DOCS_URL: &str =
    "https://grpc.io/docs/protoc-installation/#install-pre-compiled-binaries-any-os";
pub const PROTOC_WINDOWS_DOCS_URL: &str =
    "https://docs.shuttle.rs/support/installing-protoc#windows";

/// Backend template used when no other is requested.
pub const SHUTTLE_EXAMPLE_URL: &str =
    "https://github.com/shuttle-hq/examples/axum/static-next-server";
/// Root of the paired frontend/backend templates, as a template URL.
pub const FULLSTACK_TEMPLATES_URL: &str =
    "https://github.com/shuttle-hq/shuttle-examples/fullstack-templates";
/// The same directory in the form the frontend generator accepts.
pub const FULLSTACK_FRONTEND_URL: &str =
    "https://github.com/shuttle-hq/shuttle-examples/tree/main/fullstack-templates";

/// Frontend generator run through `npx`.
pub const NEXT_GENERATOR: &str = "create-next-app@latest";

pub const BACKEND_DIR: &str = "backend";
pub const NEXT_CONFIG_FILE: &str = "next.config.js";
/// Config file names Next.js accepts, in lookup order.
pub const NEXT_CONFIG_FILES: [&str; 3] = ["next.config.js", "next.config.mjs", "next.config.ts"];
pub const PACKAGE_JSON_FILE: &str = "package.json";
pub const SHUTTLE_CONFIG_FILE: &str = "Shuttle.toml";
