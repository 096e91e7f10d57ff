//! Command-line flags.

use crate::commands::create::{CreateOptions, Language};
use clap::Parser;
use csa_utils::constants::{FULLSTACK_FRONTEND_URL, FULLSTACK_TEMPLATES_URL, SHUTTLE_EXAMPLE_URL};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-shuttle-app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub project_directory: Option<PathBuf>,

    /// Initialize as a TypeScript project (default)
    #[arg(long = "ts", visible_alias = "typescript", conflicts_with = "javascript")]
    pub typescript: bool,

    /// Initialize as a JavaScript project
    #[arg(long = "js", visible_alias = "javascript")]
    pub javascript: bool,

    /// Initialize with eslint config
    #[arg(long)]
    pub eslint: bool,

    /// An example to bootstrap the app with. You can use an example name
    /// from the official Next.js repo or a GitHub URL. The URL can use any
    /// branch and/or subdirectory
    #[arg(short, long, value_name = "NAME|GITHUB-URL")]
    pub example: Option<String>,

    /// A GitHub URL to bootstrap the Shuttle backend with
    #[arg(long, value_name = "GITHUB-URL")]
    pub shuttle_example: Option<String>,

    /// A paired frontend and backend template from the Shuttle examples
    #[arg(long, value_name = "NAME", conflicts_with_all = ["example", "shuttle_example"])]
    pub fullstack_example: Option<String>,

    /// Print debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolves the flags into the options used for creating a project.
    #[must_use]
    pub fn into_options(self) -> CreateOptions {
        let (example, backend_template) = match self.fullstack_example {
            Some(name) => (
                Some(format!("{FULLSTACK_FRONTEND_URL}/{name}/frontend")),
                format!("{FULLSTACK_TEMPLATES_URL}/{name}/backend"),
            ),
            None => (
                self.example,
                self.shuttle_example
                    .unwrap_or_else(|| SHUTTLE_EXAMPLE_URL.to_string()),
            ),
        };

        let language = if self.javascript {
            Some(Language::JavaScript)
        } else if self.typescript {
            Some(Language::TypeScript)
        } else {
            None
        };

        CreateOptions {
            project_dir: self.project_directory,
            language,
            eslint: self.eslint,
            example,
            backend_template,
        }
    }
}
