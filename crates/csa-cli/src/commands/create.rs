//! Implementation of project creation.
//!
//! Steps, in order: native dependencies, project directory, Next.js
//! frontend, Shuttle backend, then patching the generated files.

use crate::pipeline;
use crate::process::{self, RunOptions};
use crate::template::{self, Fetch, HttpFetcher};
use crate::toolchain::{self, Dependency, Host};
use crate::utils::print_status;
use anyhow::Result;
use csa_core::Error;
use csa_utils::constants::{
    BACKEND_DIR, NEXT_GENERATOR, PACKAGE_JSON_FILE, SHUTTLE_CONFIG_FILE,
};
use csa_utils::manifest::DEV_DEPENDENCY;
use csa_utils::{Manifest, PackageManager, ShuttleConfig, check_project_path, unique_name, validate};
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};

/// Frontend language variant passed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    JavaScript,
}

/// Everything the user asked for, resolved from flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Prompted for when absent.
    pub project_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub eslint: bool,
    /// Frontend example name or URL forwarded to the generator.
    pub example: Option<String>,
    /// Template URL the backend is downloaded from.
    pub backend_template: String,
}

impl CreateOptions {
    /// Arguments forwarded to `create-next-app`, ending with the path.
    #[must_use]
    pub fn generator_args(&self, path: &Path) -> Vec<String> {
        let mut args = Vec::new();

        match self.language {
            Some(Language::JavaScript) => args.push("--js".to_string()),
            Some(Language::TypeScript) => args.push("--ts".to_string()),
            None => {}
        }
        if let Some(example) = &self.example {
            args.push("--example".to_string());
            args.push(example.clone());
        }
        if self.eslint {
            args.push("--eslint".to_string());
        }

        args.push(path.to_string_lossy().into_owned());
        args
    }
}

/// Raised when the user aborts an interactive prompt.
#[derive(Debug, thiserror::Error)]
#[error("prompt aborted")]
pub struct PromptAborted;

/// The directory being created and the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Absolute project path.
    pub path: PathBuf,
    /// Final path component, used as the project name.
    pub name: String,
    /// Unique name the backend is deployed under.
    pub deployment_name: String,
}

impl Project {
    /// Resolves a user-supplied directory into a project.
    ///
    /// # Errors
    /// Returns [`Error::InvalidProjectName`] if the directory name breaks
    /// the naming rules.
    pub fn resolve(dir: &Path) -> Result<Self> {
        let path = std::path::absolute(dir)?;
        let name = project_name(&path);

        let validation = validate(&name);
        if !validation.is_valid() {
            return Err(Error::InvalidProjectName {
                name,
                problems: validation.problems,
            }
            .into());
        }

        Ok(Self {
            deployment_name: unique_name(&name),
            path,
            name,
        })
    }

    #[must_use]
    pub fn backend_dir(&self) -> PathBuf {
        self.path.join(BACKEND_DIR)
    }
}

fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Checks a prompted directory, returning the message shown on failure.
///
/// # Errors
/// Returns the first naming problem of the directory's final component.
pub fn validate_project_dir(input: &str) -> std::result::Result<(), String> {
    let input = input.trim();
    let name = std::path::absolute(input)
        .map(|path| project_name(&path))
        .unwrap_or_default();

    match validate(&name).problems.first() {
        Some(problem) => Err(format!("Invalid project name: {problem}")),
        None => Ok(()),
    }
}

/// Executes project creation.
///
/// # Errors
/// Returns an error if any step fails or the user declines a required
/// installation.
pub fn execute(options: CreateOptions) -> Result<()> {
    let host = Host::detect();
    let fetcher = HttpFetcher::new()?;
    tracing::debug!(?host, ?options, "starting");

    ensure_dependencies(&host, &fetcher)?;

    let project_dir = match &options.project_dir {
        Some(dir) => dir.clone(),
        None => prompt_project_dir()?,
    };
    let project = Project::resolve(&project_dir)?;
    check_project_path(&project.path)?;

    create_frontend(&options, &project)?;
    create_backend(&options.backend_template, &project, &fetcher)?;

    let package_manager = PackageManager::from_env();
    patch_package(&project.path, package_manager)?;

    print_status("Patching", "Next.js config");
    let config = pipeline::patch_next_config(&project.path)?;
    tracing::debug!(path = %config.display(), "patched config");

    print_success(&project_dir, &project, package_manager);
    Ok(())
}

/// Offers to install every missing native dependency.
fn ensure_dependencies(host: &Host, fetcher: &dyn Fetch) -> Result<()> {
    for dependency in Dependency::ALL {
        print_status(
            "Checking",
            &format!("{dependency} {}", dependency.version_req()),
        );
        if dependency.is_installed() {
            continue;
        }

        let prompt = format!(
            "create-shuttle-app requires {dependency} v{}, do you wish to install it now?",
            dependency.install_version()
        );
        if !confirm(&prompt)? {
            return Err(dependency.required_error().into());
        }

        print_status(
            "Installing",
            &format!("{dependency} v{}", dependency.install_version()),
        );
        toolchain::install(dependency, host, fetcher)?;
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    match Confirm::new().with_prompt(prompt).default(true).interact_opt() {
        Ok(Some(answer)) => Ok(answer),
        Ok(None) => Err(PromptAborted.into()),
        Err(err) => {
            tracing::debug!(error = %err, "confirm prompt failed");
            Err(PromptAborted.into())
        }
    }
}

fn prompt_project_dir() -> Result<PathBuf> {
    let answer: String = Input::new()
        .with_prompt("What is your project named?")
        .default("my-app".to_string())
        .validate_with(|input: &String| validate_project_dir(input))
        .interact_text()
        .map_err(|err| {
            tracing::debug!(error = %err, "project name prompt failed");
            PromptAborted
        })?;

    let answer = answer.trim();
    if answer.is_empty() {
        anyhow::bail!(
            "Please specify the project directory:\n  create-shuttle-app <project-directory>"
        );
    }
    Ok(PathBuf::from(answer))
}

fn create_frontend(options: &CreateOptions, project: &Project) -> Result<()> {
    print_status(
        "Creating",
        &format!("a new Next.js app in {}", project.path.display()),
    );

    let args = std::iter::once(NEXT_GENERATOR.to_string())
        .chain(options.generator_args(&project.path))
        .collect::<Vec<_>>();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    process::run("npx", &args, &RunOptions::new().inherit_stdout())?;
    Ok(())
}

fn create_backend(url: &str, project: &Project, fetcher: &dyn Fetch) -> Result<()> {
    let backend = project.backend_dir();

    print_status("Downloading", &format!("Shuttle backend from {url}"));
    template::clone_example(url, &backend, fetcher)?;

    ShuttleConfig::new(&project.deployment_name).save(backend.join(SHUTTLE_CONFIG_FILE))?;
    tracing::debug!(name = %project.deployment_name, "wrote Shuttle.toml");
    Ok(())
}

/// Rewrites the manifest scripts and installs their dev dependency.
///
/// # Errors
/// Returns an error if the manifest cannot be patched or the install fails.
pub fn patch_package(project: &Path, package_manager: PackageManager) -> Result<()> {
    print_status("Patching", PACKAGE_JSON_FILE);
    let mut manifest = Manifest::load(project.join(PACKAGE_JSON_FILE))?;
    manifest.set_scripts()?;
    manifest.save()?;

    print_status(
        "Installing",
        &format!("{DEV_DEPENDENCY} with {package_manager}"),
    );
    let args = package_manager.add_dev_args(DEV_DEPENDENCY);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    process::run(
        package_manager.command(),
        &args,
        &RunOptions::new().cwd(project),
    )?;
    Ok(())
}

fn print_success(project_dir: &Path, project: &Project, package_manager: PackageManager) {
    print_status(
        "Finished",
        &format!("created {} at {}", project.name, project.path.display()),
    );
    println!();
    println!("Your Shuttle project is named {}", project.deployment_name);
    println!();
    println!("To get started:");
    println!("  cd {}", project_dir.display());
    println!("  {package_manager} run shuttle-login");
    println!("  {package_manager} run dev");
    println!();
    println!("To deploy:");
    println!("  {package_manager} run deploy");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CreateOptions {
        CreateOptions {
            project_dir: None,
            language: None,
            eslint: false,
            example: None,
            backend_template: "https://github.com/shuttle-hq/examples/axum/static-next-server"
                .to_string(),
        }
    }

    #[test]
    fn test_generator_args_order() {
        let options = CreateOptions {
            language: Some(Language::JavaScript),
            eslint: true,
            example: Some("blog".to_string()),
            ..options()
        };
        assert_eq!(
            options.generator_args(Path::new("/tmp/my-app")),
            ["--js", "--example", "blog", "--eslint", "/tmp/my-app"]
        );
    }

    #[test]
    fn test_generator_args_minimal() {
        assert_eq!(options().generator_args(Path::new("/tmp/app")), ["/tmp/app"]);
    }

    #[test]
    fn test_project_resolve() {
        let project = Project::resolve(Path::new("some/dir/my-app")).unwrap();
        assert!(project.path.is_absolute());
        assert!(project.path.ends_with("some/dir/my-app"));
        assert_eq!(project.name, "my-app");
        assert!(project.deployment_name.starts_with("my-app-"));
        assert_eq!(project.deployment_name.len(), "my-app-".len() + 6);
        assert!(project.backend_dir().ends_with("my-app/backend"));
    }

    #[test]
    fn test_project_resolve_rejects_bad_names() {
        let err = Project::resolve(Path::new("shuttle")).unwrap_err();
        let err = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(err, Error::InvalidProjectName { .. }));
        assert_eq!(err.problems(), vec!["\"shuttle\" is a reserved name".to_string()]);
    }

    #[test]
    fn test_validate_project_dir() {
        assert_eq!(validate_project_dir("my-app"), Ok(()));
        assert_eq!(validate_project_dir("  nested/my-app  "), Ok(()));
        assert_eq!(
            validate_project_dir("-bad-"),
            Err("Invalid project name: must not start or end with a hyphen".to_string())
        );
    }
}
