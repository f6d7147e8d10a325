//! A single Python package and its virtualenv

use crate::error::{CampError, CampResult};
use crate::orchestration::{CommandOutput, CommandRunner, Invocation, PythonTools};
use crate::workspace::discovery::{classify, Candidate};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Setup descriptor that marks a directory as a package
pub const SETUP_FILE: &str = "setup.py";
/// Requirements manifest read for every package
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
/// Name of the virtualenv directory inside each package
pub const ENV_DIR: &str = "venv";

#[cfg(windows)]
const ENV_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const ENV_BIN_DIR: &str = "bin";

/// Parse a requirements manifest into its set of requirement strings.
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are
/// dropped. The rest of each line is opaque and version specifiers are left
/// to pip.
pub fn parse_requirements(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A directory holding `setup.py` and `requirements.txt`.
///
/// Identity is the absolute path; requirements are read once when the
/// package is constructed.
#[derive(Debug, Clone)]
pub struct Package {
    path: PathBuf,
    requirements: BTreeSet<String>,
}

impl Package {
    /// Validate `path` and load its requirements
    pub fn new(path: impl AsRef<Path>) -> CampResult<Self> {
        match classify(path.as_ref()) {
            Candidate::Package(package) => Ok(package),
            Candidate::Rejected(rejected) => Err(CampError::NotAPackage {
                path: rejected.path,
                reason: rejected.reason.to_string(),
            }),
        }
    }

    pub(crate) fn from_parts(path: PathBuf, requirements: BTreeSet<String>) -> Self {
        Self { path, requirements }
    }

    /// Absolute path of the package directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name, for display
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Declared requirements, deduplicated
    pub fn requirements(&self) -> &BTreeSet<String> {
        &self.requirements
    }

    /// Path of `requirements.txt`
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(REQUIREMENTS_FILE)
    }

    /// Path of the virtualenv directory (may not exist)
    pub fn environment_path(&self) -> PathBuf {
        self.path.join(ENV_DIR)
    }

    /// Whether the virtualenv directory exists
    pub fn has_environment(&self) -> bool {
        self.environment_path().is_dir()
    }

    /// Create the virtualenv.
    ///
    /// Returns `None` without running anything when one already exists and
    /// `force` is false. With `force`, the existing environment is removed
    /// first so nothing from it survives.
    pub async fn create_environment(
        &self,
        runner: &dyn CommandRunner,
        tools: &PythonTools,
        force: bool,
    ) -> CampResult<Option<CommandOutput>> {
        if self.has_environment() {
            if !force {
                debug!("Virtualenv exists in {}, skipping", self.path.display());
                return Ok(None);
            }
            info!("Recreating virtualenv in {}", self.path.display());
            self.remove_environment().await?;
        }

        let output = self
            .run_in_path(runner, &tools.create_env(ENV_DIR), &self.path)
            .await?;
        Ok(Some(output))
    }

    /// Delete the virtualenv; a missing one is not an error
    pub async fn remove_environment(&self) -> CampResult<()> {
        let env = self.environment_path();
        match fs::remove_dir_all(&env).await {
            Ok(()) => {
                info!("Removed {}", env.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CampError::io(format!("removing {}", env.display()), e)),
        }
    }

    /// Install the package's requirements from the wheelhouse
    pub async fn install_requirements(
        &self,
        runner: &dyn CommandRunner,
        tools: &PythonTools,
        wheelhouse: &Path,
    ) -> CampResult<CommandOutput> {
        let command = tools.install(wheelhouse, &self.manifest_path());
        self.run_in_environment(runner, &command).await
    }

    /// Installed distributions as reported by `pip freeze`
    pub async fn list_installed(
        &self,
        runner: &dyn CommandRunner,
        tools: &PythonTools,
    ) -> CampResult<Vec<String>> {
        let output = self.run_in_environment(runner, &tools.freeze()).await?;
        if !output.success() {
            return Err(CampError::command_exec("pip freeze", output.diagnostics()));
        }
        Ok(output.lines())
    }

    /// Run a command inside the activated virtualenv.
    ///
    /// The environment directory is the working directory, `VIRTUAL_ENV` is
    /// set and its `bin` directory leads `PATH`. A bare program name that
    /// exists in the environment resolves to that executable.
    pub async fn run_in_environment(
        &self,
        runner: &dyn CommandRunner,
        command: &[String],
    ) -> CampResult<CommandOutput> {
        let env = self.environment_path();
        if !env.is_dir() {
            return Err(CampError::EnvironmentMissing(self.path.clone()));
        }

        let bin = env.join(ENV_BIN_DIR);
        let mut invocation = Invocation::from_command(command, &env)?;
        invocation.program = resolve_program(&bin, &invocation.program);

        let invocation = invocation
            .env("VIRTUAL_ENV", env.display().to_string())
            .env("PATH", prepend_path(&bin));

        runner.run(&invocation).await
    }

    /// Run a command with `dir` as the working directory
    pub async fn run_in_path(
        &self,
        runner: &dyn CommandRunner,
        command: &[String],
        dir: &Path,
    ) -> CampResult<CommandOutput> {
        let invocation = Invocation::from_command(command, dir)?;
        runner.run(&invocation).await
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

/// Map a bare program name to the environment's copy if it has one
fn resolve_program(bin: &Path, program: &str) -> String {
    if Path::new(program).components().count() != 1 {
        return program.to_string();
    }

    let candidates = [PathBuf::from(program), PathBuf::from(format!("{}.exe", program))];
    candidates
        .iter()
        .map(|name| bin.join(name))
        .find(|path| path.is_file())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| program.to_string())
}

/// `PATH` with `bin` in front of the inherited entries
fn prepend_path(bin: &Path) -> String {
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let entries = std::iter::once(bin.to_path_buf()).chain(std::env::split_paths(&inherited));
    std::env::join_paths(entries)
        .unwrap_or_else(|_| OsString::from(bin.as_os_str()))
        .to_string_lossy()
        .to_string()
}
