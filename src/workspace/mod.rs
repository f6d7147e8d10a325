//! Workspace of sibling Python packages
//!
//! A workspace is a root directory whose immediate subdirectories may be
//! Python packages. It aggregates their requirements and owns the shared
//! wheelhouse every package installs from.
//!
//! ```text
//! root/
//! ├── wheelhouse/          shared wheels, one build per requirement
//! ├── pkg-a/
//! │   ├── setup.py
//! │   ├── requirements.txt
//! │   └── venv/            created by `camp up`
//! └── docs/                skipped, no setup.py
//! ```

pub mod discovery;
mod package;
pub mod report;

pub use discovery::{classify, Candidate, Rejected, Rejection};
pub use package::{parse_requirements, Package, ENV_DIR, REQUIREMENTS_FILE, SETUP_FILE};
pub use report::{step_outcome, Failure, Report, Stage};

use crate::error::{CampError, CampResult};
use crate::orchestration::{CommandOutput, CommandRunner, Invocation, PythonTools};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Name of the shared wheel directory at the workspace root
pub const WHEELHOUSE_DIR: &str = "wheelhouse";

/// Outcome of building the wheel for one requirement
#[derive(Debug)]
pub struct WheelBuild {
    /// The requirement string passed to pip
    pub requirement: String,
    /// Captured pip output, or the spawn error
    pub result: CampResult<CommandOutput>,
}

impl WheelBuild {
    /// Whether pip ran and exited successfully
    pub fn succeeded(&self) -> bool {
        matches!(self.result, Ok(ref output) if output.success())
    }
}

/// Discovered packages under a root directory
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    packages: BTreeMap<PathBuf, Package>,
    skipped: Vec<Rejected>,
}

impl Workspace {
    /// Scan the immediate entries of `root` for packages.
    ///
    /// Entries that are not packages are left out and remembered in
    /// `skipped`. Only failing to read `root` itself is an error.
    pub async fn discover(root: impl AsRef<Path>) -> CampResult<Self> {
        let root = root.as_ref();
        let root = std::path::absolute(root)
            .map_err(|e| CampError::io(format!("resolving {}", root.display()), e))?;

        let read_error =
            |e: std::io::Error| CampError::io(format!("reading directory {}", root.display()), e);
        let mut entries = fs::read_dir(&root).await.map_err(read_error)?;

        let mut packages = BTreeMap::new();
        let mut skipped = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
            match classify(&root.join(entry.file_name())) {
                Candidate::Package(package) => {
                    debug!("Found package: {}", package.path().display());
                    packages.insert(package.path().to_path_buf(), package);
                }
                Candidate::Rejected(rejected) => {
                    if let Rejection::UnreadableManifest(_) = rejected.reason {
                        warn!("Skipping {}: {}", rejected.path.display(), rejected.reason);
                    } else {
                        debug!("Skipping {}: {}", rejected.path.display(), rejected.reason);
                    }
                    skipped.push(rejected);
                }
            }
        }

        skipped.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Discovered {} packages in {}", packages.len(), root.display());

        Ok(Self {
            root,
            packages,
            skipped,
        })
    }

    /// Absolute workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Packages ordered by path
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether no packages were found
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Entries that were not packages, ordered by path
    pub fn skipped(&self) -> &[Rejected] {
        &self.skipped
    }

    /// Union of every package's requirements
    pub fn requirements(&self) -> BTreeSet<String> {
        self.packages
            .values()
            .flat_map(|p| p.requirements().iter().cloned())
            .collect()
    }

    /// Path of the shared wheelhouse
    pub fn wheelhouse(&self) -> PathBuf {
        self.root.join(WHEELHOUSE_DIR)
    }

    /// Files currently in the wheelhouse, sorted; empty if it does not exist
    pub async fn artifacts(&self) -> CampResult<Vec<PathBuf>> {
        let dir = self.wheelhouse();
        let read_error =
            |e: std::io::Error| CampError::io(format!("reading {}", dir.display()), e);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_error(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
            if entry.file_type().await.map_err(read_error)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Build one wheel per distinct requirement into the wheelhouse.
    ///
    /// Each requirement gets its own `pip wheel` run so a bad one does not
    /// block the rest. `on_built` sees every result as it arrives and can
    /// stop the loop with `ControlFlow::Break`.
    pub async fn build_artifact_cache<F>(
        &self,
        runner: &dyn CommandRunner,
        tools: &PythonTools,
        mut on_built: F,
    ) -> CampResult<Vec<WheelBuild>>
    where
        F: FnMut(&WheelBuild) -> ControlFlow<()>,
    {
        let wheelhouse = self.wheelhouse();
        fs::create_dir_all(&wheelhouse)
            .await
            .map_err(|e| CampError::io(format!("creating {}", wheelhouse.display()), e))?;

        let mut builds = Vec::new();
        for requirement in self.requirements() {
            let command = tools.wheel(&wheelhouse, &requirement);
            let result = match Invocation::from_command(&command, &self.root) {
                Ok(invocation) => runner.run(&invocation).await,
                Err(e) => Err(e),
            };

            let build = WheelBuild {
                requirement,
                result,
            };
            let flow = on_built(&build);
            builds.push(build);

            if flow.is_break() {
                break;
            }
        }

        Ok(builds)
    }

    /// Delete the wheelhouse; a missing one is not an error
    pub async fn clear_artifact_cache(&self) -> CampResult<()> {
        let dir = self.wheelhouse();
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                info!("Removed {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CampError::io(format!("removing {}", dir.display()), e)),
        }
    }
}
