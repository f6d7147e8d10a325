//! Show command - list packages and what is installed in each virtualenv

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::{CampError, CampResult};
use crate::orchestration::{PythonTools, SystemRunner};
use crate::ui::{self, UiContext};
use crate::workspace::{Package, Workspace};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One package and its `pip freeze` listing
#[derive(Debug, Serialize)]
struct PackageListing {
    path: PathBuf,
    requirements: Vec<String>,
    environment: bool,
    installed: Option<Vec<String>>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct SkippedEntry {
    path: PathBuf,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ShowJson<'a> {
    root: &'a Path,
    packages: &'a [PackageListing],
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<Vec<SkippedEntry>>,
}

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config, root: &Path) -> CampResult<()> {
    let workspace = Workspace::discover(root).await?;
    let runner = SystemRunner::new();
    let tools = PythonTools::from_config(config);

    let mut listings = Vec::new();
    for package in workspace.packages() {
        listings.push(listing(package, &runner, &tools).await);
    }

    match args.format {
        OutputFormat::Table => print_table(&workspace, &listings, args.skipped),
        OutputFormat::Json => print_json(&workspace, &listings, args.skipped)?,
        OutputFormat::Plain => print_plain(&listings),
    }

    Ok(())
}

async fn listing(package: &Package, runner: &SystemRunner, tools: &PythonTools) -> PackageListing {
    let (installed, error) = match package.list_installed(runner, tools).await {
        Ok(lines) => (Some(lines), None),
        Err(CampError::EnvironmentMissing(_)) => (None, None),
        Err(e) => (None, Some(e.to_string())),
    };

    PackageListing {
        path: package.path().to_path_buf(),
        requirements: package.requirements().iter().cloned().collect(),
        environment: package.has_environment(),
        installed,
        error,
    }
}

fn print_table(workspace: &Workspace, listings: &[PackageListing], skipped: bool) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "camp show");

    if super::list_packages(&ctx, workspace) {
        for listing in listings {
            ui::section(&ctx, &format!("Packages in {}", listing.path.display()));
            match (&listing.installed, &listing.error) {
                (Some(installed), _) if installed.is_empty() => {
                    ui::remark(&ctx, "nothing installed")
                }
                (Some(installed), _) => {
                    for line in installed {
                        ui::item(&ctx, line);
                    }
                }
                (None, Some(error)) => ui::step_error_detail(&ctx, "pip freeze failed", error),
                (None, None) => ui::step_warn_hint(&ctx, "No virtualenv", "Run: camp up"),
            }
        }
    }

    if skipped && !workspace.skipped().is_empty() {
        ui::section(&ctx, "Skipped");
        for rejected in workspace.skipped() {
            ui::item(
                &ctx,
                &format!("{} ({})", rejected.path.display(), rejected.reason),
            );
        }
    }
}

fn print_json(
    workspace: &Workspace,
    listings: &[PackageListing],
    skipped: bool,
) -> CampResult<()> {
    let skipped = skipped.then(|| {
        workspace
            .skipped()
            .iter()
            .map(|r| SkippedEntry {
                path: r.path.clone(),
                reason: r.reason.to_string(),
            })
            .collect()
    });

    let json = ShowJson {
        root: workspace.root(),
        packages: listings,
        skipped,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_plain(listings: &[PackageListing]) {
    for listing in listings {
        println!("{}", listing.path.display());
        for line in listing.installed.iter().flatten() {
            println!("    {}", line);
        }
    }
}
