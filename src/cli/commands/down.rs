//! Down command - remove virtualenvs and the wheelhouse

use super::finish_stage;
use crate::config::Config;
use crate::error::CampResult;
use crate::ui::{self, TaskSpinner, UiContext};
use crate::workspace::{Report, Stage, Workspace};
use std::path::Path;

/// Execute the down command
pub async fn execute(config: &Config, root: &Path) -> CampResult<()> {
    let ctx = UiContext::detect();
    let workspace = Workspace::discover(root).await?;
    let mut report = Report::new(config.general.fail_fast);

    ui::intro(&ctx, "camp down");

    let before = report.failures().len();
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Removing virtualenvs...");
    for package in workspace.packages() {
        spinner.message(&format!("Removing virtualenv of {}", package.name()));
        let outcome = package.remove_environment().await.map_err(|e| e.to_string());
        if let Err(e) = report.record(
            Stage::RemoveEnvironment,
            package.path().display().to_string(),
            outcome,
        ) {
            finish_stage(&ctx, &mut spinner, &report, before, "Virtualenvs removed");
            return Err(e);
        }
    }
    finish_stage(&ctx, &mut spinner, &report, before, "Virtualenvs removed");

    let before = report.failures().len();
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Removing wheels...");
    let outcome = workspace
        .clear_artifact_cache()
        .await
        .map_err(|e| e.to_string());
    let recorded = report.record(
        Stage::ClearWheelhouse,
        workspace.wheelhouse().display().to_string(),
        outcome,
    );
    finish_stage(&ctx, &mut spinner, &report, before, "Wheelhouse removed");
    recorded?;

    if report.is_clean() {
        ui::outro_success(&ctx, "Workspace is down");
    }
    report.finish()
}
