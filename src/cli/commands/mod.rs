//! CLI command implementations

pub mod completions;
pub mod config;
pub mod down;
pub mod init;
pub mod show;
pub mod status;
pub mod up;

pub use completions::execute as completions;
pub use config::execute as config;
pub use down::execute as down;
pub use init::execute as init;
pub use show::execute as show;
pub use status::execute as status;
pub use up::execute as up;

use crate::error::CampResult;
use crate::orchestration::CommandOutput;
use crate::ui::{self, TaskSpinner, UiContext};
use crate::workspace::{Failure, Report, Workspace};
use tracing::info;

/// Print the discovered packages; returns false when there are none
pub(crate) fn list_packages(ctx: &UiContext, workspace: &Workspace) -> bool {
    if workspace.is_empty() {
        ui::step_warn_hint(
            ctx,
            &format!("No Python packages found in {}", workspace.root().display()),
            "A package is a directory with setup.py and requirements.txt",
        );
        return false;
    }

    ui::section(ctx, "Found Python packages");
    for package in workspace.packages() {
        ui::item(ctx, &package.path().display().to_string());
    }
    true
}

/// Print failures recorded during one stage, with their captured output
pub(crate) fn print_failures(ctx: &UiContext, failures: &[Failure]) {
    for failure in failures {
        ui::step_error_detail(ctx, &format!("Failed to {}", failure.stage), &failure.subject);
        ui::output_block(ctx, &failure.detail);
    }
}

/// Log the output of a successful command at info level
pub(crate) fn log_output(subject: &str, result: &CampResult<CommandOutput>) {
    if let Ok(output) = result {
        if output.success() {
            let text = output.stdout.trim_end();
            if !text.is_empty() {
                info!("{}:\n{}", subject, text);
            }
        }
    }
}

/// Stop the stage spinner and print any failures it collected
pub(crate) fn finish_stage(
    ctx: &UiContext,
    spinner: &mut TaskSpinner,
    report: &Report,
    before: usize,
    done: &str,
) {
    let failures = &report.failures()[before..];
    if failures.is_empty() {
        spinner.stop(done);
    } else {
        spinner.stop_warn(&format!("{} failed", failures.len()));
        print_failures(ctx, failures);
    }
}
