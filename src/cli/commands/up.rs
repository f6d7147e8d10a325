//! Up command - create virtualenvs, build wheels, install requirements

use super::{finish_stage, list_packages, log_output, print_failures};
use crate::cli::args::UpArgs;
use crate::config::Config;
use crate::error::{CampError, CampResult};
use crate::orchestration::{CommandRunner, PythonTools, SystemRunner};
use crate::ui::{self, TaskSpinner, UiContext, WheelProgress};
use crate::workspace::{step_outcome, Report, Stage, Workspace};
use std::ops::ControlFlow;
use std::path::Path;
use tracing::debug;

/// Execute the up command
pub async fn execute(args: UpArgs, config: &Config, root: &Path) -> CampResult<()> {
    let ctx = UiContext::detect();
    let workspace = Workspace::discover(root).await?;
    let runner = SystemRunner::new();
    let tools = PythonTools::from_config(config);
    let mut report = Report::new(args.fail_fast || config.general.fail_fast);
    debug!("Using {} runner", runner.runner_name());

    ui::intro(&ctx, "camp up");

    if !list_packages(&ctx, &workspace) {
        return Ok(());
    }

    create_environments(&ctx, &workspace, &runner, &tools, args.force, &mut report).await?;
    build_wheels(&ctx, &workspace, &runner, &tools, &mut report).await?;
    install_requirements(&ctx, &workspace, &runner, &tools, &mut report).await?;

    if report.is_clean() {
        ui::outro_success(&ctx, "Workspace is up");
    } else {
        ui::outro_error(
            &ctx,
            &format!("{} step(s) failed, see above", report.failures().len()),
        );
    }
    report.finish()
}

async fn create_environments(
    ctx: &UiContext,
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    tools: &PythonTools,
    force: bool,
    report: &mut Report,
) -> CampResult<()> {
    let before = report.failures().len();
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Creating virtualenvs...");

    let mut stopped = None;
    for package in workspace.packages() {
        spinner.message(&format!("Creating virtualenv for {}", package.name()));

        let subject = package.path().display().to_string();
        let outcome = match package.create_environment(runner, tools, force).await {
            Ok(None) => Ok(()),
            Ok(Some(output)) => {
                let result = Ok(output);
                log_output(&subject, &result);
                step_outcome(&result)
            }
            Err(e) => Err(e.to_string()),
        };

        if let Err(e) = report.record(Stage::CreateEnvironment, subject, outcome) {
            stopped = Some(e);
            break;
        }
    }

    finish_stage(ctx, &mut spinner, report, before, "Virtualenvs ready");
    stopped.map_or(Ok(()), Err)
}

async fn build_wheels(
    ctx: &UiContext,
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    tools: &PythonTools,
    report: &mut Report,
) -> CampResult<()> {
    let before = report.failures().len();
    let progress = WheelProgress::new(ctx, workspace.requirements().len());

    let mut stopped: Option<CampError> = None;
    let built = workspace
        .build_artifact_cache(runner, tools, |build| {
            progress.on_built(&build.requirement, build.succeeded());
            log_output(&build.requirement, &build.result);

            let outcome = step_outcome(&build.result);
            match report.record(Stage::BuildWheel, build.requirement.clone(), outcome) {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    stopped = Some(e);
                    ControlFlow::Break(())
                }
            }
        })
        .await;
    progress.finish();

    let built = built?;
    let failed = report.failures().len() - before;
    if failed == 0 {
        ui::step_ok_detail(
            ctx,
            "Wheels ready",
            &format!("{} in {}", built.len(), workspace.wheelhouse().display()),
        );
    } else {
        ui::step_warn(ctx, &format!("{} of {} wheels failed", failed, built.len()));
        print_failures(ctx, &report.failures()[before..]);
    }

    stopped.map_or(Ok(()), Err)
}

async fn install_requirements(
    ctx: &UiContext,
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    tools: &PythonTools,
    report: &mut Report,
) -> CampResult<()> {
    let before = report.failures().len();
    let wheelhouse = workspace.wheelhouse();
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Installing requirements...");

    let mut stopped = None;
    for package in workspace.packages() {
        spinner.message(&format!("Installing requirements for {}", package.name()));

        let subject = package.path().display().to_string();
        let result = package
            .install_requirements(runner, tools, &wheelhouse)
            .await;
        log_output(&subject, &result);

        if let Err(e) = report.record(Stage::InstallRequirements, subject, step_outcome(&result)) {
            stopped = Some(e);
            break;
        }
    }

    finish_stage(ctx, &mut spinner, report, before, "Requirements installed");
    stopped.map_or(Ok(()), Err)
}
