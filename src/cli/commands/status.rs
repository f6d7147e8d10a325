//! Status command - check the Python tools and summarize the workspace

use crate::config::Config;
use crate::error::CampResult;
use crate::orchestration::{CommandRunner, Invocation, PythonTools, SystemRunner};
use crate::workspace::Workspace;
use console::{style, Emoji};
use std::path::Path;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config, root: &Path) -> CampResult<()> {
    let runner = SystemRunner::new();
    let tools = PythonTools::from_config(config);

    println!("{}", style("camp status").bold().cyan());
    println!();

    println!("{}", style("Tools:").bold());
    let mut all_ok = check_tool(&runner, root, tools.virtualenv(), "pip install virtualenv").await;
    all_ok &= check_tool(&runner, root, tools.pip(), "python -m ensurepip").await;
    if let Some(python) = &config.tools.python {
        all_ok &= check_tool(&runner, root, python, "install the interpreter or unset tools.python")
            .await;
    }

    println!();
    println!("{}", style("Workspace:").bold());
    let workspace = Workspace::discover(root).await?;
    println!("  {} Root: {}", CHECK, workspace.root().display());

    if workspace.is_empty() {
        println!(
            "  {} {} - A package needs setup.py and requirements.txt",
            WARN,
            style("No packages found").yellow()
        );
    } else {
        let with_env = workspace
            .packages()
            .filter(|p| p.has_environment())
            .count();
        println!("  {} Packages: {}", CHECK, workspace.len());

        let marker = if with_env == workspace.len() { &CHECK } else { &WARN };
        println!(
            "  {} Virtualenvs: {}/{}",
            marker,
            with_env,
            workspace.len()
        );
        println!(
            "  {} Requirements: {}",
            CHECK,
            workspace.requirements().len()
        );
    }

    let artifacts = workspace.artifacts().await?;
    println!(
        "  {} Wheelhouse: {} wheel(s) in {}",
        CHECK,
        artifacts.len(),
        workspace.wheelhouse().display()
    );

    if !workspace.skipped().is_empty() {
        println!(
            "  {} Skipped: {} (see camp show --skipped)",
            WARN,
            workspace.skipped().len()
        );
    }

    println!();
    if all_ok {
        println!("{}", style("All tools found").green().bold());
    } else {
        println!(
            "{}",
            style("Some tools are missing - see above for details").yellow().bold()
        );
    }

    Ok(())
}

/// Run `<program> --version` and print the first line
async fn check_tool(
    runner: &dyn CommandRunner,
    cwd: &Path,
    program: &str,
    install_hint: &str,
) -> bool {
    let result = match Invocation::from_command(&PythonTools::version(program), cwd) {
        Ok(invocation) => runner.run(&invocation).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) if output.success() => {
            let version = output
                .lines()
                .into_iter()
                .next()
                .unwrap_or_else(|| "unknown".to_string());
            println!("  {} {} - {}", CHECK, style(program).green(), version.trim());
            true
        }
        _ => {
            println!(
                "  {} {} - Not found. Install: {}",
                CROSS,
                style(program).red(),
                install_hint
            );
            false
        }
    }
}
