//! Init command - create a workspace-local .camp.toml

use crate::cli::args::InitArgs;
use crate::config::LOCAL_CONFIG_FILE;
use crate::error::{CampError, CampResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;

/// Template for the workspace config
const INIT_TEMPLATE: &str = r#"# camp workspace configuration
# Settings here override your global config (~/.config/camp/config.toml)

[general]
# fail_fast = false

[tools]
# virtualenv = "virtualenv"
# pip = "pip"
# python = "python3"

[wheel]
# no_cache_dir = true
# extra_args = ["--prefer-binary"]

[install]
# extra_args = []
"#;

/// Execute the init command
pub async fn execute(args: InitArgs, root: &Path) -> CampResult<()> {
    let ctx = UiContext::detect();
    let config_path = root.join(LOCAL_CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(CampError::User(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if !root.is_dir() {
        fs::create_dir_all(root)
            .await
            .map_err(|e| CampError::io(format!("creating directory {}", root.display()), e))?;
    }

    fs::write(&config_path, INIT_TEMPLATE)
        .await
        .map_err(|e| CampError::io(format!("writing {}", config_path.display()), e))?;

    ui::step_ok_detail(
        &ctx,
        "Created workspace config",
        &config_path.display().to_string(),
    );

    Ok(())
}
