//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_FILE};
use crate::error::{CampError, CampResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;
use toml_edit::{value, Array, DocumentMut, Item, Table};

/// Keys accepted by `camp config set`
const VALID_KEYS: &[&str] = &[
    "general.fail_fast",
    "tools.virtualenv",
    "tools.pip",
    "tools.python",
    "wheel.no_cache_dir",
    "wheel.extra_args",
    "install.extra_args",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
    root: &Path,
) -> CampResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&root.join(LOCAL_CONFIG_FILE), &key, &value).await?
            } else {
                set_value(manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> CampResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> CampResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

/// Set a key in the global config file, keeping only what the file already holds
async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> CampResult<()> {
    let ctx = UiContext::detect();
    if let Err(e) = validate_config_key(key) {
        ui::step_error_detail(&ctx, "Unknown config key", key);
        ui::remark(&ctx, "Valid keys:");
        print_valid_keys();
        return Err(e);
    }

    let mut config = manager.load().await?;
    apply(&mut config, key, value)?;
    manager.save(&config).await?;

    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));
    Ok(())
}

/// Set a key in the workspace's `.camp.toml`, preserving its comments
async fn set_local_value(path: &Path, key: &str, value: &str) -> CampResult<()> {
    let ctx = UiContext::detect();
    validate_config_key(key)?;

    let content = if path.exists() {
        fs::read_to_string(path)
            .await
            .map_err(|e| CampError::io(format!("reading {}", path.display()), e))?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse()?;
    set_document_value(&mut doc, key, value)?;

    fs::write(path, doc.to_string())
        .await
        .map_err(|e| CampError::io(format!("writing {}", path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Set {} = {} in {}", key, value, path.display()),
    );
    Ok(())
}

fn validate_config_key(key: &str) -> CampResult<()> {
    if VALID_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(CampError::User(format!("Unknown config key: {}", key)))
    }
}

fn apply(config: &mut Config, key: &str, value: &str) -> CampResult<()> {
    match key {
        "general.fail_fast" => config.general.fail_fast = parse_bool(value)?,
        "tools.virtualenv" => config.tools.virtualenv = value.to_string(),
        "tools.pip" => config.tools.pip = value.to_string(),
        "tools.python" => {
            config.tools.python = (!value.is_empty()).then(|| value.to_string())
        }
        "wheel.no_cache_dir" => config.wheel.no_cache_dir = parse_bool(value)?,
        "wheel.extra_args" => config.wheel.extra_args = parse_list(value),
        "install.extra_args" => config.install.extra_args = parse_list(value),
        _ => return Err(CampError::User(format!("Unknown config key: {}", key))),
    }
    Ok(())
}

/// Write a dotted key into a TOML document, creating the table when missing
fn set_document_value(doc: &mut DocumentMut, key: &str, raw: &str) -> CampResult<()> {
    let (section, leaf) = key
        .split_once('.')
        .ok_or_else(|| CampError::User(format!("Unknown config key: {}", key)))?;

    let item = match key {
        "general.fail_fast" | "wheel.no_cache_dir" => Some(value(parse_bool(raw)?)),
        "wheel.extra_args" | "install.extra_args" => {
            Some(value(parse_list(raw).into_iter().collect::<Array>()))
        }
        // An empty interpreter means "unset"
        "tools.python" if raw.is_empty() => None,
        _ => Some(value(raw)),
    };

    let table = doc
        .entry(section)
        .or_insert(Item::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| CampError::User(format!("Expected table at key: {}", section)))?;
    match item {
        Some(item) => table[leaf] = item,
        None => {
            table.remove(leaf);
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> CampResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CampError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn print_valid_keys() {
    for key in VALID_KEYS {
        println!("  {}", key);
    }
}
