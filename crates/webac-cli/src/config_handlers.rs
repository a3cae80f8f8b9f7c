//! Handlers for `webac config` subcommands.
//!
//! Handlers write to a caller-supplied sink so they can be exercised
//! without capturing stdout.

use std::io::Write;
use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::WebacConfig;
use crate::error::{Error, Result};

/// Dispatch a config subcommand, writing results to stdout.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match action {
        ConfigAction::Path => cmd_config_path(config_path, &mut out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, &mut out),
        ConfigAction::Show => cmd_config_show(config_path, &mut out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, &mut out),
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let path = WebacConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display()).map_err(|e| Error::io_with_path(e, &path))?;
    if !path.exists() {
        eprintln!("(file does not exist; run `webac config init` to create it)");
    }
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut dyn Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => WebacConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = WebacConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())
        .map_err(|e| Error::io_with_path(e, &path))?;
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn cmd_config_show(config_path: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let config = WebacConfig::load(config_path)?;
    let toml_str = config.to_toml_string()?;
    out.write_all(toml_str.as_bytes())
        .map_err(|e| Error::io_with_path(e, "<stdout>"))
}

/// Print one configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut dyn Write) -> Result<()> {
    let config = WebacConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", format_toml_value(found)).map_err(|e| Error::io_with_path(e, "<stdout>"))
}

/// Follow a dotted key through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Render a TOML value for display: scalars bare, tables and arrays as TOML.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
