//! Handlers for `etalase config {path,get,set,init,export}`.
//!
//! Each command builds its output as a string and the dispatcher prints it,
//! so the handlers can be tested without capturing stdout.

use std::path::{Path, PathBuf};

use etalase_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::EtalaseConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path rather than a loaded config because
/// `path` and `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let output = match action {
        ConfigAction::Path => config_path_report(config_path)?,
        ConfigAction::Get { key } => config_get(config_path, &key)?,
        ConfigAction::Set { key, value } => config_set(config_path, &key, &value)?,
        ConfigAction::Init { file, force } => config_init(file.as_deref(), force)?,
        ConfigAction::Export { docker_env } => {
            config_export(&EtalaseConfig::load(config_path)?, docker_env)?
        }
    };
    println!("{output}");
    Ok(())
}

// ============================================================================
// Command handlers
// ============================================================================

fn config_path_report(config_path: Option<&str>) -> Result<String> {
    let path = EtalaseConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    if !path.exists() {
        eprintln!("(file does not exist; run `etalase config init` to create it)");
    }
    Ok(path.display().to_string())
}

fn config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = EtalaseConfig::load(config_path)?;
    let tree = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&tree, key)
        .map(display_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Update one key in the config file, refusing values the config cannot load.
fn config_set(config_path: Option<&str>, key: &str, raw: &str) -> Result<String> {
    let path = EtalaseConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `etalase config init` first.",
            path.display()
        )));
    }

    let mut tree = read_toml(&path)?;
    assign(&mut tree, key, infer_value(raw))?;

    tree.clone()
        .try_into::<EtalaseConfig>()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let text = toml::to_string_pretty(&tree).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Set {key} = {raw} in {}", path.display()))
}

fn config_init(file: Option<&str>, force: bool) -> Result<String> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => EtalaseConfig::default_config_path()
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

    let text = EtalaseConfig::default().to_toml_string()?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Config file created at {}", path.display()))
}

fn config_export(config: &EtalaseConfig, docker_env: bool) -> Result<String> {
    let flag = if docker_env { "--env " } else { "" };
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{flag}{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn read_toml(path: &Path) -> Result<toml::Value> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    toml::from_str(&text)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
}

fn lookup<'a>(tree: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(tree, |node, part| node.as_table()?.get(part))
}

/// Set `key` in `tree`, creating intermediate tables.
fn assign(tree: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::config(format!("Malformed key '{key}'")));
    }

    let mut node = tree;
    for part in parents {
        node = node
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{part}' is not inside a table")))?
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    node.as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{key}' on a non-table value")))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Type a raw CLI value: bool, then integer, then float, else string.
fn infer_value(raw: &str) -> toml::Value {
    match raw {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => raw
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| raw.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(raw.to_string())),
    }
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, EtalaseConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // path / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_path_explicit() {
        let out = config_path_report(Some("/explicit/config.toml")).unwrap();
        assert_eq!(out, "/explicit/config.toml");
    }

    #[test]
    fn test_config_get_values() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let path = path.to_str().unwrap();

        assert_eq!(config_get(Some(path), "project_name").unwrap(), "etalase");
        assert_eq!(config_get(Some(path), "server.port").unwrap(), "3000");
        assert_eq!(config_get(Some(path), "content.extension").unwrap(), "md");
        assert!(config_get(Some(path), "server").unwrap().contains("port = 3000"));
    }

    #[test]
    fn test_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let err = config_get(Some(path.to_str().unwrap()), "server.nope").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_set_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let path_str = path.to_str().unwrap();

        config_set(Some(path_str), "server.port", "8080").unwrap();
        config_set(Some(path_str), "content.root", "/srv/konten").unwrap();

        let config = EtalaseConfig::load(Some(path_str)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.root.as_deref(), Some("/srv/konten"));
    }

    #[test]
    fn test_config_set_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = config_set(Some(path.to_str().unwrap()), "server.port", "lima").unwrap_err();
        assert!(err.to_string().contains("server.port"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_config_set_missing_file() {
        let err = config_set(Some("/nonexistent/config.toml"), "a", "b").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // init / export
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_init_creates_and_protects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("etalase").join("config.toml");
        let path_str = path.to_str().unwrap();

        config_init(Some(path_str), false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[content]"));
        assert!(content.contains("[server]"));

        let err = config_init(Some(path_str), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(config_init(Some(path_str), true).is_ok());
    }

    #[test]
    fn test_config_export_formats() {
        let config = EtalaseConfig::default();
        let plain = config_export(&config, false).unwrap();
        assert!(plain.lines().any(|l| l == "ETALASE_SERVER_PORT=3000"));

        let docker = config_export(&config, true).unwrap();
        assert!(docker.lines().all(|l| l.starts_with("--env ETALASE_")));
    }

    // ------------------------------------------------------------------------
    // helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_assign_creates_tables() {
        let mut tree = toml::Value::Table(toml::map::Map::new());
        assign(&mut tree, "server.port", toml::Value::Integer(3000)).unwrap();
        assert_eq!(lookup(&tree, "server.port"), Some(&toml::Value::Integer(3000)));
    }

    #[test]
    fn test_assign_rejects_bad_paths() {
        let mut tree: toml::Value = toml::from_str("port = 1").unwrap();
        assert!(assign(&mut tree, "port.inner", toml::Value::Integer(2)).is_err());
        assert!(assign(&mut tree, "a..b", toml::Value::Integer(2)).is_err());
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value("true"), toml::Value::Boolean(true));
        assert_eq!(infer_value("42"), toml::Value::Integer(42));
        assert_eq!(infer_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(infer_value("kaos"), toml::Value::String("kaos".into()));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&toml::Value::String("x".into())), "x");
        assert_eq!(display_value(&toml::Value::Integer(9)), "9");
        assert_eq!(display_value(&toml::Value::Boolean(false)), "false");
    }
}
