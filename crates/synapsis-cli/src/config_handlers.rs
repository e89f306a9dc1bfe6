//! Handlers for the `config` subcommands.
//!
//! The `cmd_config_*` functions are generic over [`ConfigManager`] so the
//! dotted-key helpers work on any TOML-backed config.

use std::io::Write;
use std::path::PathBuf;

use log::info;

use crate::cli::ConfigAction;
use crate::config::{ConfigManager, SynapsisConfig};
use crate::error::{Error, Result};

// ============================================================================
// Dispatch
// ============================================================================

/// Handle a config subcommand for [`SynapsisConfig`].
pub fn handle_config_command<W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<SynapsisConfig, _>(out, config_path),
        ConfigAction::Show => cmd_config_show::<SynapsisConfig, _>(out, config_path),
        ConfigAction::Get { key } => cmd_config_get::<SynapsisConfig, _>(out, config_path, &key),
        ConfigAction::Set { key, value } => {
            cmd_config_set::<SynapsisConfig, _>(out, config_path, &key, &value)
        }
        ConfigAction::Init { file, force } => {
            let target = file.as_deref().or(config_path);
            cmd_config_init::<SynapsisConfig, _>(out, target, force)
        }
    }
}

// ============================================================================
// Generic handlers
// ============================================================================

/// Print the resolved config file path.
pub fn cmd_config_path<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            C::project_name()
        );
    }
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn cmd_config_show<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
) -> Result<()> {
    let config = C::load(config_path)?;
    write!(out, "{}", config.to_toml_string()?)?;
    Ok(())
}

/// Print one configuration value by dotted key.
pub fn cmd_config_get<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    key: &str,
) -> Result<()> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", format_toml_value(found))?;
    Ok(())
}

/// Set one value by dotted key, rewriting the config file.
///
/// The edited file must still parse as `C`; otherwise nothing is written.
pub fn cmd_config_set<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    set_nested_value(&mut doc, key, parse_value(value))?;

    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<C>(&rendered)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;

    info!("Updated {key} in {}", path.display());
    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

/// Write a default configuration file.
pub fn cmd_config_init<C: ConfigManager, W: Write>(
    out: &mut W,
    file: Option<&str>,
    force: bool,
) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
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
    std::fs::write(&path, C::default().to_toml_string()?)
        .map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Follows a dotted key through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Sets a value at a dotted key, creating tables on the way.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Parses a command-line value: bool, then integer, then float, then string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| s.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Renders a TOML value for stdout; strings print bare.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SynapsisConfig::default().to_toml_string().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn output<F>(f: F) -> Result<String>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // ------------------------------------------------------------------------
    // path / show / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_path_explicit() {
        let text = output(|out| cmd_config_path::<SynapsisConfig, _>(out, Some("/x/config.toml")))
            .unwrap();
        assert_eq!(text.trim(), "/x/config.toml");
    }

    #[test]
    fn test_config_show_renders_sections() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let text = output(|out| cmd_config_show::<SynapsisConfig, _>(out, Some(path.as_str()))).unwrap();
        assert!(text.contains("[logging]"));
        assert!(text.contains("[output]"));
    }

    #[test]
    fn test_config_get_nested_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let text =
            output(|out| cmd_config_get::<SynapsisConfig, _>(out, Some(path.as_str()), "names.replace_char"))
                .unwrap();
        assert_eq!(text.trim(), "_");
    }

    #[test]
    fn test_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let err = output(|out| cmd_config_get::<SynapsisConfig, _>(out, Some(path.as_str()), "nope.key"))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_set_updates_file() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        output(|out| cmd_config_set::<SynapsisConfig, _>(out, Some(path.as_str()), "output.format", "json"))
            .unwrap();

        let config = SynapsisConfig::load(Some(path.as_str())).unwrap();
        assert_eq!(config.output.format, crate::config::OutputFormat::Json);
    }

    #[test]
    fn test_config_set_rejects_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let err =
            output(|out| cmd_config_set::<SynapsisConfig, _>(out, Some(path.as_str()), "output.format", "xml"))
                .unwrap_err();
        assert!(err.to_string().contains("Invalid value"));

        let config = SynapsisConfig::load(Some(path.as_str())).unwrap();
        assert_eq!(config.output.format, crate::config::OutputFormat::Text);
    }

    #[test]
    fn test_config_set_missing_file() {
        let err = output(|out| {
            cmd_config_set::<SynapsisConfig, _>(out, Some("/nonexistent/config.toml"), "a", "b")
        })
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // init
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_init_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synapsis").join("config.toml");
        output(|out| cmd_config_init::<SynapsisConfig, _>(out, path.to_str(), false)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("replace_char"));
    }

    #[test]
    fn test_config_init_no_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old").unwrap();

        let err = output(|out| cmd_config_init::<SynapsisConfig, _>(out, path.to_str(), false))
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        output(|out| cmd_config_init::<SynapsisConfig, _>(out, path.to_str(), true)).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[names]"));
    }

    // ------------------------------------------------------------------------
    // TOML helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::from_str("[names]\nreplace_char = \"-\"").unwrap();
        assert_eq!(
            get_nested_value(&val, "names.replace_char"),
            Some(&toml::Value::String("-".into()))
        );
        assert!(get_nested_value(&val, "names.other").is_none());
        assert!(get_nested_value(&val, "names.replace_char.deeper").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_tables() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "logging.level", toml::Value::String("debug".into())).unwrap();
        assert_eq!(
            get_nested_value(&val, "logging.level"),
            Some(&toml::Value::String("debug".into()))
        );
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut val: toml::Value = toml::from_str("level = \"warn\"").unwrap();
        assert!(set_nested_value(&mut val, "level.deeper", toml::Value::Integer(1)).is_err());
        assert!(set_nested_value(&mut val, "names.", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("-7"), toml::Value::Integer(-7));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(parse_value("json"), toml::Value::String("json".into()));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("_".into())), "_");
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(false)), "false");
    }
}
