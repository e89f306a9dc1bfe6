//! Handlers for the `permission`, `name`, `id`, and `type` commands.
//!
//! Handlers write their results to the given writer in the requested
//! [`OutputFormat`] and return errors to the caller unprinted.

use std::io::Write;

use log::debug;
use serde::Serialize;
use serde_json::json;
use synapsis_acl::{Permission, PermissionRef};
use synapsis_core::util::ids::{is_synapse_id, sanitize_entity_name};
use synapsis_core::{ConcreteType, Maybe};

use crate::cli::{CatalogFilter, NameAction, PermissionAction, TypeAction};
use crate::config::{OutputFormat, SynapsisConfig};
use crate::error::Result;

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_permission<W: Write>(out: &mut W, p: &Permission) -> Result<()> {
    writeln!(
        out,
        "{:<20} {:<20} {}",
        p.code(),
        p.name(),
        p.access_types().join(",")
    )?;
    Ok(())
}

fn write_permissions<W: Write>(
    out: &mut W,
    format: OutputFormat,
    permissions: &[&Permission],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, permissions),
        OutputFormat::Text => permissions
            .iter()
            .try_for_each(|p| write_permission(out, p)),
    }
}

// ============================================================================
// permission
// ============================================================================

/// Handle a `permission` subcommand.
pub fn handle_permission_command<W: Write>(
    out: &mut W,
    format: OutputFormat,
    action: PermissionAction,
) -> Result<()> {
    match action {
        PermissionAction::List { filter } => cmd_permission_list(out, format, filter),
        PermissionAction::Get {
            values,
            access_types,
        } => cmd_permission_get(out, format, &values, access_types),
        PermissionAction::Find { code, access_types } => {
            cmd_permission_find(out, format, code.as_deref(), access_types.as_deref())
        }
        PermissionAction::Compare { left, right } => {
            cmd_permission_compare(out, format, &left, &right)
        }
    }
}

/// List catalog permissions.
pub fn cmd_permission_list<W: Write>(
    out: &mut W,
    format: OutputFormat,
    filter: CatalogFilter,
) -> Result<()> {
    let permissions = if filter.entity {
        Permission::entity_permissions()
    } else if filter.team {
        Permission::team_permissions()
    } else {
        Permission::all()
    };
    write_permissions(out, format, permissions)
}

/// Resolve a code, or a set of access types, to a catalog permission.
pub fn cmd_permission_get<W: Write>(
    out: &mut W,
    format: OutputFormat,
    values: &[String],
    access_types: bool,
) -> Result<()> {
    let value = match values {
        [code] if !access_types => PermissionRef::from(code),
        _ => PermissionRef::from(values),
    };
    debug!("Resolving permission from {value}");
    let permission = Permission::get(value, Maybe::Unset)?;
    let found: Vec<&Permission> = permission.into_iter().collect();
    write_permissions(out, format, &found)
}

/// Find the catalog permission matching a code and/or access types.
pub fn cmd_permission_find<W: Write>(
    out: &mut W,
    format: OutputFormat,
    code: Option<&str>,
    access_types: Option<&[String]>,
) -> Result<()> {
    let access_types: Option<Vec<&str>> =
        access_types.map(|types| types.iter().map(String::as_str).collect());
    let found = Permission::find_by(code, access_types.as_deref(), true)?;
    let found: Vec<&Permission> = found.into_iter().collect();
    write_permissions(out, format, &found)
}

/// Compare two permissions by privilege.
pub fn cmd_permission_compare<W: Write>(
    out: &mut W,
    format: OutputFormat,
    left: &str,
    right: &str,
) -> Result<()> {
    let left = Permission::get(left, Maybe::Unset)?.unwrap_or(Permission::no_permission());
    let right = Permission::get(right, Maybe::Unset)?.unwrap_or(Permission::no_permission());
    let ordering = left.try_cmp(right)?;
    let symbol = match ordering {
        std::cmp::Ordering::Less => "<",
        std::cmp::Ordering::Equal => "==",
        std::cmp::Ordering::Greater => ">",
    };

    match format {
        OutputFormat::Json => write_json(
            out,
            &json!({"left": left.code(), "right": right.code(), "ordering": symbol}),
        ),
        OutputFormat::Text => {
            writeln!(out, "{left} {symbol} {right}")?;
            Ok(())
        }
    }
}

// ============================================================================
// name / id
// ============================================================================

/// Handle a `name` subcommand.
pub fn handle_name_command<W: Write>(
    out: &mut W,
    format: OutputFormat,
    config: &SynapsisConfig,
    action: NameAction,
) -> Result<()> {
    match action {
        NameAction::Sanitize { name, replace } => {
            let replace = replace.as_deref().unwrap_or(&config.names.replace_char);
            cmd_name_sanitize(out, format, &name, replace)
        }
    }
}

/// Sanitize an entity name.
pub fn cmd_name_sanitize<W: Write>(
    out: &mut W,
    format: OutputFormat,
    name: &str,
    replace: &str,
) -> Result<()> {
    let clean = sanitize_entity_name(name, replace)?;
    match format {
        OutputFormat::Json => write_json(out, &clean),
        OutputFormat::Text => {
            writeln!(out, "{}", clean.name)?;
            Ok(())
        }
    }
}

/// Report whether each value is formatted as an entity ID.
pub fn cmd_id_check<W: Write>(out: &mut W, format: OutputFormat, values: &[String]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let results: Vec<_> = values
                .iter()
                .map(|v| json!({"value": v, "is_synapse_id": is_synapse_id(v)}))
                .collect();
            write_json(out, &results)
        }
        OutputFormat::Text => {
            for value in values {
                writeln!(out, "{value}\t{}", is_synapse_id(value))?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// type
// ============================================================================

/// Handle a `type` subcommand.
pub fn handle_type_command<W: Write>(
    out: &mut W,
    format: OutputFormat,
    action: TypeAction,
) -> Result<()> {
    let kinds: Vec<ConcreteType> = match action {
        TypeAction::List => ConcreteType::ALL.to_vec(),
        TypeAction::Resolve { code } => vec![ConcreteType::get(&code)],
    };
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = kinds
                .iter()
                .map(|k| json!({"name": k.name(), "code": k.code()}))
                .collect();
            write_json(out, &rows)
        }
        OutputFormat::Text => {
            for kind in kinds {
                writeln!(out, "{:<40} {}", kind.name(), kind.code())?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ------------------------------------------------------------------------
    // permission
    // ------------------------------------------------------------------------

    #[test]
    fn test_list_all_text() {
        let text = run(|out| cmd_permission_list(out, OutputFormat::Text, CatalogFilter::default()));
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("NO_PERMISSION"));
    }

    #[test]
    fn test_list_team_json() {
        let filter = CatalogFilter {
            entity: false,
            team: true,
        };
        let text = run(|out| cmd_permission_list(out, OutputFormat::Json, filter));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let codes: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, ["NO_PERMISSION", "TEAM_MANAGER"]);
    }

    #[test]
    fn test_get_by_code_and_access_types() {
        let text = run(|out| {
            cmd_permission_get(out, OutputFormat::Text, &strings(&["can_edit"]), false)
        });
        assert!(text.starts_with("CAN_EDIT "));

        let text = run(|out| {
            cmd_permission_get(out, OutputFormat::Text, &strings(&["read", "download"]), false)
        });
        assert!(text.starts_with("CAN_DOWNLOAD"));

        let text =
            run(|out| cmd_permission_get(out, OutputFormat::Text, &strings(&["READ"]), true));
        assert!(text.starts_with("CAN_VIEW"));
    }

    #[test]
    fn test_get_unknown_fails() {
        let mut out = Vec::new();
        let err =
            cmd_permission_get(&mut out, OutputFormat::Text, &strings(&["NOPE"]), false).unwrap_err();
        assert!(err.to_string().contains("Could not find permission"));
    }

    #[test]
    fn test_find_requires_match() {
        let types = strings(&["READ"]);
        let text = run(|out| {
            cmd_permission_find(out, OutputFormat::Text, Some("can_view"), Some(types.as_slice()))
        });
        assert!(text.starts_with("CAN_VIEW"));

        let mut out = Vec::new();
        assert!(cmd_permission_find(&mut out, OutputFormat::Text, Some("admin"), Some(types.as_slice())).is_err());
        assert!(cmd_permission_find(&mut out, OutputFormat::Text, None, None).is_err());
    }

    #[test]
    fn test_compare() {
        let text = run(|out| cmd_permission_compare(out, OutputFormat::Text, "can_view", "ADMIN"));
        assert_eq!(text.trim(), "CAN_VIEW < ADMIN");

        let text = run(|out| cmd_permission_compare(out, OutputFormat::Json, "admin", "can_edit"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["ordering"], ">");

        let mut out = Vec::new();
        let err = cmd_permission_compare(&mut out, OutputFormat::Text, "ADMIN", "TEAM_MANAGER")
            .unwrap_err();
        assert!(err.to_string().contains("must belong to the same permission set"));
    }

    // ------------------------------------------------------------------------
    // name / id
    // ------------------------------------------------------------------------

    #[test]
    fn test_sanitize_uses_config_replacement() {
        let mut config = SynapsisConfig::default();
        config.names.replace_char = "|".to_string();
        let action = NameAction::Sanitize {
            name: "a#b".to_string(),
            replace: None,
        };
        let text = run(|out| handle_name_command(out, OutputFormat::Text, &config, action));
        assert_eq!(text.trim(), "a|b");
    }

    #[test]
    fn test_sanitize_flag_beats_config() {
        let config = SynapsisConfig::default();
        let action = NameAction::Sanitize {
            name: "a#b".to_string(),
            replace: Some(String::new()),
        };
        let text = run(|out| handle_name_command(out, OutputFormat::Text, &config, action));
        assert_eq!(text.trim(), "ab");
    }

    #[test]
    fn test_sanitize_json_reports_replaced() {
        let text = run(|out| cmd_name_sanitize(out, OutputFormat::Json, "a#b$", "_"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["name"], "a_b_");
        assert_eq!(parsed["replaced"], serde_json::json!(["#", "$"]));
    }

    #[test]
    fn test_id_check() {
        let text = run(|out| cmd_id_check(out, OutputFormat::Text, &strings(&["syn1", "abc"])));
        assert_eq!(text, "syn1\ttrue\nabc\tfalse\n");
    }

    // ------------------------------------------------------------------------
    // type
    // ------------------------------------------------------------------------

    #[test]
    fn test_type_resolve() {
        let action = TypeAction::Resolve {
            code: "org.sagebionetworks.repo.model.Folder".to_string(),
        };
        let text = run(|out| handle_type_command(out, OutputFormat::Text, action));
        assert!(text.starts_with("Folder"));

        let action = TypeAction::Resolve {
            code: "nope".to_string(),
        };
        let text = run(|out| handle_type_command(out, OutputFormat::Text, action));
        assert!(text.starts_with("Unknown"));
    }

    #[test]
    fn test_type_list_json() {
        let text = run(|out| handle_type_command(out, OutputFormat::Json, TypeAction::List));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), ConcreteType::ALL.len());
    }
}
