//! Log filter selection and subscriber setup.
//!
//! Libraries log through `log`; the subscriber's `tracing-log` bridge picks
//! those records up.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter.
pub const LOG_ENV: &str = "SYNAPSIS_LOG";

/// Picks the log filter: `--verbose`, then `SYNAPSIS_LOG`, then the config
/// file, then `warn`.
pub fn resolve_filter(verbose: u8, env: Option<&str>, configured: Option<&str>) -> String {
    let from_flag = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    from_flag
        .or(env.filter(|s| !s.trim().is_empty()))
        .or(configured.filter(|s| !s.trim().is_empty()))
        .unwrap_or("warn")
        .to_string()
}

/// Installs the global subscriber, writing to stderr.
///
/// Later calls are no-ops.
pub fn init_logging(verbose: u8, configured: Option<&str>) {
    let env = std::env::var(LOG_ENV).ok();
    let directives = resolve_filter(verbose, env.as_deref(), configured);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{directives}': {e}");
        EnvFilter::new("warn")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Logging initialized with '{directives}'");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins() {
        assert_eq!(resolve_filter(1, Some("trace"), Some("error")), "info");
        assert_eq!(resolve_filter(2, None, None), "debug");
        assert_eq!(resolve_filter(5, None, None), "trace");
    }

    #[test]
    fn test_env_beats_config() {
        assert_eq!(resolve_filter(0, Some("synapsis_acl=debug"), Some("error")), "synapsis_acl=debug");
    }

    #[test]
    fn test_config_then_default() {
        assert_eq!(resolve_filter(0, None, Some("error")), "error");
        assert_eq!(resolve_filter(0, Some(""), None), "warn");
        assert_eq!(resolve_filter(0, None, Some("  ")), "warn");
    }
}
