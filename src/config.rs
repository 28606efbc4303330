/// Resolved invocation settings for one monitoring run.
use std::path::Path;
use std::time::Duration;

/// Everything the sampler loop needs to know, resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Child executable path or name.
    pub command: String,
    /// Opaque first argument forwarded to the child (a config file path).
    pub config_arg: String,
    /// Second argument forwarded verbatim to the child, also echoed in the
    /// startup banner. Validated as a positive integer before the loop starts.
    pub interval_arg: String,
    /// Cadence of the sampler loop itself.
    pub tick: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            command: "./mem-test".to_string(),
            config_arg: "price_feed_tally.json".to_string(),
            interval_arg: "5".to_string(),
            tick: Duration::from_secs(1),
        }
    }
}

impl MonitorConfig {
    /// Basename of the child command, for user-facing lines
    /// ("./mem-test" reads as "mem-test").
    pub fn child_name(&self) -> &str {
        Path::new(&self.command)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.command)
    }
}

/// Validate the forwarded interval argument: a positive whole number of
/// seconds. The loop itself assumes a valid value, so this runs before it.
pub fn parse_interval(raw: &str) -> Result<u64, String> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        Ok(_) => Err(format!("interval must be positive, got {raw:?}")),
        Err(_) => Err(format!("interval must be a whole number of seconds, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_script() {
        let config = MonitorConfig::default();
        assert_eq!(config.command, "./mem-test");
        assert_eq!(config.config_arg, "price_feed_tally.json");
        assert_eq!(config.interval_arg, "5");
        assert_eq!(config.tick, Duration::from_secs(1));
    }

    #[test]
    fn test_child_name_strips_leading_path() {
        let config = MonitorConfig {
            command: "./target/release/mem-test".to_string(),
            ..Default::default()
        };
        assert_eq!(config.child_name(), "mem-test");
    }

    #[test]
    fn test_child_name_bare_command() {
        let config = MonitorConfig {
            command: "sleep".to_string(),
            ..Default::default()
        };
        assert_eq!(config.child_name(), "sleep");
    }

    #[test]
    fn test_parse_interval_accepts_positive() {
        assert_eq!(parse_interval("5").unwrap(), 5);
        assert_eq!(parse_interval("1").unwrap(), 1);
    }

    #[test]
    fn test_parse_interval_rejects_zero() {
        assert!(parse_interval("0").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_negative() {
        assert!(parse_interval("-3").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_non_numeric() {
        let err = parse_interval("fast").unwrap_err();
        assert!(err.contains("fast"));
    }
}
