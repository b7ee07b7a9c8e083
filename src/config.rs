//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

use crate::store::fs::default_data_dir;

/// Fallback state directory when no platform data dir exists
const FALLBACK_DATA_DIR: &str = ".daily-puzzles";

/// Host settings; command-line flags override these per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding saved daily state
    pub data_dir: PathBuf,
    /// Save daily progress after every move
    pub persist: bool,
    /// Emit 24-bit colour escapes
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR)),
            persist: true,
            color: true,
        }
    }
}

impl AppConfig {
    /// Read `DAILY_PUZZLES_DATA_DIR`, `DAILY_PUZZLES_NO_PERSIST` and `DAILY_PUZZLES_COLOR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("DAILY_PUZZLES_DATA_DIR")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
            .unwrap_or(defaults.data_dir);

        let no_persist = lookup("DAILY_PUZZLES_NO_PERSIST")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(false);

        let color = lookup("DAILY_PUZZLES_COLOR")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.color);

        Self {
            data_dir,
            persist: !no_persist,
            color,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_with(&[]);
        assert!(config.persist);
        assert!(config.color);
        assert_eq!(config.data_dir, AppConfig::default().data_dir);
    }

    #[test]
    fn test_env_overrides() {
        let config = config_with(&[
            ("DAILY_PUZZLES_DATA_DIR", "/tmp/puzzles"),
            ("DAILY_PUZZLES_NO_PERSIST", "true"),
            ("DAILY_PUZZLES_COLOR", "0"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/puzzles"));
        assert!(!config.persist);
        assert!(!config.color);
    }

    #[test]
    fn test_blank_and_unknown_values_fall_back() {
        let config = config_with(&[
            ("DAILY_PUZZLES_DATA_DIR", "  "),
            ("DAILY_PUZZLES_NO_PERSIST", "maybe"),
        ]);
        assert_eq!(config.data_dir, AppConfig::default().data_dir);
        assert!(config.persist);
    }
}
