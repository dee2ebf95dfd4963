pub mod schema;

pub use schema::{GlobalConfig, ParameterConfig, SparingConfig, ThemeConfig};

use sparing_core::{Result, SparingError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `SparingConfig::default()`
/// if the file doesn't exist so the monitor always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<SparingConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(SparingConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| SparingError::ConfigFile(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<SparingConfig> {
    let config: SparingConfig =
        toml::from_str(raw).map_err(|e| SparingError::ConfigFile(format!("TOML parse error: {e}")))?;

    if config.global.history_capacity == 0 {
        return Err(SparingError::ConfigFile(
            "global.history_capacity must be at least 1".into(),
        ));
    }

    if config.global.reconnect_secs == 0 {
        return Err(SparingError::ConfigFile(
            "global.reconnect_secs must be at least 1".into(),
        ));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = config.parameters.iter().find(|p| !seen.insert(p.name.as_str())) {
        return Err(SparingError::ConfigFile(format!(
            "parameter '{}' is defined more than once",
            dup.name
        )));
    }

    Ok(config)
}

/// Return the config path: `$SPARING_CONFIG` if set, otherwise
/// `sparing/sparing.toml` under `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("SPARING_CONFIG") {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sparing").join("sparing.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.global.history_capacity, 24);
        assert_eq!(config.parameters.len(), 5);
        assert_eq!(config.theme.parameter_colors["TSS"], "#4ECDC4");
    }

    #[test]
    fn parameters_and_aliases_are_read() {
        let config = parse(
            r#"
            [global]
            ws_addr = "10.0.0.5:3002"
            history_capacity = 48

            [[parameters]]
            name = "pH"
            unit = "pH"
            aliases = ["PH", "ph"]

            [[parameters]]
            name = "Temp"
            unit = "°C"
            "#,
        )
        .unwrap();

        assert_eq!(config.global.ws_addr, "10.0.0.5:3002");
        assert_eq!(config.global.reconnect_secs, 2);
        assert_eq!(config.parameters().len(), 2);

        let table = config.alias_table();
        assert_eq!(table.lookup("pH").unwrap(), vec!["PH", "ph"]);
        assert_eq!(table.lookup("Temp").unwrap(), vec!["temp", "Temp"]);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = parse("[global]\nhistory_capacity = 0").unwrap_err();
        assert!(matches!(err, SparingError::ConfigFile(_)));
    }

    #[test]
    fn zero_reconnect_delay_is_rejected() {
        let err = parse("[global]\nreconnect_secs = 0").unwrap_err();
        assert!(matches!(err, SparingError::ConfigFile(_)));
    }

    #[test]
    fn duplicate_parameter_names_are_rejected() {
        let err = parse(
            r#"
            [[parameters]]
            name = "pH"

            [[parameters]]
            name = "pH"
            unit = "pH"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SparingError::ConfigFile(msg) if msg.contains("'pH'")));
    }

    #[test]
    fn default_parameters_match_core_set() {
        let config = SparingConfig::default();
        assert_eq!(config.parameters(), sparing_core::state::default_parameters());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/sparing.toml").unwrap();
        assert_eq!(config.global.ws_addr, "127.0.0.1:3002");
    }
}
