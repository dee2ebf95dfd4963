use serde::{Deserialize, Serialize};
use sparing_core::{state::default_parameters, AliasTable, Parameter};
use std::collections::HashMap;

/// Root configuration structure parsed from `sparing.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparingConfig {
    /// Channel endpoint and realtime buffering.
    pub global: GlobalConfig,
    /// Monitored parameters, in display order.
    pub parameters: Vec<ParameterConfig>,
    /// Chart / readout colours.
    pub theme: ThemeConfig,
}

impl Default for SparingConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            parameters: default_parameters().iter().map(ParameterConfig::from).collect(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SparingConfig {
    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameters
            .iter()
            .map(|p| Parameter::new(&p.name, &p.unit, &p.icon))
            .collect()
    }

    /// Alias table for the realtime channel.  Parameters without explicit
    /// aliases accept their lowercase and canonical spellings.
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::new().with_lowercase_fallback(true);
        for p in &self.parameters {
            if p.aliases.is_empty() {
                table.insert(p.name.clone(), [p.name.to_lowercase(), p.name.clone()]);
            } else {
                table.insert(p.name.clone(), p.aliases.iter().cloned());
            }
        }
        table
    }
}

/// Endpoint and buffering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Realtime channel address (`host:port`).
    pub ws_addr: String,
    /// Samples kept per series for trend charts.
    pub history_capacity: usize,
    /// Delay before reconnecting a dropped realtime channel (seconds).
    pub reconnect_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            ws_addr:          "127.0.0.1:3002".to_string(),
            history_capacity: 24,
            reconnect_secs:   2,
        }
    }
}

/// Config block for a single monitored parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub icon: String,
    /// Raw channel field names, first match wins.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl From<&Parameter> for ParameterConfig {
    fn from(p: &Parameter) -> Self {
        Self {
            name:    p.name.clone(),
            unit:    p.unit.clone(),
            icon:    p.icon.clone(),
            aliases: Vec::new(),
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent colour, also used for parameters without their own colour.
    pub accent: String,
    /// Status pill colour while the channel is connected.
    pub online: String,
    /// Status pill colour while disconnected.
    pub offline: String,
    /// Trend line colour per parameter name (hex).
    pub parameter_colors: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let parameter_colors = [
            ("pH", "#FF6B6B"),
            ("TSS", "#4ECDC4"),
            ("NH3N", "#45B7D1"),
            ("COD", "#96CEB4"),
            ("Debit", "#FFEEAD"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            accent:  "#a8005c".to_string(),
            online:  "#4CAF50".to_string(),
            offline: "#F44336".to_string(),
            parameter_colors,
        }
    }
}
