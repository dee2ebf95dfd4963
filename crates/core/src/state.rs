use crate::resolve::series_key;
use serde::{Deserialize, Serialize};

/// A monitored water-quality parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Canonical name, e.g. `"pH"` or `"NH3N"`.  Also the series key suffix.
    pub name: String,
    /// Display unit, e.g. `"mg/L"`.
    pub unit: String,
    /// Material icon name used by card readouts.
    pub icon: String,
}

impl Parameter {
    pub fn new(name: &str, unit: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The parameter set every monitoring station reports.
pub fn default_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("pH", "pH", "water"),
        Parameter::new("TSS", "mg/L", "blur-on"),
        Parameter::new("NH3N", "mg/L", "science"),
        Parameter::new("COD", "mg/L", "opacity"),
        Parameter::new("Debit", "m³/s", "speed"),
    ]
}

/// A monitored site belonging to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id:         u64,
    pub name:       String,
    /// Site token; realtime messages and log queries are keyed by it.
    pub token:      String,
    pub address:    Option<String>,
    pub latitude:   Option<f64>,
    pub longitude:  Option<f64>,
    pub parameters: Vec<Parameter>,
}

impl Site {
    /// A site known only by its token, carrying the default parameters.
    pub fn from_token(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id:         0,
            name:       name.into(),
            token:      token.into(),
            address:    None,
            latitude:   None,
            longitude:  None,
            parameters: default_parameters(),
        }
    }

    pub fn series_key(&self, parameter: &str) -> String {
        series_key(&self.token, parameter)
    }

    /// One series key per parameter, in parameter order.
    pub fn series_keys(&self) -> Vec<String> {
        self.parameters.iter().map(|p| self.series_key(&p.name)).collect()
    }
}

/// JSON shape of one entry returned by the site listing endpoint
/// (`/get-site-by-company-id/{company_id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    pub id:             u64,
    pub site_name:      String,
    #[serde(default)]
    pub site_address:   Option<String>,
    #[serde(default)]
    pub site_longitude: Option<serde_json::Value>,
    #[serde(default)]
    pub site_latitude:  Option<serde_json::Value>,
    pub site_token:     String,
}

impl From<SiteRecord> for Site {
    fn from(r: SiteRecord) -> Self {
        let coord = |v: Option<serde_json::Value>| v.as_ref().and_then(crate::resolve::coerce_finite);
        Self {
            id:         r.id,
            name:       r.site_name,
            token:      r.site_token,
            address:    r.site_address,
            latitude:   coord(r.site_latitude),
            longitude:  coord(r.site_longitude),
            parameters: default_parameters(),
        }
    }
}

/// Realtime channel connection state as tracked by the owning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Online,
    #[default]
    Offline,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online  => "WSS Online",
            Self::Offline => "WSS Offline",
        }
    }

    pub fn notification(self) -> &'static str {
        match self {
            Self::Online  => "System running normally",
            Self::Offline => "Waiting for connection...",
        }
    }
}
