use serde_json::{Map, Value};
use std::collections::HashMap;

/// Maps a series key to the ordered list of raw field names it may arrive
/// under.  Returning `None` means the resolver does not cover `series_key`,
/// which the store treats as a caller bug.
pub trait KeyResolver {
    fn aliases(&self, series_key: &str) -> Option<Vec<String>>;
}

impl<F> KeyResolver for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn aliases(&self, series_key: &str) -> Option<Vec<String>> {
        self(series_key)
    }
}

/// Build the series key for one (site, parameter) pair, e.g. `"abc123-pH"`.
pub fn series_key(token: &str, parameter: &str) -> String {
    format!("{token}-{parameter}")
}

/// Parameter name → raw field aliases.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
    /// Unlisted parameters resolve to their lowercased name.
    lowercase_fallback: bool,
}

impl AliasTable {
    /// Strict table: only listed parameters resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five water-quality parameters reported by the monitoring stations.
    /// Channels send either the lowercase or the canonical spelling.
    pub fn water_quality() -> Self {
        let mut table = Self::new().with_lowercase_fallback(true);
        for name in ["pH", "TSS", "NH3N", "COD", "Debit"] {
            table.insert(name, [name.to_lowercase(), name.to_string()]);
        }
        table
    }

    #[must_use]
    pub fn with_lowercase_fallback(mut self, enabled: bool) -> Self {
        self.lowercase_fallback = enabled;
        self
    }

    /// Replace the aliases for `parameter`.
    pub fn insert<I, S>(&mut self, parameter: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(parameter.into(), aliases.into_iter().map(Into::into).collect());
    }

    pub fn lookup(&self, parameter: &str) -> Option<Vec<String>> {
        match self.entries.get(parameter) {
            Some(aliases) => Some(aliases.clone()),
            None if self.lowercase_fallback => Some(vec![parameter.to_lowercase()]),
            None => None,
        }
    }
}

/// Resolves `"<token>-<parameter>"` series keys through an [`AliasTable`].
#[derive(Debug, Clone)]
pub struct SiteResolver {
    prefix: String,
    table:  AliasTable,
}

impl SiteResolver {
    pub fn new(token: &str, table: AliasTable) -> Self {
        Self {
            prefix: format!("{token}-"),
            table,
        }
    }
}

impl KeyResolver for SiteResolver {
    fn aliases(&self, series_key: &str) -> Option<Vec<String>> {
        let parameter = series_key.strip_prefix(&self.prefix)?;
        self.table.lookup(parameter)
    }
}

/// First alias whose field is present and not `null` wins.  Later aliases are
/// only consulted when earlier ones are missing, never when they hold junk.
pub fn resolve_value<'a>(raw: &'a Map<String, Value>, aliases: &[String]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| raw.get(alias))
        .find(|value| !value.is_null())
}

/// Accept a raw value only if it is a finite real number.
///
/// JSON numbers pass through; strings are parsed after trimming.  Empty
/// strings, booleans, `null`, arrays and objects are rejected.
pub fn coerce_finite(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
