use crate::events::{ChannelEvent, RealtimeValues};
use sparing_core::{
    AliasTable, ConnectionStatus, Parameter, RealtimeSeriesStore, Result, Sample, Site,
    SiteResolver,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// What a handled channel event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    Connection(ConnectionStatus),
    /// Series keys that received a sample.  May be empty when the message
    /// carried no usable values.
    Series(BTreeSet<String>),
    /// Message for another site, or without a payload.
    Ignored,
}

/// Live readout for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout<'a> {
    pub parameter: &'a Parameter,
    pub latest:    Option<f64>,
}

impl Readout<'_> {
    /// Two-decimal value, `0.00` until the first sample arrives.
    pub fn format_value(&self) -> String {
        format!("{:.2}", self.latest.unwrap_or(0.0))
    }
}

/// One site-detail viewing session: owns the series store for `site` and
/// tracks channel connectivity.  Dropped when the viewer leaves.
#[derive(Debug)]
pub struct SiteSession {
    site:     Site,
    store:    RealtimeSeriesStore,
    resolver: SiteResolver,
    status:   ConnectionStatus,
}

impl SiteSession {
    pub fn new(site: Site, capacity: usize, aliases: AliasTable) -> Result<Self> {
        let store = RealtimeSeriesStore::new(capacity, site.series_keys())?;
        let resolver = SiteResolver::new(&site.token, aliases);
        Ok(Self {
            site,
            store,
            resolver,
            status: ConnectionStatus::Offline,
        })
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn store(&self) -> &RealtimeSeriesStore {
        &self.store
    }

    /// Apply one channel event.  `label` stamps every sample this event
    /// produces.
    pub fn handle(&mut self, event: &ChannelEvent, label: &str) -> Result<SessionUpdate> {
        match event {
            ChannelEvent::Connected => Ok(self.set_status(ConnectionStatus::Online)),
            ChannelEvent::Disconnected => Ok(self.set_status(ConnectionStatus::Offline)),
            ChannelEvent::RealtimeValues(values) => self.ingest(values, label),
            ChannelEvent::Unknown(_) => Ok(SessionUpdate::Ignored),
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) -> SessionUpdate {
        if self.status != status {
            info!("Site '{}' realtime channel: {}", self.site.token, status.label());
        }
        self.status = status;
        SessionUpdate::Connection(status)
    }

    fn ingest(&mut self, values: &RealtimeValues, label: &str) -> Result<SessionUpdate> {
        let Some(data) = &values.data else {
            return Ok(SessionUpdate::Ignored);
        };
        if values.token() != Some(self.site.token.as_str()) {
            return Ok(SessionUpdate::Ignored);
        }

        let updated = self.store.ingest(data, &self.resolver, label)?;
        if updated.is_empty() {
            debug!("Update for '{}' carried no numeric values", self.site.token);
        }
        Ok(SessionUpdate::Series(updated))
    }

    /// Latest value per parameter, in parameter order.
    pub fn readouts(&self) -> Vec<Readout<'_>> {
        self.site
            .parameters
            .iter()
            .map(|p| Readout {
                parameter: p,
                latest:    self.store.latest(&self.site.series_key(&p.name)).ok().flatten(),
            })
            .collect()
    }

    /// Trend history for `parameter`, oldest first.
    pub fn history(&self, parameter: &str) -> Result<Vec<Sample>> {
        self.store.buffer(&self.site.series_key(parameter))
    }

    /// Clear one parameter's history, or all of it.
    pub fn reset(&mut self, parameter: Option<&str>) -> Result<()> {
        let key = parameter.map(|p| self.site.series_key(p));
        self.store.reset(key.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::parse_event;
    use sparing_core::SparingError;

    fn session() -> SiteSession {
        SiteSession::new(Site::from_token("tk1", "ipal"), 24, AliasTable::water_quality()).unwrap()
    }

    fn values(line: &str) -> ChannelEvent {
        parse_event(&format!("realtime_values>>{line}"))
    }

    #[test]
    fn connection_events_toggle_status() {
        let mut s = session();
        assert_eq!(s.status(), ConnectionStatus::Offline);
        s.handle(&ChannelEvent::Connected, "t0").unwrap();
        assert_eq!(s.status(), ConnectionStatus::Online);
        let update = s.handle(&ChannelEvent::Disconnected, "t1").unwrap();
        assert_eq!(update, SessionUpdate::Connection(ConnectionStatus::Offline));
    }

    #[test]
    fn values_for_this_site_are_recorded() {
        let mut s = session();
        let event = values(r#"{"data":{"token":"tk1","ph":"7.05","TSS":41,"debit":null}}"#);
        let update = s.handle(&event, "10:00:00").unwrap();
        assert_eq!(
            update,
            SessionUpdate::Series(BTreeSet::from(["tk1-TSS".to_string(), "tk1-pH".to_string()]))
        );

        let readouts = s.readouts();
        assert_eq!(readouts[0].parameter.name, "pH");
        assert_eq!(readouts[0].format_value(), "7.05");
        assert_eq!(readouts[4].format_value(), "0.00");
        assert_eq!(s.history("TSS").unwrap()[0].label, "10:00:00");
    }

    #[test]
    fn other_sites_and_empty_payloads_are_ignored() {
        let mut s = session();
        for line in [
            r#"{"data":{"token":"tk2","ph":7}}"#,
            r#"{"data":{"ph":7}}"#,
            r#"{"topic":"x"}"#,
        ] {
            assert_eq!(s.handle(&values(line), "t").unwrap(), SessionUpdate::Ignored);
        }
        assert!(s.store().latest_values().is_empty());
    }

    #[test]
    fn reset_by_parameter_name() {
        let mut s = session();
        s.handle(&values(r#"{"data":{"token":"tk1","ph":7,"cod":3}}"#), "t").unwrap();
        s.reset(Some("pH")).unwrap();
        assert!(s.history("pH").unwrap().is_empty());
        assert_eq!(s.history("COD").unwrap().len(), 1);
        assert!(matches!(s.reset(Some("Temp")), Err(SparingError::UnknownSeries(_))));
    }
}
