use serde::Deserialize;
use serde_json::{Map, Value};

/// Event name carrying per-site parameter values.
pub const REALTIME_VALUES: &str = "realtime_values";

/// Everything the realtime listener can deliver.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Channel (re)connected.
    Connected,
    /// Channel dropped; the listener is about to retry.
    Disconnected,
    /// A `realtime_values` message.
    RealtimeValues(RealtimeValues),
    /// A line we don't handle, carried raw for debugging.
    Unknown(String),
}

/// Payload of a `realtime_values` message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RealtimeValues {
    #[serde(default)]
    pub topic: Option<String>,
    /// Raw field mapping, e.g. `{ token, ph, tss, nh3n, cod, debit }`.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl RealtimeValues {
    /// Site token inside `data`, if present and a string.
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref()?.get("token")?.as_str()
    }
}

/// Parse a raw channel line into a typed [`ChannelEvent`].
///
/// Lines have the format `event_name>>json_payload`.
pub fn parse_event(line: &str) -> ChannelEvent {
    let Some((event, payload)) = line.split_once(">>") else {
        return ChannelEvent::Unknown(line.to_string());
    };

    match event.trim() {
        REALTIME_VALUES => match serde_json::from_str::<RealtimeValues>(payload) {
            Ok(values) => ChannelEvent::RealtimeValues(values),
            Err(_) => ChannelEvent::Unknown(line.to_string()),
        },
        _ => ChannelEvent::Unknown(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_realtime_values() {
        let event = parse_event(
            r#"realtime_values>>{"topic":"sparing/tk1","data":{"token":"tk1","ph":7.1,"tss":"40"}}"#,
        );
        let ChannelEvent::RealtimeValues(values) = event else {
            panic!("wrong variant");
        };
        assert_eq!(values.topic.as_deref(), Some("sparing/tk1"));
        assert_eq!(values.token(), Some("tk1"));
        assert_eq!(values.data.unwrap()["tss"], "40");
    }

    #[test]
    fn missing_data_still_parses() {
        let event = parse_event(r#"realtime_values>>{"topic":"x"}"#);
        assert!(matches!(
            event,
            ChannelEvent::RealtimeValues(RealtimeValues { data: None, .. })
        ));
    }

    #[test]
    fn malformed_payload_is_unknown() {
        assert!(matches!(parse_event("realtime_values>>{oops"), ChannelEvent::Unknown(_)));
        assert!(matches!(parse_event("realtime_values>>[1,2]"), ChannelEvent::Unknown(_)));
    }

    #[test]
    fn parse_unknown_event() {
        assert!(matches!(parse_event("alarm>>{}"), ChannelEvent::Unknown(_)));
        assert!(matches!(parse_event("no separator"), ChannelEvent::Unknown(_)));
    }
}
