//! Plain-terminal rendering of a site session: status line, card readouts
//! and one sparkline per parameter trend.

use sparing_core::Sample;
use sparing_realtime::SiteSession;
use sparing_theme::Theme;
use std::fmt::Write;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Scale `samples` into block characters, min → `▁`, max → `█`.
pub fn sparkline(samples: &[Sample]) -> String {
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.value), hi.max(s.value))
        });
    let span = max - min;

    samples
        .iter()
        .map(|s| {
            if span <= f64::EPSILON {
                BARS[BARS.len() / 2]
            } else {
                let idx = ((s.value - min) / span * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

/// Render the whole session as a block of lines.
pub fn render(session: &SiteSession, theme: &Theme) -> String {
    let mut out = String::new();
    let status = session.status();

    let _ = writeln!(
        out,
        "{} | {}  {}",
        session.site().name,
        theme.status_color(status).paint(status.label()),
        status.notification(),
    );

    for readout in session.readouts() {
        let p = readout.parameter;
        let color = theme.parameter_color(&p.name);
        let trend = session
            .history(&p.name)
            .map(|h| {
                let last = h.last().map(|s| s.label.as_str()).unwrap_or("--:--:--");
                format!("{} {last}", sparkline(&h))
            })
            .unwrap_or_default();

        let _ = writeln!(
            out,
            "  {:<6} {:>10} {:<5} {}",
            p.name,
            readout.format_value(),
            p.unit,
            color.paint(&trend),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparing_core::{AliasTable, Site};
    use sparing_realtime::parse_event;

    fn sample(value: f64) -> Sample {
        Sample {
            series_key: "tk-pH".into(),
            value,
            label: "t".into(),
        }
    }

    #[test]
    fn sparkline_spans_min_to_max() {
        let line = sparkline(&[sample(1.0), sample(2.0), sample(3.0)]);
        assert_eq!(line, "▁▅█");
    }

    #[test]
    fn flat_and_empty_sparklines() {
        assert_eq!(sparkline(&[sample(7.0), sample(7.0)]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn render_lists_every_parameter() {
        let mut session =
            SiteSession::new(Site::from_token("tk", "ipal"), 24, AliasTable::water_quality()).unwrap();
        let event = parse_event(r#"realtime_values>>{"data":{"token":"tk","cod":12.346}}"#);
        session.handle(&event, "09:15:00").unwrap();

        let text = render(&session, &Theme::default());
        assert!(text.starts_with("ipal"));
        assert!(text.contains("WSS Offline"));
        assert!(text.contains("12.35"));
        assert!(text.contains("09:15:00"));
        assert_eq!(text.lines().count(), 6);
    }
}
