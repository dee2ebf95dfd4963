//! sparing-monitor: live water-quality readouts for one monitored site.
//!
//! Run with:  `RUST_LOG=info sparing-monitor <site-token> [site-name]`

mod render;

use anyhow::{Context, Result};
use sparing_config::{default_path, load as load_config};
use sparing_core::{time::time_label, Site};
use sparing_realtime::{ChannelEvent, RealtimeClient, SessionUpdate, SiteSession};
use sparing_theme::Theme;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("sparing-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let token = args
        .next()
        .context("usage: sparing-monitor <site-token> [site-name]")?;
    let name = args.next().unwrap_or_else(|| token.clone());

    let config = load_config(default_path())?;
    let theme = Theme::from_config(&config.theme);

    let mut site = Site::from_token(token, name);
    site.parameters = config.parameters();

    let mut session =
        SiteSession::new(site, config.global.history_capacity, config.alias_table())?;

    let client = RealtimeClient::new(
        config.global.ws_addr.clone(),
        Duration::from_secs(config.global.reconnect_secs),
    );
    let mut events = client.spawn_listener();

    print!("{}", render::render(&session, &theme));

    monitor(
        &mut session,
        &theme,
        &mut events,
        tokio::signal::ctrl_c(),
        |frame| print!("{frame}"),
    )
    .await
}

/// Apply channel events to `session` until the channel closes or
/// `shutdown` resolves, emitting a rendered frame after every visible change.
///
/// `shutdown` is polled across iterations, so a signal that fires while a
/// frame is being rendered is still observed.
async fn monitor<F>(
    session: &mut SiteSession,
    theme: &Theme,
    events: &mut mpsc::Receiver<ChannelEvent>,
    shutdown: F,
    mut emit: impl FnMut(String),
) -> Result<()>
where
    F: Future,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let label = time_label(&chrono::Local::now());
                match session.handle(&event, &label)? {
                    SessionUpdate::Ignored => {}
                    SessionUpdate::Series(updated) if updated.is_empty() => {}
                    _ => emit(render::render(session, theme)),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Interrupted; shutting down");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparing_core::AliasTable;
    use sparing_realtime::parse_event;
    use tokio::sync::oneshot;

    fn session() -> SiteSession {
        SiteSession::new(Site::from_token("tk", "ipal"), 24, AliasTable::water_quality()).unwrap()
    }

    #[tokio::test]
    async fn shutdown_fired_before_polling_stops_the_loop() {
        let mut session = session();
        let (_tx, mut events) = mpsc::channel(4);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        stop_tx.send(()).unwrap();

        let mut frames = 0;
        monitor(&mut session, &Theme::default(), &mut events, stop_rx, |_| frames += 1)
            .await
            .unwrap();
        assert_eq!(frames, 0);
    }

    #[tokio::test]
    async fn shutdown_during_a_frame_is_not_lost() {
        let mut session = session();
        let (tx, mut events) = mpsc::channel(4);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        tx.send(parse_event(r#"realtime_values>>{"data":{"token":"tk","ph":7.1}}"#))
            .await
            .unwrap();

        let mut stop_tx = Some(stop_tx);
        let mut frames = Vec::new();
        monitor(&mut session, &Theme::default(), &mut events, stop_rx, |frame| {
            if let Some(stop) = stop_tx.take() {
                let _ = stop.send(());
            }
            frames.push(frame);
        })
        .await
        .unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].contains("7.10"));
        assert!(!tx.is_closed());
    }

    #[tokio::test]
    async fn closed_channel_ends_the_loop() {
        let mut session = session();
        let (tx, mut events) = mpsc::channel::<ChannelEvent>(4);
        drop(tx);
        monitor(&mut session, &Theme::default(), &mut events, std::future::pending::<()>(), |_| {})
            .await
            .unwrap();
    }
}
