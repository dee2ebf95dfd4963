use crate::events::{parse_event, ChannelEvent};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Realtime channel client.
///
/// Connects to the push server over TCP and streams typed
/// [`ChannelEvent`]s.  Automatically reconnects if the connection drops.
#[derive(Debug, Clone)]
pub struct RealtimeClient {
    /// `host:port` of the push server.
    addr: String,
    reconnect: Duration,
}

impl RealtimeClient {
    pub fn new(addr: impl Into<String>, reconnect: Duration) -> Self {
        Self {
            addr: addr.into(),
            reconnect,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Spawn a background task that reads from the channel and forwards
    /// typed [`ChannelEvent`]s on the returned receiver.
    ///
    /// `Connected` / `Disconnected` bracket every successful connection.
    /// The task stops once the receiver is dropped.
    pub fn spawn_listener(self) -> mpsc::Receiver<ChannelEvent> {
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            loop {
                match TcpStream::connect(&self.addr).await {
                    Ok(stream) => {
                        info!("Connected to realtime channel at {}", self.addr);
                        if tx.send(ChannelEvent::Connected).await.is_err() {
                            return;
                        }

                        let mut lines = BufReader::new(stream).lines();
                        loop {
                            match lines.next_line().await {
                                Ok(Some(line)) if line.trim().is_empty() => continue,
                                Ok(Some(line)) => {
                                    let event = parse_event(&line);
                                    if let ChannelEvent::Unknown(raw) = &event {
                                        debug!("Ignoring channel line: {raw}");
                                    }
                                    if tx.send(event).await.is_err() {
                                        return; // all receivers dropped
                                    }
                                }
                                Ok(None) => break,
                                Err(e) => {
                                    warn!("Realtime channel read error: {e}");
                                    break;
                                }
                            }
                        }

                        warn!(
                            "Realtime channel connection lost; reconnecting in {:?}…",
                            self.reconnect
                        );
                        if tx.send(ChannelEvent::Disconnected).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        error!(
                            "Cannot connect to realtime channel at {}: {e}; retrying in {:?}…",
                            self.addr, self.reconnect
                        );
                    }
                }

                if tx.is_closed() {
                    return;
                }
                tokio::time::sleep(self.reconnect).await;
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn streams_events_and_reports_disconnect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"realtime_values>>{\"data\":{\"token\":\"tk1\",\"ph\":7.2}}\n\nping>>1\n")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let mut rx = RealtimeClient::new(addr, Duration::from_millis(50)).spawn_listener();

        assert_eq!(rx.recv().await, Some(ChannelEvent::Connected));
        match rx.recv().await {
            Some(ChannelEvent::RealtimeValues(v)) => assert_eq!(v.token(), Some("tk1")),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(rx.recv().await, Some(ChannelEvent::Unknown("ping>>1".into())));
        assert_eq!(rx.recv().await, Some(ChannelEvent::Disconnected));
    }
}
