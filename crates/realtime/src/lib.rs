pub mod client;
pub mod events;
pub mod session;

pub use client::RealtimeClient;
pub use events::{parse_event, ChannelEvent, RealtimeValues};
pub use session::{Readout, SessionUpdate, SiteSession};
