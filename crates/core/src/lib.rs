pub mod error;
pub mod history;
pub mod resolve;
pub mod series;
pub mod state;
pub mod time;

pub use error::{Result, SparingError};
pub use resolve::{AliasTable, KeyResolver, SiteResolver};
pub use series::{RealtimeSeriesStore, Sample};
pub use state::{ConnectionStatus, Parameter, Site};
