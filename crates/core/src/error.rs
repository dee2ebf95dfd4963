use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum SparingError {
    /// Caller bug: zero capacity, or a key resolver that is not total over
    /// the registered series.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A series key that was never registered with the store.
    #[error("unknown series: {0}")]
    UnknownSeries(String),

    #[error("config file error: {0}")]
    ConfigFile(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = SparingError> = std::result::Result<T, E>;
