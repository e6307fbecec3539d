use thiserror::Error;

pub type Result<T, E = ApiError> = core::result::Result<T, E>;

/// Failures surfaced by the complaint REST adapter. `NotFound` and `Server`
/// stay distinct here; the presentation layer collapses them into one
/// generic message on the track screen.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network: {0}")]
    Network(#[source] reqwest::Error),
    #[error("complaint not found")]
    NotFound,
    #[error("server returned status {status}")]
    Server { status: u16 },
    #[error("decode: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Whether the citizen may simply try the same action again.
    pub fn is_retry_eligible(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }
}
