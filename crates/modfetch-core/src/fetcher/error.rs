//! Per-URL fetch error.

/// Why a single asset could not be fetched. Recorded per URL; never aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, aborted transfer, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the asset to disk failed.
    #[error("storage: {0}")]
    Storage(#[source] std::io::Error),
    /// The blocking transfer task panicked or was torn down.
    #[error("transfer task failed: {0}")]
    Join(String),
    /// Cancelled before the request started.
    #[error("cancelled")]
    Cancelled,
}
