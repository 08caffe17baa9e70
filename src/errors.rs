use thiserror::Error;

use crate::constants::UPSTREAM_GARBLED_MSG;

/// Failures a menu fetch can surface. Everything here is renderable; the
/// pipeline never panics on upstream data.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The server answered with an HTML error page where JSON was expected.
    /// Displays as a fixed friendly message, never the raw parser error.
    #[error("{}", UPSTREAM_GARBLED_MSG)]
    UpstreamGarbled,

    #[error("menu request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("menu data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}
