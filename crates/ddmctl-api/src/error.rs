use thiserror::Error;

/// Top-level error type for the `ddmctl-api` crate.
///
/// Every failure in endpoint resolution, dispatch, and response
/// interpretation lands here. The CLI maps these into diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Base URL missing, unparsable, or unable to carry path segments.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (DNS failure, connection refused, TLS, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Status queries ──────────────────────────────────────────────
    /// Status category token outside `declarations`, `values`, `errors`.
    #[error("{token} is not a valid status type")]
    UnknownCategory { token: String },

    /// Server answered a status query with a body that is not JSON.
    #[error("Invalid JSON in response: {message}")]
    Decode { message: String, body: String },

    /// Non-success HTTP status on a read.
    #[error("Server returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    // ── Set membership ──────────────────────────────────────────────
    /// Add/remove did not yield 204 or 304.
    #[error("{detail}")]
    MutationFailed { detail: String },
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
