//! CLI error types with miette diagnostics.
//!
//! Maps `ddmctl_api::Error` and `ddmctl_config::ConfigError` into
//! user-facing errors with actionable help text and exit codes.

use miette::Diagnostic;
use thiserror::Error;

use ddmctl_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the DDM server")]
    #[diagnostic(
        code(ddmctl::transport),
        help(
            "Check that the server is running and the base URL is correct.\n\
             Self-signed certificate? Retry with --insecure (-k)."
        )
    )]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(ddmctl::auth_failed),
        help("Verify the API key and username for this server.")
    )]
    AuthFailed,

    #[error("API Key must be provided!")]
    #[diagnostic(
        code(ddmctl::no_credentials),
        help(
            "Pass --api-key, set DDM_API_KEY, or store one with:\n\
             ddmctl --profile {profile} config set-key"
        )
    )]
    NoCredentials { profile: String },

    // ── Server responses ─────────────────────────────────────────────
    #[error("{detail}")]
    #[diagnostic(code(ddmctl::mutation_failed))]
    MutationFailed { detail: String },

    #[error("Server returned HTTP {status}")]
    #[diagnostic(code(ddmctl::api_error), help("{body}"))]
    Api { status: u16, body: String },

    #[error("Server response is not valid JSON")]
    #[diagnostic(code(ddmctl::decode), help("{message}"))]
    Decode { message: String },

    // ── Usage / validation ───────────────────────────────────────────
    #[error("{token} is not a valid status type")]
    #[diagnostic(
        code(ddmctl::unknown_category),
        help("Valid status types: declarations, values, errors")
    )]
    UnknownCategory { token: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ddmctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Base Url must be provided!")]
    #[diagnostic(
        code(ddmctl::no_config),
        help(
            "Pass --url, set DDM_URL, or create a profile with: ddmctl config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ddmctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ddmctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{message}")]
    #[diagnostic(code(ddmctl::configuration))]
    Configuration { message: String },

    #[error(transparent)]
    #[diagnostic(code(ddmctl::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(ddmctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(ddmctl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Transport { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::UnknownCategory { .. }
            | Self::Validation { .. }
            | Self::NoConfig { .. }
            | Self::ProfileNotFound { .. }
            | Self::Configuration { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<ddmctl_api::Error> for CliError {
    fn from(err: ddmctl_api::Error) -> Self {
        use ddmctl_api::Error as ApiError;

        match err {
            ApiError::Configuration { message } => Self::Configuration { message },
            ApiError::Transport(e) => Self::Transport {
                source: Box::new(e),
            },
            ApiError::UnknownCategory { token } => Self::UnknownCategory { token },
            ApiError::Decode { message, body: _ } => Self::Decode { message },
            ApiError::Api { status: 401, .. } => Self::AuthFailed,
            ApiError::Api { status, body } => Self::Api { status, body },
            ApiError::MutationFailed { detail } => Self::MutationFailed { detail },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let missing = CliError::from(ddmctl_api::Error::MutationFailed {
            detail: ddmctl_api::SET_MISSING.into(),
        });
        assert_eq!(missing.exit_code(), exit_code::GENERAL);
        assert_eq!(missing.to_string(), "Set does not exist");

        let bogus = CliError::from(ddmctl_api::Error::UnknownCategory {
            token: "bogus".into(),
        });
        assert_eq!(bogus.exit_code(), exit_code::USAGE);

        let unauthorized = CliError::from(ddmctl_api::Error::Api {
            status: 401,
            body: String::new(),
        });
        assert_eq!(unauthorized.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err = CliError::from(ddmctl_config::validate_client_id("abc").unwrap_err());
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("client_id"));
    }
}
