// Set-membership outcome classification.
//
// The status-code table here is the idempotency contract of the service:
// repeating an add or remove reports `Unchanged` instead of failing.

use reqwest::StatusCode;

use crate::error::Error;

/// Message reported when removal targets a set the server does not know.
pub const SET_MISSING: &str = "Set does not exist";

/// Which membership change was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// PUT: add the device to the set.
    Add,
    /// DELETE: remove the device from the set.
    Remove,
}

impl MutationKind {
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::Add => reqwest::Method::PUT,
            Self::Remove => reqwest::Method::DELETE,
        }
    }
}

/// Result of an add or remove call, derived only from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// 304: membership was already in the requested state.
    Unchanged,
    /// 204: membership changed.
    Applied,
    /// Anything else, with the server's diagnostic text.
    Failed(String),
}

impl MutationOutcome {
    /// Classify a mutation response.
    ///
    /// A 500 on removal always means the set is missing, whatever the body
    /// says. Other failures carry the body verbatim, or the status line when
    /// the body is empty.
    pub fn interpret(kind: MutationKind, status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            304 => Self::Unchanged,
            204 => Self::Applied,
            500 if kind == MutationKind::Remove => Self::Failed(SET_MISSING.into()),
            _ if body.trim().is_empty() => Self::Failed(status.to_string()),
            _ => Self::Failed(body.to_owned()),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Convert `Failed` into [`Error::MutationFailed`].
    pub fn into_result(self) -> Result<Self, Error> {
        match self {
            Self::Failed(detail) => Err(Error::MutationFailed { detail }),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn not_modified_is_unchanged_for_both_kinds() {
        for kind in [MutationKind::Add, MutationKind::Remove] {
            assert_eq!(
                MutationOutcome::interpret(kind, StatusCode::NOT_MODIFIED, ""),
                MutationOutcome::Unchanged
            );
        }
    }

    #[test]
    fn no_content_is_applied() {
        let outcome = MutationOutcome::interpret(MutationKind::Add, StatusCode::NO_CONTENT, "");
        assert!(outcome.is_applied());
    }

    #[test]
    fn server_error_on_remove_means_missing_set() {
        let outcome = MutationOutcome::interpret(
            MutationKind::Remove,
            StatusCode::INTERNAL_SERVER_ERROR,
            "sql: no rows in result set",
        );
        assert_eq!(outcome, MutationOutcome::Failed(SET_MISSING.into()));
    }

    #[test]
    fn server_error_on_add_keeps_body() {
        let outcome = MutationOutcome::interpret(
            MutationKind::Add,
            StatusCode::INTERNAL_SERVER_ERROR,
            "database unavailable",
        );
        assert_eq!(outcome, MutationOutcome::Failed("database unavailable".into()));
    }

    #[test]
    fn other_statuses_carry_body_text() {
        let outcome =
            MutationOutcome::interpret(MutationKind::Remove, StatusCode::BAD_REQUEST, "bad set\n");
        assert_eq!(outcome, MutationOutcome::Failed("bad set\n".into()));
    }

    #[test]
    fn success_codes_other_than_no_content_are_failures() {
        let outcome = MutationOutcome::interpret(MutationKind::Add, StatusCode::OK, "ok");
        assert_eq!(outcome, MutationOutcome::Failed("ok".into()));
    }

    #[test]
    fn empty_failure_body_falls_back_to_status_line() {
        let outcome = MutationOutcome::interpret(MutationKind::Add, StatusCode::UNAUTHORIZED, "");
        assert_eq!(outcome, MutationOutcome::Failed("401 Unauthorized".into()));
    }

    #[test]
    fn failed_converts_to_error() {
        let err = MutationOutcome::Failed("nope".into()).into_result().unwrap_err();
        assert!(matches!(err, Error::MutationFailed { ref detail } if detail == "nope"));
        assert_eq!(
            MutationOutcome::Applied.into_result().ok(),
            Some(MutationOutcome::Applied)
        );
    }
}
