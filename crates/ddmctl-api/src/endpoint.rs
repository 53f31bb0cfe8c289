// Endpoint resolution for device-scoped DDM resources.
//
// Pure URL construction: no I/O happens here. Identifiers are pushed as
// individual path segments so reserved characters get percent-encoded
// instead of being read as separators.

use url::Url;

use crate::error::Error;

/// Server-side resource families, each addressed as `/{segment}/{device}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Set membership for a device.
    EnrollmentSets,
    /// Declarations applied to a device and their status.
    DeclarationStatus,
    /// Status values reported by a device.
    StatusValues,
    /// Status errors reported by a device.
    StatusErrors,
}

impl Resource {
    /// The path segment used on the wire.
    pub fn segment(self) -> &'static str {
        match self {
            Self::EnrollmentSets => "enrollment-sets",
            Self::DeclarationStatus => "declaration-status",
            Self::StatusValues => "status-values",
            Self::StatusErrors => "status-errors",
        }
    }
}

/// A validated base URL that resolves resource URLs beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parse and validate a base URL (scheme + host + optional path prefix).
    ///
    /// Query strings and fragments on the base are dropped.
    pub fn new(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::configuration("base URL must be provided"));
        }

        let mut base = Url::parse(raw)
            .map_err(|e| Error::configuration(format!("invalid base URL `{raw}`: {e}")))?;

        if base.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "base URL `{raw}` cannot carry resource paths"
            )));
        }

        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    /// The normalized base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/{segment}/{device_id}` with no query string.
    pub fn resolve(&self, resource: Resource, device_id: &str) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::configuration("base URL cannot carry resource paths"))?
            .pop_if_empty()
            .extend([resource.segment(), device_id]);
        Ok(url)
    }

    /// `{base}/{segment}/{device_id}?set={set}` for membership mutations.
    pub fn resolve_with_set(
        &self,
        resource: Resource,
        device_id: &str,
        set: &str,
    ) -> Result<Url, Error> {
        let mut url = self.resolve(resource, device_id)?;
        url.query_pairs_mut().clear().append_pair("set", set);
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DEVICE: &str = "AAAAAAAA-BBBB-CCCC-DDDD-EEEEEEEEEEEE";

    #[test]
    fn resolves_under_bare_host() {
        let ep = Endpoint::new("https://ddm.example.com").unwrap();
        let url = ep.resolve(Resource::DeclarationStatus, DEVICE).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ddm.example.com/declaration-status/AAAAAAAA-BBBB-CCCC-DDDD-EEEEEEEEEEEE"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn keeps_path_prefix_with_or_without_trailing_slash() {
        for base in ["https://mdm.example.com/v1/ddm", "https://mdm.example.com/v1/ddm/"] {
            let ep = Endpoint::new(base).unwrap();
            let url = ep.resolve(Resource::StatusValues, "abc").unwrap();
            assert_eq!(url.path(), "/v1/ddm/status-values/abc");
        }
    }

    #[test]
    fn set_query_is_form_encoded() {
        let ep = Endpoint::new("https://ddm.example.com").unwrap();
        let url = ep
            .resolve_with_set(Resource::EnrollmentSets, DEVICE, "eng & ops")
            .unwrap();
        assert_eq!(url.query(), Some("set=eng+%26+ops"));
        assert_eq!(url.path(), format!("/enrollment-sets/{DEVICE}"));
    }

    #[test]
    fn identifiers_cannot_inject_path_segments() {
        let ep = Endpoint::new("https://ddm.example.com/api").unwrap();
        let url = ep.resolve(Resource::StatusErrors, "../admin/x?y#z").unwrap();
        assert_eq!(url.path(), "/api/status-errors/..%2Fadmin%2Fx%3Fy%23z");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn base_query_and_fragment_are_dropped() {
        let ep = Endpoint::new("https://ddm.example.com/?stale=1#frag").unwrap();
        let url = ep
            .resolve_with_set(Resource::EnrollmentSets, "dev", "lab")
            .unwrap();
        assert_eq!(url.as_str(), "https://ddm.example.com/enrollment-sets/dev?set=lab");
    }

    #[test]
    fn rejects_missing_or_unusable_base() {
        for bad in ["", "   ", "not a url", "mailto:ops@example.com"] {
            let err = Endpoint::new(bad).unwrap_err();
            assert!(
                matches!(err, Error::Configuration { .. }),
                "expected Configuration error for {bad:?}, got: {err:?}"
            );
        }
    }
}
