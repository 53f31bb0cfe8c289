use std::fmt;
use std::str::FromStr;

use crate::endpoint::Resource;
use crate::error::Error;

/// Per-device status reports the server tracks.
///
/// The client-facing tokens differ from the wire segments
/// (`declarations` is served from `declaration-status`, and so on), so the
/// mapping lives in [`StatusCategory::resource`] rather than being derived
/// from command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Declarations,
    Values,
    Errors,
}

impl StatusCategory {
    pub const ALL: [Self; 3] = [Self::Declarations, Self::Values, Self::Errors];

    /// Client-facing token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Declarations => "declarations",
            Self::Values => "values",
            Self::Errors => "errors",
        }
    }

    /// Server resource holding this category.
    pub fn resource(self) -> Resource {
        match self {
            Self::Declarations => Resource::DeclarationStatus,
            Self::Values => Resource::StatusValues,
            Self::Errors => Resource::StatusErrors,
        }
    }
}

impl FromStr for StatusCategory {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.token() == token)
            .ok_or_else(|| Error::UnknownCategory {
                token: token.to_owned(),
            })
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
