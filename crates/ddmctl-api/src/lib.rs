// ddmctl-api: Async Rust client for Declarative Device Management set and status endpoints

pub mod client;
pub mod endpoint;
pub mod error;
pub mod outcome;
pub mod status;
pub mod transport;

pub use client::{ClientConfig, DdmClient};
pub use endpoint::{Endpoint, Resource};
pub use error::Error;
pub use outcome::{MutationKind, MutationOutcome, SET_MISSING};
pub use status::StatusCategory;
pub use transport::{DEFAULT_USERNAME, TlsMode, TransportConfig};
