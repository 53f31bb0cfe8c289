//! Command dispatch: bridges CLI args -> `DdmClient` calls -> output formatting.

pub mod config_cmd;
pub mod device;

use ddmctl_api::DdmClient;

use crate::cli::{DeviceArgs, GlobalOpts};
use crate::config::Invocation;
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    args: DeviceArgs,
    client: &DdmClient,
    invocation: &Invocation,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    device::handle(client, invocation, args, global).await
}
