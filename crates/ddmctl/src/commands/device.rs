//! Device command handlers: set membership and status reports.

use ddmctl_api::{DdmClient, MutationKind, MutationOutcome, StatusCategory};
use serde_json::Value;
use tracing::debug;

use crate::cli::{DeviceArgs, DeviceCommand, GlobalOpts};
use crate::config::Invocation;
use crate::error::CliError;
use crate::output;

/// Line reported for a successful mutation.
///
/// Returns `None` for `Failed`, which is surfaced as an error instead.
pub fn mutation_message(
    kind: MutationKind,
    outcome: &MutationOutcome,
    id: &str,
    set: &str,
) -> Option<String> {
    let line = match (kind, outcome) {
        (MutationKind::Add, MutationOutcome::Applied) => format!("{id} has been added to {set}"),
        (MutationKind::Add, MutationOutcome::Unchanged) => format!("{id} is already in {set}"),
        (MutationKind::Remove, MutationOutcome::Applied) => {
            format!("{id} has been removed from {set}")
        }
        (MutationKind::Remove, MutationOutcome::Unchanged) => format!("{id} is not in set: {set}"),
        (_, MutationOutcome::Failed(_)) => return None,
    };
    Some(line)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &DdmClient,
    inv: &Invocation,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = inv.client_id.as_str();
    match args.command {
        DeviceCommand::Sets => {
            let sets = client.sets(id).await?;
            print_value(&sets, inv, global)
        }
        DeviceCommand::Add { set } => mutate(client, inv, MutationKind::Add, &set, global).await,
        DeviceCommand::Remove { set } => {
            if !global.quiet {
                eprintln!("Removing device {id} from set {set}...");
            }
            mutate(client, inv, MutationKind::Remove, &set, global).await
        }
        DeviceCommand::Declarations => {
            report(client, inv, StatusCategory::Declarations, global).await
        }
        DeviceCommand::Values => report(client, inv, StatusCategory::Values, global).await,
        DeviceCommand::Errors => report(client, inv, StatusCategory::Errors, global).await,
        DeviceCommand::Status { category } => {
            let report = client.status_by_token(&category, id).await?;
            print_value(&report, inv, global)
        }
    }
}

async fn mutate(
    client: &DdmClient,
    inv: &Invocation,
    kind: MutationKind,
    set: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = inv.client_id.as_str();
    let outcome = match kind {
        MutationKind::Add => client.add_to_set(id, set).await?,
        MutationKind::Remove => client.remove_from_set(id, set).await?,
    };
    debug!(?outcome, "mutation classified");

    let outcome = outcome.into_result()?;
    if let Some(line) = mutation_message(kind, &outcome, id, set) {
        let color = output::should_color(inv.color);
        output::print_output(&output::success(&line, color), global.quiet);
    }
    Ok(())
}

async fn report(
    client: &DdmClient,
    inv: &Invocation,
    category: StatusCategory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let report = client.status(category, &inv.client_id).await?;
    print_value(&report, inv, global)
}

fn print_value(data: &Value, inv: &Invocation, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_value(inv.output, data)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
