//! Datastore rename with wildcard resolution.

use anyhow::{Context, Result};

use crate::application::ports::{HostOps, InventoryClient, ProgressReporter};
use crate::domain::name_match::resolve_unique;

/// Rename the single datastore matching `pattern` to `new_name`.
///
/// Zero matches or more than one match is a validation failure listing
/// what matched; nothing is renamed in either case.
///
/// # Errors
///
/// Returns an error if resolution is not unique or the rename itself
/// fails at the endpoint.
pub async fn rename(
    inventory: &impl InventoryClient,
    ops: &impl HostOps,
    reporter: &impl ProgressReporter,
    pattern: &str,
    new_name: &str,
) -> Result<String> {
    let names = inventory
        .datastore_names()
        .await
        .context("listing datastores")?;
    let current = resolve_unique("datastore", pattern, &names)?;

    if current == new_name {
        reporter.warn(&format!("datastore is already named '{new_name}'"));
        return Ok(current);
    }

    reporter.step(&format!("renaming '{current}' to '{new_name}'..."));
    ops.rename_datastore(&current, new_name)
        .await
        .with_context(|| format!("renaming datastore '{current}'"))?;
    reporter.success(&format!("datastore renamed to '{new_name}'"));
    Ok(current)
}
