use anyhow::Result;
use colored::Colorize;

use crate::config::AzureCredentials;
use crate::integrations::azure::AzureInterface;
use crate::utils;

/// Deletes a resource group and lets the platform cascade the deletion to
/// everything inside it.
pub async fn teardown(resource_group: &str, skip_confirmation: bool) -> Result<()> {
    let credentials = AzureCredentials::from_env()?;
    let interface = AzureInterface::connect(credentials)?;

    if !(utils::user_confirmation(
        skip_confirmation,
        &format!(
            "Delete resource group '{}' and everything in it?",
            resource_group
        ),
        false,
    )?) {
        return Ok(());
    }

    println!("Deleting resource group '{}'...", resource_group);
    interface.delete_resource_group(resource_group).await?;
    println!("{}", format!("Resource group '{}' deleted", resource_group).green());

    Ok(())
}
