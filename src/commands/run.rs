use anyhow::{Result, bail};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use crate::commands::list;
use crate::config::AzureCredentials;
use crate::integrations::azure::{AzureInterface, DemoContext, MACHINES};
use crate::utils;

/// Full lifecycle walkthrough: provision shared resources and two VMs, run
/// the operations sequence on both, list the subscription, tear everything
/// down. Whatever happens along the way, a best-effort resource-group
/// deletion runs before returning.
pub async fn run(
    location: &str,
    resource_group: &str,
    storage_account: Option<String>,
    skip_confirmation: bool,
) -> Result<()> {
    let credentials = AzureCredentials::from_env()?;
    let interface = Arc::new(AzureInterface::connect(credentials)?);
    let context = Arc::new(DemoContext::new(location, resource_group, storage_account));

    info!(
        "Starting the walkthrough in '{}' (resource group '{}', storage account '{}')",
        context.location, context.resource_group, context.storage_account
    );

    let outcome = walkthrough(&interface, &context, skip_confirmation).await;

    // Safety net: the resource group is removed even when a phase failed or
    // the operator stopped early, so no resources are left behind.
    interface
        .best_effort_delete_resource_group(&context.resource_group)
        .await;

    outcome
}

async fn walkthrough(
    interface: &Arc<AzureInterface>,
    context: &Arc<DemoContext>,
    skip_confirmation: bool,
) -> Result<()> {
    let subnet = interface.provision_core(context).await?;
    let subnet_id = match subnet.id {
        Some(id) => id,
        None => bail!("Subnet '{}' has no resource id", context.subnet_name),
    };

    let mut branches = Vec::new();
    for machine in MACHINES {
        let interface = Arc::clone(interface);
        let context = Arc::clone(context);
        let subnet_id = subnet_id.clone();
        branches.push(tokio::spawn(async move {
            interface.create_vm(&context, &machine, &subnet_id).await
        }));
    }
    utils::join_all_branches(branches).await?;
    println!("{}", "Both virtual machines have been created".green());

    if !(utils::user_confirmation(
        skip_confirmation,
        "Continue with the operations on the virtual machines?",
        true,
    )?) {
        return Ok(());
    }

    let mut branches = Vec::new();
    for machine in MACHINES {
        let interface = Arc::clone(interface);
        let context = Arc::clone(context);
        branches.push(tokio::spawn(async move {
            interface.run_vm_operations(&context, machine.name).await
        }));
    }
    utils::join_all_branches(branches).await?;

    list::print_subscription_vms(interface).await?;

    if !(utils::user_confirmation(
        skip_confirmation,
        "Delete the virtual machines and the resource group?",
        true,
    )?) {
        return Ok(());
    }

    let mut branches = Vec::new();
    for machine in MACHINES {
        let interface = Arc::clone(interface);
        let context = Arc::clone(context);
        branches.push(tokio::spawn(async move {
            interface.delete_vm(&context, machine.name).await
        }));
    }
    utils::join_all_branches(branches).await?;

    println!("Deleting resource group '{}'...", context.resource_group);
    interface
        .delete_resource_group(&context.resource_group)
        .await?;

    println!("{}", "Done!".green());
    Ok(())
}
