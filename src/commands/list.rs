use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};

use crate::config::AzureCredentials;
use crate::integrations::azure::AzureInterface;

#[derive(Tabled)]
struct VmDisplay {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

pub async fn list() -> Result<()> {
    let credentials = AzureCredentials::from_env()?;
    let interface = AzureInterface::connect(credentials)?;
    print_subscription_vms(&interface).await
}

/// Renders every VM visible to the subscription; an empty listing is
/// reported distinctly from a populated one.
pub async fn print_subscription_vms(interface: &AzureInterface) -> Result<()> {
    let vms = interface.list_all_vms().await?;
    let total = vms.len();

    if vms.is_empty() {
        println!("\nThere are no virtual machines in this subscription.");
        return Ok(());
    }

    let mut table_rows: Vec<VmDisplay> = vec![];
    for vm in vms {
        table_rows.push(VmDisplay {
            name: vm.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
            id: vm.id.clone().unwrap_or_default(),
            location: vm.location.clone(),
            resource_type: vm.resource_type.clone().unwrap_or_default(),
            tags: vm.tag_summary(),
        });
    }

    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("\nVirtual machines in this subscription:");
    println!("{}", table);
    println!("Found {} virtual machines.", total);

    Ok(())
}
