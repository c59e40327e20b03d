use anyhow::{Result, bail};
use std::collections::BTreeMap;
use tracing::info;

use crate::utils::ProgressTracker;

use super::interface::{AzureInterface, DemoContext};
use super::models::{DataDisk, ImageReference, Subnet, VirtualMachine, next_os_disk_size};

const VM_SIZE: &str = "Standard_DS1";

/// One of the machines the walkthrough manages: a name plus the platform
/// image it boots from.
#[derive(Debug, Clone, Copy)]
pub struct MachineDefinition {
    pub name: &'static str,
    pub publisher: &'static str,
    pub offer: &'static str,
    pub sku: &'static str,
}

impl MachineDefinition {
    pub fn image_reference(&self) -> ImageReference {
        ImageReference {
            publisher: self.publisher.to_string(),
            offer: self.offer.to_string(),
            sku: self.sku.to_string(),
            version: "latest".to_string(),
        }
    }
}

pub const MACHINES: [MachineDefinition; 2] = [
    MachineDefinition {
        name: "linux-vm",
        publisher: "Canonical",
        offer: "UbuntuServer",
        sku: "16.04.0-LTS",
    },
    MachineDefinition {
        name: "windows-vm",
        publisher: "MicrosoftWindowsServer",
        offer: "WindowsServer",
        sku: "2016-Datacenter",
    },
];

/// Tag set the operations phase applies, replacing whatever was there.
pub fn demo_tags() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("who rocks".to_string(), "rust".to_string()),
        ("where".to_string(), "on azure".to_string()),
    ])
}

impl AzureInterface {
    /// Creates everything the VMs depend on: the resource group first, then
    /// the storage account and the virtual network + subnet as two
    /// concurrent branches. Both branches are joined before either result
    /// is evaluated, so a failure in one can never hide the outcome of the
    /// other. Returns the subnet every network interface will reference.
    pub async fn provision_core(&self, context: &DemoContext) -> Result<Subnet> {
        info!(
            "Provisioning shared resources in resource group '{}'",
            context.resource_group
        );

        let multi = ProgressTracker::create_multi();
        let main_progress =
            ProgressTracker::add_to_multi(&multi, 4, "Provisioning shared resources");
        let spinner = ProgressTracker::new_indeterminate(&multi, "Creating resource group...");

        self.create_resource_group(context).await?;
        main_progress.inc(1);

        spinner.update_message("Creating storage account and virtual network...");
        let (network_result, storage_result) = tokio::join!(
            self.provision_network(context),
            self.create_storage_account(context)
        );

        let subnet = network_result?;
        main_progress.inc(2);
        storage_result?;
        main_progress.inc(1);

        spinner.finish_with_message("Shared resources ready");
        main_progress.finish_with_message("Provisioning complete");
        Ok(subnet)
    }

    async fn provision_network(&self, context: &DemoContext) -> Result<Subnet> {
        self.create_virtual_network(context).await?;
        self.create_subnet(context).await?;
        self.get_subnet(context).await
    }

    /// Provisions one machine end to end. Each step depends on an
    /// identifier produced by the previous one, so the sequence is strictly
    /// ordered; different machines run this concurrently.
    pub async fn create_vm(
        &self,
        context: &DemoContext,
        machine: &MachineDefinition,
        subnet_id: &str,
    ) -> Result<()> {
        println!("Creating '{}'...", machine.name);

        self.create_public_ip(context, machine.name).await?;
        let public_ip = self.get_public_ip(context, machine.name).await?;
        let public_ip_id = match &public_ip.id {
            Some(id) => id.clone(),
            None => bail!(
                "Public IP address '{}' has no resource id",
                context.public_ip_name(machine.name)
            ),
        };

        self.create_network_interface(context, machine.name, subnet_id, &public_ip_id)
            .await?;
        let interface = self.get_network_interface(context, machine.name).await?;
        let interface_id = match &interface.id {
            Some(id) => id.clone(),
            None => bail!(
                "Network interface '{}' has no resource id",
                context.nic_name(machine.name)
            ),
        };

        let parameters = VirtualMachine::from_image(
            &context.location,
            VM_SIZE,
            machine.image_reference(),
            &context.vhd_uri(machine.name),
            &interface_id,
            machine.name,
            &context.admin_username,
            &context.admin_password,
        );
        self.create_or_update_vm(context, machine.name, &parameters)
            .await?;

        let hostname = public_ip
            .fqdn()
            .map(String::from)
            .unwrap_or_else(|| context.dns_label(machine.name));
        println!(
            "'{}' is ready. Connect with 'ssh {}@{}' using password '{}'",
            machine.name, context.admin_username, hostname, context.admin_password
        );

        Ok(())
    }

    /// The mutation sequence of the walkthrough, strictly ordered within
    /// one machine: tag, attach a data disk, detach all data disks, grow
    /// the OS disk (which requires a deallocated machine), then
    /// start/restart/stop. Every step is its own round-trip through the
    /// platform.
    pub async fn run_vm_operations(&self, context: &DemoContext, machine: &str) -> Result<()> {
        println!("Running the operations sequence on '{}'", machine);

        let mut vm = self.get_vm(context, machine).await?;
        println!(
            "'{}' is {} (location: {}, tags: {})",
            machine,
            vm.properties
                .provisioning_state
                .as_deref()
                .unwrap_or("in an unknown state"),
            vm.location,
            vm.tag_summary()
        );

        println!("[{}] Applying tags...", machine);
        vm.tags = Some(demo_tags());
        self.create_or_update_vm(context, machine, &vm).await?;

        println!("[{}] Attaching a data disk...", machine);
        let storage_profile = match vm.properties.storage_profile.as_mut() {
            Some(profile) => profile,
            None => bail!("Virtual machine '{}' has no storage profile", machine),
        };
        storage_profile.data_disks = Some(vec![DataDisk::empty(
            0,
            "dataDisk",
            &context.vhd_uri(&format!("datadisk-{}", machine)),
            1,
        )]);
        self.create_or_update_vm(context, machine, &vm).await?;

        println!("[{}] Detaching data disks...", machine);
        let storage_profile = match vm.properties.storage_profile.as_mut() {
            Some(profile) => profile,
            None => bail!("Virtual machine '{}' has no storage profile", machine),
        };
        storage_profile.data_disks = Some(Vec::new());
        self.create_or_update_vm(context, machine, &vm).await?;

        println!("[{}] Growing the OS disk...", machine);
        self.deallocate_vm(context, machine).await?;
        let os_disk = match vm
            .properties
            .storage_profile
            .as_mut()
            .and_then(|profile| profile.os_disk.as_mut())
        {
            Some(disk) => disk,
            None => bail!("Virtual machine '{}' has no OS disk", machine),
        };
        os_disk.disk_size_gb = Some(next_os_disk_size(os_disk.disk_size_gb));
        self.create_or_update_vm(context, machine, &vm).await?;

        println!("[{}] Starting...", machine);
        self.start_vm(context, machine).await?;

        println!("[{}] Restarting...", machine);
        self.restart_vm(context, machine).await?;

        println!("[{}] Stopping...", machine);
        self.power_off_vm(context, machine).await?;

        println!("Operations sequence on '{}' finished", machine);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MACHINES, demo_tags};

    #[test]
    fn the_tag_step_applies_exactly_two_fixed_tags() {
        let tags = demo_tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("who rocks").map(String::as_str), Some("rust"));
        assert_eq!(tags.get("where").map(String::as_str), Some("on azure"));
    }

    #[test]
    fn the_walkthrough_manages_two_machines_with_distinct_images() {
        assert_eq!(MACHINES.len(), 2);
        assert_ne!(MACHINES[0].publisher, MACHINES[1].publisher);

        let image = MACHINES[0].image_reference();
        assert_eq!(image.version, "latest");
    }
}
