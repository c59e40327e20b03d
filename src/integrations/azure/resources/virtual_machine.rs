use anyhow::{Result, bail};
use tracing::{error, info};

use crate::integrations::azure::interface::{API_VERSION_COMPUTE, AzureInterface, DemoContext};
use crate::integrations::azure::models::{VirtualMachine, VirtualMachineListResult};

impl AzureInterface {
    pub async fn get_vm(&self, context: &DemoContext, name: &str) -> Result<VirtualMachine> {
        info!("Fetching virtual machine '{}'", name);
        let path = self.vm_path(context, name);

        match self.arm_get::<VirtualMachine>(&path, API_VERSION_COMPUTE).await {
            Ok(vm) => Ok(vm),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure fetching virtual machine '{}': {}", name, e)
            }
        }
    }

    /// Upsert of the full machine representation; used for the initial
    /// creation and for every mutation round-trip afterwards.
    pub async fn create_or_update_vm(
        &self,
        context: &DemoContext,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<()> {
        let path = self.vm_path(context, name);

        match self
            .arm_put(&path, API_VERSION_COMPUTE, vm, "virtual machine create-or-update")
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure updating virtual machine '{}': {}", name, e)
            }
        }
    }

    pub async fn deallocate_vm(&self, context: &DemoContext, name: &str) -> Result<()> {
        info!("Deallocating virtual machine '{}'...", name);
        self.vm_action(context, name, "deallocate").await
    }

    pub async fn start_vm(&self, context: &DemoContext, name: &str) -> Result<()> {
        info!("Starting virtual machine '{}'...", name);
        self.vm_action(context, name, "start").await
    }

    pub async fn restart_vm(&self, context: &DemoContext, name: &str) -> Result<()> {
        info!("Restarting virtual machine '{}'...", name);
        self.vm_action(context, name, "restart").await
    }

    pub async fn power_off_vm(&self, context: &DemoContext, name: &str) -> Result<()> {
        info!("Powering off virtual machine '{}'...", name);
        self.vm_action(context, name, "powerOff").await
    }

    pub async fn delete_vm(&self, context: &DemoContext, name: &str) -> Result<()> {
        info!("Deleting virtual machine '{}'...", name);
        let path = self.vm_path(context, name);

        match self
            .arm_delete(&path, API_VERSION_COMPUTE, "virtual machine deletion")
            .await
        {
            Ok(()) => {
                info!("Virtual machine '{}' deleted", name);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure deleting virtual machine '{}': {}", name, e)
            }
        }
    }

    /// Every VM visible to the subscription, regardless of resource group.
    pub async fn list_all_vms(&self) -> Result<Vec<VirtualMachine>> {
        info!("Listing virtual machines in the subscription");
        let path = format!(
            "/subscriptions/{}/providers/Microsoft.Compute/virtualMachines",
            self.credentials.subscription_id
        );

        match self
            .arm_get::<VirtualMachineListResult>(&path, API_VERSION_COMPUTE)
            .await
        {
            Ok(listing) => Ok(listing.value),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure listing virtual machines: {}", e)
            }
        }
    }

    async fn vm_action(&self, context: &DemoContext, name: &str, action: &str) -> Result<()> {
        let path = format!("{}/{}", self.vm_path(context, name), action);

        match self
            .arm_post(&path, API_VERSION_COMPUTE, "virtual machine power action")
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("{:?}", e);
                bail!(
                    "Failure running '{}' on virtual machine '{}': {}",
                    action,
                    name,
                    e
                )
            }
        }
    }

    fn vm_path(&self, context: &DemoContext, name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines/{}",
            self.credentials.subscription_id, context.resource_group, name
        )
    }
}
