use anyhow::{Result, bail};
use tracing::{error, info};

use crate::integrations::azure::interface::{API_VERSION_NETWORK, AzureInterface, DemoContext};
use crate::integrations::azure::models::NetworkInterface;

impl AzureInterface {
    pub async fn create_network_interface(
        &self,
        context: &DemoContext,
        machine: &str,
        subnet_id: &str,
        public_ip_id: &str,
    ) -> Result<()> {
        let name = context.nic_name(machine);
        info!("Creating network interface '{}'...", name);
        let path = self.network_interface_path(context, &name);
        let parameters = NetworkInterface::single_ip_configuration(
            &context.location,
            &context.ip_configuration_name(machine),
            subnet_id,
            public_ip_id,
        );

        match self
            .arm_put(&path, API_VERSION_NETWORK, &parameters, "network interface creation")
            .await
        {
            Ok(()) => {
                info!("Network interface '{}' is ready", name);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure creating network interface '{}': {}", name, e)
            }
        }
    }

    /// Re-reads the interface to learn the resource id the VM references as
    /// its primary NIC.
    pub async fn get_network_interface(
        &self,
        context: &DemoContext,
        machine: &str,
    ) -> Result<NetworkInterface> {
        let name = context.nic_name(machine);
        let path = self.network_interface_path(context, &name);

        match self
            .arm_get::<NetworkInterface>(&path, API_VERSION_NETWORK)
            .await
        {
            Ok(interface) => Ok(interface),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure fetching network interface '{}': {}", name, e)
            }
        }
    }

    fn network_interface_path(&self, context: &DemoContext, name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/networkInterfaces/{}",
            self.credentials.subscription_id, context.resource_group, name
        )
    }
}
