use anyhow::{Result, bail};
use tracing::{error, info};

use crate::integrations::azure::interface::{API_VERSION_NETWORK, AzureInterface, DemoContext};
use crate::integrations::azure::models::{Subnet, VirtualNetwork};

const VNET_ADDRESS_SPACE: &str = "10.0.0.0/16";
const SUBNET_PREFIX: &str = "10.0.0.0/24";

impl AzureInterface {
    pub async fn create_virtual_network(&self, context: &DemoContext) -> Result<()> {
        info!("Creating virtual network '{}'...", context.vnet_name);
        let path = format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/virtualNetworks/{}",
            self.credentials.subscription_id, context.resource_group, context.vnet_name
        );
        let parameters = VirtualNetwork::with_address_space(&context.location, VNET_ADDRESS_SPACE);

        match self
            .arm_put(&path, API_VERSION_NETWORK, &parameters, "virtual network creation")
            .await
        {
            Ok(()) => {
                info!("Virtual network '{}' is ready", context.vnet_name);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!(
                    "Failure creating virtual network '{}': {}",
                    context.vnet_name,
                    e
                )
            }
        }
    }

    pub async fn create_subnet(&self, context: &DemoContext) -> Result<()> {
        info!("Creating subnet '{}'...", context.subnet_name);
        let path = self.subnet_path(context);
        let parameters = Subnet::with_prefix(SUBNET_PREFIX);

        match self
            .arm_put(&path, API_VERSION_NETWORK, &parameters, "subnet creation")
            .await
        {
            Ok(()) => {
                info!("Subnet '{}' is ready", context.subnet_name);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure creating subnet '{}': {}", context.subnet_name, e)
            }
        }
    }

    /// Re-reads the subnet to learn the resource id every network interface
    /// has to reference.
    pub async fn get_subnet(&self, context: &DemoContext) -> Result<Subnet> {
        let path = self.subnet_path(context);

        match self.arm_get::<Subnet>(&path, API_VERSION_NETWORK).await {
            Ok(subnet) => Ok(subnet),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure fetching subnet '{}': {}", context.subnet_name, e)
            }
        }
    }

    fn subnet_path(&self, context: &DemoContext) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/virtualNetworks/{}/subnets/{}",
            self.credentials.subscription_id,
            context.resource_group,
            context.vnet_name,
            context.subnet_name
        )
    }
}
