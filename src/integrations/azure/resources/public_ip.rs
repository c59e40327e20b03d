use anyhow::{Result, bail};
use tracing::{error, info};

use crate::integrations::azure::interface::{API_VERSION_NETWORK, AzureInterface, DemoContext};
use crate::integrations::azure::models::PublicIpAddress;

impl AzureInterface {
    pub async fn create_public_ip(&self, context: &DemoContext, machine: &str) -> Result<()> {
        let name = context.public_ip_name(machine);
        info!("Creating public IP address '{}'...", name);
        let path = self.public_ip_path(context, &name);
        let parameters =
            PublicIpAddress::with_dns_label(&context.location, &context.dns_label(machine));

        match self
            .arm_put(&path, API_VERSION_NETWORK, &parameters, "public IP address creation")
            .await
        {
            Ok(()) => {
                info!("Public IP address '{}' is ready", name);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure creating public IP address '{}': {}", name, e)
            }
        }
    }

    /// Re-reads the address to learn the hostname the platform allocated.
    pub async fn get_public_ip(
        &self,
        context: &DemoContext,
        machine: &str,
    ) -> Result<PublicIpAddress> {
        let name = context.public_ip_name(machine);
        let path = self.public_ip_path(context, &name);

        match self
            .arm_get::<PublicIpAddress>(&path, API_VERSION_NETWORK)
            .await
        {
            Ok(address) => Ok(address),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure fetching public IP address '{}': {}", name, e)
            }
        }
    }

    fn public_ip_path(&self, context: &DemoContext, name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/publicIPAddresses/{}",
            self.credentials.subscription_id, context.resource_group, name
        )
    }
}
