use anyhow::{Result, bail};
use tracing::{error, info, warn};

use crate::integrations::azure::interface::{API_VERSION_RESOURCES, AzureInterface, DemoContext};
use crate::integrations::azure::models::ResourceGroupParameters;

impl AzureInterface {
    pub async fn create_resource_group(&self, context: &DemoContext) -> Result<()> {
        info!("Creating resource group '{}'...", context.resource_group);
        let path = format!(
            "/subscriptions/{}/resourcegroups/{}",
            self.credentials.subscription_id, context.resource_group
        );
        let parameters = ResourceGroupParameters {
            location: context.location.clone(),
        };

        match self
            .arm_put(&path, API_VERSION_RESOURCES, &parameters, "resource group creation")
            .await
        {
            Ok(()) => {
                info!("Resource group '{}' is ready", context.resource_group);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!(
                    "Failure creating resource group '{}': {}",
                    context.resource_group,
                    e
                )
            }
        }
    }

    /// Deletes the group and everything inside it, waiting for the cascade
    /// to finish.
    pub async fn delete_resource_group(&self, resource_group: &str) -> Result<()> {
        info!("Deleting resource group '{}'...", resource_group);
        let path = format!(
            "/subscriptions/{}/resourcegroups/{}",
            self.credentials.subscription_id, resource_group
        );

        match self
            .arm_delete(&path, API_VERSION_RESOURCES, "resource group deletion")
            .await
        {
            Ok(()) => {
                info!("Resource group '{}' deleted", resource_group);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!("Failure deleting resource group '{}': {}", resource_group, e)
            }
        }
    }

    /// Exit-time safety net: swallow every error so a cleanup failure never
    /// masks the outcome of the run itself.
    pub async fn best_effort_delete_resource_group(&self, resource_group: &str) {
        match self.delete_resource_group(resource_group).await {
            Ok(()) => {}
            Err(e) => {
                warn!(
                    "Best-effort deletion of resource group '{}' failed: {}",
                    resource_group, e
                );
            }
        }
    }
}
