use anyhow::{Result, bail};
use tracing::{error, info};

use crate::integrations::azure::interface::{API_VERSION_STORAGE, AzureInterface, DemoContext};
use crate::integrations::azure::models::StorageAccountParameters;

impl AzureInterface {
    /// Creates the locally-redundant storage account whose blob endpoint
    /// backs every unmanaged disk in the walkthrough.
    pub async fn create_storage_account(&self, context: &DemoContext) -> Result<()> {
        info!(
            "Creating storage account '{}'...",
            context.storage_account
        );
        let path = format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}",
            self.credentials.subscription_id, context.resource_group, context.storage_account
        );
        let parameters = StorageAccountParameters::standard_lrs(&context.location);

        match self
            .arm_put(&path, API_VERSION_STORAGE, &parameters, "storage account creation")
            .await
        {
            Ok(()) => {
                info!("Storage account '{}' is ready", context.storage_account);
                Ok(())
            }
            Err(e) => {
                error!("{:?}", e);
                bail!(
                    "Failure creating storage account '{}': {}",
                    context.storage_account,
                    e
                )
            }
        }
    }
}
