use anyhow::{Result, bail};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::AzureCredentials;
use crate::utils;

use super::auth::{self, Token};
use super::models::ArmErrorResponse;

pub(crate) const API_VERSION_RESOURCES: &str = "2021-04-01";
pub(crate) const API_VERSION_STORAGE: &str = "2023-01-01";
pub(crate) const API_VERSION_NETWORK: &str = "2023-04-01";
pub(crate) const API_VERSION_COMPUTE: &str = "2023-07-01";

/// Authenticated handle to the Azure Resource Manager API. Built once from
/// explicit credentials and passed to every operation; there is no global
/// client state.
pub struct AzureInterface {
    pub credentials: AzureCredentials,
    http: HttpClient,
    token: Mutex<Option<Token>>,
}

impl AzureInterface {
    pub const MANAGEMENT_BASE_URL: &'static str = "https://management.azure.com";

    pub fn connect(credentials: AzureCredentials) -> Result<Self> {
        let http = match HttpClient::builder().build() {
            Ok(client) => client,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed building the Azure HTTP client");
            }
        };

        Ok(Self {
            credentials,
            http,
            token: Mutex::new(None),
        })
    }

    /// Current bearer token, renewed through the identity endpoint whenever
    /// the cached one is close to expiry.
    async fn bearer_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            if token.is_fresh() {
                return Ok(token.access_token().to_string());
            }
        }

        let token = auth::request_token(&self.http, &self.credentials).await?;
        let access_token = token.access_token().to_string();
        *guard = Some(token);
        Ok(access_token)
    }

    fn request_url(&self, path: &str, api_version: &str) -> String {
        format!(
            "{}{}?api-version={}",
            Self::MANAGEMENT_BASE_URL,
            path,
            api_version
        )
    }

    pub(crate) async fn arm_get<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<T> {
        let token = self.bearer_token().await?;
        let url = self.request_url(path, api_version);

        let response = match self.http.get(&url).bearer_auth(&token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed reaching the Azure management API");
            }
        };

        let response = Self::checked(response).await?;
        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed to parse the Azure management API response");
            }
        }
    }

    /// Create-or-update by name. Blocks until the operation the platform
    /// accepted has reached a terminal state.
    pub(crate) async fn arm_put<B: Serialize>(
        &self,
        path: &str,
        api_version: &str,
        body: &B,
        what: &str,
    ) -> Result<()> {
        let token = self.bearer_token().await?;
        let url = self.request_url(path, api_version);

        let response = match self.http.put(&url).bearer_auth(&token).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed reaching the Azure management API");
            }
        };

        let response = Self::checked(response).await?;
        self.await_operation(response, what).await
    }

    /// VM actions such as start/deallocate: a bodyless POST that completes
    /// through a long-running operation.
    pub(crate) async fn arm_post(&self, path: &str, api_version: &str, what: &str) -> Result<()> {
        let token = self.bearer_token().await?;
        let url = self.request_url(path, api_version);

        let response = match self.http.post(&url).bearer_auth(&token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed reaching the Azure management API");
            }
        };

        let response = Self::checked(response).await?;
        self.await_operation(response, what).await
    }

    /// Deletion by name; a resource that is already gone counts as deleted.
    pub(crate) async fn arm_delete(&self, path: &str, api_version: &str, what: &str) -> Result<()> {
        let token = self.bearer_token().await?;
        let url = self.request_url(path, api_version);

        let response = match self.http.delete(&url).bearer_auth(&token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed reaching the Azure management API");
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            info!("{}: nothing to delete", what);
            return Ok(());
        }

        let response = Self::checked(response).await?;
        self.await_operation(response, what).await
    }

    pub(crate) async fn poll_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = self.bearer_token().await?;

        let response = match self.http.get(url).bearer_auth(&token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed polling an in-flight Azure operation");
            }
        };

        let response = Self::checked(response).await?;
        match response.json::<T>().await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed to parse an Azure operation status");
            }
        }
    }

    pub(crate) async fn poll_status(&self, url: &str) -> Result<StatusCode> {
        let token = self.bearer_token().await?;

        match self.http.get(url).bearer_auth(&token).send().await {
            Ok(response) => Ok(response.status()),
            Err(e) => {
                error!("{:?}", e);
                bail!("Failed polling an in-flight Azure operation");
            }
        }
    }

    /// Turns a non-success response into an error carrying the ARM error
    /// code and message, which read far better than raw response bodies.
    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ArmErrorResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .map(|e| e.to_string())
            .unwrap_or(body);
        error!("Azure management API returned {}: {}", status, detail);
        bail!("Azure management API returned {}: {}", status, detail)
    }
}

/// Everything about one walkthrough run that is decided up front: the
/// target names, the region, and the generated admin password. Per-machine
/// names are derived here so every call site agrees on them.
pub struct DemoContext {
    pub location: String,
    pub resource_group: String,
    pub storage_account: String,
    pub vnet_name: String,
    pub subnet_name: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl DemoContext {
    pub fn new(location: &str, resource_group: &str, storage_account: Option<String>) -> Self {
        let storage_account = storage_account
            .unwrap_or_else(|| format!("azvmdemo{}", utils::generate_suffix(8)));

        Self {
            location: location.to_string(),
            resource_group: resource_group.to_string(),
            storage_account,
            vnet_name: "azvm-vnet".to_string(),
            subnet_name: "azvm-subnet".to_string(),
            admin_username: "notadmin".to_string(),
            admin_password: utils::generate_password(),
        }
    }

    pub fn public_ip_name(&self, machine: &str) -> String {
        format!("pip-{}", machine)
    }

    pub fn nic_name(&self, machine: &str) -> String {
        format!("nic-{}", machine)
    }

    pub fn ip_configuration_name(&self, machine: &str) -> String {
        format!("ipconfig-{}", machine)
    }

    /// DNS label for a machine's public address: a short sanitized prefix
    /// of the machine name under a fixed project prefix.
    pub fn dns_label(&self, machine: &str) -> String {
        let sanitized: String = machine
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(5)
            .collect();
        format!("azvm-{}", sanitized)
    }

    /// Blob URI backing an unmanaged disk in the demo storage account.
    pub fn vhd_uri(&self, blob: &str) -> String {
        format!(
            "https://{}.blob.core.windows.net/vhds/{}.vhd",
            self.storage_account, blob
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DemoContext;

    fn context() -> DemoContext {
        DemoContext::new("westus", "azvm-demo-rg", Some("azvmdemo0test000".to_string()))
    }

    #[test]
    fn per_machine_names_are_derived_from_the_machine_name() {
        let context = context();
        assert_eq!(context.public_ip_name("linux-vm"), "pip-linux-vm");
        assert_eq!(context.nic_name("linux-vm"), "nic-linux-vm");
        assert_eq!(context.ip_configuration_name("linux-vm"), "ipconfig-linux-vm");
    }

    #[test]
    fn dns_labels_are_short_lowercase_and_alphanumeric() {
        let context = context();
        assert_eq!(context.dns_label("linux-vm"), "azvm-linux");
        assert_eq!(context.dns_label("windows-vm"), "azvm-windo");
        assert_eq!(context.dns_label("VM"), "azvm-vm");
    }

    #[test]
    fn vhd_uris_point_into_the_demo_storage_account() {
        let context = context();
        assert_eq!(
            context.vhd_uri("linux-vm"),
            "https://azvmdemo0test000.blob.core.windows.net/vhds/linux-vm.vhd"
        );
    }

    #[test]
    fn generated_storage_account_names_fit_the_platform_rules() {
        let context = DemoContext::new("westus", "azvm-demo-rg", None);
        assert!(context.storage_account.len() <= 24);
        assert!(
            context
                .storage_account
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }
}
