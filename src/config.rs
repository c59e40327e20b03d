use anyhow::{Result, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Service-principal credentials and subscription scope for the Azure
/// Resource Manager API.
///
/// The struct mirrors the camelCase fields of an SDK auth file; the same
/// shape is filled from the `AZURE_*` environment variables when no auth
/// file is configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub subscription_id: String,
}

impl AzureCredentials {
    /// Resolves credentials from the environment: an auth file named by
    /// `AZURE_AUTH_LOCATION` wins, otherwise the four `AZURE_*` variables
    /// are all required.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = env::var("AZURE_AUTH_LOCATION") {
            info!("Reading credentials from auth file '{}'", path);
            return Self::from_auth_file(Path::new(&path));
        }

        Ok(Self {
            tenant_id: required_env("AZURE_TENANT_ID")?,
            client_id: required_env("AZURE_CLIENT_ID")?,
            client_secret: required_env("AZURE_CLIENT_SECRET")?,
            subscription_id: required_env("AZURE_SUBSCRIPTION_ID")?,
        })
    }

    pub fn from_auth_file(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                error!("{}", e);
                bail!("Failed to read auth file '{}'", path.display());
            }
        };

        Self::parse_auth_file(&contents)
    }

    fn parse_auth_file(contents: &str) -> Result<Self> {
        let credentials: Self = match serde_json::from_str(contents) {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("{}", e);
                bail!("Failed to parse the Azure auth file");
            }
        };

        credentials.validated()
    }

    fn validated(self) -> Result<Self> {
        for (field, value) in [
            ("tenantId", &self.tenant_id),
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("subscriptionId", &self.subscription_id),
        ] {
            if value.is_empty() {
                bail!("Auth file is missing a value for '{}'", field);
            }
        }

        Ok(self)
    }
}

fn required_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => bail!("Missing environment variable {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::AzureCredentials;

    #[test]
    fn parses_an_sdk_auth_file() {
        let contents = r#"{
            "clientId": "11111111-2222-3333-4444-555555555555",
            "clientSecret": "s3cr3t",
            "subscriptionId": "66666666-7777-8888-9999-000000000000",
            "tenantId": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
            "activeDirectoryEndpointUrl": "https://login.microsoftonline.com",
            "resourceManagerEndpointUrl": "https://management.azure.com/"
        }"#;

        let credentials = AzureCredentials::parse_auth_file(contents).unwrap();
        assert_eq!(credentials.client_id, "11111111-2222-3333-4444-555555555555");
        assert_eq!(credentials.client_secret, "s3cr3t");
        assert_eq!(
            credentials.subscription_id,
            "66666666-7777-8888-9999-000000000000"
        );
        assert_eq!(credentials.tenant_id, "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee");
    }

    #[test]
    fn rejects_an_auth_file_without_a_secret() {
        let contents = r#"{
            "clientId": "11111111-2222-3333-4444-555555555555",
            "subscriptionId": "66666666-7777-8888-9999-000000000000",
            "tenantId": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee"
        }"#;

        assert!(AzureCredentials::parse_auth_file(contents).is_err());
    }

    #[test]
    fn rejects_an_auth_file_with_an_empty_field() {
        let contents = r#"{
            "clientId": "11111111-2222-3333-4444-555555555555",
            "clientSecret": "s3cr3t",
            "subscriptionId": "",
            "tenantId": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee"
        }"#;

        let error = AzureCredentials::parse_auth_file(contents).unwrap_err();
        assert!(error.to_string().contains("subscriptionId"));
    }
}
