use anyhow::{Result, bail};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::AzureCredentials;

const TOKEN_SCOPE: &str = "https://management.azure.com/.default";

// Tokens are renewed a little before the service would reject them.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

pub(crate) struct Token {
    access_token: String,
    expires_at: Instant,
}

impl Token {
    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }

    pub(crate) fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// OAuth2 client-credentials grant against the Microsoft identity platform,
/// scoped to the Azure Resource Manager API.
pub(crate) async fn request_token(
    http: &HttpClient,
    credentials: &AzureCredentials,
) -> Result<Token> {
    let url = format!(
        "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
        credentials.tenant_id
    );
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("scope", TOKEN_SCOPE),
    ];

    let response = match http.post(&url).form(&form).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("{:?}", e);
            bail!("Failed reaching the Microsoft identity endpoint");
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Token request rejected with {}: {}", status, body);
        bail!(
            "Authentication against tenant '{}' was rejected ({})",
            credentials.tenant_id,
            status
        );
    }

    let token_response: TokenResponse = match response.json().await {
        Ok(response) => response,
        Err(e) => {
            error!("{:?}", e);
            bail!("Failed to parse the token response");
        }
    };

    info!(
        "Acquired management token for tenant '{}'",
        credentials.tenant_id
    );

    Ok(Token {
        access_token: token_response.access_token,
        expires_at: Instant::now() + Duration::from_secs(token_response.expires_in),
    })
}

#[cfg(test)]
mod tests {
    use super::Token;
    use std::time::{Duration, Instant};

    #[test]
    fn a_token_far_from_expiry_is_fresh() {
        let token = Token {
            access_token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(3600),
        };
        assert!(token.is_fresh());
    }

    #[test]
    fn a_token_inside_the_renewal_margin_is_stale() {
        let token = Token {
            access_token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(30),
        };
        assert!(!token.is_fresh());
    }
}
