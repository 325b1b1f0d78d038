use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use rolescope_application::TokenProvider;
use rolescope_core::{AppError, AppResult};
use rolescope_domain::{AccessToken, Credentials};
use serde_json::Value;
use tracing::warn;
use url::Url;
use url::form_urlencoded::Serializer;

/// Public cloud authority host.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Default-scope grant for the directory API.
pub const DEFAULT_GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// OAuth2 client-credential grant against a tenant-scoped authority.
#[derive(Clone)]
pub struct ClientCredentialTokenProvider {
    http_client: reqwest::Client,
    authority_host: Url,
    scope: String,
}

impl ClientCredentialTokenProvider {
    /// Creates a token provider.
    pub fn new(
        http_client: reqwest::Client,
        authority_host: &str,
        scope: impl Into<String>,
    ) -> AppResult<Self> {
        let authority_host = Url::parse(authority_host).map_err(|error| {
            AppError::Validation(format!("invalid authority host '{authority_host}': {error}"))
        })?;
        if authority_host.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "authority host '{authority_host}' cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            authority_host,
            scope: scope.into(),
        })
    }

    /// Returns `{authority}/{tenant}/oauth2/v2.0/token`.
    pub fn token_endpoint(&self, tenant_id: &str) -> AppResult<Url> {
        let mut endpoint = self.authority_host.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| AppError::Internal("authority host cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend([tenant_id, "oauth2", "v2.0", "token"]);
        Ok(endpoint)
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialTokenProvider {
    async fn acquire_token(&self, credentials: &Credentials) -> AppResult<Option<AccessToken>> {
        let endpoint = self.token_endpoint(credentials.tenant_id())?;
        let form = Serializer::new(String::new())
            .append_pair("client_id", credentials.client_id())
            .append_pair("client_secret", credentials.client_secret())
            .append_pair("scope", self.scope.as_str())
            .append_pair("grant_type", "client_credentials")
            .finish();

        let response = self
            .http_client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form)
            .send()
            .await
            .map_err(|error| AppError::Network(format!("token request failed: {error}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            AppError::Network(format!("failed to read token response body: {error}"))
        })?;
        let payload = serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);

        let token = payload
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(AccessToken::new);

        if token.is_none() {
            warn!(
                %status,
                error = payload
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("none"),
                error_description = payload
                    .get("error_description")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or(""),
                "token response carried no access token"
            );
        }

        Ok(token)
    }
}
