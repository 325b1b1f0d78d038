mod page;
mod pager;

use async_trait::async_trait;
use reqwest::StatusCode;
use rolescope_application::DirectoryGateway;
use rolescope_core::{AppError, AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, UserRecord};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use self::page::CollectionPage;

pub use self::pager::UserPager;

/// Directory REST API root for the public cloud.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

const USER_PROJECTION: &str = "displayName,mail,userPrincipalName";

/// Directory API client over reqwest.
#[derive(Clone)]
pub struct GraphDirectoryClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl GraphDirectoryClient {
    /// Creates a client rooted at `base_url`, for example
    /// `https://graph.microsoft.com/v1.0`.
    pub fn new(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid directory base url '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "directory base url '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Starts a lazy walk over the user collection.
    pub fn user_pages(&self, token: &AccessToken) -> AppResult<UserPager> {
        Ok(UserPager::new(self.clone(), token.clone(), self.users_url()?))
    }

    fn users_url(&self) -> AppResult<Url> {
        let mut url = self.endpoint(&["users"])?;
        url.query_pairs_mut().append_pair("$select", USER_PROJECTION);
        Ok(url)
    }

    fn role_assignments_url(&self, user: &UserPrincipalName) -> AppResult<Url> {
        self.endpoint(&["users", user.as_str(), "appRoleAssignments"])
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("directory base url cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues an authenticated GET and returns the status with the decoded body.
    ///
    /// A body that is not JSON decodes to `Value::Null`.
    async fn get(&self, url: Url, token: &AccessToken) -> AppResult<(StatusCode, Value)> {
        let response = self
            .http_client
            .get(url.clone())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|error| AppError::Network(format!("GET {url} failed: {error}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            AppError::Network(format!("failed to read response body from {url}: {error}"))
        })?;

        let payload = serde_json::from_str::<Value>(&body).unwrap_or_else(|error| {
            warn!(%url, %status, %error, "directory response is not JSON");
            Value::Null
        });

        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(upstream_error(status, &payload));
        }

        Ok((status, payload))
    }
}

fn upstream_error(status: StatusCode, payload: &Value) -> AppError {
    let message = payload
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| status.canonical_reason())
        .unwrap_or("request failed")
        .to_owned();

    AppError::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DirectoryGateway for GraphDirectoryClient {
    async fn list_users(&self, token: &AccessToken) -> AppResult<Vec<UserRecord>> {
        let mut pager = self.user_pages(token)?;
        let mut users = Vec::new();
        while let Some(page) = pager.next_page().await? {
            users.extend(page);
        }

        Ok(users)
    }

    async fn list_role_assignments(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Vec<RoleAssignment>> {
        let (status, payload) = self.get(self.role_assignments_url(user)?, token).await?;
        if status == StatusCode::NOT_FOUND {
            debug!(%user, "role lookup for unknown user");
            return Ok(Vec::new());
        }

        Ok(CollectionPage::<RoleAssignment>::from_payload(payload).value)
    }
}
