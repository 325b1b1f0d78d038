use rolescope_core::{AppError, AppResult};
use rolescope_domain::{AccessToken, UserRecord};
use tracing::debug;
use url::Url;

use super::GraphDirectoryClient;
use super::page::CollectionPage;

/// Lazy, finite walk over the paged user collection.
///
/// Each call to [`UserPager::next_page`] issues at most one request. Once the
/// continuation link is absent, or a request fails, the pager is exhausted
/// and cannot be restarted.
///
/// Relative continuation links resolve against the page that carried them.
/// Links leaving the directory origin are rejected so the bearer token is
/// only ever sent to the configured host.
pub struct UserPager {
    client: GraphDirectoryClient,
    token: AccessToken,
    next_url: Option<Url>,
    pages_fetched: usize,
}

impl UserPager {
    pub(super) fn new(client: GraphDirectoryClient, token: AccessToken, first_url: Url) -> Self {
        Self {
            client,
            token,
            next_url: Some(first_url),
            pages_fetched: 0,
        }
    }

    /// Fetches the next page, or returns `Ok(None)` once exhausted.
    pub async fn next_page(&mut self) -> AppResult<Option<Vec<UserRecord>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let (status, payload) = self.client.get(url.clone(), &self.token).await?;
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: "user collection not found".to_owned(),
            });
        }

        let page = CollectionPage::<UserRecord>::from_payload(payload);
        self.pages_fetched += 1;
        self.next_url = page
            .next_link
            .map(|link| self.continuation(&url, &link))
            .transpose()?;

        debug!(
            page = self.pages_fetched,
            records = page.value.len(),
            has_next = self.next_url.is_some(),
            "user page fetched"
        );

        Ok(Some(page.value))
    }

    fn continuation(&self, current: &Url, link: &str) -> AppResult<Url> {
        let next = current.join(link).map_err(|error| AppError::Upstream {
            status: 502,
            message: format!("directory returned an invalid continuation link '{link}': {error}"),
        })?;

        if next.origin() != self.client.base_url.origin() {
            return Err(AppError::Upstream {
                status: 502,
                message: format!(
                    "directory continuation link '{next}' leaves origin {}",
                    self.client.base_url.origin().ascii_serialization()
                ),
            });
        }

        Ok(next)
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns true once no further page will be requested.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next_url.is_none()
    }
}
