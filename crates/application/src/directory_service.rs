use std::sync::Arc;

use rolescope_core::{AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, RoleHeatmap, UserQuery, UserRecord};
use tracing::debug;

use crate::{DirectoryGateway, DirectoryResponseCache};

/// Default lifetime of cached directory responses.
pub const DEFAULT_CACHE_TTL_SECONDS: u32 = 600;

/// Application service for user listing, search and role lookup.
#[derive(Clone)]
pub struct DirectoryService {
    gateway: Arc<dyn DirectoryGateway>,
    cache: Option<Arc<dyn DirectoryResponseCache>>,
    cache_ttl_seconds: u32,
}

impl DirectoryService {
    /// Creates an uncached service.
    #[must_use]
    pub fn new(gateway: Arc<dyn DirectoryGateway>) -> Self {
        Self {
            gateway,
            cache: None,
            cache_ttl_seconds: 0,
        }
    }

    /// Routes reads through a response cache. A zero ttl disables caching.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn DirectoryResponseCache>, ttl_seconds: u32) -> Self {
        if ttl_seconds > 0 {
            self.cache = Some(cache);
            self.cache_ttl_seconds = ttl_seconds;
        }
        self
    }

    /// Fetches the full user collection.
    pub async fn list_users(&self, token: &AccessToken) -> AppResult<Vec<UserRecord>> {
        if let Some(cache) = &self.cache {
            if let Some(users) = cache.get_users(token).await? {
                debug!(count = users.len(), "user listing served from cache");
                return Ok(users);
            }
        }

        let users = self.gateway.list_users(token).await?;
        debug!(count = users.len(), "user listing fetched");

        if let Some(cache) = &self.cache {
            cache
                .set_users(token, users.clone(), self.cache_ttl_seconds)
                .await?;
        }

        Ok(users)
    }

    /// Fetches the user collection and derives the filtered view.
    pub async fn search_users(
        &self,
        token: &AccessToken,
        query: &UserQuery,
    ) -> AppResult<Vec<UserRecord>> {
        let users = self.list_users(token).await?;
        Ok(query.filter(&users))
    }

    /// Fetches the role assignments of one user.
    pub async fn roles_for(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Vec<RoleAssignment>> {
        if let Some(cache) = &self.cache {
            if let Some(roles) = cache.get_roles(token, user).await? {
                debug!(%user, count = roles.len(), "role assignments served from cache");
                return Ok(roles);
            }
        }

        let roles = self.gateway.list_role_assignments(token, user).await?;
        debug!(%user, count = roles.len(), "role assignments fetched");

        if let Some(cache) = &self.cache {
            cache
                .set_roles(token, user, roles.clone(), self.cache_ttl_seconds)
                .await?;
        }

        Ok(roles)
    }

    /// Builds the presence matrix for a set of users, one lookup per user.
    pub async fn role_heatmap(
        &self,
        token: &AccessToken,
        users: &[UserPrincipalName],
    ) -> AppResult<RoleHeatmap> {
        let mut assignments = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.roles_for(token, user).await?;
            assignments.push((user.clone(), roles));
        }

        Ok(RoleHeatmap::pivot(&assignments))
    }
}

#[cfg(test)]
mod tests;
