use async_trait::async_trait;
use rolescope_core::{AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, UserRecord};

/// Optional time-boxed cache port for directory responses.
///
/// Keys are the full call arguments. Entries expire by elapsed time only.
#[async_trait]
pub trait DirectoryResponseCache: Send + Sync {
    /// Returns the cached user listing for one token.
    async fn get_users(&self, token: &AccessToken) -> AppResult<Option<Vec<UserRecord>>>;

    /// Stores the user listing for one token with ttl.
    async fn set_users(
        &self,
        token: &AccessToken,
        users: Vec<UserRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()>;

    /// Returns cached role assignments for one token and user.
    async fn get_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Option<Vec<RoleAssignment>>>;

    /// Stores role assignments for one token and user with ttl.
    async fn set_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
        roles: Vec<RoleAssignment>,
        ttl_seconds: u32,
    ) -> AppResult<()>;
}
