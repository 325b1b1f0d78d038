use async_trait::async_trait;
use rolescope_core::{AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, UserRecord};

/// Port for the directory REST API.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Lists every user, following continuation links until exhausted.
    ///
    /// Records are returned in page order, each page exactly once.
    async fn list_users(&self, token: &AccessToken) -> AppResult<Vec<UserRecord>>;

    /// Lists the role assignments held by one user.
    ///
    /// Returns an empty list when the response carries no `value` array.
    async fn list_role_assignments(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Vec<RoleAssignment>>;
}
