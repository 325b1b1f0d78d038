use async_trait::async_trait;
use rolescope_core::{AppResult, UserPrincipalName};

/// Session-scoped slot holding the operator's selected user.
///
/// One store instance belongs to exactly one UI session. The selection
/// survives every re-render and only changes on an explicit selection.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Returns the selected user, if any.
    async fn selected_user(&self) -> AppResult<Option<UserPrincipalName>>;

    /// Replaces the selected user.
    async fn select_user(&self, user: UserPrincipalName) -> AppResult<()>;

    /// Returns the principal names of the last rendered result rows, by position.
    async fn rendered_rows(&self) -> AppResult<Vec<Option<UserPrincipalName>>>;

    /// Remembers the rows rendered in the current cycle.
    async fn remember_rendered_rows(&self, rows: Vec<Option<UserPrincipalName>>)
    -> AppResult<()>;
}
