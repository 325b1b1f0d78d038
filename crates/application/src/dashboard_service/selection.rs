use rolescope_core::{AppError, AppResult, UserPrincipalName};
use tracing::debug;

use super::DashboardService;
use crate::SelectionStore;

impl DashboardService {
    /// Stores the user picked through a per-row "view roles" action.
    pub async fn select_user(
        &self,
        selection: &dyn SelectionStore,
        user: UserPrincipalName,
    ) -> AppResult<()> {
        debug!(%user, "selection replaced");
        selection.select_user(user).await
    }

    /// Stores the user at `index` of the last rendered result rows.
    ///
    /// The selection is left unchanged when the index cannot be resolved.
    pub async fn select_row(
        &self,
        selection: &dyn SelectionStore,
        index: usize,
    ) -> AppResult<UserPrincipalName> {
        let rows = selection.rendered_rows().await?;
        let row = rows.get(index).ok_or_else(|| {
            AppError::Validation(format!(
                "row {index} is outside the {} rendered rows",
                rows.len()
            ))
        })?;
        let user = row.clone().ok_or_else(|| {
            AppError::Validation(format!("row {index} has no user principal name"))
        })?;

        self.select_user(selection, user.clone()).await?;
        Ok(user)
    }
}
