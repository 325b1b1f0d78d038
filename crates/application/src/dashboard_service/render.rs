use chrono::Utc;
use rolescope_core::{AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, UserQuery, UserRecord};
use tracing::{info, warn};

use super::DashboardService;
use super::view::{DashboardView, RenderRequest, RoleDisplay, RolePanel, UserResults};
use crate::SelectionStore;

const AUTHENTICATION_FAILED_MESSAGE: &str =
    "unable to obtain an access token from the identity provider";

impl DashboardService {
    /// Evaluates one render cycle.
    ///
    /// Acquires a fresh token, runs the search when triggered, then looks up
    /// roles for the stored selection. A missing token halts the cycle
    /// before any directory call.
    pub async fn render(
        &self,
        request: &RenderRequest,
        selection: &dyn SelectionStore,
    ) -> AppResult<DashboardView> {
        let query_text = request.query.clone().unwrap_or_default();
        let mut view = DashboardView {
            title: self.title.clone(),
            query: query_text,
            role_display: request.role_display,
            auth_error: None,
            users: UserResults::NotRequested,
            selected_user: None,
            roles: RolePanel::Hidden,
            rendered_at: Utc::now(),
        };

        let Some(token) = self.token_provider.acquire_token(&self.credentials).await? else {
            warn!(
                tenant_id = self.credentials.tenant_id(),
                "identity provider returned no access token"
            );
            view.auth_error = Some(AUTHENTICATION_FAILED_MESSAGE.to_owned());
            return Ok(view);
        };
        info!("access token acquired");

        let mut current_rows: Option<Vec<Option<UserPrincipalName>>> = None;
        if request.search_triggered {
            let query = UserQuery::new(request.query.as_deref());
            let matches = self.directory.search_users(&token, &query).await?;
            let rows: Vec<Option<UserPrincipalName>> =
                matches.iter().map(UserRecord::principal_name).collect();
            selection.remember_rendered_rows(rows.clone()).await?;
            current_rows = Some(rows);

            view.users = if matches.is_empty() {
                UserResults::NoMatches
            } else {
                UserResults::Rows(matches)
            };
        }

        let Some(user) = selection.selected_user().await? else {
            return Ok(view);
        };
        view.selected_user = Some(user.clone());

        view.roles = match request.role_display {
            RoleDisplay::Table => self.role_table(&token, user).await?,
            RoleDisplay::Heatmap => {
                let rows = match current_rows {
                    Some(rows) => rows,
                    None => selection.rendered_rows().await?,
                };
                self.role_heatmap(&token, user, rows).await?
            }
        };

        Ok(view)
    }

    async fn role_table(
        &self,
        token: &AccessToken,
        user: UserPrincipalName,
    ) -> AppResult<RolePanel> {
        let assignments = self.directory.roles_for(token, &user).await?;
        if assignments.is_empty() {
            return Ok(RolePanel::NoRoles { user });
        }

        Ok(RolePanel::Table { user, assignments })
    }

    async fn role_heatmap(
        &self,
        token: &AccessToken,
        user: UserPrincipalName,
        rows: Vec<Option<UserPrincipalName>>,
    ) -> AppResult<RolePanel> {
        let mut users: Vec<UserPrincipalName> = rows.into_iter().flatten().collect();
        if users.is_empty() {
            users.push(user.clone());
        }

        let heatmap = self.directory.role_heatmap(token, &users).await?;
        if heatmap.is_empty() {
            return Ok(RolePanel::NoRoles { user });
        }

        Ok(RolePanel::Heatmap { user, heatmap })
    }
}
