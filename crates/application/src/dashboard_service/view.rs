use chrono::{DateTime, Utc};
use rolescope_core::UserPrincipalName;
use rolescope_domain::{RoleAssignment, RoleHeatmap, UserRecord};
use serde::{Deserialize, Serialize};

/// How role assignments are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleDisplay {
    /// Assignments of the selected user as a table.
    #[default]
    Table,
    /// Presence matrix across the currently filtered users.
    Heatmap,
}

/// Inputs of one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// Search box contents.
    pub query: Option<String>,
    /// Whether the operator pressed the search trigger this cycle.
    pub search_triggered: bool,
    /// Role presentation variant.
    pub role_display: RoleDisplay,
}

/// User table section of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum UserResults {
    /// No search was triggered this cycle.
    NotRequested,
    /// A search ran and nothing matched.
    NoMatches,
    /// Matching users in directory order.
    Rows(Vec<UserRecord>),
}

/// Role section of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolePanel {
    /// Nothing selected, or the cycle halted before role lookup.
    Hidden,
    /// The selected user holds no role, or the heatmap has no columns.
    NoRoles {
        /// Selected user.
        user: UserPrincipalName,
    },
    /// Assignments of the selected user.
    Table {
        /// Selected user.
        user: UserPrincipalName,
        /// Assignments in directory order.
        assignments: Vec<RoleAssignment>,
    },
    /// Presence matrix across the filtered users.
    Heatmap {
        /// Selected user.
        user: UserPrincipalName,
        /// Pivoted matrix.
        heatmap: RoleHeatmap,
    },
}

/// Fully evaluated dashboard for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Page title.
    pub title: String,
    /// Echo of the search box.
    pub query: String,
    /// Role presentation variant.
    pub role_display: RoleDisplay,
    /// Blocking authentication error. When set nothing else was fetched.
    pub auth_error: Option<String>,
    /// User table section.
    pub users: UserResults,
    /// Currently selected user.
    pub selected_user: Option<UserPrincipalName>,
    /// Role section.
    pub roles: RolePanel,
    /// Evaluation timestamp.
    pub rendered_at: DateTime<Utc>,
}

impl DashboardView {
    /// Returns true when the cycle stopped on an authentication failure.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.auth_error.is_some()
    }
}
