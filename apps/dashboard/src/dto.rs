use rolescope_application::{RenderRequest, RoleDisplay};
use rolescope_core::UserPrincipalName;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::Serializer;

/// Query string of the dashboard page and its JSON twin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub search: Option<String>,
    pub view: Option<RoleDisplay>,
}

impl DashboardQuery {
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            query: self.q.clone(),
            search_triggered: self
                .search
                .as_deref()
                .is_some_and(|value| matches!(value, "1" | "true" | "on")),
            role_display: self.view.unwrap_or_default(),
        }
    }
}

/// Form posted by a per-row "view roles" action.
#[derive(Debug, Deserialize)]
pub struct SelectUserForm {
    pub upn: String,
    #[serde(default)]
    pub q: String,
    pub view: Option<RoleDisplay>,
}

/// Form posted by the row selector of the results table.
#[derive(Debug, Deserialize)]
pub struct SelectRowForm {
    pub index: usize,
    #[serde(default)]
    pub q: String,
    pub view: Option<RoleDisplay>,
}

/// Selection change through the JSON API. Exactly one field must be set.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub user_principal_name: Option<String>,
    pub row_index: Option<usize>,
}

/// Current selection.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selected_user: Option<UserPrincipalName>,
}

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Location of the dashboard re-running the search for `query` in `view`.
pub fn dashboard_location(query: &str, view: RoleDisplay) -> String {
    let view = match view {
        RoleDisplay::Table => "table",
        RoleDisplay::Heatmap => "heatmap",
    };
    let encoded = Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("search", "1")
        .append_pair("view", view)
        .finish();
    format!("/?{encoded}")
}

#[cfg(test)]
mod tests {
    use rolescope_application::RoleDisplay;

    use super::{DashboardQuery, dashboard_location};

    #[test]
    fn search_flag_accepts_common_truthy_values() {
        for value in ["1", "true", "on"] {
            let query = DashboardQuery {
                search: Some(value.to_owned()),
                ..DashboardQuery::default()
            };
            assert!(query.render_request().search_triggered);
        }

        assert!(!DashboardQuery::default().render_request().search_triggered);
    }

    #[test]
    fn location_encodes_query_text() {
        assert_eq!(
            dashboard_location("a&b c", RoleDisplay::Heatmap),
            "/?q=a%26b+c&search=1&view=heatmap"
        );
    }
}
