use serde::{Deserialize, Serialize};

/// One application role assignment held by a directory user.
///
/// The directory exposes no human readable role name here, so the
/// identifier itself is the display key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    /// Assignment identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier of the application role that was granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_role_id: Option<String>,
    /// Display name of the resource application exposing the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_display_name: Option<String>,
    /// Display name of the assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_display_name: Option<String>,
    /// Creation timestamp as reported by the directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,
}

impl RoleAssignment {
    /// Creates an assignment carrying only an application role identifier.
    #[must_use]
    pub fn with_app_role_id(app_role_id: impl Into<String>) -> Self {
        Self {
            app_role_id: Some(app_role_id.into()),
            ..Self::default()
        }
    }

    /// Returns the key used to display and pivot this assignment.
    ///
    /// Prefers `appRoleId`, then `id`, then the empty string.
    #[must_use]
    pub fn role_key(&self) -> &str {
        [self.app_role_id.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::RoleAssignment;

    #[test]
    fn role_key_prefers_app_role_id() {
        let assignment = RoleAssignment {
            id: Some("assignment-1".to_owned()),
            app_role_id: Some("r1".to_owned()),
            ..RoleAssignment::default()
        };
        assert_eq!(assignment.role_key(), "r1");
    }

    #[test]
    fn role_key_falls_back_to_id() {
        let assignment = RoleAssignment {
            id: Some("assignment-1".to_owned()),
            app_role_id: Some(String::new()),
            ..RoleAssignment::default()
        };
        assert_eq!(assignment.role_key(), "assignment-1");
        assert_eq!(RoleAssignment::default().role_key(), "");
    }

    #[test]
    fn assignment_parses_directory_payload() {
        let assignment = serde_json::from_value::<RoleAssignment>(serde_json::json!({
            "id": "abc",
            "appRoleId": "00000000-0000-0000-0000-000000000000",
            "resourceDisplayName": "Payroll",
            "principalType": "User"
        }));

        assert!(assignment.is_ok());
        let assignment = assignment.unwrap_or_default();
        assert_eq!(assignment.resource_display_name.as_deref(), Some("Payroll"));
        assert_eq!(
            assignment.role_key(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
