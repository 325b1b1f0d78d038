//! User by role presence matrix.

use rolescope_core::UserPrincipalName;
use serde::Serialize;

use crate::RoleAssignment;

/// One pivoted user row with a presence flag per role column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    /// User the row describes.
    pub user_principal_name: UserPrincipalName,
    /// `1` when the user holds the role in the matching column, else `0`.
    pub cells: Vec<u8>,
}

/// Presence matrix pivoted user x role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleHeatmap {
    roles: Vec<String>,
    rows: Vec<HeatmapRow>,
}

impl RoleHeatmap {
    /// Pivots per-user assignments into a presence matrix.
    ///
    /// Rows follow input order, columns follow first-seen role order.
    /// Duplicate assignments collapse to a single `1`.
    #[must_use]
    pub fn pivot(assignments: &[(UserPrincipalName, Vec<RoleAssignment>)]) -> Self {
        let mut roles: Vec<String> = Vec::new();
        for (_, user_roles) in assignments {
            for role in user_roles {
                let key = role.role_key();
                if !roles.iter().any(|known| known == key) {
                    roles.push(key.to_owned());
                }
            }
        }

        let rows = assignments
            .iter()
            .map(|(user_principal_name, user_roles)| HeatmapRow {
                user_principal_name: user_principal_name.clone(),
                cells: roles
                    .iter()
                    .map(|column| {
                        u8::from(user_roles.iter().any(|role| role.role_key() == column))
                    })
                    .collect(),
            })
            .collect();

        Self { roles, rows }
    }

    /// Column headers.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Pivoted rows.
    #[must_use]
    pub fn rows(&self) -> &[HeatmapRow] {
        &self.rows
    }

    /// Returns true when no user holds any role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rolescope_core::UserPrincipalName;

    use super::RoleHeatmap;
    use crate::RoleAssignment;

    fn upn(value: &str) -> UserPrincipalName {
        UserPrincipalName::new(value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn shared_role_yields_single_column() {
        let heatmap = RoleHeatmap::pivot(&[
            (upn("a@x.com"), vec![RoleAssignment::with_app_role_id("r1")]),
            (upn("b@x.com"), vec![RoleAssignment::with_app_role_id("r1")]),
        ]);

        assert_eq!(heatmap.roles(), ["r1".to_owned()]);
        assert_eq!(heatmap.rows().len(), 2);
        assert!(heatmap.rows().iter().all(|row| row.cells == vec![1]));
    }

    #[test]
    fn absent_roles_are_zero_and_duplicates_collapse() {
        let heatmap = RoleHeatmap::pivot(&[
            (
                upn("a@x.com"),
                vec![
                    RoleAssignment::with_app_role_id("r1"),
                    RoleAssignment::with_app_role_id("r1"),
                ],
            ),
            (upn("b@x.com"), vec![RoleAssignment::with_app_role_id("r2")]),
            (upn("c@x.com"), Vec::new()),
        ]);

        assert_eq!(heatmap.roles(), ["r1".to_owned(), "r2".to_owned()]);
        assert_eq!(heatmap.rows()[0].cells, vec![1, 0]);
        assert_eq!(heatmap.rows()[1].cells, vec![0, 1]);
        assert_eq!(heatmap.rows()[2].cells, vec![0, 0]);
    }

    #[test]
    fn heatmap_without_assignments_is_empty() {
        let heatmap = RoleHeatmap::pivot(&[(upn("a@x.com"), Vec::new())]);
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.rows().len(), 1);
    }
}
