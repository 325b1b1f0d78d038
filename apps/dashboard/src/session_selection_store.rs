use async_trait::async_trait;
use rolescope_application::SelectionStore;
use rolescope_core::{AppError, AppResult, UserPrincipalName};
use tower_sessions::Session;

pub const SESSION_SELECTED_USER_KEY: &str = "rolescope.selected_user";
pub const SESSION_RENDERED_ROWS_KEY: &str = "rolescope.rendered_rows";

/// Selection store bound to one browser session.
pub struct SessionSelectionStore {
    session: Session,
}

impl SessionSelectionStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SelectionStore for SessionSelectionStore {
    async fn selected_user(&self) -> AppResult<Option<UserPrincipalName>> {
        self.session
            .get::<UserPrincipalName>(SESSION_SELECTED_USER_KEY)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read session selection: {error}"))
            })
    }

    async fn select_user(&self, user: UserPrincipalName) -> AppResult<()> {
        self.session
            .insert(SESSION_SELECTED_USER_KEY, user)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to store session selection: {error}"))
            })
    }

    async fn rendered_rows(&self) -> AppResult<Vec<Option<UserPrincipalName>>> {
        Ok(self
            .session
            .get::<Vec<Option<UserPrincipalName>>>(SESSION_RENDERED_ROWS_KEY)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read rendered rows: {error}"))
            })?
            .unwrap_or_default())
    }

    async fn remember_rendered_rows(
        &self,
        rows: Vec<Option<UserPrincipalName>>,
    ) -> AppResult<()> {
        self.session
            .insert(SESSION_RENDERED_ROWS_KEY, rows)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to store rendered rows: {error}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rolescope_application::SelectionStore;
    use rolescope_core::UserPrincipalName;
    use tower_sessions::{MemoryStore, Session};

    use super::SessionSelectionStore;

    fn upn(value: &str) -> UserPrincipalName {
        UserPrincipalName::new(value).unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn selection_round_trips_through_the_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let store = SessionSelectionStore::new(session.clone());

        assert!(matches!(store.selected_user().await, Ok(None)));
        assert!(store.select_user(upn("alice@x.com")).await.is_ok());
        assert!(
            store
                .remember_rendered_rows(vec![Some(upn("bob@x.com")), None])
                .await
                .is_ok()
        );

        let reread = SessionSelectionStore::new(session);
        assert!(matches!(
            reread.selected_user().await,
            Ok(Some(ref user)) if *user == upn("alice@x.com")
        ));
        assert!(matches!(
            reread.rendered_rows().await,
            Ok(ref rows) if *rows == vec![Some(upn("bob@x.com")), None]
        ));
    }
}
