use async_trait::async_trait;
use rolescope_application::SelectionStore;
use rolescope_core::{AppResult, UserPrincipalName};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SelectionSlot {
    selected: Option<UserPrincipalName>,
    rendered_rows: Vec<Option<UserPrincipalName>>,
}

/// Selection store for a single in-process session.
#[derive(Debug, Default)]
pub struct InMemorySelectionStore {
    slot: RwLock<SelectionSlot>,
}

impl InMemorySelectionStore {
    /// Creates an empty selection store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn selected_user(&self) -> AppResult<Option<UserPrincipalName>> {
        Ok(self.slot.read().await.selected.clone())
    }

    async fn select_user(&self, user: UserPrincipalName) -> AppResult<()> {
        self.slot.write().await.selected = Some(user);
        Ok(())
    }

    async fn rendered_rows(&self) -> AppResult<Vec<Option<UserPrincipalName>>> {
        Ok(self.slot.read().await.rendered_rows.clone())
    }

    async fn remember_rendered_rows(
        &self,
        rows: Vec<Option<UserPrincipalName>>,
    ) -> AppResult<()> {
        self.slot.write().await.rendered_rows = rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rolescope_application::SelectionStore;
    use rolescope_core::UserPrincipalName;

    use super::InMemorySelectionStore;

    #[tokio::test]
    async fn selection_is_replaced_not_cleared_by_rendered_rows() {
        let store = InMemorySelectionStore::new();
        let alice = UserPrincipalName::new("alice@x.com").unwrap_or_else(|_| unreachable!());

        assert!(matches!(store.selected_user().await, Ok(None)));
        assert!(store.select_user(alice.clone()).await.is_ok());
        assert!(store.remember_rendered_rows(Vec::new()).await.is_ok());

        assert!(matches!(store.selected_user().await, Ok(Some(ref user)) if *user == alice));
    }
}
