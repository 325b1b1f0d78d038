//! Dashboard orchestration.
//!
//! Every operator interaction re-runs [`DashboardService::render`] from the
//! top. The only state carried between runs lives in the caller-supplied
//! [`SelectionStore`](crate::SelectionStore), which keeps the view testable
//! outside any UI layer.

mod render;
mod selection;
mod view;

use std::sync::Arc;

use rolescope_domain::Credentials;

use crate::{DirectoryService, TokenProvider};

pub use view::{DashboardView, RenderRequest, RoleDisplay, RolePanel, UserResults};

/// Application service rendering the user and role dashboard.
#[derive(Clone)]
pub struct DashboardService {
    title: String,
    credentials: Credentials,
    token_provider: Arc<dyn TokenProvider>,
    directory: DirectoryService,
}

impl DashboardService {
    /// Creates a dashboard service.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        credentials: Credentials,
        token_provider: Arc<dyn TokenProvider>,
        directory: DirectoryService,
    ) -> Self {
        Self {
            title: title.into(),
            credentials,
            token_provider,
            directory,
        }
    }

    /// Returns the dashboard title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}
