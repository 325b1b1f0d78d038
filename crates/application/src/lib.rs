//! Application services and ports.

#![forbid(unsafe_code)]

mod dashboard_service;
mod directory_ports;
mod directory_service;
mod selection_ports;

pub use dashboard_service::{
    DashboardService, DashboardView, RenderRequest, RoleDisplay, RolePanel, UserResults,
};
pub use directory_ports::{DirectoryGateway, DirectoryResponseCache, TokenProvider};
pub use directory_service::{DEFAULT_CACHE_TTL_SECONDS, DirectoryService};
pub use selection_ports::SelectionStore;
