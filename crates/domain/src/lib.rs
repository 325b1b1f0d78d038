//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod credentials;
mod heatmap;
mod role;
mod user;

pub use credentials::{AccessToken, Credentials};
pub use heatmap::{HeatmapRow, RoleHeatmap};
pub use role::RoleAssignment;
pub use user::{UserQuery, UserRecord};
