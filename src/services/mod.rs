pub mod auth_service;
pub mod provisioning;
pub mod stats;

pub use auth_service::{AuthService, LoginOutcome};
pub use provisioning::{DeploymentStatus, ProvisionOutcome, ProvisionRequest, ProvisioningService};
pub use stats::DashboardStats;
