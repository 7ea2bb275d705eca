pub mod auth;
pub mod resolve_tenant;

pub use auth::{jwt_auth_middleware, require_platform_owner, require_tenant_admin, AdminSession};
pub use resolve_tenant::{resolve_tenant_middleware, TenantContext};
