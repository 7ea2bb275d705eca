use axum::{
    extract::Request,
    http::header::HOST,
    middleware::Next,
    response::Response,
};

use crate::database::manager::DatabaseManager;
use crate::database::models::Client;
use crate::database::repository::{ClientRepository, ScopedRepository};
use crate::error::ApiError;
use crate::tenant::{PgClientDirectory, TenantResolver};

/// Resolved tenant for this request, injected once by the middleware.
/// Downstream components never re-derive the tenant themselves.
#[derive(Clone, Debug)]
pub struct TenantContext {
    pub client: Client,
}

/// Middleware for the public site: maps the Host header to exactly one
/// active client and injects both the tenant context and a repository
/// scoped to it. TenantNotFound/AmbiguousTenant short-circuit here, before
/// any content query runs.
pub async fn resolve_tenant_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Missing Host header"))?
        .to_string();

    let pool = DatabaseManager::pool().await?;
    let resolver = TenantResolver::new(PgClientDirectory::new(ClientRepository::new(pool.clone())));
    let client = resolver.resolve(&host).await?;

    tracing::debug!(host = %host, client_id = %client.id, "tenant resolved");

    let scoped = ScopedRepository::new(client.id, pool);
    request.extensions_mut().insert(TenantContext { client });
    request.extensions_mut().insert(scoped);

    Ok(next.run(request).await)
}
