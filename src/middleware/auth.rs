use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repository::ScopedRepository;
use crate::error::ApiError;

/// Authenticated admin context extracted from the session token.
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub admin_id: Uuid,
    /// None = platform owner, Some = tenant admin.
    pub client_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    pub issued_at: i64,
}

impl From<Claims> for AdminSession {
    fn from(claims: Claims) -> Self {
        Self {
            admin_id: claims.sub,
            client_id: claims.client_id,
            email: claims.email,
            full_name: claims.full_name,
            issued_at: claims.iat,
        }
    }
}

/// Validates the Bearer token and injects the admin session.
///
/// Expiry is enforced both by the token's exp claim and by re-computing
/// the fixed 30-minute window from iat on every request.
pub async fn jwt_auth_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = auth::decode_token(&token).map_err(ApiError::from)?;

    let timeout = config::config().security.session_timeout_minutes;
    if auth::session_expired(claims.iat, Utc::now().timestamp(), timeout) {
        return Err(ApiError::SessionExpired);
    }

    request.extensions_mut().insert(AdminSession::from(claims));

    Ok(next.run(request).await)
}

/// Gate for tenant-admin routes. A platform-owner session is never
/// accepted here; the session's client_id is the only source of tenant
/// scope for the request's repository.
pub async fn require_tenant_admin(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<AdminSession>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let client_id = session
        .client_id
        .ok_or_else(|| ApiError::forbidden("Platform sessions cannot access tenant admin"))?;

    let pool = DatabaseManager::pool().await?;
    request
        .extensions_mut()
        .insert(ScopedRepository::new(client_id, pool));

    Ok(next.run(request).await)
}

/// Gate for platform-owner routes: only sessions with client_id = None.
pub async fn require_platform_owner(request: Request, next: Next) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<AdminSession>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if session.client_id.is_some() {
        return Err(ApiError::forbidden(
            "Tenant admin sessions cannot access the platform console",
        ));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_bearer_token(&headers).is_err());
    }
}
