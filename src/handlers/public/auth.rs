use axum::{extract::Extension, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::repository::AdminRepository;
use crate::error::ApiError;
use crate::middleware::TenantContext;
use crate::services::AuthService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - tenant-admin login.
///
/// The scope is the tenant resolved from the Host header; an admin of
/// another tenant fails exactly like a wrong password.
pub async fn login(
    Extension(tenant): Extension<TenantContext>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: LoginRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    let pool = DatabaseManager::pool().await?;
    let service = AuthService::new(AdminRepository::new(pool));
    let outcome = service
        .login_tenant_admin(tenant.client.id, &request.email, &request.password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": outcome.token,
            "admin": {
                "id": outcome.admin_id,
                "email": outcome.email,
                "full_name": outcome.full_name,
                "client_id": outcome.client_id,
            },
            "expires_in": outcome.expires_in,
        }
    })))
}

/// POST /auth/platform/login - platform-owner login, no tenant context.
pub async fn platform_login(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let request: LoginRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    let pool = DatabaseManager::pool().await?;
    let service = AuthService::new(AdminRepository::new(pool));
    let outcome = service
        .login_platform_owner(&request.email, &request.password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": outcome.token,
            "admin": {
                "id": outcome.admin_id,
                "email": outcome.email,
                "full_name": outcome.full_name,
                "is_platform_owner": true,
            },
            "expires_in": outcome.expires_in,
        }
    })))
}
