//! Platform console: tenant lifecycle. Gated by the platform-owner
//! session (client_id = None); tenant-admin sessions never reach here.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::UpdateClient;
use crate::database::repository::ClientRepository;
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::services::{ProvisionRequest, ProvisioningService};

/// POST /api/root/tenant - provision a new tenant.
///
/// The response always reports the deployment trigger outcome separately;
/// a failed webhook is a partial success on an already-created tenant.
pub async fn create(
    Extension(session): Extension<AdminSession>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request: ProvisionRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    tracing::info!(operator = %session.email, site = %request.site_name, "provisioning tenant");

    let pool = DatabaseManager::pool().await?;
    let outcome = ProvisioningService::new(pool).provision(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": outcome })),
    ))
}

/// GET /api/root/tenant
pub async fn list() -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let clients = ClientRepository::new(pool).list().await?;
    Ok(Json(json!({ "success": true, "data": clients })))
}

/// GET /api/root/tenant/:id
pub async fn show(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let client = ClientRepository::new(pool).get(id).await?;
    Ok(Json(json!({ "success": true, "data": client })))
}

/// PUT /api/root/tenant/:id
pub async fn update(
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch: UpdateClient = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    let pool = DatabaseManager::pool().await?;
    let client = ClientRepository::new(pool).update(id, patch).await?;
    Ok(Json(json!({ "success": true, "data": client })))
}

/// DELETE /api/root/tenant/:id - cascades to all tenant-scoped rows.
pub async fn remove(
    Extension(session): Extension<AdminSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    tracing::warn!(operator = %session.email, client_id = %id, "decommissioning tenant");

    let pool = DatabaseManager::pool().await?;
    ProvisioningService::new(pool).decommission(id).await?;
    Ok(Json(json!({ "success": true, "data": null })))
}
