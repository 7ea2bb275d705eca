//! Tenant-admin CRUD, generic over the entity type. One set of handlers
//! serves every content collection; routes pin the concrete types.
//!
//! The repository in the request extensions was scoped from the session's
//! client_id by the tenant-admin gate - these handlers never see, parse,
//! or trust any other tenant identifier.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository::{IntoColumns, ScopedRepository, TenantRecord};
use crate::error::ApiError;

/// GET /api/admin/{collection}
pub async fn list<T>(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError>
where
    T: TenantRecord + 'static,
{
    let rows = repo.collection::<T>().list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/admin/{collection}/:id
pub async fn get<T>(
    Extension(repo): Extension<ScopedRepository>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError>
where
    T: TenantRecord + 'static,
{
    let row = repo.collection::<T>().get_by_id(id).await?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/admin/{collection}
pub async fn create<T, C>(
    Extension(repo): Extension<ScopedRepository>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError>
where
    T: TenantRecord + 'static,
    C: IntoColumns + DeserializeOwned + Send + 'static,
{
    let payload: C = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;
    let row = repo.collection::<T>().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// PUT /api/admin/{collection}/:id
pub async fn update<T, P>(
    Extension(repo): Extension<ScopedRepository>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError>
where
    T: TenantRecord + 'static,
    P: IntoColumns + DeserializeOwned + Send + 'static,
{
    let patch: P = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;
    let row = repo.collection::<T>().update(id, patch).await?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// DELETE /api/admin/{collection}/:id
pub async fn remove<T>(
    Extension(repo): Extension<ScopedRepository>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError>
where
    T: TenantRecord + 'static,
{
    repo.collection::<T>().delete(id).await?;
    Ok(Json(json!({ "success": true, "data": null })))
}
