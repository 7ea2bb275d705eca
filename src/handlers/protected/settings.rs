use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::database::models::{SaveContactInfo, SaveSiteSettings};
use crate::database::repository::ScopedRepository;
use crate::error::ApiError;

/// GET /api/admin/site-settings
pub async fn site_settings_get(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let settings = repo.site_settings().get().await?;
    Ok(Json(json!({ "success": true, "data": settings })))
}

/// PUT /api/admin/site-settings - upsert; the row is created on first save.
pub async fn site_settings_save(
    Extension(repo): Extension<ScopedRepository>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: SaveSiteSettings = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;
    let settings = repo.site_settings().save(payload).await?;
    Ok(Json(json!({ "success": true, "data": settings })))
}

/// GET /api/admin/contact-info
pub async fn contact_info_get(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let info = repo.contact_info().get().await?;
    Ok(Json(json!({ "success": true, "data": info })))
}

/// PUT /api/admin/contact-info
pub async fn contact_info_save(
    Extension(repo): Extension<ScopedRepository>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: SaveContactInfo = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;
    let info = repo.contact_info().save(payload).await?;
    Ok(Json(json!({ "success": true, "data": info })))
}
