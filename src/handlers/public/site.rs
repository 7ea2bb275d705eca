use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::database::repository::ScopedRepository;
use crate::error::ApiError;

/// GET /api/site-settings
///
/// `data: null` means no settings saved yet (lazy creation); a load
/// failure is an error envelope, never another tenant's settings.
pub async fn site_settings_get(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let settings = repo.site_settings().get().await?;
    Ok(Json(json!({ "success": true, "data": settings })))
}

/// GET /api/contact-info
pub async fn contact_info_get(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let info = repo.contact_info().get().await?;
    Ok(Json(json!({ "success": true, "data": info })))
}
