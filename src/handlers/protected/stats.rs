use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::database::repository::ScopedRepository;
use crate::error::ApiError;
use crate::services::stats;

/// GET /api/admin/dashboard/stats
pub async fn dashboard(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let stats = stats::dashboard_stats(&repo).await?;
    Ok(Json(json!({ "success": true, "data": stats })))
}
