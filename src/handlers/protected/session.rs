use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AdminSession;

/// GET /api/admin/whoami
pub async fn whoami(
    Extension(session): Extension<AdminSession>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({
        "success": true,
        "data": {
            "id": session.admin_id,
            "email": session.email,
            "full_name": session.full_name,
            "client_id": session.client_id,
            "issued_at": session.issued_at,
        }
    })))
}

/// POST /api/admin/logout
///
/// Sessions are stateless tokens; logout is the client discarding it.
/// The endpoint exists so the UI has an explicit transition to Anonymous.
pub async fn logout() -> Json<Value> {
    Json(json!({ "success": true, "data": null }))
}
