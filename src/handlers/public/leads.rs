//! Lead capture from the public site. The tenant comes from the resolved
//! host; the payload cannot choose a different one.

use axum::{extract::Extension, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::database::models::{CreateConsultation, CreateContactMessage};
use crate::database::repository::ScopedRepository;
use crate::error::ApiError;

/// POST /api/consultations
pub async fn consultations_create(
    Extension(repo): Extension<ScopedRepository>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: CreateConsultation = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    if payload.full_name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Err(ApiError::validation_error(
            "Name and phone are required",
            None,
        ));
    }

    let row = repo.consultations().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}

/// POST /api/contact-messages
pub async fn contact_messages_create(
    Extension(repo): Extension<ScopedRepository>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload: CreateContactMessage = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(ApiError::validation_error(
            "Name and message are required",
            None,
        ));
    }

    let row = repo.contact_messages().create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row })),
    ))
}
