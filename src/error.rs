// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 401 Unauthorized
    Unauthorized(String),
    SessionExpired,

    // 403 Forbidden
    Forbidden(String),
    AccountDisabled,

    // 404 Not Found
    NotFound(String),
    TenantNotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
    /// Domain column matched more than one active client - upstream
    /// invariant violation, never resolved by picking one.
    AmbiguousTenant(String),
    /// Tenant row exists but dependent records or deployment failed.
    /// Carries the orphaned client id so an operator can resume.
    PartialProvisioning {
        message: String,
        client_id: String,
    },

    // 503 Service Unavailable
    StoreUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::AccountDisabled => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TenantNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::AmbiguousTenant(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PartialProvisioning { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::SessionExpired => "Session expired, please log in again",
            ApiError::Forbidden(msg) => msg,
            ApiError::AccountDisabled => "This account has been disabled",
            ApiError::NotFound(msg) => msg,
            ApiError::TenantNotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::AmbiguousTenant(msg) => msg,
            ApiError::PartialProvisioning { message, .. } => message,
            ApiError::StoreUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::SessionExpired => "SESSION_EXPIRED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::AccountDisabled => "ACCOUNT_DISABLED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::TenantNotFound(_) => "TENANT_NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::AmbiguousTenant(_) => "AMBIGUOUS_TENANT",
            ApiError::PartialProvisioning { .. } => "PARTIAL_PROVISIONING",
            ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError {
                message,
                field_errors,
            } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": "VALIDATION_ERROR"
                });

                if let Some(field_errors) = field_errors {
                    response["field_errors"] = json!(field_errors);
                }

                response
            }
            ApiError::PartialProvisioning { message, client_id } => {
                json!({
                    "error": true,
                    "message": message,
                    "code": "PARTIAL_PROVISIONING",
                    "client_id": client_id
                })
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: Option<HashMap<String, String>>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn tenant_not_found(host: impl Into<String>) -> Self {
        ApiError::TenantNotFound(format!("No active site is configured for '{}'", host.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        ApiError::StoreUnavailable(message.into())
    }
}

// Convert domain error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        use crate::database::manager::DatabaseError;
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => {
                ApiError::store_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Unavailable(msg) => {
                tracing::warn!("Database unavailable: {}", msg);
                ApiError::store_unavailable("Database temporarily unavailable")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<crate::tenant::TenantError> for ApiError {
    fn from(err: crate::tenant::TenantError) -> Self {
        use crate::tenant::TenantError;
        match err {
            TenantError::NotFound(host) => ApiError::tenant_not_found(host),
            TenantError::Ambiguous(host) => {
                tracing::error!("Multiple active clients match host '{}'", host);
                ApiError::AmbiguousTenant(format!(
                    "Site configuration for '{}' is ambiguous",
                    host
                ))
            }
            TenantError::Store(db) => db.into(),
        }
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        use crate::auth::AuthError;
        match err {
            AuthError::InvalidCredentials => {
                ApiError::unauthorized("Invalid email or password")
            }
            AuthError::AccountDisabled => ApiError::AccountDisabled,
            AuthError::SessionExpired => ApiError::SessionExpired,
            AuthError::InvalidToken(msg) => ApiError::unauthorized(msg),
            AuthError::MissingSecret => {
                tracing::error!("JWT secret not configured");
                ApiError::internal_server_error("Authentication is not configured")
            }
            AuthError::Crypto(msg) => {
                tracing::error!("Password hash error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            AuthError::Store(db) => db.into(),
        }
    }
}

impl From<crate::services::provisioning::ProvisioningError> for ApiError {
    fn from(err: crate::services::provisioning::ProvisioningError) -> Self {
        use crate::services::provisioning::ProvisioningError;
        match err {
            ProvisioningError::Validation { message, field_errors } => {
                ApiError::validation_error(message, Some(field_errors))
            }
            ProvisioningError::EmailTaken(email) => {
                ApiError::conflict(format!("An admin with email '{}' already exists", email))
            }
            ProvisioningError::Partial { client_id, reason } => {
                tracing::error!(
                    "Partial provisioning failure for client {}: {}",
                    client_id,
                    reason
                );
                ApiError::PartialProvisioning {
                    message: format!("Tenant record created but setup is incomplete: {}", reason),
                    client_id: client_id.to_string(),
                }
            }
            ProvisioningError::Store(db) => db.into(),
            ProvisioningError::Crypto(msg) => {
                tracing::error!("Password hash error during provisioning: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_is_distinct_from_unauthorized() {
        assert_eq!(ApiError::SessionExpired.error_code(), "SESSION_EXPIRED");
        assert_eq!(
            ApiError::unauthorized("nope").error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(
            ApiError::SessionExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn account_disabled_is_distinct_from_unauthorized() {
        assert_eq!(ApiError::AccountDisabled.error_code(), "ACCOUNT_DISABLED");
        assert_eq!(
            ApiError::AccountDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn partial_provisioning_body_carries_client_id() {
        let err = ApiError::PartialProvisioning {
            message: "deps failed".into(),
            client_id: "c1".into(),
        };
        let body = err.to_json();
        assert_eq!(body["code"], "PARTIAL_PROVISIONING");
        assert_eq!(body["client_id"], "c1");
    }
}
