use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Authenticated operator. `client_id` is the discriminator: None is a
/// platform owner, Some is a tenant admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn is_platform_owner(&self) -> bool {
        self.client_id.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub client_id: Option<Uuid>,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}
