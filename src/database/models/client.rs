use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tenant registry row. Not itself tenant-scoped: read by the resolver on
/// every request, written only from the platform console.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub deploy_project_id: Option<String>,
    pub deploy_url: Option<String>,
    pub custom_domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub domain: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub deploy_project_id: Option<String>,
    pub deploy_url: Option<String>,
    pub custom_domain: Option<String>,
}
