use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, TenantRecord};
use crate::database::scope::{Order, SqlParam};

/// One row per client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactInfo {
    pub id: Uuid,
    pub client_id: Uuid,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
    pub whatsapp: Option<String>,
    pub map_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for ContactInfo {
    const TABLE: &'static str = "contact_info";
    const LABEL: &'static str = "contact info";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveContactInfo {
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
    pub whatsapp: Option<String>,
    pub map_url: Option<String>,
}

impl SaveContactInfo {
    /// Default record seeded at provisioning with the admin's email.
    pub fn defaults(admin_email: &str) -> Self {
        Self {
            phones: Vec::new(),
            emails: vec![admin_email.to_string()],
            address: None,
            working_hours: None,
            whatsapp: None,
            map_url: None,
        }
    }
}

impl IntoColumns for SaveContactInfo {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("phones", self.phones.into()),
            ("emails", self.emails.into()),
        ];
        if let Some(v) = self.address {
            columns.push(("address", v.into()));
        }
        if let Some(v) = self.working_hours {
            columns.push(("working_hours", v.into()));
        }
        if let Some(v) = self.whatsapp {
            columns.push(("whatsapp", v.into()));
        }
        if let Some(v) = self.map_url {
            columns.push(("map_url", v.into()));
        }
        columns
    }
}
