use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, Sluggable, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct University {
    pub id: Uuid,
    pub client_id: Uuid,
    pub country_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub ranking: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for University {
    const TABLE: &'static str = "universities";
    const LABEL: &'static str = "university";
    const DEFAULT_ORDER: (&'static str, Order) = ("name_ar", Order::Asc);

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for University {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUniversity {
    pub country_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub ranking: Option<i32>,
}

impl IntoColumns for CreateUniversity {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("name_ar", self.name_ar.into()),
            ("slug", self.slug.into()),
        ];
        if let Some(v) = self.country_id {
            columns.push(("country_id", v.into()));
        }
        if let Some(v) = self.name_en {
            columns.push(("name_en", v.into()));
        }
        if let Some(v) = self.description_ar {
            columns.push(("description_ar", v.into()));
        }
        if let Some(v) = self.logo_url {
            columns.push(("logo_url", v.into()));
        }
        if let Some(v) = self.website_url {
            columns.push(("website_url", v.into()));
        }
        if let Some(v) = self.ranking {
            columns.push(("ranking", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUniversity {
    pub country_id: Option<Uuid>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub description_ar: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub ranking: Option<i32>,
}

impl IntoColumns for UpdateUniversity {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(v) = self.country_id {
            columns.push(("country_id", v.into()));
        }
        if let Some(v) = self.name_ar {
            columns.push(("name_ar", v.into()));
        }
        if let Some(v) = self.name_en {
            columns.push(("name_en", v.into()));
        }
        if let Some(v) = self.slug {
            columns.push(("slug", v.into()));
        }
        if let Some(v) = self.description_ar {
            columns.push(("description_ar", v.into()));
        }
        if let Some(v) = self.logo_url {
            columns.push(("logo_url", v.into()));
        }
        if let Some(v) = self.website_url {
            columns.push(("website_url", v.into()));
        }
        if let Some(v) = self.ranking {
            columns.push(("ranking", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}
