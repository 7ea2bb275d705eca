use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, Sluggable, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for Country {
    const TABLE: &'static str = "countries";
    const LABEL: &'static str = "country";
    const DEFAULT_ORDER: (&'static str, Order) = ("name_ar", Order::Asc);

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Country {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCountry {
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl IntoColumns for CreateCountry {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("name_ar", self.name_ar.into()),
            ("slug", self.slug.into()),
            ("is_featured", self.is_featured.into()),
        ];
        if let Some(v) = self.name_en {
            columns.push(("name_en", v.into()));
        }
        if let Some(v) = self.description_ar {
            columns.push(("description_ar", v.into()));
        }
        if let Some(v) = self.description_en {
            columns.push(("description_en", v.into()));
        }
        if let Some(v) = self.image_url {
            columns.push(("image_url", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCountry {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
}

impl IntoColumns for UpdateCountry {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
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
        if let Some(v) = self.description_en {
            columns.push(("description_en", v.into()));
        }
        if let Some(v) = self.image_url {
            columns.push(("image_url", v.into()));
        }
        if let Some(v) = self.is_featured {
            columns.push(("is_featured", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}
