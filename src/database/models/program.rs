use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, Sluggable, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: Uuid,
    pub client_id: Uuid,
    pub university_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub degree: Option<String>,
    pub language: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for Program {
    const TABLE: &'static str = "programs";
    const LABEL: &'static str = "program";
    const DEFAULT_ORDER: (&'static str, Order) = ("name_ar", Order::Asc);

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Program {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgram {
    pub university_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub description_ar: Option<String>,
    pub degree: Option<String>,
    pub language: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<String>,
}

impl IntoColumns for CreateProgram {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("name_ar", self.name_ar.into()),
            ("slug", self.slug.into()),
        ];
        if let Some(v) = self.university_id {
            columns.push(("university_id", v.into()));
        }
        if let Some(v) = self.country_id {
            columns.push(("country_id", v.into()));
        }
        if let Some(v) = self.name_en {
            columns.push(("name_en", v.into()));
        }
        if let Some(v) = self.description_ar {
            columns.push(("description_ar", v.into()));
        }
        if let Some(v) = self.degree {
            columns.push(("degree", v.into()));
        }
        if let Some(v) = self.language {
            columns.push(("language", v.into()));
        }
        if let Some(v) = self.duration_years {
            columns.push(("duration_years", v.into()));
        }
        if let Some(v) = self.tuition_fee {
            columns.push(("tuition_fee", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgram {
    pub university_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub description_ar: Option<String>,
    pub degree: Option<String>,
    pub language: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<String>,
}

impl IntoColumns for UpdateProgram {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(v) = self.university_id {
            columns.push(("university_id", v.into()));
        }
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
        if let Some(v) = self.degree {
            columns.push(("degree", v.into()));
        }
        if let Some(v) = self.language {
            columns.push(("language", v.into()));
        }
        if let Some(v) = self.duration_years {
            columns.push(("duration_years", v.into()));
        }
        if let Some(v) = self.tuition_fee {
            columns.push(("tuition_fee", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}
