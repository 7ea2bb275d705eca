use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, Sluggable, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub client_id: Uuid,
    pub author_name: String,
    pub author_title: Option<String>,
    pub slug: String,
    pub quote_ar: String,
    pub rating: Option<i32>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for Testimonial {
    const TABLE: &'static str = "testimonials";
    const LABEL: &'static str = "testimonial";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Testimonial {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub author_name: String,
    pub author_title: Option<String>,
    pub slug: String,
    pub quote_ar: String,
    pub rating: Option<i32>,
    pub avatar_url: Option<String>,
}

impl IntoColumns for CreateTestimonial {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("author_name", self.author_name.into()),
            ("slug", self.slug.into()),
            ("quote_ar", self.quote_ar.into()),
        ];
        if let Some(v) = self.author_title {
            columns.push(("author_title", v.into()));
        }
        if let Some(v) = self.rating {
            columns.push(("rating", v.into()));
        }
        if let Some(v) = self.avatar_url {
            columns.push(("avatar_url", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestimonial {
    pub author_name: Option<String>,
    pub author_title: Option<String>,
    pub slug: Option<String>,
    pub quote_ar: Option<String>,
    pub rating: Option<i32>,
    pub avatar_url: Option<String>,
}

impl IntoColumns for UpdateTestimonial {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(v) = self.author_name {
            columns.push(("author_name", v.into()));
        }
        if let Some(v) = self.author_title {
            columns.push(("author_title", v.into()));
        }
        if let Some(v) = self.slug {
            columns.push(("slug", v.into()));
        }
        if let Some(v) = self.quote_ar {
            columns.push(("quote_ar", v.into()));
        }
        if let Some(v) = self.rating {
            columns.push(("rating", v.into()));
        }
        if let Some(v) = self.avatar_url {
            columns.push(("avatar_url", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}
