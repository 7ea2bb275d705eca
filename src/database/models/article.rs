use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, Sluggable, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title_ar: String,
    pub title_en: Option<String>,
    pub slug: String,
    pub excerpt_ar: Option<String>,
    pub content_ar: String,
    pub content_en: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for Article {
    const TABLE: &'static str = "articles";
    const LABEL: &'static str = "article";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sluggable for Article {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub title_ar: String,
    pub title_en: Option<String>,
    pub slug: String,
    pub excerpt_ar: Option<String>,
    pub content_ar: String,
    pub content_en: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl IntoColumns for CreateArticle {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("title_ar", self.title_ar.into()),
            ("slug", self.slug.into()),
            ("content_ar", self.content_ar.into()),
            ("is_published", self.is_published.into()),
        ];
        if self.is_published {
            columns.push(("published_at", SqlParam::Timestamp(Utc::now())));
        }
        if let Some(v) = self.title_en {
            columns.push(("title_en", v.into()));
        }
        if let Some(v) = self.excerpt_ar {
            columns.push(("excerpt_ar", v.into()));
        }
        if let Some(v) = self.content_en {
            columns.push(("content_en", v.into()));
        }
        if let Some(v) = self.cover_image {
            columns.push(("cover_image", v.into()));
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub slug: Option<String>,
    pub excerpt_ar: Option<String>,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: Option<bool>,
}

impl IntoColumns for UpdateArticle {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
        if let Some(v) = self.title_ar {
            columns.push(("title_ar", v.into()));
        }
        if let Some(v) = self.title_en {
            columns.push(("title_en", v.into()));
        }
        if let Some(v) = self.slug {
            columns.push(("slug", v.into()));
        }
        if let Some(v) = self.excerpt_ar {
            columns.push(("excerpt_ar", v.into()));
        }
        if let Some(v) = self.content_ar {
            columns.push(("content_ar", v.into()));
        }
        if let Some(v) = self.content_en {
            columns.push(("content_en", v.into()));
        }
        if let Some(v) = self.cover_image {
            columns.push(("cover_image", v.into()));
        }
        if let Some(v) = self.is_published {
            columns.push(("is_published", v.into()));
            if v {
                columns.push(("published_at", SqlParam::Timestamp(Utc::now())));
            }
        }
        columns
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}
