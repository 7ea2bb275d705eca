use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, TenantRecord};
use crate::database::scope::{Order, SqlParam};

/// One row per client. Created lazily on first admin save.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSettings {
    pub id: Uuid,
    pub client_id: Uuid,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub show_countries: bool,
    pub show_universities: bool,
    pub show_programs: bool,
    pub show_articles: bool,
    pub show_testimonials: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for SiteSettings {
    const TABLE: &'static str = "site_settings";
    const LABEL: &'static str = "site settings";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveSiteSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    #[serde(default = "default_true")]
    pub show_countries: bool,
    #[serde(default = "default_true")]
    pub show_universities: bool,
    #[serde(default = "default_true")]
    pub show_programs: bool,
    #[serde(default = "default_true")]
    pub show_articles: bool,
    #[serde(default = "default_true")]
    pub show_testimonials: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
}

fn default_true() -> bool {
    true
}

impl SaveSiteSettings {
    /// Defaults seeded during tenant provisioning, before any admin save.
    pub fn defaults(primary: &str, secondary: &str, accent: &str, email: &str) -> Self {
        Self {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
            accent_color: accent.to_string(),
            show_countries: true,
            show_universities: true,
            show_programs: true,
            show_articles: true,
            show_testimonials: true,
            contact_email: Some(email.to_string()),
            contact_phone: None,
            facebook_url: None,
            instagram_url: None,
            twitter_url: None,
        }
    }
}

impl IntoColumns for SaveSiteSettings {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("primary_color", self.primary_color.into()),
            ("secondary_color", self.secondary_color.into()),
            ("accent_color", self.accent_color.into()),
            ("show_countries", self.show_countries.into()),
            ("show_universities", self.show_universities.into()),
            ("show_programs", self.show_programs.into()),
            ("show_articles", self.show_articles.into()),
            ("show_testimonials", self.show_testimonials.into()),
        ];
        if let Some(v) = self.contact_email {
            columns.push(("contact_email", v.into()));
        }
        if let Some(v) = self.contact_phone {
            columns.push(("contact_phone", v.into()));
        }
        if let Some(v) = self.facebook_url {
            columns.push(("facebook_url", v.into()));
        }
        if let Some(v) = self.instagram_url {
            columns.push(("instagram_url", v.into()));
        }
        if let Some(v) = self.twitter_url {
            columns.push(("twitter_url", v.into()));
        }
        columns
    }
}
