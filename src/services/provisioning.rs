//! Platform tenant provisioning.
//!
//! Stands up a new tenant's minimum record set: the clients row first, then
//! settings, admin, and contact defaults in parallel, then a best-effort
//! deployment trigger that never rolls back the committed records.

use futures::try_join;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::auth;
use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    Client, CreateAdmin, CreateClient, SaveContactInfo, SaveSiteSettings,
};
use crate::database::repository::{AdminRepository, ClientRepository, ScopedRepository};

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("admin email already in use: {0}")]
    EmailTaken(String),

    /// The clients row exists but dependent records failed and the
    /// compensating delete also failed. Carries the orphan for manual
    /// cleanup or resume.
    #[error("partial provisioning failure for client {client_id}: {reason}")]
    Partial { client_id: Uuid, reason: String },

    #[error(transparent)]
    Store(#[from] DatabaseError),

    #[error("crypto error: {0}")]
    Crypto(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionRequest {
    pub site_name: String,
    pub owner_name: String,
    pub domain: String,
    /// Derived from site_name when absent.
    pub slug: Option<String>,
    pub admin_email: String,
    pub admin_password: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum DeploymentStatus {
    Triggered,
    Skipped,
    Failed(String),
}

#[derive(Debug, Serialize)]
pub struct ProvisionOutcome {
    pub client: Client,
    pub admin_id: Uuid,
    pub deployment: DeploymentStatus,
}

pub struct ProvisioningService {
    clients: ClientRepository,
    admins: AdminRepository,
    pool: sqlx::PgPool,
}

impl ProvisioningService {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn provision(
        &self,
        request: ProvisionRequest,
    ) -> Result<ProvisionOutcome, ProvisioningError> {
        validate_request(&request)?;

        // Pre-check, not a unique constraint: inherently race-prone and
        // documented as such.
        if self.admins.email_exists(&request.admin_email).await? {
            return Err(ProvisioningError::EmailTaken(request.admin_email));
        }

        let password_hash = auth::hash_password(&request.admin_password)
            .map_err(|e| ProvisioningError::Crypto(e.to_string()))?;

        let slug = request
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&request.site_name));

        // Step 1: the clients row must exist before anything that needs its id.
        let client = self
            .clients
            .insert(CreateClient {
                name: request.site_name.clone(),
                domain: request.domain.trim().to_ascii_lowercase(),
                slug,
                logo_url: request.logo_url.clone(),
                primary_color: request.primary_color.clone(),
                secondary_color: request.secondary_color.clone(),
                accent_color: request.accent_color.clone(),
            })
            .await?;

        tracing::info!(client_id = %client.id, domain = %client.domain, "client row created");

        // Step 2: dependent records, unordered among themselves.
        let scoped = ScopedRepository::new(client.id, self.pool.clone());
        let settings_repo = scoped.site_settings();
        let contact_repo = scoped.contact_info();

        let settings = settings_repo.save(SaveSiteSettings::defaults(
            &request.primary_color,
            &request.secondary_color,
            &request.accent_color,
            &request.admin_email,
        ));
        let admin = self.admins.insert(CreateAdmin {
            client_id: Some(client.id),
            email: request.admin_email.clone(),
            password_hash,
            full_name: Some(request.owner_name.clone()),
        });
        let contact = contact_repo.save(SaveContactInfo::defaults(&request.admin_email));

        let admin = match try_join!(settings, admin, contact) {
            Ok((_, admin, _)) => admin,
            Err(err) => return Err(self.compensate(client.id, err).await),
        };

        // Step 3: best-effort; failure is reported, never rolled back.
        let deployment = self.trigger_deployment(&client).await;

        Ok(ProvisionOutcome {
            client,
            admin_id: admin.id,
            deployment,
        })
    }

    /// Delete the orphaned clients row after a dependent insert failed.
    /// Only if that also fails does the orphan surface to the operator.
    async fn compensate(&self, client_id: Uuid, cause: DatabaseError) -> ProvisioningError {
        tracing::warn!(client_id = %client_id, error = %cause, "provisioning failed, compensating");
        match self.clients.delete(client_id).await {
            Ok(()) => ProvisioningError::Store(cause),
            Err(delete_err) => {
                tracing::error!(
                    client_id = %client_id,
                    error = %delete_err,
                    "compensating delete failed, orphaned client row remains"
                );
                ProvisioningError::Partial {
                    client_id,
                    reason: cause.to_string(),
                }
            }
        }
    }

    async fn trigger_deployment(&self, client: &Client) -> DeploymentStatus {
        let settings = &config::config().provisioning;
        let Some(webhook_url) = settings.deploy_webhook_url.as_deref() else {
            return DeploymentStatus::Skipped;
        };

        let payload = serde_json::json!({
            "client_id": client.id,
            "name": client.name,
            "domain": client.domain,
            "slug": client.slug,
        });

        let request = reqwest::Client::new().post(webhook_url).json(&payload).send();
        match tokio::time::timeout(Duration::from_secs(settings.deploy_timeout_secs), request).await
        {
            Ok(Ok(response)) if response.status().is_success() => DeploymentStatus::Triggered,
            Ok(Ok(response)) => {
                let reason = format!("deployment webhook returned {}", response.status());
                tracing::warn!(client_id = %client.id, "{}", reason);
                DeploymentStatus::Failed(reason)
            }
            Ok(Err(err)) => {
                tracing::warn!(client_id = %client.id, error = %err, "deployment webhook failed");
                DeploymentStatus::Failed(err.to_string())
            }
            Err(_) => {
                tracing::warn!(client_id = %client.id, "deployment webhook timed out");
                DeploymentStatus::Failed(format!(
                    "timed out after {}s",
                    settings.deploy_timeout_secs
                ))
            }
        }
    }

    /// Platform-owner teardown: cascades to all tenant-scoped rows.
    pub async fn decommission(&self, client_id: Uuid) -> Result<(), ProvisioningError> {
        self.clients.delete(client_id).await?;
        tracing::info!(client_id = %client_id, "client decommissioned");
        Ok(())
    }
}

fn validate_request(request: &ProvisionRequest) -> Result<(), ProvisioningError> {
    let mut field_errors = HashMap::new();

    if request.site_name.trim().is_empty() {
        field_errors.insert("site_name".to_string(), "Site name is required".to_string());
    }
    if request.owner_name.trim().is_empty() {
        field_errors.insert("owner_name".to_string(), "Owner name is required".to_string());
    }
    if request.domain.trim().is_empty() {
        field_errors.insert("domain".to_string(), "Domain is required".to_string());
    }
    if !is_valid_email(&request.admin_email) {
        field_errors.insert("admin_email".to_string(), "Invalid email format".to_string());
    }
    if request.admin_password.len() < 6 {
        field_errors.insert(
            "admin_password".to_string(),
            "Password must be at least 6 characters".to_string(),
        );
    }
    for (field, value) in [
        ("primary_color", &request.primary_color),
        ("secondary_color", &request.secondary_color),
        ("accent_color", &request.accent_color),
    ] {
        if !is_valid_hex_color(value) {
            field_errors.insert(
                field.to_string(),
                "Must be a hex color like #1a2b3c".to_string(),
            );
        }
    }
    if let Some(logo_url) = &request.logo_url {
        if !is_http_url(logo_url) {
            field_errors.insert(
                "logo_url".to_string(),
                "Logo URL must be http or https".to_string(),
            );
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ProvisioningError::Validation {
            message: "Invalid provisioning request".to_string(),
            field_errors,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_valid_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProvisionRequest {
        ProvisionRequest {
            site_name: "Acme Study".into(),
            owner_name: "Amira".into(),
            domain: "acme.example.com".into(),
            slug: None,
            admin_email: "amira@acme.example.com".into(),
            admin_password: "secret1".into(),
            primary_color: "#1e3a8a".into(),
            secondary_color: "#f59e0b".into(),
            accent_color: "#10b981".into(),
            logo_url: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut req = request();
        req.admin_password = "12345".into();
        let err = validate_request(&req).unwrap_err();
        match err {
            ProvisioningError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("admin_password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_colors_are_rejected() {
        let mut req = request();
        req.primary_color = "blue".into();
        req.accent_color = "#12345".into();
        let err = validate_request(&req).unwrap_err();
        match err {
            ProvisioningError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("primary_color"));
                assert!(field_errors.contains_key("accent_color"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn logo_url_must_be_http() {
        let mut req = request();
        req.logo_url = Some("ftp://cdn.example.com/logo.png".into());
        assert!(validate_request(&req).is_err());
        req.logo_url = Some("https://cdn.example.com/logo.png".into());
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn email_format_is_checked() {
        for bad in ["", "no-at.example.com", "a@b", "a@.com"] {
            let mut req = request();
            req.admin_email = bad.into();
            assert!(validate_request(&req).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn slugify_produces_url_safe_slugs() {
        assert_eq!(slugify("Acme Study"), "acme-study");
        assert_eq!(slugify("  Über Consult!! "), "ber-consult");
        assert_eq!(slugify("abc"), "abc");
    }
}
