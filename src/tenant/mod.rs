//! Tenant resolution: inbound host name -> client.
//!
//! Resolution happens once per request in middleware and the result is
//! passed down as request state. Nothing else re-derives the tenant.

use async_trait::async_trait;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::Client;
use crate::database::repository::ClientRepository;

#[derive(Debug, Error)]
pub enum TenantError {
    /// No active client matches the host. Fatal for any tenant-scoped
    /// page; there is no fallback tenant.
    #[error("no active client for host: {0}")]
    NotFound(String),

    /// More than one active client matches. The domain column is declared
    /// unique upstream; this is an invariant violation, not deduplicated.
    #[error("multiple active clients for host: {0}")]
    Ambiguous(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Lookup seam over the client registry, so resolution logic is testable
/// against an in-memory directory.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn find_active_by_host(&self, host: &str) -> Result<Vec<Client>, DatabaseError>;
}

/// Production directory backed by the clients table.
pub struct PgClientDirectory {
    clients: ClientRepository,
}

impl PgClientDirectory {
    pub fn new(clients: ClientRepository) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl ClientDirectory for PgClientDirectory {
    async fn find_active_by_host(&self, host: &str) -> Result<Vec<Client>, DatabaseError> {
        self.clients.find_active_by_host(host).await
    }
}

/// In-memory directory for tests.
pub struct StaticDirectory {
    clients: Vec<Client>,
}

impl StaticDirectory {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl ClientDirectory for StaticDirectory {
    async fn find_active_by_host(&self, host: &str) -> Result<Vec<Client>, DatabaseError> {
        Ok(self
            .clients
            .iter()
            .filter(|c| c.is_active && (c.domain == host || c.slug == host))
            .cloned()
            .collect())
    }
}

/// Maps a request's host name to exactly one active client.
///
/// Pure lookup with no side effects: calling it twice in the same request
/// context returns the same client.
pub struct TenantResolver<D: ClientDirectory> {
    directory: D,
}

impl<D: ClientDirectory> TenantResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, raw_host: &str) -> Result<Client, TenantError> {
        let host = normalize_host(raw_host);
        if host.is_empty() {
            return Err(TenantError::NotFound(raw_host.to_string()));
        }

        let mut matches = self.directory.find_active_by_host(&host).await?;

        // Exact match first; a bare "www." prefix falls through to the apex
        // domain. Never a default tenant.
        if matches.is_empty() {
            if let Some(apex) = host.strip_prefix("www.") {
                matches = self.directory.find_active_by_host(apex).await?;
            }
        }

        match matches.len() {
            0 => Err(TenantError::NotFound(host)),
            1 => Ok(matches.remove(0)),
            _ => Err(TenantError::Ambiguous(host)),
        }
    }
}

/// Lowercase, strip the port and any trailing dot. The lookup itself is
/// exact equality against the registry.
pub fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.');
    let without_port = match trimmed.rsplit_once(':') {
        // Strip a numeric port suffix; leave IPv6 literals (more colons) alone
        Some((head, tail))
            if !tail.is_empty()
                && tail.chars().all(|c| c.is_ascii_digit())
                && !head.is_empty()
                && !head.contains(':') =>
        {
            head
        }
        _ => trimmed,
    };
    without_port.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn client(domain: &str, slug: &str, active: bool) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: format!("{} site", slug),
            domain: domain.to_string(),
            slug: slug.to_string(),
            logo_url: None,
            is_active: active,
            primary_color: "#1e3a8a".into(),
            secondary_color: "#f59e0b".into(),
            accent_color: "#10b981".into(),
            deploy_project_id: None,
            deploy_url: None,
            custom_domain: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn normalizes_case_port_and_trailing_dot() {
        assert_eq!(normalize_host("Acme.Example.COM"), "acme.example.com");
        assert_eq!(normalize_host("acme.example.com:8080"), "acme.example.com");
        assert_eq!(normalize_host("acme.example.com."), "acme.example.com");
        assert_eq!(normalize_host("  acme.example.com "), "acme.example.com");
    }

    #[tokio::test]
    async fn resolves_single_active_match() {
        let c1 = client("acme.example.com", "acme", true);
        let expected = c1.id;
        let resolver = TenantResolver::new(StaticDirectory::new(vec![
            c1,
            client("globe.example.com", "globe", true),
        ]));

        let resolved = resolver.resolve("acme.example.com").await.unwrap();
        assert_eq!(resolved.id, expected);
    }

    #[tokio::test]
    async fn unknown_host_is_not_found_never_a_fallback() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![client(
            "acme.example.com",
            "acme",
            true,
        )]));

        let err = resolver.resolve("unknown.example.com").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }

    #[tokio::test]
    async fn inactive_clients_do_not_resolve() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![client(
            "acme.example.com",
            "acme",
            false,
        )]));

        let err = resolver.resolve("acme.example.com").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_domains_are_ambiguous_not_deduplicated() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![
            client("acme.example.com", "acme", true),
            client("acme.example.com", "acme-2", true),
        ]));

        let err = resolver.resolve("acme.example.com").await.unwrap_err();
        assert!(matches!(err, TenantError::Ambiguous(_)));
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![client(
            "acme.example.com",
            "acme",
            true,
        )]));

        let first = resolver.resolve("acme.example.com").await.unwrap();
        let second = resolver.resolve("acme.example.com").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn www_prefix_falls_through_to_apex() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![client(
            "acme.example.com",
            "acme",
            true,
        )]));

        let resolved = resolver.resolve("www.acme.example.com").await.unwrap();
        assert_eq!(resolved.domain, "acme.example.com");
    }

    #[tokio::test]
    async fn slug_also_resolves() {
        let resolver = TenantResolver::new(StaticDirectory::new(vec![client(
            "acme.example.com",
            "acme",
            true,
        )]));

        let resolved = resolver.resolve("acme").await.unwrap();
        assert_eq!(resolved.slug, "acme");
    }
}
