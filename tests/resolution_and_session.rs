//! Host resolution scenarios and the session window, exercised through the
//! library's public surface.

use chrono::Utc;
use rihla_api::auth::{
    decode_token_with_secret, generate_token_with_secret, session_expired, AuthError, Claims,
};
use rihla_api::database::models::Client;
use rihla_api::error::ApiError;
use rihla_api::tenant::{StaticDirectory, TenantError, TenantResolver};
use uuid::Uuid;

fn client(domain: &str, slug: &str) -> Client {
    Client {
        id: Uuid::new_v4(),
        name: format!("{} site", slug),
        domain: domain.to_string(),
        slug: slug.to_string(),
        logo_url: None,
        is_active: true,
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

#[tokio::test]
async fn known_host_resolves_unknown_host_fails() {
    let acme = client("acme.example.com", "acme");
    let acme_id = acme.id;
    let resolver = TenantResolver::new(StaticDirectory::new(vec![acme]));

    let resolved = resolver.resolve("acme.example.com").await.unwrap();
    assert_eq!(resolved.id, acme_id);

    let err = resolver.resolve("unknown.example.com").await.unwrap_err();
    assert!(matches!(err, TenantError::NotFound(_)));
}

#[tokio::test]
async fn resolving_twice_yields_the_same_client() {
    let resolver =
        TenantResolver::new(StaticDirectory::new(vec![client("acme.example.com", "acme")]));

    let first = resolver.resolve("acme.example.com").await.unwrap();
    let second = resolver.resolve("acme.example.com").await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn tenant_errors_map_to_their_api_codes() {
    let resolver = TenantResolver::new(StaticDirectory::new(vec![
        client("acme.example.com", "acme"),
        client("acme.example.com", "acme-two"),
    ]));

    let not_found: ApiError = TenantError::NotFound("x.example.com".into()).into();
    assert_eq!(not_found.error_code(), "TENANT_NOT_FOUND");

    let ambiguous: ApiError = resolver
        .resolve("acme.example.com")
        .await
        .unwrap_err()
        .into();
    assert_eq!(ambiguous.error_code(), "AMBIGUOUS_TENANT");
}

const SECRET: &str = "integration-secret";

fn claims_issued_minutes_ago(minutes: i64, client_id: Option<Uuid>) -> Claims {
    let issued = Utc::now() - chrono::Duration::minutes(minutes);
    Claims {
        sub: Uuid::new_v4(),
        client_id,
        email: "admin@acme.example.com".into(),
        full_name: None,
        iat: issued.timestamp(),
        exp: (issued + chrono::Duration::minutes(30)).timestamp(),
    }
}

#[test]
fn session_window_boundary_is_thirty_minutes() {
    let now = Utc::now().timestamp();
    assert!(session_expired(
        claims_issued_minutes_ago(31, None).iat,
        now,
        30
    ));
    assert!(!session_expired(
        claims_issued_minutes_ago(29, None).iat,
        now,
        30
    ));
}

#[test]
fn expired_token_surfaces_as_session_expired_not_unauthorized() {
    // 45 minutes old: expired well past the decoder's default 60s leeway
    let stale = claims_issued_minutes_ago(45, Some(Uuid::new_v4()));
    let token = generate_token_with_secret(&stale, SECRET).unwrap();

    let err = decode_token_with_secret(&token, SECRET).unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));

    let api: ApiError = err.into();
    assert_eq!(api.error_code(), "SESSION_EXPIRED");
}

#[test]
fn platform_and_tenant_sessions_stay_distinct() {
    let tenant = claims_issued_minutes_ago(0, Some(Uuid::new_v4()));
    let platform = claims_issued_minutes_ago(0, None);

    let tenant_token = generate_token_with_secret(&tenant, SECRET).unwrap();
    let platform_token = generate_token_with_secret(&platform, SECRET).unwrap();

    assert!(!decode_token_with_secret(&tenant_token, SECRET)
        .unwrap()
        .is_platform_owner());
    assert!(decode_token_with_secret(&platform_token, SECRET)
        .unwrap()
        .is_platform_owner());
}

#[test]
fn disabled_account_is_a_distinct_error() {
    let api: ApiError = AuthError::AccountDisabled.into();
    assert_eq!(api.error_code(), "ACCOUNT_DISABLED");

    let generic: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(generic.error_code(), "UNAUTHORIZED");
}
