//! Tenant-isolation properties, checked at the statement layer: every
//! statement the scoped layer can produce carries the tenant condition,
//! so a row owned by another tenant can never match.

use rihla_api::database::models::{CreateCountry, UpdateCountry};
use rihla_api::database::repository::IntoColumns;
use rihla_api::database::scope::{ScopedQuery, SqlParam};
use uuid::Uuid;

fn tenant_a() -> Uuid {
    Uuid::parse_str("aaaaaaaa-0000-0000-0000-000000000001").unwrap()
}

fn tenant_b() -> Uuid {
    Uuid::parse_str("bbbbbbbb-0000-0000-0000-000000000002").unwrap()
}

#[test]
fn get_by_id_for_tenant_a_cannot_match_a_row_owned_by_b() {
    let id_owned_by_b = Uuid::new_v4();
    let stmt = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .select_by_id_sql(id_owned_by_b)
        .unwrap();

    // The statement requires client_id = A alongside the id; B's row has
    // client_id = B and cannot satisfy it.
    assert!(stmt.sql.contains("\"client_id\" = $1"));
    assert!(stmt.sql.contains("\"id\" = $2"));
    assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
    assert!(!stmt.params.contains(&SqlParam::Uuid(tenant_b())));
}

#[test]
fn colliding_slugs_resolve_per_tenant() {
    // Same slug "germany" under two tenants: identical SQL, different
    // tenant parameter, so each lookup can only see its own row.
    let for_a = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .filter("slug", "germany")
        .select_sql()
        .unwrap();
    let for_b = ScopedQuery::new("countries", tenant_b())
        .unwrap()
        .filter("slug", "germany")
        .select_sql()
        .unwrap();

    assert_eq!(for_a.sql, for_b.sql);
    assert_eq!(for_a.params[1], SqlParam::Text("germany".into()));
    assert_eq!(for_b.params[1], SqlParam::Text("germany".into()));
    assert_eq!(for_a.params[0], SqlParam::Uuid(tenant_a()));
    assert_eq!(for_b.params[0], SqlParam::Uuid(tenant_b()));
}

#[test]
fn update_and_delete_require_both_id_and_tenant() {
    let id_owned_by_b = Uuid::new_v4();

    let update = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .update_sql(
            id_owned_by_b,
            UpdateCountry {
                name_ar: Some("تعديل".into()),
                ..Default::default()
            }
            .into_columns(),
        )
        .unwrap();
    assert!(update.sql.contains("WHERE \"id\" = $2 AND \"client_id\" = $3"));
    assert_eq!(update.params[2], SqlParam::Uuid(tenant_a()));

    let delete = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .delete_sql(id_owned_by_b)
        .unwrap();
    assert!(delete.sql.contains("WHERE \"id\" = $1 AND \"client_id\" = $2"));
    assert_eq!(delete.params[1], SqlParam::Uuid(tenant_a()));
}

#[test]
fn create_ignores_caller_supplied_client_id() {
    // A payload smuggling client_id = B into a create running under
    // tenant A must end up owned by A.
    let body = serde_json::json!({
        "name_ar": "ألمانيا",
        "slug": "germany",
        "client_id": tenant_b().to_string(),
    });

    // The payload type has no client_id field, so the value is dropped at
    // deserialization...
    let payload: CreateCountry = serde_json::from_value(body).unwrap();
    let columns = payload.into_columns();
    assert!(columns.iter().all(|(name, _)| *name != "client_id"));

    // ...and the statement assigns the scope's tenant.
    let stmt = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .insert_sql(columns)
        .unwrap();
    assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
    assert!(!stmt.params.contains(&SqlParam::Uuid(tenant_b())));
}

#[test]
fn a_forged_client_id_column_is_rejected_outright() {
    let result = ScopedQuery::new("countries", tenant_a())
        .unwrap()
        .insert_sql(vec![
            ("name_ar", SqlParam::Text("x".into())),
            ("client_id", SqlParam::Uuid(tenant_b())),
        ]);
    assert!(result.is_err());
}
