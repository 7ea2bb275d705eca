//! Tenant-scoped SQL generation.
//!
//! Every statement that touches a tenant-scoped table is produced here, and
//! every statement carries the `client_id` condition. Repositories never
//! write their own WHERE clauses, so the tenant filter cannot be forgotten
//! at a call site.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Typed bind parameter. Keeps SQL generation pure and inspectable in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    Int(i64),
    TextArray(Vec<String>),
    Timestamp(DateTime<Utc>),
    Json(Value),
}

impl From<Uuid> for SqlParam {
    fn from(v: Uuid) -> Self {
        SqlParam::Uuid(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<Vec<String>> for SqlParam {
    fn from(v: Vec<String>) -> Self {
        SqlParam::TextArray(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(v)
    }
}

/// Generated statement: SQL text plus positional parameters.
#[derive(Debug, Clone)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// Columns the builder owns; payloads may never set them directly.
const RESERVED_COLUMNS: &[&str] = &["id", "client_id", "created_at", "updated_at"];

/// Builder for statements against one tenant-scoped table.
///
/// Takes the `client_id` once at construction; all emitted SQL filters on
/// it (reads) or assigns it (inserts).
pub struct ScopedQuery {
    table: &'static str,
    client_id: Uuid,
    conditions: Vec<(&'static str, SqlParam)>,
    order: Option<(&'static str, Order)>,
    limit: Option<i64>,
}

impl ScopedQuery {
    pub fn new(table: &'static str, client_id: Uuid) -> Result<Self, DatabaseError> {
        validate_identifier(table)?;
        Ok(Self {
            table,
            client_id,
            conditions: Vec::new(),
            order: None,
            limit: None,
        })
    }

    pub fn filter(mut self, column: &'static str, value: impl Into<SqlParam>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn order_by(mut self, column: &'static str, order: Order) -> Self {
        self.order = Some((column, order));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// SELECT * scoped to the tenant, plus any extra conditions.
    pub fn select_sql(&self) -> Result<SqlStatement, DatabaseError> {
        let (where_clause, params) = self.where_clause()?;

        let mut sql = format!(
            "SELECT * FROM \"{}\" WHERE {}",
            self.table, where_clause
        );
        if let Some((column, order)) = self.order {
            validate_identifier(column)?;
            sql.push_str(&format!(" ORDER BY \"{}\" {}", column, order.as_sql()));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(SqlStatement { sql, params })
    }

    /// SELECT by primary key, still scoped to the tenant.
    pub fn select_by_id_sql(&self, id: Uuid) -> Result<SqlStatement, DatabaseError> {
        let scoped = Self {
            table: self.table,
            client_id: self.client_id,
            conditions: {
                let mut c = self.conditions.clone();
                c.push(("id", SqlParam::Uuid(id)));
                c
            },
            order: None,
            limit: None,
        };
        scoped.select_sql()
    }

    /// COUNT(*) scoped to the tenant.
    pub fn count_sql(&self) -> Result<SqlStatement, DatabaseError> {
        let (where_clause, params) = self.where_clause()?;
        Ok(SqlStatement {
            sql: format!(
                "SELECT COUNT(*) AS count FROM \"{}\" WHERE {}",
                self.table, where_clause
            ),
            params,
        })
    }

    /// INSERT with the scope's client_id assigned by the builder. Payload
    /// columns may not contain reserved columns, so a caller-supplied
    /// client_id can never reach the statement.
    pub fn insert_sql(
        &self,
        columns: Vec<(&'static str, SqlParam)>,
    ) -> Result<SqlStatement, DatabaseError> {
        validate_payload_columns(&columns)?;

        let mut names = vec!["\"client_id\"".to_string()];
        let mut placeholders = vec!["$1".to_string()];
        let mut params = vec![SqlParam::Uuid(self.client_id)];

        for (i, (column, value)) in columns.into_iter().enumerate() {
            names.push(format!("\"{}\"", column));
            placeholders.push(format!("${}", i + 2));
            params.push(value);
        }

        Ok(SqlStatement {
            sql: format!(
                "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *",
                self.table,
                names.join(", "),
                placeholders.join(", ")
            ),
            params,
        })
    }

    /// UPDATE filtered by both id and client_id. A row owned by another
    /// tenant matches zero rows and surfaces as NotFound at execution.
    pub fn update_sql(
        &self,
        id: Uuid,
        columns: Vec<(&'static str, SqlParam)>,
    ) -> Result<SqlStatement, DatabaseError> {
        validate_payload_columns(&columns)?;
        if columns.is_empty() {
            return Err(DatabaseError::QueryError(
                "update requires at least one column".to_string(),
            ));
        }

        let mut assignments = Vec::with_capacity(columns.len() + 1);
        let mut params = Vec::with_capacity(columns.len() + 2);
        for (i, (column, value)) in columns.into_iter().enumerate() {
            assignments.push(format!("\"{}\" = ${}", column, i + 1));
            params.push(value);
        }
        assignments.push("\"updated_at\" = now()".to_string());

        let id_pos = params.len() + 1;
        let client_pos = params.len() + 2;
        params.push(SqlParam::Uuid(id));
        params.push(SqlParam::Uuid(self.client_id));

        Ok(SqlStatement {
            sql: format!(
                "UPDATE \"{}\" SET {} WHERE \"id\" = ${} AND \"client_id\" = ${} RETURNING *",
                self.table,
                assignments.join(", "),
                id_pos,
                client_pos
            ),
            params,
        })
    }

    /// DELETE filtered by both id and client_id.
    pub fn delete_sql(&self, id: Uuid) -> Result<SqlStatement, DatabaseError> {
        Ok(SqlStatement {
            sql: format!(
                "DELETE FROM \"{}\" WHERE \"id\" = $1 AND \"client_id\" = $2",
                self.table
            ),
            params: vec![SqlParam::Uuid(id), SqlParam::Uuid(self.client_id)],
        })
    }

    /// Upsert keyed on client_id, for the one-row-per-tenant tables
    /// (site_settings, contact_info). Creates the row lazily on first save.
    pub fn upsert_sql(
        &self,
        columns: Vec<(&'static str, SqlParam)>,
    ) -> Result<SqlStatement, DatabaseError> {
        validate_payload_columns(&columns)?;
        if columns.is_empty() {
            return Err(DatabaseError::QueryError(
                "upsert requires at least one column".to_string(),
            ));
        }

        let mut names = vec!["\"client_id\"".to_string()];
        let mut placeholders = vec!["$1".to_string()];
        let mut updates = Vec::with_capacity(columns.len() + 1);
        let mut params = vec![SqlParam::Uuid(self.client_id)];

        for (i, (column, value)) in columns.into_iter().enumerate() {
            names.push(format!("\"{}\"", column));
            placeholders.push(format!("${}", i + 2));
            updates.push(format!("\"{}\" = EXCLUDED.\"{}\"", column, column));
            params.push(value);
        }
        updates.push("\"updated_at\" = now()".to_string());

        Ok(SqlStatement {
            sql: format!(
                "INSERT INTO \"{}\" ({}) VALUES ({}) ON CONFLICT (\"client_id\") DO UPDATE SET {} RETURNING *",
                self.table,
                names.join(", "),
                placeholders.join(", "),
                updates.join(", ")
            ),
            params,
        })
    }

    fn where_clause(&self) -> Result<(String, Vec<SqlParam>), DatabaseError> {
        let mut clauses = vec!["\"client_id\" = $1".to_string()];
        let mut params = vec![SqlParam::Uuid(self.client_id)];

        for (i, (column, value)) in self.conditions.iter().enumerate() {
            validate_identifier(column)?;
            clauses.push(format!("\"{}\" = ${}", column, i + 2));
            params.push(value.clone());
        }

        Ok((clauses.join(" AND "), params))
    }
}

fn validate_identifier(name: &str) -> Result<(), DatabaseError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(DatabaseError::QueryError(format!(
            "invalid SQL identifier: {}",
            name
        )))
    }
}

fn validate_payload_columns(columns: &[(&'static str, SqlParam)]) -> Result<(), DatabaseError> {
    for (column, _) in columns {
        validate_identifier(column)?;
        if RESERVED_COLUMNS.contains(column) {
            return Err(DatabaseError::QueryError(format!(
                "column '{}' is assigned by the repository, not the payload",
                column
            )));
        }
    }
    Ok(())
}

// --- Execution helpers ------------------------------------------------------

pub async fn fetch_all<T>(stmt: &SqlStatement, pool: &PgPool) -> Result<Vec<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = sqlx::query_as::<_, T>(&stmt.sql);
    for param in stmt.params.iter() {
        query = bind_query_as(query, param);
    }
    Ok(query.fetch_all(pool).await?)
}

pub async fn fetch_optional<T>(
    stmt: &SqlStatement,
    pool: &PgPool,
) -> Result<Option<T>, DatabaseError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = sqlx::query_as::<_, T>(&stmt.sql);
    for param in stmt.params.iter() {
        query = bind_query_as(query, param);
    }
    Ok(query.fetch_optional(pool).await?)
}

pub async fn fetch_count(stmt: &SqlStatement, pool: &PgPool) -> Result<i64, DatabaseError> {
    let mut query = sqlx::query(&stmt.sql);
    for param in stmt.params.iter() {
        query = bind_query(query, param);
    }
    let row = query.fetch_one(pool).await?;
    Ok(row.try_get("count")?)
}

/// Execute a write and return the number of affected rows.
pub async fn execute(stmt: &SqlStatement, pool: &PgPool) -> Result<u64, DatabaseError> {
    let mut query = sqlx::query(&stmt.sql);
    for param in stmt.params.iter() {
        query = bind_query(query, param);
    }
    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

fn bind_query_as<'q, O>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    param: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match param {
        SqlParam::Uuid(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
        SqlParam::Bool(v) => query.bind(*v),
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::TextArray(v) => query.bind(v),
        SqlParam::Timestamp(v) => query.bind(*v),
        SqlParam::Json(v) => query.bind(v),
    }
}

fn bind_query<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    param: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match param {
        SqlParam::Uuid(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
        SqlParam::Bool(v) => query.bind(*v),
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::TextArray(v) => query.bind(v),
        SqlParam::Timestamp(v) => query.bind(*v),
        SqlParam::Json(v) => query.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant_a() -> Uuid {
        Uuid::parse_str("aaaaaaaa-0000-0000-0000-000000000001").unwrap()
    }

    fn tenant_b() -> Uuid {
        Uuid::parse_str("bbbbbbbb-0000-0000-0000-000000000002").unwrap()
    }

    #[test]
    fn select_always_filters_on_client_id() {
        let stmt = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .select_sql()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"countries\" WHERE \"client_id\" = $1"
        );
        assert_eq!(stmt.params, vec![SqlParam::Uuid(tenant_a())]);
    }

    #[test]
    fn extra_filters_come_after_the_tenant_filter() {
        let stmt = ScopedQuery::new("universities", tenant_a())
            .unwrap()
            .filter("country_id", tenant_b())
            .order_by("name_ar", Order::Asc)
            .select_sql()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"universities\" WHERE \"client_id\" = $1 AND \"country_id\" = $2 ORDER BY \"name_ar\" ASC"
        );
        assert_eq!(stmt.params.len(), 2);
        assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
    }

    #[test]
    fn select_by_slug_filters_both_slug_and_tenant() {
        let stmt = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .filter("slug", "germany")
            .select_sql()
            .unwrap();
        assert!(stmt.sql.contains("\"client_id\" = $1"));
        assert!(stmt.sql.contains("\"slug\" = $2"));
        assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
        assert_eq!(stmt.params[1], SqlParam::Text("germany".to_string()));
    }

    #[test]
    fn select_by_id_is_tenant_scoped() {
        let id = Uuid::new_v4();
        let stmt = ScopedQuery::new("articles", tenant_a())
            .unwrap()
            .select_by_id_sql(id)
            .unwrap();
        assert!(stmt.sql.contains("\"client_id\" = $1"));
        assert!(stmt.sql.contains("\"id\" = $2"));
        assert_eq!(stmt.params, vec![SqlParam::Uuid(tenant_a()), SqlParam::Uuid(id)]);
    }

    #[test]
    fn insert_assigns_client_id_from_scope() {
        let stmt = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .insert_sql(vec![
                ("name_ar", SqlParam::Text("ألمانيا".into())),
                ("slug", SqlParam::Text("germany".into())),
            ])
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"countries\" (\"client_id\", \"name_ar\", \"slug\") VALUES ($1, $2, $3) RETURNING *"
        );
        assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
    }

    #[test]
    fn insert_rejects_payload_supplied_client_id() {
        let result = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .insert_sql(vec![("client_id", SqlParam::Uuid(tenant_b()))]);
        assert!(result.is_err());
    }

    #[test]
    fn update_filters_on_both_id_and_client_id() {
        let id = Uuid::new_v4();
        let stmt = ScopedQuery::new("articles", tenant_a())
            .unwrap()
            .update_sql(id, vec![("title_ar", SqlParam::Text("عنوان".into()))])
            .unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE \"articles\" SET \"title_ar\" = $1, \"updated_at\" = now() WHERE \"id\" = $2 AND \"client_id\" = $3 RETURNING *"
        );
        assert_eq!(stmt.params[1], SqlParam::Uuid(id));
        assert_eq!(stmt.params[2], SqlParam::Uuid(tenant_a()));
    }

    #[test]
    fn update_with_no_columns_is_an_error() {
        let result = ScopedQuery::new("articles", tenant_a())
            .unwrap()
            .update_sql(Uuid::new_v4(), vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn delete_filters_on_both_id_and_client_id() {
        let id = Uuid::new_v4();
        let stmt = ScopedQuery::new("programs", tenant_a())
            .unwrap()
            .delete_sql(id)
            .unwrap();
        assert_eq!(
            stmt.sql,
            "DELETE FROM \"programs\" WHERE \"id\" = $1 AND \"client_id\" = $2"
        );
        assert_eq!(stmt.params, vec![SqlParam::Uuid(id), SqlParam::Uuid(tenant_a())]);
    }

    #[test]
    fn upsert_conflicts_on_client_id() {
        let stmt = ScopedQuery::new("site_settings", tenant_a())
            .unwrap()
            .upsert_sql(vec![("primary_color", SqlParam::Text("#112233".into()))])
            .unwrap();
        assert!(stmt.sql.contains("ON CONFLICT (\"client_id\") DO UPDATE SET"));
        assert!(stmt.sql.contains("\"primary_color\" = EXCLUDED.\"primary_color\""));
        assert_eq!(stmt.params[0], SqlParam::Uuid(tenant_a()));
    }

    #[test]
    fn identifiers_are_validated() {
        assert!(ScopedQuery::new("countries; DROP TABLE clients", tenant_a()).is_err());
        assert!(ScopedQuery::new("Countries", tenant_a()).is_err());
        let bad_column = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .filter("slug\" OR 1=1 --", "x")
            .select_sql();
        assert!(bad_column.is_err());
    }

    #[test]
    fn same_builder_different_tenants_never_share_scope() {
        let for_a = ScopedQuery::new("countries", tenant_a())
            .unwrap()
            .select_sql()
            .unwrap();
        let for_b = ScopedQuery::new("countries", tenant_b())
            .unwrap()
            .select_sql()
            .unwrap();
        assert_eq!(for_a.sql, for_b.sql);
        assert_ne!(for_a.params, for_b.params);
    }
}
