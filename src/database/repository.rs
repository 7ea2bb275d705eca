//! Tenant-scoped data access.
//!
//! `ScopedRepository` is constructed from a `client_id` exactly once (taken
//! from the resolved host or the admin session, never from caller input)
//! and hands out per-entity accessors that close over it. There is no other
//! sanctioned path to the content tables.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Admin, Client, CreateAdmin, CreateClient, UpdateClient};
use crate::database::models::{
    Article, ContactInfo, ContactMessage, Consultation, Country, Program, SiteSettings,
    Testimonial, University,
};
use crate::database::scope::{self, Order, ScopedQuery, SqlParam, SqlStatement};

/// A row type that lives in a tenant-scoped table.
pub trait TenantRecord: for<'r> FromRow<'r, PgRow> + Send + Unpin + Serialize {
    const TABLE: &'static str;
    /// Human label for not-found messages.
    const LABEL: &'static str;
    /// Stable, documented list ordering for this entity.
    const DEFAULT_ORDER: (&'static str, Order);

    fn id(&self) -> Uuid;
}

/// Marker for entities addressable by per-tenant slug.
pub trait Sluggable: TenantRecord {}

/// Create/update payload lowered to column-value pairs. The payload never
/// contains `id` or `client_id`; those are assigned by the scoped layer.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)>;

    /// Slug the payload wants to claim, for the per-tenant uniqueness
    /// pre-check. None for entities without slugs or patches not changing it.
    fn slug(&self) -> Option<&str> {
        None
    }
}

/// Entry point: one tenant's view of the content store.
#[derive(Clone)]
pub struct ScopedRepository {
    client_id: Uuid,
    pool: PgPool,
}

impl ScopedRepository {
    pub fn new(client_id: Uuid, pool: PgPool) -> Self {
        Self { client_id, pool }
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    /// Generic accessor used by the CRUD handlers; the named accessors
    /// below read better at call sites that know their entity.
    pub fn collection<T: TenantRecord>(&self) -> EntityRepository<T> {
        EntityRepository::new(self)
    }

    pub fn countries(&self) -> EntityRepository<Country> {
        EntityRepository::new(self)
    }

    pub fn universities(&self) -> EntityRepository<University> {
        EntityRepository::new(self)
    }

    pub fn programs(&self) -> EntityRepository<Program> {
        EntityRepository::new(self)
    }

    pub fn articles(&self) -> EntityRepository<Article> {
        EntityRepository::new(self)
    }

    pub fn testimonials(&self) -> EntityRepository<Testimonial> {
        EntityRepository::new(self)
    }

    pub fn consultations(&self) -> EntityRepository<Consultation> {
        EntityRepository::new(self)
    }

    pub fn contact_messages(&self) -> EntityRepository<ContactMessage> {
        EntityRepository::new(self)
    }

    pub fn site_settings(&self) -> SingletonRepository<SiteSettings> {
        SingletonRepository::new(self)
    }

    pub fn contact_info(&self) -> SingletonRepository<ContactInfo> {
        SingletonRepository::new(self)
    }
}

/// CRUD over one tenant-scoped entity collection.
pub struct EntityRepository<T: TenantRecord> {
    client_id: Uuid,
    pool: PgPool,
    _marker: std::marker::PhantomData<T>,
}

impl<T: TenantRecord> EntityRepository<T> {
    fn new(scope: &ScopedRepository) -> Self {
        Self {
            client_id: scope.client_id,
            pool: scope.pool.clone(),
            _marker: std::marker::PhantomData,
        }
    }

    fn query(&self) -> Result<ScopedQuery, DatabaseError> {
        ScopedQuery::new(T::TABLE, self.client_id)
    }

    fn not_found() -> DatabaseError {
        DatabaseError::NotFound(format!("{} not found", T::LABEL))
    }

    /// All rows for this tenant in the entity's documented order.
    pub async fn list(&self) -> Result<Vec<T>, DatabaseError> {
        self.list_filtered(Vec::new()).await
    }

    /// Rows matching extra equality filters, still tenant-scoped.
    pub async fn list_filtered(
        &self,
        filters: Vec<(&'static str, SqlParam)>,
    ) -> Result<Vec<T>, DatabaseError> {
        let (order_column, order) = T::DEFAULT_ORDER;
        let mut query = self.query()?.order_by(order_column, order);
        for (column, value) in filters {
            query = query.filter(column, value);
        }
        scope::fetch_all(&query.select_sql()?, &self.pool).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<T, DatabaseError> {
        let stmt = self.query()?.select_by_id_sql(id)?;
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create<C: IntoColumns>(&self, payload: C) -> Result<T, DatabaseError> {
        if let Some(slug) = payload.slug() {
            self.ensure_slug_available(slug, None).await?;
        }
        let stmt = self.query()?.insert_sql(payload.into_columns())?;
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("insert returned no row".to_string()))
    }

    /// Update filtered by id AND client_id: a row owned by another tenant
    /// matches zero rows and fails NotFound, never a silent no-op.
    pub async fn update<P: IntoColumns>(&self, id: Uuid, patch: P) -> Result<T, DatabaseError> {
        if let Some(slug) = patch.slug() {
            self.ensure_slug_available(slug, Some(id)).await?;
        }
        let stmt = self.query()?.update_sql(id, patch.into_columns())?;
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let stmt = self.query()?.delete_sql(id)?;
        let affected = scope::execute(&stmt, &self.pool).await?;
        if affected == 0 {
            return Err(Self::not_found());
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        scope::fetch_count(&self.query()?.count_sql()?, &self.pool).await
    }

    pub async fn count_filtered(
        &self,
        filters: Vec<(&'static str, SqlParam)>,
    ) -> Result<i64, DatabaseError> {
        let mut query = self.query()?;
        for (column, value) in filters {
            query = query.filter(column, value);
        }
        scope::fetch_count(&query.count_sql()?, &self.pool).await
    }

    /// Slug uniqueness within the tenant is enforced here by convention,
    /// not by a database constraint.
    async fn ensure_slug_available(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), DatabaseError> {
        let stmt = self.query()?.filter("slug", slug).select_sql()?;
        let existing: Option<T> = scope::fetch_optional(&stmt, &self.pool).await?;
        match existing {
            Some(row) if Some(row.id()) != exclude => Err(DatabaseError::Conflict(format!(
                "A {} with slug '{}' already exists",
                T::LABEL,
                slug
            ))),
            _ => Ok(()),
        }
    }
}

impl<T: Sluggable> EntityRepository<T> {
    /// Exact match on slug AND client_id. Slugs are not globally unique;
    /// rows from other tenants are never matched even on collision.
    pub async fn get_by_slug(&self, slug: &str) -> Result<T, DatabaseError> {
        let stmt = self.query()?.filter("slug", slug).select_sql()?;
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }
}

/// Accessor for the one-row-per-tenant tables (site_settings, contact_info).
pub struct SingletonRepository<T: TenantRecord> {
    client_id: Uuid,
    pool: PgPool,
    _marker: std::marker::PhantomData<T>,
}

impl<T: TenantRecord> SingletonRepository<T> {
    fn new(scope: &ScopedRepository) -> Self {
        Self {
            client_id: scope.client_id,
            pool: scope.pool.clone(),
            _marker: std::marker::PhantomData,
        }
    }

    /// None means "not saved yet": the row is created lazily on first save.
    pub async fn get(&self) -> Result<Option<T>, DatabaseError> {
        let stmt = ScopedQuery::new(T::TABLE, self.client_id)?
            .limit(1)
            .select_sql()?;
        scope::fetch_optional(&stmt, &self.pool).await
    }

    pub async fn save<C: IntoColumns>(&self, payload: C) -> Result<T, DatabaseError> {
        let stmt =
            ScopedQuery::new(T::TABLE, self.client_id)?.upsert_sql(payload.into_columns())?;
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("upsert returned no row".to_string()))
    }
}

// --- Registry access (platform console and resolver; not tenant-scoped) ----

/// Reads and writes on the `clients` registry. Reserved for the resolver
/// and the platform console; tenant sessions never touch it.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: CreateClient) -> Result<Client, DatabaseError> {
        let row = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, domain, slug, logo_url, primary_color, secondary_color, accent_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.domain)
        .bind(&input.slug)
        .bind(&input.logo_url)
        .bind(&input.primary_color)
        .bind(&input.secondary_color)
        .bind(&input.accent_color)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<Client>, DatabaseError> {
        let rows = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, DatabaseError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("client not found".to_string()))
    }

    /// Active clients whose domain or slug equals the normalized host.
    /// More than one row is an upstream invariant violation surfaced by the
    /// resolver, not deduplicated here.
    pub async fn find_active_by_host(&self, host: &str) -> Result<Vec<Client>, DatabaseError> {
        let rows = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE (domain = $1 OR slug = $1) AND is_active = true",
        )
        .bind(host)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateClient) -> Result<Client, DatabaseError> {
        let columns = client_patch_columns(patch);
        if columns.is_empty() {
            return Err(DatabaseError::QueryError(
                "update requires at least one column".to_string(),
            ));
        }
        let stmt = registry_update_sql("clients", id, columns);
        scope::fetch_optional(&stmt, &self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("client not found".to_string()))
    }

    /// Platform-owner action. Tenant-scoped rows go with the client via
    /// ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("client not found".to_string()));
        }
        Ok(())
    }
}

fn client_patch_columns(patch: UpdateClient) -> Vec<(&'static str, SqlParam)> {
    let mut columns: Vec<(&'static str, SqlParam)> = Vec::new();
    if let Some(v) = patch.name {
        columns.push(("name", v.into()));
    }
    if let Some(v) = patch.domain {
        columns.push(("domain", v.into()));
    }
    if let Some(v) = patch.slug {
        columns.push(("slug", v.into()));
    }
    if let Some(v) = patch.logo_url {
        columns.push(("logo_url", v.into()));
    }
    if let Some(v) = patch.is_active {
        columns.push(("is_active", v.into()));
    }
    if let Some(v) = patch.primary_color {
        columns.push(("primary_color", v.into()));
    }
    if let Some(v) = patch.secondary_color {
        columns.push(("secondary_color", v.into()));
    }
    if let Some(v) = patch.accent_color {
        columns.push(("accent_color", v.into()));
    }
    if let Some(v) = patch.deploy_project_id {
        columns.push(("deploy_project_id", v.into()));
    }
    if let Some(v) = patch.deploy_url {
        columns.push(("deploy_url", v.into()));
    }
    if let Some(v) = patch.custom_domain {
        columns.push(("custom_domain", v.into()));
    }
    columns
}

/// UPDATE on a registry table keyed by primary key only. Content tables
/// never go through here; their updates carry the client_id filter.
fn registry_update_sql(
    table: &'static str,
    id: Uuid,
    columns: Vec<(&'static str, SqlParam)>,
) -> SqlStatement {
    let mut assignments = Vec::with_capacity(columns.len() + 1);
    let mut params = Vec::with_capacity(columns.len() + 1);
    for (i, (column, value)) in columns.into_iter().enumerate() {
        assignments.push(format!("\"{}\" = ${}", column, i + 1));
        params.push(value);
    }
    assignments.push("\"updated_at\" = now()".to_string());
    let id_pos = params.len() + 1;
    params.push(SqlParam::Uuid(id));

    SqlStatement {
        sql: format!(
            "UPDATE \"{}\" SET {} WHERE \"id\" = ${} RETURNING *",
            table,
            assignments.join(", "),
            id_pos
        ),
        params,
    }
}

/// Admin lookups for login and provisioning. Every query pins the
/// platform/tenant discriminator explicitly.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: CreateAdmin) -> Result<Admin, DatabaseError> {
        let row = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (client_id, email, password_hash, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.client_id)
        .bind(input.email.to_lowercase())
        .bind(&input.password_hash)
        .bind(&input.full_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Tenant-admin lookup: the row must belong to the given client.
    pub async fn find_tenant_admin(
        &self,
        email: &str,
        client_id: Uuid,
    ) -> Result<Option<Admin>, DatabaseError> {
        let row = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE email = $1 AND client_id = $2",
        )
        .bind(email.to_lowercase())
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Platform-owner lookup: only rows with client_id IS NULL qualify.
    pub async fn find_platform_owner(&self, email: &str) -> Result<Option<Admin>, DatabaseError> {
        let row = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins WHERE email = $1 AND client_id IS NULL",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Provisioning pre-check. No unique constraint backs this; the race
    /// window is documented in DESIGN.md.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM admins WHERE email = $1")
                .bind(email.to_lowercase())
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0 > 0)
    }
}
