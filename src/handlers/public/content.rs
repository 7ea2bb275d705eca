//! Public marketing-site reads. Every handler works through the
//! request-scoped repository injected by the tenant middleware; none of
//! them accept a caller-supplied client id.

use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository::ScopedRepository;
use crate::database::scope::SqlParam;
use crate::error::ApiError;

/// GET /api/countries
pub async fn countries_list(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let rows = repo.countries().list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/countries/slug/:slug
pub async fn countries_get(
    Extension(repo): Extension<ScopedRepository>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = repo.countries().get_by_slug(&slug).await?;
    Ok(Json(json!({ "success": true, "data": row })))
}

#[derive(Debug, Deserialize)]
pub struct UniversityListQuery {
    pub country_id: Option<Uuid>,
}

/// GET /api/universities?country_id=
pub async fn universities_list(
    Extension(repo): Extension<ScopedRepository>,
    Query(query): Query<UniversityListQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut filters: Vec<(&'static str, SqlParam)> = Vec::new();
    if let Some(country_id) = query.country_id {
        filters.push(("country_id", country_id.into()));
    }
    let rows = repo.universities().list_filtered(filters).await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/universities/slug/:slug
pub async fn universities_get(
    Extension(repo): Extension<ScopedRepository>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = repo.universities().get_by_slug(&slug).await?;
    Ok(Json(json!({ "success": true, "data": row })))
}

#[derive(Debug, Deserialize)]
pub struct ProgramListQuery {
    pub university_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
}

/// GET /api/programs?university_id=&country_id=
pub async fn programs_list(
    Extension(repo): Extension<ScopedRepository>,
    Query(query): Query<ProgramListQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut filters: Vec<(&'static str, SqlParam)> = Vec::new();
    if let Some(university_id) = query.university_id {
        filters.push(("university_id", university_id.into()));
    }
    if let Some(country_id) = query.country_id {
        filters.push(("country_id", country_id.into()));
    }
    let rows = repo.programs().list_filtered(filters).await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/programs/slug/:slug
pub async fn programs_get(
    Extension(repo): Extension<ScopedRepository>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = repo.programs().get_by_slug(&slug).await?;
    Ok(Json(json!({ "success": true, "data": row })))
}

/// GET /api/articles - published articles only
pub async fn articles_list(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let rows = repo
        .articles()
        .list_filtered(vec![("is_published", true.into())])
        .await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/articles/slug/:slug - drafts are invisible publicly
pub async fn articles_get(
    Extension(repo): Extension<ScopedRepository>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = repo.articles().get_by_slug(&slug).await?;
    if !row.is_published {
        return Err(ApiError::not_found("article not found"));
    }
    Ok(Json(json!({ "success": true, "data": row })))
}

/// GET /api/testimonials
pub async fn testimonials_list(
    Extension(repo): Extension<ScopedRepository>,
) -> Result<Json<Value>, ApiError> {
    let rows = repo.testimonials().list().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}
