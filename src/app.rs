use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::models::{
    Article, Consultation, ContactMessage, Country, CreateArticle, CreateCountry, CreateProgram,
    CreateTestimonial, CreateUniversity, Program, Testimonial, University, UpdateArticle,
    UpdateConsultationStatus, UpdateCountry, UpdateMessageStatus, UpdateProgram,
    UpdateTestimonial, UpdateUniversity,
};
use crate::handlers::{elevated, protected, public};
use crate::middleware::{
    jwt_auth_middleware, require_platform_owner, require_tenant_admin, resolve_tenant_middleware,
};

pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Platform login carries no tenant context
        .route("/auth/platform/login", post(public::auth::platform_login))
        .merge(public_routes())
        .merge(admin_routes())
        .merge(platform_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Public marketing site + lead capture + tenant-admin login.
/// Everything here is scoped by the Host header through the resolver.
fn public_routes() -> Router {
    use public::{auth, content, leads, site};

    Router::new()
        .route("/api/countries", get(content::countries_list))
        .route("/api/countries/slug/:slug", get(content::countries_get))
        .route("/api/universities", get(content::universities_list))
        .route("/api/universities/slug/:slug", get(content::universities_get))
        .route("/api/programs", get(content::programs_list))
        .route("/api/programs/slug/:slug", get(content::programs_get))
        .route("/api/articles", get(content::articles_list))
        .route("/api/articles/slug/:slug", get(content::articles_get))
        .route("/api/testimonials", get(content::testimonials_list))
        .route("/api/site-settings", get(site::site_settings_get))
        .route("/api/contact-info", get(site::contact_info_get))
        .route("/api/consultations", post(leads::consultations_create))
        .route("/api/contact-messages", post(leads::contact_messages_create))
        .route("/auth/login", post(auth::login))
        .layer(from_fn(resolve_tenant_middleware))
}

/// Tenant-admin CRUD. Scope comes from the session claim only; the
/// tenant-admin gate injects the scoped repository.
fn admin_routes() -> Router {
    use protected::{data, session, settings, stats};

    Router::new()
        .route(
            "/api/admin/countries",
            get(data::list::<Country>).post(data::create::<Country, CreateCountry>),
        )
        .route(
            "/api/admin/countries/:id",
            get(data::get::<Country>)
                .put(data::update::<Country, UpdateCountry>)
                .delete(data::remove::<Country>),
        )
        .route(
            "/api/admin/universities",
            get(data::list::<University>).post(data::create::<University, CreateUniversity>),
        )
        .route(
            "/api/admin/universities/:id",
            get(data::get::<University>)
                .put(data::update::<University, UpdateUniversity>)
                .delete(data::remove::<University>),
        )
        .route(
            "/api/admin/programs",
            get(data::list::<Program>).post(data::create::<Program, CreateProgram>),
        )
        .route(
            "/api/admin/programs/:id",
            get(data::get::<Program>)
                .put(data::update::<Program, UpdateProgram>)
                .delete(data::remove::<Program>),
        )
        .route(
            "/api/admin/articles",
            get(data::list::<Article>).post(data::create::<Article, CreateArticle>),
        )
        .route(
            "/api/admin/articles/:id",
            get(data::get::<Article>)
                .put(data::update::<Article, UpdateArticle>)
                .delete(data::remove::<Article>),
        )
        .route(
            "/api/admin/testimonials",
            get(data::list::<Testimonial>).post(data::create::<Testimonial, CreateTestimonial>),
        )
        .route(
            "/api/admin/testimonials/:id",
            get(data::get::<Testimonial>)
                .put(data::update::<Testimonial, UpdateTestimonial>)
                .delete(data::remove::<Testimonial>),
        )
        .route("/api/admin/consultations", get(data::list::<Consultation>))
        .route(
            "/api/admin/consultations/:id",
            delete(data::remove::<Consultation>),
        )
        .route(
            "/api/admin/consultations/:id/status",
            put(data::update::<Consultation, UpdateConsultationStatus>),
        )
        .route(
            "/api/admin/contact-messages",
            get(data::list::<ContactMessage>),
        )
        .route(
            "/api/admin/contact-messages/:id",
            delete(data::remove::<ContactMessage>),
        )
        .route(
            "/api/admin/contact-messages/:id/status",
            put(data::update::<ContactMessage, UpdateMessageStatus>),
        )
        .route(
            "/api/admin/site-settings",
            get(settings::site_settings_get).put(settings::site_settings_save),
        )
        .route(
            "/api/admin/contact-info",
            get(settings::contact_info_get).put(settings::contact_info_save),
        )
        .route("/api/admin/dashboard/stats", get(stats::dashboard))
        .route("/api/admin/whoami", get(session::whoami))
        .route("/api/admin/logout", post(session::logout))
        // Innermost first: JWT validation, then the tenant-admin gate
        .layer(from_fn(require_tenant_admin))
        .layer(from_fn(jwt_auth_middleware))
}

/// Platform console, restricted to platform-owner sessions.
fn platform_routes() -> Router {
    use elevated::tenant;

    Router::new()
        .route("/api/root/tenant", post(tenant::create).get(tenant::list))
        .route(
            "/api/root/tenant/:id",
            get(tenant::show).put(tenant::update).delete(tenant::remove),
        )
        .layer(from_fn(require_platform_owner))
        .layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Rihla API",
            "version": version,
            "description": "Multi-tenant study-abroad consultancy platform",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/login, /auth/platform/login (public - token acquisition)",
                "content": "/api/{countries|universities|programs|articles|testimonials} (public, host-scoped)",
                "leads": "/api/consultations, /api/contact-messages (public, host-scoped)",
                "admin": "/api/admin/* (protected - tenant admin)",
                "root": "/api/root/tenant (restricted - platform owner)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
