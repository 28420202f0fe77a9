pub mod applications;
pub mod auth;
pub mod blog;
pub mod contacts;
pub mod dashboard;
pub mod events;
pub mod export;
pub mod newsletter;
pub mod notify;
pub mod products;
pub mod public;
pub mod registrations;
pub mod team;
pub mod testimonials;
pub mod uploads;
pub mod webhooks;

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use shared_types::AppError;
use uuid::Uuid;

use crate::db::AppState;
use crate::rate_limit::{rate_limit_middleware, RateLimitState};

/// Parse a path id, rejecting anything that is not a UUID.
pub fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("Invalid UUID format"))
}

/// Turn a keyed lookup miss into a 404.
pub fn found<T>(row: Option<T>, what: &str) -> Result<T, AppError> {
    row.ok_or_else(|| AppError::not_found(format!("{what} not found")))
}

/// 204 when a row was removed, 404 otherwise.
pub fn deleted(removed: bool, what: &str) -> Result<StatusCode, AppError> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("{what} not found")))
    }
}

/// Anonymous form submissions. Rate limited per client when enabled.
fn submission_router(rate_limit: Option<RateLimitState>) -> Router<AppState> {
    let router = Router::new()
        .route("/api/events/{id}/registrations", post(registrations::register_for_event))
        .route("/api/applications", post(applications::submit_application))
        .route("/api/contact", post(contacts::submit_contact))
        .route("/api/newsletter", post(newsletter::subscribe))
        .route("/api/newsletter/unsubscribe", post(newsletter::unsubscribe))
        .route("/api/uploads/resume", post(uploads::upload_resume));

    match rate_limit {
        Some(limiter) => router.route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware)),
        None => router,
    }
}

/// Read-only pages of the public site.
fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/public/events", get(public::list_events))
        .route("/api/public/blog", get(public::list_blog_posts))
        .route("/api/public/blog/{slug}", get(public::get_blog_post))
        .route("/api/public/products", get(public::list_products))
        .route("/api/public/testimonials", get(public::list_testimonials))
        .route("/api/public/gallery", get(public::list_gallery))
        .route("/api/public/positions", get(public::list_positions))
}

/// Account routes. Register and login are throttled on their own buckets.
fn auth_router(rate_limit: Option<&RateLimitState>) -> Router<AppState> {
    let credentials = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));
    let credentials = match rate_limit {
        Some(limiter) => credentials.route_layer(middleware::from_fn_with_state(
            limiter.for_sign_in(),
            rate_limit_middleware,
        )),
        None => credentials,
    };

    credentials
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/admin/access", get(auth::access))
}

/// Dashboard API. Every handler takes `AdminRequired`.
fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(dashboard::stats))
        // Events
        .route("/api/admin/events", get(events::list_events).post(events::create_event))
        .route("/api/admin/events/{id}", put(events::update_event).delete(events::delete_event))
        .route("/api/admin/events/{id}/publish", patch(events::publish_event))
        // Registrations
        .route("/api/admin/registrations", get(registrations::list_registrations))
        .route("/api/admin/registrations/{id}", delete(registrations::delete_registration))
        .route("/api/admin/registrations/{id}/status", patch(registrations::update_registration_status))
        // Applications (interns and careers tabs)
        .route("/api/admin/applications", get(applications::list_applications))
        .route("/api/admin/applications/{id}", delete(applications::delete_application))
        .route("/api/admin/applications/{id}/status", patch(applications::update_application_status))
        // Contacts
        .route("/api/admin/contacts", get(contacts::list_contacts))
        .route("/api/admin/contacts/{id}", delete(contacts::delete_contact))
        .route("/api/admin/contacts/{id}/read", patch(contacts::mark_contact_read))
        // Newsletter
        .route("/api/admin/newsletter", get(newsletter::list_subscriptions))
        .route("/api/admin/newsletter/{id}", delete(newsletter::delete_subscription))
        .route("/api/admin/newsletter/{id}/active", patch(newsletter::set_subscription_active))
        // Blog
        .route("/api/admin/blog", get(blog::list_posts).post(blog::create_post))
        .route("/api/admin/blog/{id}", put(blog::update_post).delete(blog::delete_post))
        .route("/api/admin/blog/{id}/publish", patch(blog::publish_post))
        // Products
        .route("/api/admin/products", get(products::list_products).post(products::create_product))
        .route("/api/admin/products/{id}", put(products::update_product).delete(products::delete_product))
        .route("/api/admin/products/{id}/publish", patch(products::publish_product))
        .route("/api/admin/products/{id}/feature", patch(products::feature_product))
        // Testimonials
        .route(
            "/api/admin/testimonials",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route(
            "/api/admin/testimonials/{id}",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
        .route("/api/admin/testimonials/{id}/approve", patch(testimonials::approve_testimonial))
        .route("/api/admin/testimonials/{id}/feature", patch(testimonials::feature_testimonial))
        // Team
        .route("/api/admin/team", get(team::list_team))
        .route("/api/admin/team/{user_id}/role", put(team::set_role).delete(team::remove_role))
        // Uploads and export
        .route("/api/admin/uploads/{folder}", post(uploads::upload_image))
        .route("/api/admin/export/{dataset}", get(export::export_dataset))
}

/// Build the combined REST API router.
pub fn api_router(rate_limit: Option<RateLimitState>) -> Router<AppState> {
    Router::new()
        .merge(auth_router(rate_limit.as_ref()))
        .merge(notify::notify_router(rate_limit.clone()))
        .merge(submission_router(rate_limit))
        .merge(public_router())
        .merge(admin_router())
        .route("/webhooks/mailgun", post(webhooks::mailgun_webhook))
}
