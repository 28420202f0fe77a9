use axum::{extract::DefaultBodyLimit, middleware, Router};
use shared_types::{
    AccessDecision, AppError, AppErrorKind, AppRole, Application, ApplicationKind,
    ApplicationNotification, ApplicationStatus, ApproveRequest, AuthResponse, BlogPost,
    ContactSubmission, CreateContactRequest, CreateRegistrationRequest, DashboardStats,
    EmailReceipt, Event, EventRegistration, EventType, FeatureRequest, GalleryItem, ListingSource,
    LoginRequest, MarkReadRequest, MediaType, MessageResponse, NewsletterSubscription,
    NotifyError, NotifyResponse, OpenPosition, Product, ProductCategory, PublicEvent,
    PublishRequest, RegisterRequest, RegistrationStatus, RegistrationWithEvent, SessionInfo,
    SetActiveRequest, SetRoleRequest, SubmitApplicationRequest, SubscribeRequest, TeamMember,
    Testimonial, UpdateApplicationStatusRequest, UpdateRegistrationStatusRequest,
    UploadResponse, UpsertBlogPostRequest, UpsertEventRequest, UpsertProductRequest,
    UpsertTestimonialRequest, User, UserRole,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::auth::middleware::auth_middleware;
use crate::db::AppState;
use crate::health;
use crate::rate_limit::RateLimitState;
use crate::rest;

/// Headroom above the largest upload for multipart framing.
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Public submissions
        rest::registrations::register_for_event,
        rest::applications::submit_application,
        rest::contacts::submit_contact,
        rest::newsletter::subscribe,
        rest::newsletter::unsubscribe,
        rest::uploads::upload_resume,
        // Public listings
        rest::public::list_events,
        rest::public::list_blog_posts,
        rest::public::get_blog_post,
        rest::public::list_products,
        rest::public::list_testimonials,
        rest::public::list_gallery,
        rest::public::list_positions,
        // Auth
        rest::auth::register,
        rest::auth::login,
        rest::auth::logout,
        rest::auth::session,
        rest::auth::access,
        // Admin
        rest::dashboard::stats,
        rest::events::list_events,
        rest::events::create_event,
        rest::events::update_event,
        rest::events::publish_event,
        rest::events::delete_event,
        rest::registrations::list_registrations,
        rest::registrations::update_registration_status,
        rest::registrations::delete_registration,
        rest::applications::list_applications,
        rest::applications::update_application_status,
        rest::applications::delete_application,
        rest::contacts::list_contacts,
        rest::contacts::mark_contact_read,
        rest::contacts::delete_contact,
        rest::newsletter::list_subscriptions,
        rest::newsletter::set_subscription_active,
        rest::newsletter::delete_subscription,
        rest::blog::list_posts,
        rest::blog::create_post,
        rest::blog::update_post,
        rest::blog::publish_post,
        rest::blog::delete_post,
        rest::products::list_products,
        rest::products::create_product,
        rest::products::update_product,
        rest::products::publish_product,
        rest::products::feature_product,
        rest::products::delete_product,
        rest::testimonials::list_testimonials,
        rest::testimonials::create_testimonial,
        rest::testimonials::update_testimonial,
        rest::testimonials::approve_testimonial,
        rest::testimonials::feature_testimonial,
        rest::testimonials::delete_testimonial,
        rest::team::list_team,
        rest::team::set_role,
        rest::team::remove_role,
        rest::uploads::upload_image,
        rest::export::export_dataset,
        // Integrations
        rest::notify::notify_application,
        rest::webhooks::mailgun_webhook,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse, ListingSource,
        Event, EventType, PublicEvent, UpsertEventRequest,
        EventRegistration, RegistrationStatus, RegistrationWithEvent,
        CreateRegistrationRequest, UpdateRegistrationStatusRequest,
        Application, ApplicationKind, ApplicationStatus, SubmitApplicationRequest,
        UpdateApplicationStatusRequest, OpenPosition,
        ContactSubmission, CreateContactRequest, MarkReadRequest,
        NewsletterSubscription, SubscribeRequest, SetActiveRequest,
        BlogPost, UpsertBlogPostRequest, PublishRequest,
        Product, ProductCategory, UpsertProductRequest, FeatureRequest,
        Testimonial, UpsertTestimonialRequest, ApproveRequest,
        GalleryItem, MediaType, UploadResponse,
        User, UserRole, AppRole, TeamMember, SetRoleRequest,
        RegisterRequest, LoginRequest, AuthResponse, SessionInfo, AccessDecision,
        DashboardStats,
        ApplicationNotification, EmailReceipt, NotifyResponse, NotifyError,
        rest::webhooks::MailgunWebhookPayload,
        health::HealthResponse,
    )),
    tags(
        (name = "submissions", description = "Public form submissions"),
        (name = "public", description = "Public site listings"),
        (name = "auth", description = "Sign-in and the admin gate"),
        (name = "admin", description = "Dashboard overview and CSV export"),
        (name = "admin-events", description = "Event management"),
        (name = "admin-registrations", description = "Event registration management"),
        (name = "admin-applications", description = "Intern and career applications"),
        (name = "admin-contacts", description = "Contact messages"),
        (name = "admin-newsletter", description = "Newsletter subscribers"),
        (name = "admin-blog", description = "Blog posts"),
        (name = "admin-products", description = "Product showcase"),
        (name = "admin-testimonials", description = "Testimonial moderation"),
        (name = "admin-team", description = "User roles"),
        (name = "admin-uploads", description = "Image uploads"),
        (name = "notify", description = "Application notification emails"),
        (name = "webhooks", description = "Webhook receivers"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Innovex Arena API",
        description = "Site, admin dashboard and notification API for Innovex Arena",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build the full application: REST API, `/health` and the API docs at
/// `/docs`. Pass a limiter to throttle the public submission routes.
pub fn api_router(state: AppState, rate_limit: Option<RateLimitState>) -> Router {
    let body_limit = state.settings.max_upload_bytes + BODY_LIMIT_HEADROOM;

    Router::new()
        .merge(rest::api_router(rate_limit))
        .route("/health", axum::routing::get(health::health_check))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
