//! Read-only listings behind the public site pages.
//!
//! A listing whose query comes back empty is replaced with sample content so
//! a fresh install still renders full pages. The category filter runs after
//! that decision, so it also narrows the samples.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use shared_types::{
    fallback, gallery, open_positions, AppError, ApplicationKind, ApplicationQuery, BlogPost,
    CategoryQuery, GalleryItem, Listing, OpenPosition, Product, PublicEvent, Testimonial,
    PUBLIC_TESTIMONIAL_LIMIT,
};

use crate::db::AppState;

// ---------------------------------------------------------------------------
// GET /api/public/events
// ---------------------------------------------------------------------------

/// Published events, soonest first, with whether registration is open.
#[utoipa::path(
    get,
    path = "/api/public/events",
    responses(
        (status = 200, description = "Published events", body = Listing<PublicEvent>)
    ),
    tag = "public"
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Listing<PublicEvent>>, AppError> {
    let rows = state.store.list_published_events().await?;
    let now = Utc::now();
    let listing = Listing::or_fallback(rows, fallback::events).map(|event| PublicEvent::at(event, now));
    Ok(Json(listing))
}

// ---------------------------------------------------------------------------
// GET /api/public/blog
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/public/blog",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Published posts, latest first", body = Listing<BlogPost>)
    ),
    tag = "public"
)]
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Listing<BlogPost>>, AppError> {
    let rows = state.store.list_published_posts().await?;
    let listing = Listing::or_fallback(rows, fallback::blog_posts)
        .filter_category(params.category.as_deref(), |post| &post.category);
    Ok(Json(listing))
}

// ---------------------------------------------------------------------------
// GET /api/public/blog/{slug}
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/public/blog/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Published post", body = BlogPost),
        (status = 404, description = "No published post with this slug", body = AppError)
    ),
    tag = "public"
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    state
        .store
        .find_published_post(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Blog post not found"))
}

// ---------------------------------------------------------------------------
// GET /api/public/products
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/public/products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Published products, featured first", body = Listing<Product>)
    ),
    tag = "public"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Listing<Product>>, AppError> {
    let rows = state.store.list_published_products().await?;
    let listing = Listing::or_fallback(rows, fallback::products)
        .filter_category(params.category.as_deref(), |product| product.category.as_str());
    Ok(Json(listing))
}

// ---------------------------------------------------------------------------
// GET /api/public/testimonials
// ---------------------------------------------------------------------------

/// Approved and featured testimonials for the home page.
#[utoipa::path(
    get,
    path = "/api/public/testimonials",
    responses(
        (status = 200, description = "Home page testimonials", body = Listing<Testimonial>)
    ),
    tag = "public"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Listing<Testimonial>>, AppError> {
    let rows = state
        .store
        .list_public_testimonials(PUBLIC_TESTIMONIAL_LIMIT)
        .await?;
    Ok(Json(Listing::or_fallback(rows, fallback::testimonials)))
}

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/public/gallery",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Gallery items", body = Listing<GalleryItem>)
    ),
    tag = "public"
)]
pub async fn list_gallery(Query(params): Query<CategoryQuery>) -> Json<Listing<GalleryItem>> {
    Json(Listing::live(gallery()).filter_category(params.category.as_deref(), |item| &item.category))
}

/// Open positions for the interns page, the careers page, or both when no
/// kind is given.
#[utoipa::path(
    get,
    path = "/api/public/positions",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Open positions", body = Vec<OpenPosition>)
    ),
    tag = "public"
)]
pub async fn list_positions(Query(params): Query<ApplicationQuery>) -> Json<Vec<OpenPosition>> {
    let positions = match params.kind {
        Some(kind) => open_positions(kind),
        None => [ApplicationKind::Internship, ApplicationKind::Career]
            .into_iter()
            .flat_map(open_positions)
            .collect(),
    };
    Json(positions)
}
