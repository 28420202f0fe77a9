use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, BlogPost, PublishRequest, UpsertBlogPostRequest};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

/// A title made only of punctuation slugifies to nothing.
fn require_slug(body: &UpsertBlogPostRequest) -> Result<(), AppError> {
    if body.effective_slug().is_empty() {
        return Err(AppError::field("slug", "Slug cannot be empty"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /api/admin/blog
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/blog",
    responses(
        (status = 200, description = "All posts, newest first", body = Vec<BlogPost>)
    ),
    tag = "admin-blog"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    Ok(Json(state.store.list_blog_posts().await?))
}

// ---------------------------------------------------------------------------
// POST /api/admin/blog
// ---------------------------------------------------------------------------

/// Create a post. An empty slug is derived from the title.
#[utoipa::path(
    post,
    path = "/api/admin/blog",
    request_body = UpsertBlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPost),
        (status = 409, description = "Slug already used", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "admin-blog"
)]
#[tracing::instrument(skip(state, _admin, body), fields(title = %body.title))]
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Json(body): Json<UpsertBlogPostRequest>,
) -> Result<(StatusCode, Json<BlogPost>), AppError> {
    body.validate_request()?;
    require_slug(&body)?;
    let post = state.store.create_blog_post(&body).await?;
    tracing::info!(post_id = %post.id, slug = %post.slug, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

// ---------------------------------------------------------------------------
// PUT /api/admin/blog/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/admin/blog/{id}",
    params(("id" = String, Path, description = "Post UUID")),
    request_body = UpsertBlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = BlogPost),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Slug already used", body = AppError)
    ),
    tag = "admin-blog"
)]
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpsertBlogPostRequest>,
) -> Result<Json<BlogPost>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    require_slug(&body)?;
    let post = found(state.store.update_blog_post(id, &body).await?, "Blog post")?;
    Ok(Json(post))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/blog/{id}/publish
// ---------------------------------------------------------------------------

/// Publishing stamps `published_at` the first time; unpublishing clears it.
#[utoipa::path(
    patch,
    path = "/api/admin/blog/{id}/publish",
    params(("id" = String, Path, description = "Post UUID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Publish flag set", body = BlogPost),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-blog"
)]
pub async fn publish_post(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<PublishRequest>,
) -> Result<Json<BlogPost>, AppError> {
    let id = parse_id(&id)?;
    let post = found(
        state.store.set_blog_published(id, body.is_published).await?,
        "Blog post",
    )?;
    Ok(Json(post))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/blog/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/blog/{id}",
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-blog"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_blog_post(id).await?, "Blog post")
}
