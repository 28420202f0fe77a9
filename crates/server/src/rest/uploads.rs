use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use shared_types::{
    content_type_for_path, AppError, UploadPolicy, UploadResponse, IMAGE_FOLDERS, RESUME_FOLDER,
};

use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::storage::store_upload;

/// The `file` part of a multipart body.
struct FilePart {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

/// Pull the `file` field out of the form. The declared content type wins;
/// a missing or generic one is inferred from the file name.
async fn read_file_part(multipart: &mut Multipart) -> Result<FilePart, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let declared = field
            .content_type()
            .filter(|ct| *ct != "application/octet-stream")
            .map(str::to_string);
        let content_type = declared
            .or_else(|| {
                file_name
                    .as_deref()
                    .and_then(content_type_for_path)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.to_string()))?;

        return Ok(FilePart {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::field("file", "No file provided"))
}

// ---------------------------------------------------------------------------
// POST /api/uploads/resume
// ---------------------------------------------------------------------------

/// Upload a resume (PDF or Word, at most 5 MB) for an application form.
#[utoipa::path(
    post,
    path = "/api/uploads/resume",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` field"),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 422, description = "Wrong type or too large", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let part = read_file_part(&mut multipart).await?;
    let stored = store_upload(
        state.objects.as_deref(),
        &UploadPolicy::RESUME,
        RESUME_FOLDER,
        part.file_name.as_deref(),
        &part.content_type,
        part.bytes,
    )
    .await?;
    Ok(Json(stored))
}

// ---------------------------------------------------------------------------
// POST /api/admin/uploads/{folder}
// ---------------------------------------------------------------------------

/// Upload an image for an event, post, product or testimonial.
#[utoipa::path(
    post,
    path = "/api/admin/uploads/{folder}",
    params(("folder" = String, Path, description = "events, blog, products or testimonials")),
    request_body(content_type = "multipart/form-data", description = "Form with a `file` field"),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "Unknown folder", body = AppError),
        (status = 422, description = "Wrong type or too large", body = AppError)
    ),
    tag = "admin-uploads"
)]
#[tracing::instrument(skip(state, _admin, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    if !IMAGE_FOLDERS.contains(&folder.as_str()) {
        return Err(AppError::bad_request(format!("Unknown upload folder: {folder}")));
    }

    let part = read_file_part(&mut multipart).await?;
    let stored = store_upload(
        state.objects.as_deref(),
        &UploadPolicy::IMAGE,
        &folder,
        part.file_name.as_deref(),
        &part.content_type,
        part.bytes,
    )
    .await?;
    Ok(Json(stored))
}
