use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

const PDF_BYTES: &[u8] = b"%PDF-1.4 fake resume";

#[tokio::test]
async fn resume_is_stored_under_resumes() {
    let app = common::test_app();
    let (status, body) = common::post_file(
        &app,
        "/api/uploads/resume",
        "Arjun CV.pdf",
        "application/pdf",
        PDF_BYTES,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("resumes/"));
    assert!(path.ends_with(".pdf"));
    assert_eq!(body["url"], format!("http://localhost/uploads/{path}"));

    let (content_type, bytes) = app.objects.get(path).unwrap();
    assert_eq!(content_type, "application/pdf");
    assert_eq!(bytes, PDF_BYTES);
}

#[tokio::test]
async fn generic_content_type_is_inferred_from_name() {
    let app = common::test_app();
    let (status, body) = common::post_file(
        &app,
        "/api/uploads/resume",
        "resume.docx",
        "application/octet-stream",
        b"PK docx",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["path"].as_str().unwrap().ends_with(".docx"));
}

#[tokio::test]
async fn wrong_resume_type_is_rejected_and_not_stored() {
    let app = common::test_app();
    let (status, body) =
        common::post_file(&app, "/api/uploads/resume", "photo.png", "image/png", b"png", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["file"], "Please upload a PDF or Word document");
    assert!(app.objects.is_empty());
}

#[tokio::test]
async fn oversized_resume_is_rejected() {
    let app = common::test_app();
    let big = vec![0u8; 5 * 1024 * 1024 + 1];
    let (status, body) = common::post_file(
        &app,
        "/api/uploads/resume",
        "cv.pdf",
        "application/pdf",
        &big,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "File size must be less than 5MB");
    assert!(app.objects.is_empty());
}

#[tokio::test]
async fn image_upload_needs_admin_and_known_folder() {
    let app = common::test_app();
    let (status, _) =
        common::post_file(&app, "/api/admin/uploads/events", "a.png", "image/png", b"png", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = common::admin_token(&app).await;
    let (status, body) = common::post_file(
        &app,
        "/api/admin/uploads/avatars",
        "a.png",
        "image/png",
        b"png",
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown upload folder: avatars");

    let (status, body) = common::post_file(
        &app,
        "/api/admin/uploads/products",
        "shot.webp",
        "image/webp",
        b"webp",
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["path"].as_str().unwrap().starts_with("products/"));
    assert_eq!(app.objects.len(), 1);
}

#[tokio::test]
async fn image_folder_refuses_documents() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, body) = common::post_file(
        &app,
        "/api/admin/uploads/blog",
        "cv.pdf",
        "application/pdf",
        PDF_BYTES,
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Only JPEG, PNG, WebP and GIF images are allowed");
}

#[tokio::test]
async fn missing_object_store_is_internal_error() {
    let app = common::test_app_without_uploads();
    let (status, body) = common::post_file(
        &app,
        "/api/uploads/resume",
        "cv.pdf",
        "application/pdf",
        PDF_BYTES,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "File uploads are not configured");
}
