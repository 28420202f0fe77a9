use serde::{Deserialize, Serialize};

use crate::AppError;

/// Upload size ceiling shared by resumes and images (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const PDF: &str = "application/pdf";
pub const DOC: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Which files an upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed: &'static [&'static str],
    pub max_bytes: usize,
    pub type_message: &'static str,
    pub size_message: &'static str,
}

impl UploadPolicy {
    pub const RESUME: UploadPolicy = UploadPolicy {
        allowed: &[PDF, DOC, DOCX],
        max_bytes: MAX_UPLOAD_BYTES,
        type_message: "Please upload a PDF or Word document",
        size_message: "File size must be less than 5MB",
    };

    pub const IMAGE: UploadPolicy = UploadPolicy {
        allowed: &["image/jpeg", "image/png", "image/webp", "image/gif"],
        max_bytes: MAX_UPLOAD_BYTES,
        type_message: "Only JPEG, PNG, WebP and GIF images are allowed",
        size_message: "Image must be less than 5MB",
    };

    /// Check a file before it is sent anywhere.
    pub fn check(&self, content_type: &str, size: usize) -> Result<(), AppError> {
        if !self.allowed.contains(&content_type) {
            return Err(AppError::field("file", self.type_message));
        }
        if size > self.max_bytes {
            return Err(AppError::field("file", self.size_message));
        }
        Ok(())
    }
}

/// Folders the admin may upload images into.
pub const IMAGE_FOLDERS: [&str; 4] = ["events", "blog", "products", "testimonials"];

/// Folder holding uploaded resumes.
pub const RESUME_FOLDER: &str = "resumes";

/// File extension for a stored object. The original name's extension wins;
/// otherwise it is derived from the content type.
pub fn extension_for(file_name: Option<&str>, content_type: &str) -> String {
    if let Some(ext) = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        return ext;
    }
    match content_type {
        PDF => "pdf",
        DOC => "doc",
        DOCX => "docx",
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
    .to_string()
}

/// Content type guessed from a local file name, used by the client before
/// uploading.
pub fn content_type_for_path(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(PDF),
        "doc" => Some(DOC),
        "docx" => Some(DOCX),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Stored upload location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadResponse {
    /// Object key inside the uploads bucket.
    pub path: String,
    /// Public URL of the object.
    pub url: String,
}
