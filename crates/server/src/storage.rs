use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use chrono::Utc;
use rand::Rng;
use shared_types::{extension_for, AppError, UploadPolicy, UploadResponse};

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

// ── Trait ────────────────────────────────────────────────────────────

/// Object storage for resumes and admin images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `key`.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String>;

    /// Browser-reachable URL of a stored object.
    fn public_url(&self, key: &str) -> String;
}

const KEY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Object key `{folder}/{unix_millis}-{7 random chars}.{ext}`.
pub fn object_key(folder: &str, file_name: Option<&str>, content_type: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..7)
        .map(|_| KEY_CHARS[rng.gen_range(0..KEY_CHARS.len())] as char)
        .collect();
    format!(
        "{}/{}-{}.{}",
        folder,
        Utc::now().timestamp_millis(),
        suffix,
        extension_for(file_name, content_type)
    )
}

/// Check the file against `policy`, then store it.
///
/// Nothing reaches the object store when the policy rejects the file.
pub async fn store_upload(
    objects: Option<&dyn ObjectStore>,
    policy: &UploadPolicy,
    folder: &str,
    file_name: Option<&str>,
    content_type: &str,
    body: Vec<u8>,
) -> Result<UploadResponse, AppError> {
    policy.check(content_type, body.len())?;

    let objects = objects.ok_or_else(|| AppError::internal("File uploads are not configured"))?;
    let key = object_key(folder, file_name, content_type);
    let size = body.len();

    objects.put(&key, content_type, body).await.map_err(|e| {
        tracing::error!(key = %key, error = %e, "upload failed");
        AppError::internal("Upload failed. Please try again.")
    })?;

    tracing::info!(key = %key, size, content_type, "stored upload");
    Ok(UploadResponse {
        url: objects.public_url(&key),
        path: key,
    })
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible object store (MinIO locally, any S3 provider in
/// production). Objects are served from a public-read bucket.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3ObjectStore {
    /// Build from environment variables:
    ///   - `AWS_ENDPOINT_URL_S3` / `S3_ENDPOINT`
    ///   - `AWS_ACCESS_KEY_ID`   / `S3_ACCESS_KEY`
    ///   - `AWS_SECRET_ACCESS_KEY` / `S3_SECRET_KEY`
    ///   - `AWS_REGION`          / `S3_REGION`
    ///   - `UPLOADS_BUCKET` (default `uploads`), `S3_PUBLIC_URL` (optional)
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT must be set")?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY must be set")?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY must be set")?;
        let region = env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let bucket = std::env::var("UPLOADS_BUCKET").unwrap_or_else(|_| "uploads".to_string());

        let public_base = std::env::var("S3_PUBLIC_URL")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("{}/{}", endpoint.trim_end_matches('/'), bucket));

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");
        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket,
            public_base,
        })
    }

    /// Create the uploads bucket if it doesn't already exist.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if exists {
            tracing::info!(bucket = %self.bucket, "uploads bucket already exists");
            return;
        }

        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => tracing::info!(bucket = %self.bucket, "uploads bucket created"),
            Err(e) => tracing::warn!(bucket = %self.bucket, error = %e, "failed to create uploads bucket"),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| format!("S3 upload failed: {}", e))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

// ── In-memory implementation ────────────────────────────────────────

/// Base URL handed out for objects kept in memory.
pub const MEMORY_PUBLIC_BASE: &str = "http://localhost/uploads";

/// Keeps uploads in a map. Used by tests and when running without S3.
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
    public_base: String,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::with_public_base(MEMORY_PUBLIC_BASE)
    }
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_public_base(base: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Content type and bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<(String, Vec<u8>)> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), (content_type.to_string(), body));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
