use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared_types::{
    AccessDecision, AppError, Application, AuthResponse, BlogPost, ContactSubmission,
    CreateContactRequest, CreateRegistrationRequest, DashboardStats, EventRegistration, Listing,
    LoginRequest, NewsletterSubscription, Product, PublicEvent, SubmitApplicationRequest,
    SubscribeRequest, Testimonial, UploadResponse,
};
use uuid::Uuid;

use crate::backend::{Backend, FileUpload};

/// HTTP implementation of [`Backend`] against the site's REST API.
///
/// The access token returned by login is kept in memory and sent as a
/// bearer header on every later request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::internal(e.to_string()))?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status, "api request failed");
        Err(AppError::from_response_body(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::internal(format!("Invalid response body: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        Self::decode(response).await
    }

    async fn upload(&self, path: &str, file: FileUpload) -> Result<UploadResponse, AppError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::bad_request(format!("Invalid content type: {e}")))?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::decode(response).await
    }
}

fn with_category(path: &str, category: Option<&str>) -> String {
    match category {
        Some(c) => format!("{path}?category={c}"),
        None => path.to_string(),
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
    ) -> Result<EventRegistration, AppError> {
        self.send_json(Method::POST, &format!("/api/events/{event_id}/registrations"), req)
            .await
    }

    async fn submit_application(&self, req: &SubmitApplicationRequest) -> Result<Application, AppError> {
        self.send_json(Method::POST, "/api/applications", req).await
    }

    async fn submit_contact(&self, req: &CreateContactRequest) -> Result<ContactSubmission, AppError> {
        self.send_json(Method::POST, "/api/contact", req).await
    }

    async fn subscribe(&self, req: &SubscribeRequest) -> Result<NewsletterSubscription, AppError> {
        self.send_json(Method::POST, "/api/newsletter", req).await
    }

    async fn upload_resume(&self, file: FileUpload) -> Result<UploadResponse, AppError> {
        self.upload("/api/uploads/resume", file).await
    }

    async fn public_events(&self) -> Result<Listing<PublicEvent>, AppError> {
        self.get_json("/api/public/events").await
    }

    async fn public_blog(&self, category: Option<&str>) -> Result<Listing<BlogPost>, AppError> {
        self.get_json(&with_category("/api/public/blog", category)).await
    }

    async fn public_products(&self, category: Option<&str>) -> Result<Listing<Product>, AppError> {
        self.get_json(&with_category("/api/public/products", category))
            .await
    }

    async fn public_testimonials(&self) -> Result<Listing<Testimonial>, AppError> {
        self.get_json("/api/public/testimonials").await
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError> {
        let auth: AuthResponse = self.send_json(Method::POST, "/api/auth/login", req).await?;
        self.set_token(Some(auth.access_token.clone()));
        Ok(auth)
    }

    async fn logout(&self) -> Result<(), AppError> {
        let result = self.send(self.request(Method::POST, "/api/auth/logout")).await;
        // The local token goes away even if the server call failed.
        self.set_token(None);
        result.map(|_| ())
    }

    async fn access(&self) -> Result<AccessDecision, AppError> {
        self.get_json("/api/admin/access").await
    }

    async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.get_json("/api/admin/stats").await
    }

    async fn upload_image(&self, folder: &str, file: FileUpload) -> Result<UploadResponse, AppError> {
        self.upload(&format!("/api/admin/uploads/{folder}"), file).await
    }

    async fn list_rows(&self, path: &str) -> Result<Vec<Value>, AppError> {
        self.get_json(path).await
    }

    async fn create_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        self.send_json(Method::POST, path, &body).await
    }

    async fn replace_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        self.send_json(Method::PUT, path, &body).await
    }

    async fn patch_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        self.send_json(Method::PATCH, path, &body).await
    }

    async fn delete_row(&self, path: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path)).await.map(|_| ())
    }
}
