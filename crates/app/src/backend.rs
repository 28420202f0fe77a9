use async_trait::async_trait;
use serde_json::Value;
use shared_types::{
    AccessDecision, AppError, Application, AuthResponse, BlogPost, ContactSubmission,
    CreateContactRequest, CreateRegistrationRequest, DashboardStats, EventRegistration, Listing,
    LoginRequest, NewsletterSubscription, Product, PublicEvent, SubmitApplicationRequest,
    SubscribeRequest, Testimonial, UploadResponse,
};
use uuid::Uuid;

/// A file picked in a form, ready to send as multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything the site and the dashboard ask of the server.
///
/// Admin tables go through a path-addressed JSON seam so one tab controller
/// serves every entity; [`crate::dashboard::AdminEntity`] supplies the paths
/// and the typed decoding.
#[async_trait]
pub trait Backend: Send + Sync {
    // -- Public submissions --
    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
    ) -> Result<EventRegistration, AppError>;
    async fn submit_application(&self, req: &SubmitApplicationRequest) -> Result<Application, AppError>;
    async fn submit_contact(&self, req: &CreateContactRequest) -> Result<ContactSubmission, AppError>;
    async fn subscribe(&self, req: &SubscribeRequest) -> Result<NewsletterSubscription, AppError>;
    async fn upload_resume(&self, file: FileUpload) -> Result<UploadResponse, AppError>;

    // -- Public listings --
    async fn public_events(&self) -> Result<Listing<PublicEvent>, AppError>;
    async fn public_blog(&self, category: Option<&str>) -> Result<Listing<BlogPost>, AppError>;
    async fn public_products(&self, category: Option<&str>) -> Result<Listing<Product>, AppError>;
    async fn public_testimonials(&self) -> Result<Listing<Testimonial>, AppError>;

    // -- Session --
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError>;
    async fn logout(&self) -> Result<(), AppError>;
    /// Gate decision for the current session.
    async fn access(&self) -> Result<AccessDecision, AppError>;

    // -- Admin --
    async fn stats(&self) -> Result<DashboardStats, AppError>;
    async fn upload_image(&self, folder: &str, file: FileUpload) -> Result<UploadResponse, AppError>;
    async fn list_rows(&self, path: &str) -> Result<Vec<Value>, AppError>;
    async fn create_row(&self, path: &str, body: Value) -> Result<Value, AppError>;
    async fn replace_row(&self, path: &str, body: Value) -> Result<Value, AppError>;
    async fn patch_row(&self, path: &str, body: Value) -> Result<Value, AppError>;
    async fn delete_row(&self, path: &str) -> Result<(), AppError>;
}
