//! Persistence behind one object-safe trait so handlers run unchanged on
//! Postgres or on the in-memory store used by tests and local demos.

pub mod memory;
pub mod postgres;
pub mod records;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{
    AppError, AppRole, Application, ApplicationKind, ApplicationStatus, BlogPost,
    ContactSubmission, CreateRegistrationRequest, DashboardStats, Event, EventRegistration,
    NewsletterSubscription, Product, RegistrationStatus, RegistrationWithEvent, TeamMember,
    Testimonial, UpsertBlogPostRequest, UpsertEventRequest, UpsertProductRequest,
    UpsertTestimonialRequest, User, UserRole,
};
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result of a newsletter signup.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Created(NewsletterSubscription),
    /// The address was on file but unsubscribed; it is active again.
    Reactivated(NewsletterSubscription),
}

impl SubscribeOutcome {
    pub fn subscription(self) -> NewsletterSubscription {
        match self {
            Self::Created(s) | Self::Reactivated(s) => s,
        }
    }
}

/// A user row together with its password hash, for login only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Every read and write the API performs.
///
/// Listings come back newest first unless noted. Methods keyed by id
/// return `None`/`false` when nothing matched; handlers turn that into 404.
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name reported by `/health`.
    fn kind(&self) -> &'static str;
    async fn ping(&self) -> Result<(), AppError>;

    // -- Events --
    async fn list_events(&self) -> Result<Vec<Event>, AppError>;
    /// Published events, soonest first.
    async fn list_published_events(&self) -> Result<Vec<Event>, AppError>;
    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError>;
    async fn create_event(&self, req: &UpsertEventRequest) -> Result<Event, AppError>;
    async fn update_event(&self, id: Uuid, req: &UpsertEventRequest) -> Result<Option<Event>, AppError>;
    async fn set_event_published(&self, id: Uuid, published: bool) -> Result<Option<Event>, AppError>;
    /// Also removes the event's registrations.
    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Registrations --
    /// Check deadline and capacity and insert in one atomic step.
    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
        now: DateTime<Utc>,
    ) -> Result<EventRegistration, AppError>;
    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>, AppError>;
    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<EventRegistration>, AppError>;
    async fn delete_registration(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Applications --
    async fn create_application(&self, application: Application) -> Result<Application, AppError>;
    async fn list_applications(&self, kind: Option<ApplicationKind>) -> Result<Vec<Application>, AppError>;
    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError>;
    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Contacts --
    async fn create_contact(&self, contact: ContactSubmission) -> Result<ContactSubmission, AppError>;
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError>;
    async fn set_contact_read(&self, id: Uuid, is_read: bool) -> Result<Option<ContactSubmission>, AppError>;
    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Newsletter --
    /// Conflict when the address is already active.
    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError>;
    /// Returns false when the address is unknown.
    async fn set_active_by_email(&self, email: &str, active: bool) -> Result<bool, AppError>;
    async fn list_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, AppError>;
    async fn set_subscription_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<Option<NewsletterSubscription>, AppError>;
    async fn delete_subscription(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Blog --
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    /// Published posts, most recently published first.
    async fn list_published_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
    async fn create_blog_post(&self, req: &UpsertBlogPostRequest) -> Result<BlogPost, AppError>;
    async fn update_blog_post(&self, id: Uuid, req: &UpsertBlogPostRequest) -> Result<Option<BlogPost>, AppError>;
    async fn set_blog_published(&self, id: Uuid, published: bool) -> Result<Option<BlogPost>, AppError>;
    async fn delete_blog_post(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Products --
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    /// Published products, featured first.
    async fn list_published_products(&self) -> Result<Vec<Product>, AppError>;
    async fn create_product(&self, req: &UpsertProductRequest) -> Result<Product, AppError>;
    async fn update_product(&self, id: Uuid, req: &UpsertProductRequest) -> Result<Option<Product>, AppError>;
    async fn set_product_published(&self, id: Uuid, published: bool) -> Result<Option<Product>, AppError>;
    async fn set_product_featured(&self, id: Uuid, featured: bool) -> Result<Option<Product>, AppError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Testimonials --
    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError>;
    /// Approved and featured testimonials, at most `limit`.
    async fn list_public_testimonials(&self, limit: usize) -> Result<Vec<Testimonial>, AppError>;
    async fn create_testimonial(&self, req: &UpsertTestimonialRequest) -> Result<Testimonial, AppError>;
    async fn update_testimonial(
        &self,
        id: Uuid,
        req: &UpsertTestimonialRequest,
    ) -> Result<Option<Testimonial>, AppError>;
    async fn set_testimonial_approved(&self, id: Uuid, approved: bool) -> Result<Option<Testimonial>, AppError>;
    async fn set_testimonial_featured(&self, id: Uuid, featured: bool) -> Result<Option<Testimonial>, AppError>;
    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, AppError>;

    // -- Users and roles --
    /// Conflict when the email is taken.
    async fn create_user(&self, email: &str, full_name: &str, password_hash: &str) -> Result<User, AppError>;
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn list_team(&self) -> Result<Vec<TeamMember>, AppError>;
    async fn role_of(&self, user_id: Uuid) -> Result<Option<AppRole>, AppError>;
    /// Insert or replace the user's single role. Not found when the user
    /// does not exist.
    async fn set_role(&self, user_id: Uuid, role: AppRole) -> Result<UserRole, AppError>;
    async fn remove_role(&self, user_id: Uuid) -> Result<bool, AppError>;

    // -- Sessions --
    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Uuid, AppError>;
    async fn session_is_live(&self, session_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError>;
    async fn revoke_session(&self, session_id: Uuid) -> Result<(), AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
}
