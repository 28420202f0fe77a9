use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{
    normalize_email, AppError, AppRole, Application, ApplicationKind, ApplicationStatus, BlogPost,
    ContactSubmission, CreateRegistrationRequest, DashboardStats, Event, EventRegistration,
    EventType, NewsletterSubscription, Product, ProductCategory, RegistrationStatus,
    RegistrationWithEvent, TeamMember, Testimonial, UpsertBlogPostRequest, UpsertEventRequest,
    UpsertProductRequest, UpsertTestimonialRequest, User, UserRole,
};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use super::records::{self, check_registration};
use super::{Store, SubscribeOutcome, UserCredentials};
use crate::error_convert::{unique_violation, SqlxErrorExt};

const EVENT_COLUMNS: &str = "id, title, description, event_type, event_date, location, \
    max_participants, image_url, registration_deadline, is_published, created_at, updated_at";
const REGISTRATION_COLUMNS: &str = "id, event_id, name, email, phone, college, status, created_at";
const APPLICATION_COLUMNS: &str = "id, kind, name, email, phone, college, year_of_study, position, \
    portfolio_url, resume_url, cover_letter, status, created_at, updated_at";
const CONTACT_COLUMNS: &str = "id, name, email, subject, message, is_read, created_at";
const SUBSCRIPTION_COLUMNS: &str = "id, email, is_active, subscribed_at";
const POST_COLUMNS: &str = "id, title, slug, content, excerpt, category, cover_image, \
    is_published, published_at, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, description, short_description, category, technologies, \
    demo_url, github_url, image_url, is_published, is_featured, created_at, updated_at";
const TESTIMONIAL_COLUMNS: &str = "id, name, role, company, content, rating, event_name, image_url, \
    is_approved, is_featured, created_at, updated_at";

/// Decode a text enum column; unknown values mean the schema and the code
/// disagree.
fn decode<T>(value: &str, parse: fn(&str) -> Option<T>, column: &str) -> Result<T, AppError> {
    parse(value).ok_or_else(|| {
        tracing::error!(column, value, "unexpected enum value in database");
        AppError::database(format!("Unexpected {column} value: {value}"))
    })
}

fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    event_type: String,
    event_date: DateTime<Utc>,
    location: Option<String>,
    max_participants: Option<i32>,
    image_url: Option<String>,
    registration_deadline: Option<DateTime<Utc>>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(r: EventRow) -> Result<Self, AppError> {
        Ok(Event {
            id: r.id,
            title: r.title,
            description: r.description,
            event_type: decode(&r.event_type, EventType::from_str_opt, "event_type")?,
            event_date: r.event_date,
            location: r.location,
            max_participants: r.max_participants,
            image_url: r.image_url,
            registration_deadline: r.registration_deadline,
            is_published: r.is_published,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
struct RegistrationRow {
    id: Uuid,
    event_id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    college: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for EventRegistration {
    type Error = AppError;

    fn try_from(r: RegistrationRow) -> Result<Self, AppError> {
        Ok(EventRegistration {
            id: r.id,
            event_id: r.event_id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            college: r.college,
            status: decode(&r.status, RegistrationStatus::from_str_opt, "status")?,
            created_at: r.created_at,
        })
    }
}

#[derive(FromRow)]
struct RegistrationWithEventRow {
    #[sqlx(flatten)]
    registration: RegistrationRow,
    event_title: Option<String>,
}

impl TryFrom<RegistrationWithEventRow> for RegistrationWithEvent {
    type Error = AppError;

    fn try_from(r: RegistrationWithEventRow) -> Result<Self, AppError> {
        Ok(RegistrationWithEvent {
            registration: r.registration.try_into()?,
            event_title: r.event_title,
        })
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    kind: String,
    name: String,
    email: String,
    phone: String,
    college: String,
    year_of_study: String,
    position: String,
    portfolio_url: Option<String>,
    resume_url: Option<String>,
    cover_letter: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = AppError;

    fn try_from(r: ApplicationRow) -> Result<Self, AppError> {
        Ok(Application {
            id: r.id,
            kind: decode(&r.kind, ApplicationKind::from_str_opt, "kind")?,
            name: r.name,
            email: r.email,
            phone: r.phone,
            college: r.college,
            year_of_study: r.year_of_study,
            position: r.position,
            portfolio_url: r.portfolio_url,
            resume_url: r.resume_url,
            cover_letter: r.cover_letter,
            status: decode(&r.status, ApplicationStatus::from_str_opt, "status")?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    short_description: Option<String>,
    category: String,
    technologies: Vec<String>,
    demo_url: Option<String>,
    github_url: Option<String>,
    image_url: Option<String>,
    is_published: bool,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(r: ProductRow) -> Result<Self, AppError> {
        Ok(Product {
            id: r.id,
            name: r.name,
            description: r.description,
            short_description: r.short_description,
            category: decode(&r.category, ProductCategory::from_str_opt, "category")?,
            technologies: r.technologies,
            demo_url: r.demo_url,
            github_url: r.github_url,
            image_url: r.image_url,
            is_published: r.is_published,
            is_featured: r.is_featured,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            full_name: r.full_name,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[derive(FromRow)]
struct TeamRow {
    #[sqlx(flatten)]
    user: UserRow,
    role: Option<String>,
}

#[derive(FromRow)]
struct RoleRow {
    user_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for UserRole {
    type Error = AppError;

    fn try_from(r: RoleRow) -> Result<Self, AppError> {
        Ok(UserRole {
            user_id: r.user_id,
            role: decode(&r.role, AppRole::from_str_opt, "role")?,
            created_at: r.created_at,
        })
    }
}

#[derive(FromRow)]
struct StatsRow {
    total_events: i64,
    internship_applications: i64,
    career_applications: i64,
    unread_contacts: i64,
    active_subscribers: i64,
    pending_registrations: i64,
}

/// Contacts, subscriptions, posts and testimonials have no enum columns
/// and decode straight into their shared types.
#[derive(FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactSubmission {
    fn from(r: ContactRow) -> Self {
        ContactSubmission {
            id: r.id,
            name: r.name,
            email: r.email,
            subject: r.subject,
            message: r.message,
            is_read: r.is_read,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
struct SubscriptionRow {
    id: Uuid,
    email: String,
    is_active: bool,
    subscribed_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for NewsletterSubscription {
    fn from(r: SubscriptionRow) -> Self {
        NewsletterSubscription {
            id: r.id,
            email: r.email,
            is_active: r.is_active,
            subscribed_at: r.subscribed_at,
        }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    category: String,
    cover_image: Option<String>,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for BlogPost {
    fn from(r: PostRow) -> Self {
        BlogPost {
            id: r.id,
            title: r.title,
            slug: r.slug,
            content: r.content,
            excerpt: r.excerpt,
            category: r.category,
            cover_image: r.cover_image,
            is_published: r.is_published,
            published_at: r.published_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(FromRow)]
struct TestimonialRow {
    id: Uuid,
    name: String,
    role: Option<String>,
    company: Option<String>,
    content: String,
    rating: i32,
    event_name: Option<String>,
    image_url: Option<String>,
    is_approved: bool,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TestimonialRow> for Testimonial {
    fn from(r: TestimonialRow) -> Self {
        Testimonial {
            id: r.id,
            name: r.name,
            role: r.role,
            company: r.company,
            content: r.content,
            rating: r.rating,
            event_name: r.event_name,
            image_url: r.image_url,
            is_approved: r.is_approved,
            is_featured: r.is_featured,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Postgres-backed store. Queries are built at runtime so the crate builds
/// without a live database.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn write_event(&self, e: &Event) -> Result<Option<Event>, AppError> {
        let sql = format!(
            "UPDATE events SET title = $2, description = $3, event_type = $4, event_date = $5, \
             location = $6, max_participants = $7, image_url = $8, registration_deadline = $9, \
             is_published = $10, updated_at = $11 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(e.id)
            .bind(&e.title)
            .bind(&e.description)
            .bind(e.event_type.as_str())
            .bind(e.event_date)
            .bind(&e.location)
            .bind(e.max_participants)
            .bind(&e.image_url)
            .bind(e.registration_deadline)
            .bind(e.is_published)
            .bind(e.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Event::try_from).transpose()
    }

    async fn write_post(&self, p: &BlogPost) -> Result<Option<BlogPost>, AppError> {
        let sql = format!(
            "UPDATE blog_posts SET title = $2, slug = $3, content = $4, excerpt = $5, category = $6, \
             cover_image = $7, is_published = $8, published_at = $9, updated_at = $10 \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(p.id)
            .bind(&p.title)
            .bind(&p.slug)
            .bind(&p.content)
            .bind(&p.excerpt)
            .bind(&p.category)
            .bind(&p.cover_image)
            .bind(p.is_published)
            .bind(p.published_at)
            .bind(p.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(BlogPost::from))
    }

    async fn write_product(&self, p: &Product) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET name = $2, description = $3, short_description = $4, category = $5, \
             technologies = $6, demo_url = $7, github_url = $8, image_url = $9, is_published = $10, \
             is_featured = $11, updated_at = $12 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(p.id)
            .bind(&p.name)
            .bind(&p.description)
            .bind(&p.short_description)
            .bind(p.category.as_str())
            .bind(&p.technologies)
            .bind(&p.demo_url)
            .bind(&p.github_url)
            .bind(&p.image_url)
            .bind(p.is_published)
            .bind(p.is_featured)
            .bind(p.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Product::try_from).transpose()
    }

    async fn write_testimonial(&self, t: &Testimonial) -> Result<Option<Testimonial>, AppError> {
        let sql = format!(
            "UPDATE testimonials SET name = $2, role = $3, company = $4, content = $5, rating = $6, \
             event_name = $7, image_url = $8, is_approved = $9, is_featured = $10, updated_at = $11 \
             WHERE id = $1 RETURNING {TESTIMONIAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TestimonialRow>(&sql)
            .bind(t.id)
            .bind(&t.name)
            .bind(&t.role)
            .bind(&t.company)
            .bind(&t.content)
            .bind(t.rating)
            .bind(&t.event_name)
            .bind(&t.image_url)
            .bind(t.is_approved)
            .bind(t.is_featured)
            .bind(t.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(Testimonial::from))
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(BlogPost::from))
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Product::try_from).transpose()
    }

    async fn find_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, AppError> {
        let sql = format!("SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = $1");
        let row = sqlx::query_as::<_, TestimonialRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(Testimonial::from))
    }

    /// DELETE by primary key. `table` is always one of our literals.
    async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(())
    }

    // -- Events --

    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn list_published_events(&self) -> Result<Vec<Event>, AppError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE is_published = TRUE ORDER BY event_date ASC"
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Event::try_from).transpose()
    }

    async fn create_event(&self, req: &UpsertEventRequest) -> Result<Event, AppError> {
        let e = records::new_event(req, Utc::now());
        let sql = format!(
            "INSERT INTO events ({EVENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(e.id)
            .bind(&e.title)
            .bind(&e.description)
            .bind(e.event_type.as_str())
            .bind(e.event_date)
            .bind(&e.location)
            .bind(e.max_participants)
            .bind(&e.image_url)
            .bind(e.registration_deadline)
            .bind(e.is_published)
            .bind(e.created_at)
            .bind(e.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.try_into()
    }

    async fn update_event(&self, id: Uuid, req: &UpsertEventRequest) -> Result<Option<Event>, AppError> {
        let Some(existing) = self.find_event(id).await? else {
            return Ok(None);
        };
        let updated = records::apply_event(existing.id, existing.created_at, req, Utc::now());
        self.write_event(&updated).await
    }

    async fn set_event_published(&self, id: Uuid, published: bool) -> Result<Option<Event>, AppError> {
        let sql = format!(
            "UPDATE events SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .bind(published)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Event::try_from).transpose()
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        // Registrations go with it via ON DELETE CASCADE.
        self.delete_by_id("events", id).await
    }

    // -- Registrations --

    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
        now: DateTime<Utc>,
    ) -> Result<EventRegistration, AppError> {
        let mut tx = self.pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

        // The row lock serializes concurrent signups for the same event.
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE");
        let event = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?
            .map(Event::try_from)
            .transpose()?;

        let seated: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1 AND status <> 'rejected'",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        check_registration(event.as_ref(), usize::try_from(seated).unwrap_or(usize::MAX), now)?;

        let r = records::new_registration(event_id, req, now);
        let sql = format!(
            "INSERT INTO event_registrations ({REGISTRATION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {REGISTRATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(r.id)
            .bind(r.event_id)
            .bind(&r.name)
            .bind(&r.email)
            .bind(&r.phone)
            .bind(&r.college)
            .bind(r.status.as_str())
            .bind(r.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
        row.try_into()
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>, AppError> {
        let rows = sqlx::query_as::<_, RegistrationWithEventRow>(
            "SELECT r.id, r.event_id, r.name, r.email, r.phone, r.college, r.status, r.created_at, \
             e.title AS event_title \
             FROM event_registrations r LEFT JOIN events e ON e.id = r.event_id \
             ORDER BY r.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<EventRegistration>, AppError> {
        let sql = format!(
            "UPDATE event_registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(EventRegistration::try_from).transpose()
    }

    async fn delete_registration(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("event_registrations", id).await
    }

    // -- Applications --

    async fn create_application(&self, a: Application) -> Result<Application, AppError> {
        let sql = format!(
            "INSERT INTO applications ({APPLICATION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(a.id)
            .bind(a.kind.as_str())
            .bind(&a.name)
            .bind(&a.email)
            .bind(&a.phone)
            .bind(&a.college)
            .bind(&a.year_of_study)
            .bind(&a.position)
            .bind(&a.portfolio_url)
            .bind(&a.resume_url)
            .bind(&a.cover_letter)
            .bind(a.status.as_str())
            .bind(a.created_at)
            .bind(a.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.try_into()
    }

    async fn list_applications(&self, kind: Option<ApplicationKind>) -> Result<Vec<Application>, AppError> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE ($1::TEXT IS NULL OR kind = $1) ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(kind.map(|k| k.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError> {
        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.map(Application::try_from).transpose()
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("applications", id).await
    }

    // -- Contacts --

    async fn create_contact(&self, c: ContactSubmission) -> Result<ContactSubmission, AppError> {
        let sql = format!(
            "INSERT INTO contact_submissions ({CONTACT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {CONTACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(c.id)
            .bind(&c.name)
            .bind(&c.email)
            .bind(&c.subject)
            .bind(&c.message)
            .bind(c.is_read)
            .bind(c.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.into())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contact_submissions ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(ContactSubmission::from).collect())
    }

    async fn set_contact_read(&self, id: Uuid, is_read: bool) -> Result<Option<ContactSubmission>, AppError> {
        let sql = format!(
            "UPDATE contact_submissions SET is_read = $2 WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(is_read)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(ContactSubmission::from))
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("contact_submissions", id).await
    }

    // -- Newsletter --

    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError> {
        let email = normalize_email(email);

        let sql = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM newsletter_subscriptions WHERE email = $1");
        let existing = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(&email)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

        match existing {
            Some(row) if row.is_active => Err(unique_violation("newsletter_subscriptions_email_key")),
            Some(row) => {
                let sql = format!(
                    "UPDATE newsletter_subscriptions SET is_active = TRUE WHERE id = $1 \
                     RETURNING {SUBSCRIPTION_COLUMNS}"
                );
                let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
                    .bind(row.id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                Ok(SubscribeOutcome::Reactivated(row.into()))
            }
            None => {
                let s = records::new_subscription(&email, Utc::now());
                let sql = format!(
                    "INSERT INTO newsletter_subscriptions ({SUBSCRIPTION_COLUMNS}) \
                     VALUES ($1, $2, $3, $4) RETURNING {SUBSCRIPTION_COLUMNS}"
                );
                let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
                    .bind(s.id)
                    .bind(&s.email)
                    .bind(s.is_active)
                    .bind(s.subscribed_at)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                Ok(SubscribeOutcome::Created(row.into()))
            }
        }
    }

    async fn set_active_by_email(&self, email: &str, active: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE newsletter_subscriptions SET is_active = $2 WHERE email = $1")
            .bind(normalize_email(email))
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, AppError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM newsletter_subscriptions ORDER BY subscribed_at DESC"
        );
        let rows = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(NewsletterSubscription::from).collect())
    }

    async fn set_subscription_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<Option<NewsletterSubscription>, AppError> {
        let sql = format!(
            "UPDATE newsletter_subscriptions SET is_active = $2 WHERE id = $1 RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(id)
            .bind(active)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(NewsletterSubscription::from))
    }

    async fn delete_subscription(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("newsletter_subscriptions", id).await
    }

    // -- Blog --

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn list_published_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts WHERE is_published = TRUE \
             ORDER BY published_at DESC NULLS LAST, created_at DESC"
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1 AND is_published = TRUE");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(BlogPost::from))
    }

    async fn create_blog_post(&self, req: &UpsertBlogPostRequest) -> Result<BlogPost, AppError> {
        let p = records::new_blog_post(req, Utc::now());
        let sql = format!(
            "INSERT INTO blog_posts ({POST_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(p.id)
            .bind(&p.title)
            .bind(&p.slug)
            .bind(&p.content)
            .bind(&p.excerpt)
            .bind(&p.category)
            .bind(&p.cover_image)
            .bind(p.is_published)
            .bind(p.published_at)
            .bind(p.created_at)
            .bind(p.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.into())
    }

    async fn update_blog_post(&self, id: Uuid, req: &UpsertBlogPostRequest) -> Result<Option<BlogPost>, AppError> {
        let Some(existing) = self.find_post(id).await? else {
            return Ok(None);
        };
        let updated = records::apply_blog_post(
            existing.id,
            existing.created_at,
            existing.published_at,
            req,
            Utc::now(),
        );
        self.write_post(&updated).await
    }

    async fn set_blog_published(&self, id: Uuid, published: bool) -> Result<Option<BlogPost>, AppError> {
        let Some(mut post) = self.find_post(id).await? else {
            return Ok(None);
        };
        let now = Utc::now();
        post.is_published = published;
        post.published_at = BlogPost::next_published_at(post.published_at, published, now);
        post.updated_at = now;
        self.write_post(&post).await
    }

    async fn delete_blog_post(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("blog_posts", id).await
    }

    // -- Products --

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn list_published_products(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_published = TRUE \
             ORDER BY is_featured DESC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        decode_all(rows)
    }

    async fn create_product(&self, req: &UpsertProductRequest) -> Result<Product, AppError> {
        let p = records::new_product(req, Utc::now());
        let sql = format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(p.id)
            .bind(&p.name)
            .bind(&p.description)
            .bind(&p.short_description)
            .bind(p.category.as_str())
            .bind(&p.technologies)
            .bind(&p.demo_url)
            .bind(&p.github_url)
            .bind(&p.image_url)
            .bind(p.is_published)
            .bind(p.is_featured)
            .bind(p.created_at)
            .bind(p.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        row.try_into()
    }

    async fn update_product(&self, id: Uuid, req: &UpsertProductRequest) -> Result<Option<Product>, AppError> {
        let Some(existing) = self.find_product(id).await? else {
            return Ok(None);
        };
        let updated = records::apply_product(existing.id, existing.created_at, req, Utc::now());
        self.write_product(&updated).await
    }

    async fn set_product_published(&self, id: Uuid, published: bool) -> Result<Option<Product>, AppError> {
        let Some(mut product) = self.find_product(id).await? else {
            return Ok(None);
        };
        product.is_published = published;
        product.updated_at = Utc::now();
        self.write_product(&product).await
    }

    async fn set_product_featured(&self, id: Uuid, featured: bool) -> Result<Option<Product>, AppError> {
        let Some(mut product) = self.find_product(id).await? else {
            return Ok(None);
        };
        product.is_featured = featured;
        product.updated_at = Utc::now();
        self.write_product(&product).await
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("products", id).await
    }

    // -- Testimonials --

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let sql = format!("SELECT {TESTIMONIAL_COLUMNS} FROM testimonials ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, TestimonialRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    async fn list_public_testimonials(&self, limit: usize) -> Result<Vec<Testimonial>, AppError> {
        let sql = format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials \
             WHERE is_approved = TRUE AND is_featured = TRUE ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, TestimonialRow>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    async fn create_testimonial(&self, req: &UpsertTestimonialRequest) -> Result<Testimonial, AppError> {
        let t = records::new_testimonial(req, Utc::now());
        let sql = format!(
            "INSERT INTO testimonials ({TESTIMONIAL_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {TESTIMONIAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TestimonialRow>(&sql)
            .bind(t.id)
            .bind(&t.name)
            .bind(&t.role)
            .bind(&t.company)
            .bind(&t.content)
            .bind(t.rating)
            .bind(&t.event_name)
            .bind(&t.image_url)
            .bind(t.is_approved)
            .bind(t.is_featured)
            .bind(t.created_at)
            .bind(t.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.into())
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        req: &UpsertTestimonialRequest,
    ) -> Result<Option<Testimonial>, AppError> {
        let Some(existing) = self.find_testimonial(id).await? else {
            return Ok(None);
        };
        let updated = records::apply_testimonial(existing.id, existing.created_at, req, Utc::now());
        self.write_testimonial(&updated).await
    }

    async fn set_testimonial_approved(&self, id: Uuid, approved: bool) -> Result<Option<Testimonial>, AppError> {
        let Some(mut t) = self.find_testimonial(id).await? else {
            return Ok(None);
        };
        t.is_approved = approved;
        t.updated_at = Utc::now();
        self.write_testimonial(&t).await
    }

    async fn set_testimonial_featured(&self, id: Uuid, featured: bool) -> Result<Option<Testimonial>, AppError> {
        let Some(mut t) = self.find_testimonial(id).await? else {
            return Ok(None);
        };
        t.is_featured = featured;
        t.updated_at = Utc::now();
        self.write_testimonial(&t).await
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id("testimonials", id).await
    }

    // -- Users and roles --

    async fn create_user(&self, email: &str, full_name: &str, password_hash: &str) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, full_name, password_hash) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, full_name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(normalize_email(email))
        .bind(full_name.trim())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.into())
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT id, email, full_name, created_at, password_hash FROM users WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(|r| UserCredentials {
            user: r.user.into(),
            password_hash: r.password_hash,
        }))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, email, full_name, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(row.map(User::from))
    }

    async fn list_team(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT u.id, u.email, u.full_name, u.created_at, r.role \
             FROM users u LEFT JOIN user_roles r ON r.user_id = u.id \
             ORDER BY u.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        rows.into_iter()
            .map(|r| {
                let role = match r.role.as_deref() {
                    Some(role) => Some(decode(role, AppRole::from_str_opt, "role")?),
                    None => None,
                };
                Ok(TeamMember {
                    user: r.user.into(),
                    role,
                })
            })
            .collect()
    }

    async fn role_of(&self, user_id: Uuid) -> Result<Option<AppRole>, AppError> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        role.map(|r| decode(&r, AppRole::from_str_opt, "role")).transpose()
    }

    async fn set_role(&self, user_id: Uuid, role: AppRole) -> Result<UserRole, AppError> {
        if self.find_user(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let row = sqlx::query_as::<_, RoleRow>(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role \
             RETURNING user_id, role, created_at",
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
        row.try_into()
    }

    async fn remove_role(&self, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(result.rows_affected() > 0)
    }

    // -- Sessions --

    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(id)
    }

    async fn session_is_live(&self, session_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError> {
        let live: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM sessions \
             WHERE id = $1 AND user_id = $2 AND revoked_at IS NULL AND expires_at > $3)",
        )
        .bind(session_id)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
        Ok(live)
    }

    async fn revoke_session(&self, session_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT \
               (SELECT COUNT(*) FROM events) AS total_events, \
               (SELECT COUNT(*) FROM applications WHERE kind = 'internship') AS internship_applications, \
               (SELECT COUNT(*) FROM applications WHERE kind = 'career') AS career_applications, \
               (SELECT COUNT(*) FROM contact_submissions WHERE is_read = FALSE) AS unread_contacts, \
               (SELECT COUNT(*) FROM newsletter_subscriptions WHERE is_active = TRUE) AS active_subscribers, \
               (SELECT COUNT(*) FROM event_registrations WHERE status = 'pending') AS pending_registrations",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

        Ok(DashboardStats {
            total_events: row.total_events,
            internship_applications: row.internship_applications,
            career_applications: row.career_applications,
            unread_contacts: row.unread_contacts,
            active_subscribers: row.active_subscribers,
            pending_registrations: row.pending_registrations,
        })
    }
}
