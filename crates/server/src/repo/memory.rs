use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{
    normalize_email, AppError, AppRole, Application, ApplicationKind, ApplicationStatus, BlogPost,
    ContactSubmission, CreateRegistrationRequest, DashboardStats, Event, EventRegistration,
    NewsletterSubscription, Product, RegistrationStatus, RegistrationWithEvent, TeamMember,
    Testimonial, UpsertBlogPostRequest, UpsertEventRequest, UpsertProductRequest,
    UpsertTestimonialRequest, User, UserRole,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::records::{self, check_registration};
use super::{Store, SubscribeOutcome, UserCredentials};
use crate::error_convert::unique_violation;

/// Rows addressable by primary key.
trait Keyed {
    fn key(&self) -> Uuid;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> Uuid {
                self.id
            }
        })*
    };
}

keyed!(
    Event,
    EventRegistration,
    Application,
    ContactSubmission,
    NewsletterSubscription,
    BlogPost,
    Product,
    Testimonial,
);

struct StoredUser {
    user: User,
    password_hash: String,
}

struct Session {
    id: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked: bool,
}

/// Tables kept in insertion order; listings walk them backwards.
#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    registrations: Vec<EventRegistration>,
    applications: Vec<Application>,
    contacts: Vec<ContactSubmission>,
    subscriptions: Vec<NewsletterSubscription>,
    posts: Vec<BlogPost>,
    products: Vec<Product>,
    testimonials: Vec<Testimonial>,
    users: Vec<StoredUser>,
    roles: Vec<UserRole>,
    sessions: Vec<Session>,
}

impl Tables {
    fn seated(&self, event_id: Uuid) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id && r.status.holds_seat())
            .count()
    }

    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.posts
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

fn find<T: Keyed + Clone>(rows: &[T], id: Uuid) -> Option<T> {
    rows.iter().find(|r| r.key() == id).cloned()
}

/// Apply `change` to the row with `id` and return the updated copy.
fn modify<T: Keyed + Clone>(rows: &mut [T], id: Uuid, change: impl FnOnce(&mut T)) -> Option<T> {
    let row = rows.iter_mut().find(|r| r.key() == id)?;
    change(row);
    Some(row.clone())
}

fn remove<T: Keyed>(rows: &mut Vec<T>, id: Uuid) -> bool {
    let before = rows.len();
    rows.retain(|r| r.key() != id);
    rows.len() != before
}

/// Process-local store. Everything lives behind one lock, so compound
/// operations such as registration are atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    // -- Events --

    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        Ok(newest_first(&self.tables.read().await.events))
    }

    async fn list_published_events(&self) -> Result<Vec<Event>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Event> = tables
            .events
            .iter()
            .filter(|e| e.is_published)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.event_date);
        Ok(rows)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(find(&self.tables.read().await.events, id))
    }

    async fn create_event(&self, req: &UpsertEventRequest) -> Result<Event, AppError> {
        let event = records::new_event(req, Utc::now());
        self.tables.write().await.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, req: &UpsertEventRequest) -> Result<Option<Event>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.events, id, |e| {
            *e = records::apply_event(e.id, e.created_at, req, Utc::now());
        }))
    }

    async fn set_event_published(&self, id: Uuid, published: bool) -> Result<Option<Event>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.events, id, |e| {
            e.is_published = published;
            e.updated_at = Utc::now();
        }))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = remove(&mut tables.events, id);
        if removed {
            tables.registrations.retain(|r| r.event_id != id);
        }
        Ok(removed)
    }

    // -- Registrations --

    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
        now: DateTime<Utc>,
    ) -> Result<EventRegistration, AppError> {
        let mut tables = self.tables.write().await;
        let event = tables.events.iter().find(|e| e.id == event_id);
        check_registration(event, tables.seated(event_id), now)?;

        let registration = records::new_registration(event_id, req, now);
        tables.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationWithEvent>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .rev()
            .map(|r| RegistrationWithEvent {
                registration: r.clone(),
                event_title: tables
                    .events
                    .iter()
                    .find(|e| e.id == r.event_id)
                    .map(|e| e.title.clone()),
            })
            .collect())
    }

    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<EventRegistration>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.registrations, id, |r| r.status = status))
    }

    async fn delete_registration(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.registrations, id))
    }

    // -- Applications --

    async fn create_application(&self, application: Application) -> Result<Application, AppError> {
        self.tables.write().await.applications.push(application.clone());
        Ok(application)
    }

    async fn list_applications(&self, kind: Option<ApplicationKind>) -> Result<Vec<Application>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| kind.map_or(true, |k| a.kind == k))
            .cloned()
            .collect())
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.applications, id, |a| {
            a.status = status;
            a.updated_at = Utc::now();
        }))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.applications, id))
    }

    // -- Contacts --

    async fn create_contact(&self, contact: ContactSubmission) -> Result<ContactSubmission, AppError> {
        self.tables.write().await.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        Ok(newest_first(&self.tables.read().await.contacts))
    }

    async fn set_contact_read(&self, id: Uuid, is_read: bool) -> Result<Option<ContactSubmission>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.contacts, id, |c| c.is_read = is_read))
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.contacts, id))
    }

    // -- Newsletter --

    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError> {
        let email = normalize_email(email);
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.subscriptions.iter_mut().find(|s| s.email == email) {
            if existing.is_active {
                return Err(unique_violation("newsletter_subscriptions_email_key"));
            }
            existing.is_active = true;
            return Ok(SubscribeOutcome::Reactivated(existing.clone()));
        }

        let subscription = records::new_subscription(&email, Utc::now());
        tables.subscriptions.push(subscription.clone());
        Ok(SubscribeOutcome::Created(subscription))
    }

    async fn set_active_by_email(&self, email: &str, active: bool) -> Result<bool, AppError> {
        let email = normalize_email(email);
        let mut tables = self.tables.write().await;
        match tables.subscriptions.iter_mut().find(|s| s.email == email) {
            Some(s) => {
                s.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_subscriptions(&self) -> Result<Vec<NewsletterSubscription>, AppError> {
        Ok(newest_first(&self.tables.read().await.subscriptions))
    }

    async fn set_subscription_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<Option<NewsletterSubscription>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.subscriptions, id, |s| s.is_active = active))
    }

    async fn delete_subscription(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.subscriptions, id))
    }

    // -- Blog --

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(newest_first(&self.tables.read().await.posts))
    }

    async fn list_published_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<BlogPost> = tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(rows)
    }

    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.slug == slug && p.is_published)
            .cloned())
    }

    async fn create_blog_post(&self, req: &UpsertBlogPostRequest) -> Result<BlogPost, AppError> {
        let post = records::new_blog_post(req, Utc::now());
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&post.slug, None) {
            return Err(unique_violation("blog_posts_slug_key"));
        }
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_blog_post(&self, id: Uuid, req: &UpsertBlogPostRequest) -> Result<Option<BlogPost>, AppError> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&req.effective_slug(), Some(id)) {
            return Err(unique_violation("blog_posts_slug_key"));
        }
        Ok(modify(&mut tables.posts, id, |p| {
            *p = records::apply_blog_post(p.id, p.created_at, p.published_at, req, Utc::now());
        }))
    }

    async fn set_blog_published(&self, id: Uuid, published: bool) -> Result<Option<BlogPost>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.posts, id, |p| {
            let now = Utc::now();
            p.is_published = published;
            p.published_at = BlogPost::next_published_at(p.published_at, published, now);
            p.updated_at = now;
        }))
    }

    async fn delete_blog_post(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.posts, id))
    }

    // -- Products --

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(newest_first(&self.tables.read().await.products))
    }

    async fn list_published_products(&self) -> Result<Vec<Product>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Product> = tables
            .products
            .iter()
            .rev()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        // Stable sort keeps newest-first within each group.
        rows.sort_by_key(|p| !p.is_featured);
        Ok(rows)
    }

    async fn create_product(&self, req: &UpsertProductRequest) -> Result<Product, AppError> {
        let product = records::new_product(req, Utc::now());
        self.tables.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, req: &UpsertProductRequest) -> Result<Option<Product>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.products, id, |p| {
            *p = records::apply_product(p.id, p.created_at, req, Utc::now());
        }))
    }

    async fn set_product_published(&self, id: Uuid, published: bool) -> Result<Option<Product>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.products, id, |p| {
            p.is_published = published;
            p.updated_at = Utc::now();
        }))
    }

    async fn set_product_featured(&self, id: Uuid, featured: bool) -> Result<Option<Product>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.products, id, |p| {
            p.is_featured = featured;
            p.updated_at = Utc::now();
        }))
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.products, id))
    }

    // -- Testimonials --

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        Ok(newest_first(&self.tables.read().await.testimonials))
    }

    async fn list_public_testimonials(&self, limit: usize) -> Result<Vec<Testimonial>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .testimonials
            .iter()
            .rev()
            .filter(|t| t.is_public())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_testimonial(&self, req: &UpsertTestimonialRequest) -> Result<Testimonial, AppError> {
        let testimonial = records::new_testimonial(req, Utc::now());
        self.tables.write().await.testimonials.push(testimonial.clone());
        Ok(testimonial)
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        req: &UpsertTestimonialRequest,
    ) -> Result<Option<Testimonial>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.testimonials, id, |t| {
            *t = records::apply_testimonial(t.id, t.created_at, req, Utc::now());
        }))
    }

    async fn set_testimonial_approved(&self, id: Uuid, approved: bool) -> Result<Option<Testimonial>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.testimonials, id, |t| {
            t.is_approved = approved;
            t.updated_at = Utc::now();
        }))
    }

    async fn set_testimonial_featured(&self, id: Uuid, featured: bool) -> Result<Option<Testimonial>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(modify(&mut tables.testimonials, id, |t| {
            t.is_featured = featured;
            t.updated_at = Utc::now();
        }))
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove(&mut self.tables.write().await.testimonials, id))
    }

    // -- Users and roles --

    async fn create_user(&self, email: &str, full_name: &str, password_hash: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user.email == email) {
            return Err(unique_violation("users_email_key"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            full_name: full_name.trim().to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(StoredUser {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let email = normalize_email(email);
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| UserCredentials {
                user: u.user.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn list_team(&self) -> Result<Vec<TeamMember>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .rev()
            .map(|u| TeamMember {
                user: u.user.clone(),
                role: tables
                    .roles
                    .iter()
                    .find(|r| r.user_id == u.user.id)
                    .map(|r| r.role),
            })
            .collect())
    }

    async fn role_of(&self, user_id: Uuid) -> Result<Option<AppRole>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .roles
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.role))
    }

    async fn set_role(&self, user_id: Uuid, role: AppRole) -> Result<UserRole, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.user.id == user_id) {
            return Err(AppError::not_found("User not found"));
        }

        if let Some(existing) = tables.roles.iter_mut().find(|r| r.user_id == user_id) {
            existing.role = role;
            return Ok(existing.clone());
        }

        let row = UserRole {
            user_id,
            role,
            created_at: Utc::now(),
        };
        tables.roles.push(row.clone());
        Ok(row)
    }

    async fn remove_role(&self, user_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.roles.len();
        tables.roles.retain(|r| r.user_id != user_id);
        Ok(tables.roles.len() != before)
    }

    // -- Sessions --

    async fn create_session(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.tables.write().await.sessions.push(Session {
            id,
            user_id,
            expires_at,
            revoked: false,
        });
        Ok(id)
    }

    async fn session_is_live(&self, session_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .any(|s| s.id == session_id && s.user_id == user_id && !s.revoked && s.expires_at > now))
    }

    async fn revoke_session(&self, session_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(s) = tables.sessions.iter_mut().find(|s| s.id == session_id) {
            s.revoked = true;
        }
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let tables = self.tables.read().await;
        let count = |n: usize| n as i64;
        let applications_of = |kind: ApplicationKind| {
            count(tables.applications.iter().filter(|a| a.kind == kind).count())
        };

        Ok(DashboardStats {
            total_events: count(tables.events.len()),
            internship_applications: applications_of(ApplicationKind::Internship),
            career_applications: applications_of(ApplicationKind::Career),
            unread_contacts: count(tables.contacts.iter().filter(|c| !c.is_read).count()),
            active_subscribers: count(tables.subscriptions.iter().filter(|s| s.is_active).count()),
            pending_registrations: count(
                tables
                    .registrations
                    .iter()
                    .filter(|r| r.status == RegistrationStatus::Pending)
                    .count(),
            ),
        })
    }
}
