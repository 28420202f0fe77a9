//! In-memory `Backend` used by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use shared_types::{
    fallback, AccessDecision, AppError, AppRole, Application, ApplicationStatus, AuthResponse,
    BlogPost, ContactSubmission, CreateContactRequest, CreateRegistrationRequest, DashboardStats,
    EventRegistration, Listing, LoginRequest, NewsletterSubscription, Product, PublicEvent,
    RegistrationStatus, SessionInfo, SubmitApplicationRequest, SubscribeRequest, Testimonial,
    UploadResponse, User,
};
use uuid::Uuid;

use crate::backend::{Backend, FileUpload};

pub const FAKE_PASSWORD: &str = "correct-horse";

#[derive(Default)]
struct FakeState {
    session: Option<SessionInfo>,
    tables: HashMap<String, Vec<Value>>,
    calls: Vec<String>,
    fail_next: Option<AppError>,
    stats: DashboardStats,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

fn user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "admin@innovexarena.com".into(),
        full_name: "Site Admin".into(),
        created_at: Utc::now(),
    }
}

/// Split `/api/admin/events/{id}/publish?x=y` into collection, id and action.
fn split_path(path: &str) -> (String, Option<Uuid>, Option<String>, Option<String>) {
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q.to_string())),
        None => (path, None),
    };
    let segments: Vec<&str> = path.split('/').collect();
    match segments.iter().position(|s| Uuid::parse_str(s).is_ok()) {
        Some(i) => {
            let id = Uuid::parse_str(segments[i]).ok();
            let action = segments.get(i + 1).map(|s| s.to_string());
            (segments[..i].join("/"), id, action, query)
        }
        None => (path.to_string(), None, None, query),
    }
}

fn row_id(row: &Value) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn merge(row: &mut Value, body: &Value) {
    if let (Some(target), Some(source)) = (row.as_object_mut(), body.as_object()) {
        for (k, v) in source {
            target.insert(k.clone(), v.clone());
        }
    }
}

impl FakeBackend {
    pub fn with_session(role: Option<AppRole>) -> Self {
        let backend = Self::default();
        backend.lock().session = Some(SessionInfo { user: user(), role });
        backend
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Record the call and fail it if a failure was queued.
    fn begin(&self, call: impl Into<String>) -> Result<MutexGuard<'_, FakeState>, AppError> {
        let mut state = self.lock();
        state.calls.push(call.into());
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }

    pub fn fail_next(&self, message: &str) {
        self.fail_next_with(AppError::internal(message));
    }

    pub fn fail_next_with(&self, err: AppError) {
        self.lock().fail_next = Some(err);
    }

    pub fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.lock().tables.insert(collection.to_string(), rows);
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.lock().tables.get(collection).cloned().unwrap_or_default()
    }

    pub fn set_stats(&self, stats: DashboardStats) {
        self.lock().stats = stats;
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn register_for_event(
        &self,
        event_id: Uuid,
        req: &CreateRegistrationRequest,
    ) -> Result<EventRegistration, AppError> {
        self.begin(format!("register_for_event {event_id}"))?;
        Ok(EventRegistration {
            id: Uuid::new_v4(),
            event_id,
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            college: req.college.clone(),
            status: RegistrationStatus::Pending,
            created_at: Utc::now(),
        })
    }

    async fn submit_application(&self, req: &SubmitApplicationRequest) -> Result<Application, AppError> {
        self.begin("submit_application")?;
        let now = Utc::now();
        Ok(Application {
            id: Uuid::new_v4(),
            kind: req.kind,
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            college: req.college.clone(),
            year_of_study: req.year_of_study.clone(),
            position: req.position.clone(),
            portfolio_url: req.portfolio_url.clone(),
            resume_url: req.resume_url.clone(),
            cover_letter: req.cover_letter.clone(),
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    async fn submit_contact(&self, req: &CreateContactRequest) -> Result<ContactSubmission, AppError> {
        self.begin("submit_contact")?;
        Ok(ContactSubmission {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            email: req.email.clone(),
            subject: req.subject.clone(),
            message: req.message.clone(),
            is_read: false,
            created_at: Utc::now(),
        })
    }

    async fn subscribe(&self, req: &SubscribeRequest) -> Result<NewsletterSubscription, AppError> {
        self.begin("subscribe")?;
        Ok(NewsletterSubscription {
            id: Uuid::new_v4(),
            email: req.email.clone(),
            is_active: true,
            subscribed_at: Utc::now(),
        })
    }

    async fn upload_resume(&self, file: FileUpload) -> Result<UploadResponse, AppError> {
        self.begin(format!("upload_resume {}", file.file_name))?;
        let path = format!("resumes/{}", file.file_name);
        Ok(UploadResponse {
            url: format!("https://cdn.example.com/{path}"),
            path,
        })
    }

    async fn public_events(&self) -> Result<Listing<PublicEvent>, AppError> {
        self.begin("public_events")?;
        let now = Utc::now();
        Ok(Listing::or_fallback(Vec::new(), fallback::events).map(|e| PublicEvent::at(e, now)))
    }

    async fn public_blog(&self, category: Option<&str>) -> Result<Listing<BlogPost>, AppError> {
        self.begin("public_blog")?;
        Ok(Listing::or_fallback(Vec::new(), fallback::blog_posts)
            .filter_category(category, |p| p.category.as_str()))
    }

    async fn public_products(&self, category: Option<&str>) -> Result<Listing<Product>, AppError> {
        self.begin("public_products")?;
        Ok(Listing::or_fallback(Vec::new(), fallback::products)
            .filter_category(category, |p| p.category.as_str()))
    }

    async fn public_testimonials(&self) -> Result<Listing<Testimonial>, AppError> {
        self.begin("public_testimonials")?;
        Ok(Listing::or_fallback(Vec::new(), fallback::testimonials))
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError> {
        let mut state = self.begin("login")?;
        if req.password != FAKE_PASSWORD {
            return Err(AppError::unauthorized("Invalid email or password"));
        }
        let user = User {
            email: req.email.clone(),
            ..user()
        };
        state.session = Some(SessionInfo {
            user: user.clone(),
            role: Some(AppRole::Admin),
        });
        Ok(AuthResponse {
            user,
            access_token: "fake-token".into(),
            expires_at: Utc::now(),
        })
    }

    async fn logout(&self) -> Result<(), AppError> {
        let mut state = self.begin("logout")?;
        state.session = None;
        Ok(())
    }

    async fn access(&self) -> Result<AccessDecision, AppError> {
        let state = self.begin("access")?;
        Ok(AccessDecision::evaluate(state.session.as_ref()))
    }

    async fn stats(&self) -> Result<DashboardStats, AppError> {
        let state = self.begin("stats")?;
        Ok(state.stats.clone())
    }

    async fn upload_image(&self, folder: &str, file: FileUpload) -> Result<UploadResponse, AppError> {
        self.begin(format!("upload_image {folder}"))?;
        let path = format!("{folder}/{}", file.file_name);
        Ok(UploadResponse {
            url: format!("https://cdn.example.com/{path}"),
            path,
        })
    }

    async fn list_rows(&self, path: &str) -> Result<Vec<Value>, AppError> {
        let state = self.begin(format!("GET {path}"))?;
        let (collection, _, _, query) = split_path(path);
        let rows = state.tables.get(&collection).cloned().unwrap_or_default();
        let filter = query.as_deref().and_then(|q| q.split_once('='));
        Ok(match filter {
            Some((key, value)) => rows
                .into_iter()
                .filter(|r| r.get(key).and_then(Value::as_str) == Some(value))
                .collect(),
            None => rows,
        })
    }

    async fn create_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        let mut state = self.begin(format!("POST {path}"))?;
        let mut row = body;
        let now = Utc::now();
        merge(
            &mut row,
            &json!({ "id": Uuid::new_v4(), "created_at": now, "updated_at": now }),
        );
        state
            .tables
            .entry(path.to_string())
            .or_default()
            .insert(0, row.clone());
        Ok(row)
    }

    async fn replace_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        let mut state = self.begin(format!("PUT {path}"))?;
        let (collection, id, _, _) = split_path(path);
        let row = state
            .tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == id))
            .ok_or_else(|| AppError::not_found("Row not found"))?;
        merge(row, &body);
        Ok(row.clone())
    }

    async fn patch_row(&self, path: &str, body: Value) -> Result<Value, AppError> {
        let mut state = self.begin(format!("PATCH {path}"))?;
        let (collection, id, _, _) = split_path(path);
        let row = state
            .tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == id))
            .ok_or_else(|| AppError::not_found("Row not found"))?;
        merge(row, &body);
        Ok(row.clone())
    }

    async fn delete_row(&self, path: &str) -> Result<(), AppError> {
        let mut state = self.begin(format!("DELETE {path}"))?;
        let (collection, id, action, _) = split_path(path);
        let rows = state
            .tables
            .get_mut(&collection)
            .ok_or_else(|| AppError::not_found("Row not found"))?;
        let index = rows
            .iter()
            .position(|r| row_id(r) == id)
            .ok_or_else(|| AppError::not_found("Row not found"))?;
        match action {
            // DELETE on a sub-resource clears that field.
            Some(field) => {
                if let Some(row) = rows[index].as_object_mut() {
                    row.insert(field, Value::Null);
                }
            }
            None => {
                rows.remove(index);
            }
        }
        Ok(())
    }
}

#[test]
fn split_path_finds_id_and_action() {
    let id = Uuid::new_v4();
    let (collection, parsed, action, query) = split_path(&format!("/api/admin/events/{id}/publish"));
    assert_eq!(collection, "/api/admin/events");
    assert_eq!(parsed, Some(id));
    assert_eq!(action.as_deref(), Some("publish"));
    assert_eq!(query, None);

    let (collection, parsed, _, query) = split_path("/api/admin/applications?kind=career");
    assert_eq!(collection, "/api/admin/applications");
    assert_eq!(parsed, None);
    assert_eq!(query.as_deref(), Some("kind=career"));
}
