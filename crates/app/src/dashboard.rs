use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared_types::{
    AdminTab, AppError, Application, BlogPost, ContactSubmission, DashboardStats, Event,
    ExportDataset, ExportRecord, NewsletterSubscription, Product, RegistrationWithEvent,
    SetRoleRequest, TeamMember, Testimonial, UpsertBlogPostRequest, UpsertEventRequest,
    UpsertProductRequest, UpsertTestimonialRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::backend::Backend;
use crate::download::write_csv;
use crate::gate::AdminGate;
use crate::notice::Notice;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row type listed on one of the dashboard tabs.
pub trait AdminEntity: DeserializeOwned + Send + Sync {
    /// Collection path, e.g. `/api/admin/events`.
    const COLLECTION: &'static str;
    /// Singular noun used in notices.
    const NOUN: &'static str;

    fn id(&self) -> Uuid;

    fn item_path(id: Uuid) -> String {
        format!("{}/{id}", Self::COLLECTION)
    }

    fn deleted_title() -> String {
        format!("{} deleted", Self::NOUN)
    }
}

/// An entity the admin edits through a form.
pub trait EditableEntity: AdminEntity {
    type Draft: Serialize + Validate + Send + Sync;

    /// Whether the tab offers a "new" button.
    const CREATABLE: bool = true;

    fn created_title() -> String {
        format!("{} created", Self::NOUN)
    }

    fn updated_title(_draft: &Self::Draft) -> String {
        format!("{} updated", Self::NOUN)
    }
}

impl AdminEntity for Event {
    const COLLECTION: &'static str = "/api/admin/events";
    const NOUN: &'static str = "Event";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl EditableEntity for Event {
    type Draft = UpsertEventRequest;
}

impl AdminEntity for RegistrationWithEvent {
    const COLLECTION: &'static str = "/api/admin/registrations";
    const NOUN: &'static str = "Registration";

    fn id(&self) -> Uuid {
        self.registration.id
    }
}

impl AdminEntity for Application {
    const COLLECTION: &'static str = "/api/admin/applications";
    const NOUN: &'static str = "Application";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl AdminEntity for ContactSubmission {
    const COLLECTION: &'static str = "/api/admin/contacts";
    const NOUN: &'static str = "Message";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl AdminEntity for NewsletterSubscription {
    const COLLECTION: &'static str = "/api/admin/newsletter";
    const NOUN: &'static str = "Subscriber";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl AdminEntity for BlogPost {
    const COLLECTION: &'static str = "/api/admin/blog";
    const NOUN: &'static str = "Post";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl EditableEntity for BlogPost {
    type Draft = UpsertBlogPostRequest;
}

impl AdminEntity for Product {
    const COLLECTION: &'static str = "/api/admin/products";
    const NOUN: &'static str = "Product";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl EditableEntity for Product {
    type Draft = UpsertProductRequest;
}

impl AdminEntity for Testimonial {
    const COLLECTION: &'static str = "/api/admin/testimonials";
    const NOUN: &'static str = "Testimonial";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl EditableEntity for Testimonial {
    type Draft = UpsertTestimonialRequest;
}

/// Team rows are addressed through their role: saving sets it, deleting
/// removes it. Accounts themselves are never created here.
impl AdminEntity for TeamMember {
    const COLLECTION: &'static str = "/api/admin/team";
    const NOUN: &'static str = "Role";

    fn id(&self) -> Uuid {
        self.user.id
    }

    fn item_path(id: Uuid) -> String {
        format!("{}/{id}/role", Self::COLLECTION)
    }

    fn deleted_title() -> String {
        "Role removed".to_string()
    }
}

impl EditableEntity for TeamMember {
    type Draft = SetRoleRequest;
    const CREATABLE: bool = false;

    fn updated_title(draft: &SetRoleRequest) -> String {
        format!("Role updated to {}", draft.role.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tab controller
// ---------------------------------------------------------------------------

/// State of one CRUD tab.
///
/// Every successful mutation is followed by a full reload of the list, so
/// `rows` always mirrors what the server holds after the last action.
pub struct EntityTab<E> {
    pub rows: Vec<E>,
    pub loading: bool,
    pub notice: Option<Notice>,
    query: Option<String>,
}

impl<E> Default for EntityTab<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            notice: None,
            query: None,
        }
    }
}

impl<E: AdminEntity> EntityTab<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tab listing a filtered view, e.g. `kind=internship`.
    pub fn filtered(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn list_path(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", E::COLLECTION),
            None => E::COLLECTION.to_string(),
        }
    }

    pub fn find(&self, id: Uuid) -> Option<&E> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Fetch the list. On failure the previous rows are kept.
    pub async fn load(&mut self, backend: &dyn Backend) -> Result<(), AppError> {
        self.loading = true;
        let result = fetch_rows::<E>(backend, &self.list_path()).await;
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(collection = E::COLLECTION, error = %e, "failed to load rows");
                self.notice = Some(Notice::failure("Error", &e));
                Err(e)
            }
        }
    }

    /// Delete a row once `confirm` agrees. Returns whether a delete was sent.
    pub async fn delete(
        &mut self,
        backend: &dyn Backend,
        id: Uuid,
        confirm: impl FnOnce() -> bool,
    ) -> Result<bool, AppError> {
        if !confirm() {
            return Ok(false);
        }
        let result = backend.delete_row(&E::item_path(id)).await;
        self.finish(backend, result.map(|_| E::deleted_title())).await?;
        Ok(true)
    }

    /// Single-field update through `{item}/{action}`, e.g. `publish`.
    pub async fn patch<B: Serialize>(
        &mut self,
        backend: &dyn Backend,
        id: Uuid,
        action: &str,
        body: &B,
        done_title: impl Into<String>,
    ) -> Result<(), AppError> {
        let path = format!("{}/{action}", E::item_path(id));
        let result = match serde_json::to_value(body) {
            Ok(body) => backend.patch_row(&path, body).await.map(|_| done_title.into()),
            Err(e) => Err(AppError::bad_request(e.to_string())),
        };
        self.finish(backend, result).await
    }

    /// Save the rows currently loaded as `<label>.csv` in `dir`.
    pub fn export_csv(&mut self, dir: &Path, dataset: ExportDataset) -> Result<PathBuf, AppError>
    where
        E: ExportRecord,
    {
        let result = write_csv(dir, dataset.label(), &self.rows);
        self.notice = Some(match &result {
            Ok(_) => Notice::success("Export complete", format!("{}.csv", dataset.label())),
            Err(e) => Notice::failure("Export failed", e),
        });
        result
    }

    /// Record the notice for a mutation and reload after success.
    async fn finish(
        &mut self,
        backend: &dyn Backend,
        result: Result<String, AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(title) => {
                self.notice = Some(Notice::success(title, ""));
                self.load(backend).await
            }
            Err(e) => {
                self.notice = Some(Notice::failure("Error", &e));
                Err(e)
            }
        }
    }
}

impl<E: EditableEntity> EntityTab<E> {
    /// Create when `id` is `None`, otherwise replace the row.
    pub async fn save(
        &mut self,
        backend: &dyn Backend,
        draft: &E::Draft,
        id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let result = self.send_draft(backend, draft, id).await;
        self.finish(backend, result).await
    }

    async fn send_draft(
        &self,
        backend: &dyn Backend,
        draft: &E::Draft,
        id: Option<Uuid>,
    ) -> Result<String, AppError> {
        draft.validate()?;
        let body = serde_json::to_value(draft).map_err(|e| AppError::bad_request(e.to_string()))?;
        match id {
            Some(id) => {
                backend.replace_row(&E::item_path(id), body).await?;
                Ok(E::updated_title(draft))
            }
            None if E::CREATABLE => {
                backend.create_row(E::COLLECTION, body).await?;
                Ok(E::created_title())
            }
            None => Err(AppError::bad_request(format!(
                "{} rows cannot be created here",
                E::NOUN
            ))),
        }
    }
}

async fn fetch_rows<E: AdminEntity>(backend: &dyn Backend, path: &str) -> Result<Vec<E>, AppError> {
    backend
        .list_rows(path)
        .await?
        .into_iter()
        .map(|row: Value| {
            serde_json::from_value(row)
                .map_err(|e| AppError::internal(format!("Unexpected {} row: {e}", E::NOUN)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard shell
// ---------------------------------------------------------------------------

/// The admin page: role gate, overview counters and the selected tab.
#[derive(Default)]
pub struct Dashboard {
    pub gate: AdminGate,
    pub stats: Option<DashboardStats>,
    pub active: AdminTab,
    pub notice: Option<Notice>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the role gate and, when granted, fetch the overview counters.
    pub async fn mount(&mut self, backend: &dyn Backend) {
        self.gate.check(backend).await;
        if self.gate.is_granted() {
            self.refresh_stats(backend).await;
        }
    }

    pub fn select(&mut self, tab: AdminTab) {
        self.active = tab;
    }

    pub async fn refresh_stats(&mut self, backend: &dyn Backend) {
        match backend.stats().await {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => self.notice = Some(Notice::failure("Error", &e)),
        }
    }

    pub async fn sign_out(&mut self, backend: &dyn Backend) {
        if let Err(e) = backend.logout().await {
            tracing::warn!(error = %e, "logout request failed");
        }
        self.stats = None;
        self.active = AdminTab::default();
        self.gate.on_session_change(backend, None).await;
    }
}
