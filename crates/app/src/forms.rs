//! Public submission forms.
//!
//! Each draft mirrors the inputs of one page. `validate` checks it locally
//! with the same rules the server applies; `submit` issues exactly one call
//! and clears the draft on success.

use shared_types::{
    content_type_for_path, non_blank, AppError, ApplicationKind, CreateContactRequest,
    CreateRegistrationRequest, PublicEvent, SubmitApplicationRequest, SubscribeRequest,
    UploadPolicy,
};
use validator::Validate;

use crate::backend::{Backend, FileUpload};
use crate::notice::Notice;

/// Run a DTO's validator rules, mapping the first failure to an `AppError`.
fn check<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate().map_err(AppError::from)
}

// -- Event registration --

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
}

impl RegistrationDraft {
    pub fn to_request(&self) -> CreateRegistrationRequest {
        CreateRegistrationRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(Some(self.phone.clone())),
            college: non_blank(Some(self.college.clone())),
        }
    }

    pub fn validate(&self) -> Result<CreateRegistrationRequest, AppError> {
        let req = self.to_request();
        check(&req)?;
        Ok(req)
    }

    /// Closed events are refused here without contacting the server.
    pub async fn submit(&mut self, backend: &dyn Backend, event: &PublicEvent) -> Notice {
        if !event.registration_open {
            return Notice::failure(
                "Registration Failed",
                &AppError::conflict("Registration for this event has closed"),
            );
        }
        let result = match self.validate() {
            Ok(req) => backend.register_for_event(event.event.id, &req).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                *self = Self::default();
                Notice::success(
                    "Registration Successful!",
                    format!(
                        "You've registered for {}. Check your email for details.",
                        event.event.title
                    ),
                )
            }
            Err(e) => Notice::failure("Registration Failed", &e),
        }
    }
}

// -- Internship and career applications --

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub kind: ApplicationKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub year_of_study: String,
    pub position: String,
    pub portfolio_url: String,
    pub resume_url: String,
    pub cover_letter: String,
}

impl ApplicationDraft {
    pub fn new(kind: ApplicationKind) -> Self {
        Self {
            kind,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            college: String::new(),
            year_of_study: String::new(),
            position: String::new(),
            portfolio_url: String::new(),
            resume_url: String::new(),
            cover_letter: String::new(),
        }
    }

    pub fn to_request(&self) -> SubmitApplicationRequest {
        SubmitApplicationRequest {
            kind: self.kind,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            college: self.college.trim().to_string(),
            year_of_study: self.year_of_study.trim().to_string(),
            position: self.position.trim().to_string(),
            portfolio_url: non_blank(Some(self.portfolio_url.clone())),
            resume_url: non_blank(Some(self.resume_url.clone())),
            cover_letter: non_blank(Some(self.cover_letter.clone())),
        }
    }

    pub fn validate(&self) -> Result<SubmitApplicationRequest, AppError> {
        let req = self.to_request();
        check(&req)?;
        Ok(req)
    }

    /// Store the URL returned by a resume upload.
    pub fn attach_resume(&mut self, url: impl Into<String>) {
        self.resume_url = url.into();
    }

    pub async fn submit(&mut self, backend: &dyn Backend) -> Notice {
        let result = match self.validate() {
            Ok(req) => backend.submit_application(&req).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                *self = Self::new(self.kind);
                Notice::success(
                    "Application Submitted!",
                    "Thank you for applying. We'll review your application and get back to you soon.",
                )
            }
            Err(e) => Notice::failure("Submission Failed", &e),
        }
    }
}

// -- Contact --

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    pub fn to_request(&self) -> CreateContactRequest {
        CreateContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: non_blank(Some(self.subject.clone())),
            message: self.message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<CreateContactRequest, AppError> {
        let req = self.to_request();
        check(&req)?;
        Ok(req)
    }

    pub async fn submit(&mut self, backend: &dyn Backend) -> Notice {
        let result = match self.validate() {
            Ok(req) => backend.submit_contact(&req).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                *self = Self::default();
                Notice::success(
                    "Message Sent!",
                    "Thank you for reaching out. We'll respond within 24 hours.",
                )
            }
            Err(e) => Notice::failure("Error", &e),
        }
    }
}

// -- Newsletter --

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsletterDraft {
    pub email: String,
}

impl NewsletterDraft {
    pub fn validate(&self) -> Result<SubscribeRequest, AppError> {
        let req = SubscribeRequest {
            email: self.email.trim().to_string(),
        };
        check(&req)?;
        Ok(req)
    }

    pub async fn submit(&mut self, backend: &dyn Backend) -> Notice {
        let result = match self.validate() {
            Ok(req) => backend.subscribe(&req).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                *self = Self::default();
                Notice::success("Subscribed!", "You'll hear about our next events first.")
            }
            Err(e) => Notice::failure("Subscription Failed", &e),
        }
    }
}

// -- Resume upload --

/// Pick a resume file. The type is derived from the extension and checked
/// together with the size before anything is sent.
pub fn pick_resume(file_name: &str, bytes: Vec<u8>) -> Result<FileUpload, Notice> {
    let policy = UploadPolicy::RESUME;
    let content_type = content_type_for_path(file_name)
        .filter(|ct| policy.allowed.contains(ct))
        .ok_or_else(|| Notice::error("Invalid file type", "Please upload a PDF or Word document."))?;
    if policy.check(content_type, bytes.len()).is_err() {
        return Err(Notice::error(
            "File too large",
            "Please upload a file smaller than 5MB.",
        ));
    }
    Ok(FileUpload {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        bytes,
    })
}

/// Validate and upload a resume, attaching its URL to `draft` on success.
pub async fn upload_resume(
    backend: &dyn Backend,
    draft: &mut ApplicationDraft,
    file_name: &str,
    bytes: Vec<u8>,
) -> Notice {
    let file = match pick_resume(file_name, bytes) {
        Ok(file) => file,
        Err(notice) => return notice,
    };
    match backend.upload_resume(file).await {
        Ok(uploaded) => {
            draft.attach_resume(uploaded.url);
            Notice::success("Resume uploaded", "Your resume has been uploaded successfully.")
        }
        Err(e) => {
            tracing::warn!(error = %e, "resume upload failed");
            Notice::failure("Upload failed", &e)
        }
    }
}
