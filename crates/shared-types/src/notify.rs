use serde::{Deserialize, Serialize};

use crate::{Application, ApplicationKind};

/// Body of the notify-application endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNotification {
    #[serde(rename = "type")]
    pub kind: ApplicationKind,
    pub applicant_name: String,
    pub applicant_email: String,
    pub position: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub phone: String,
}

impl From<&Application> for ApplicationNotification {
    fn from(app: &Application) -> Self {
        Self {
            kind: app.kind,
            applicant_name: app.name.clone(),
            applicant_email: app.email.clone(),
            position: app.position.clone(),
            college: app.college.clone(),
            phone: app.phone.clone(),
        }
    }
}

/// Result of one email send, as reported by the mail provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailReceipt {
    /// Provider message id, absent when delivery is disabled.
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    pub success: bool,
    pub admin_email: EmailReceipt,
    pub applicant_email: EmailReceipt,
}

/// Failure body of the notify-application endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotifyError {
    pub error: String,
}
