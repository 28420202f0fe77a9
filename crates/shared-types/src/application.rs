use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Which form an application came through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    Internship,
    Career,
}

impl ApplicationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internship => "internship",
            Self::Career => "career",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "internship" => Some(Self::Internship),
            "career" => Some(Self::Career),
            _ => None,
        }
    }

    /// Capitalized label used in email subjects.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Internship => "Internship",
            Self::Career => "Career",
        }
    }
}

/// Review state of an internship or career application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Application {
    pub id: Uuid,
    pub kind: ApplicationKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub year_of_study: String,
    pub position: String,
    pub portfolio_url: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of the internship and careers forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SubmitApplicationRequest {
    pub kind: ApplicationKind,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Phone number is required"))
    )]
    pub phone: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "College is required"))
    )]
    pub college: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Year of study is required"))
    )]
    pub year_of_study: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Position is required"))
    )]
    pub position: String,
    #[cfg_attr(
        feature = "validation",
        validate(url(message = "Portfolio must be a valid URL"))
    )]
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(url(message = "Resume link must be a valid URL"))
    )]
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// `?kind=` filter for the admin application lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ApplicationQuery {
    pub kind: Option<ApplicationKind>,
}

/// An opening advertised on the interns or careers page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenPosition {
    pub id: String,
    pub title: String,
    pub kind: ApplicationKind,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
}
