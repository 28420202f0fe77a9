use serde::{Deserialize, Serialize};

/// Counters on the admin overview tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub total_events: i64,
    pub internship_applications: i64,
    pub career_applications: i64,
    pub unread_contacts: i64,
    pub active_subscribers: i64,
    pub pending_registrations: i64,
}

/// Tabs of the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    #[default]
    Overview,
    Events,
    Registrations,
    Interns,
    Careers,
    Contacts,
    Newsletter,
    Blog,
    Products,
    Testimonials,
    Team,
}

impl AdminTab {
    pub const ALL: [AdminTab; 11] = [
        AdminTab::Overview,
        AdminTab::Events,
        AdminTab::Registrations,
        AdminTab::Interns,
        AdminTab::Careers,
        AdminTab::Contacts,
        AdminTab::Newsletter,
        AdminTab::Blog,
        AdminTab::Products,
        AdminTab::Testimonials,
        AdminTab::Team,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Events => "Events",
            Self::Registrations => "Registrations",
            Self::Interns => "Interns",
            Self::Careers => "Careers",
            Self::Contacts => "Contacts",
            Self::Newsletter => "Newsletter",
            Self::Blog => "Blog",
            Self::Products => "Products",
            Self::Testimonials => "Testimonials",
            Self::Team => "Team",
        }
    }
}

/// Datasets downloadable as CSV from the admin API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ExportDataset {
    Registrations,
    Interns,
    Careers,
    Newsletter,
}

impl ExportDataset {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "registrations" => Some(Self::Registrations),
            "interns" => Some(Self::Interns),
            "careers" => Some(Self::Careers),
            "newsletter" => Some(Self::Newsletter),
            _ => None,
        }
    }

    /// File name (without extension) of the download.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Registrations => "event-registrations",
            Self::Interns => "intern-applications",
            Self::Careers => "career-applications",
            Self::Newsletter => "newsletter-subscribers",
        }
    }
}
