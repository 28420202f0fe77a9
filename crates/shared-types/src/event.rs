use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Kind of event shown on the events page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Workshop,
    Hackathon,
    Bootcamp,
    Masterclass,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Workshop,
        EventType::Hackathon,
        EventType::Bootcamp,
        EventType::Masterclass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workshop => "workshop",
            Self::Hackathon => "hackathon",
            Self::Bootcamp => "bootcamp",
            Self::Masterclass => "masterclass",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "workshop" => Some(Self::Workshop),
            "hackathon" => Some(Self::Hackathon),
            "bootcamp" => Some(Self::Bootcamp),
            "masterclass" => Some(Self::Masterclass),
            _ => None,
        }
    }
}

/// Review state of an event registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Rejected registrations do not hold a seat.
    pub fn holds_seat(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// A workshop, hackathon, bootcamp or masterclass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub image_url: Option<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Registration stays open until the deadline passes. Events without a
    /// deadline are always open.
    pub fn registration_open(&self, now: DateTime<Utc>) -> bool {
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

/// Event as rendered on the public events page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublicEvent {
    #[serde(flatten)]
    pub event: Event,
    /// Whether the register button is enabled.
    pub registration_open: bool,
}

impl PublicEvent {
    pub fn at(event: Event, now: DateTime<Utc>) -> Self {
        let registration_open = event.registration_open(now);
        Self {
            event,
            registration_open,
        }
    }
}

/// Create or replace an event from the admin form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpsertEventRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Capacity must be at least 1"))
    )]
    #[serde(default)]
    pub max_participants: Option<i32>,
    #[cfg_attr(
        feature = "validation",
        validate(url(message = "Image URL must be a valid URL"))
    )]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
}

impl From<&Event> for UpsertEventRequest {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            event_type: event.event_type,
            event_date: event.event_date,
            location: event.location.clone(),
            max_participants: event.max_participants,
            image_url: event.image_url.clone(),
            registration_deadline: event.registration_deadline,
            is_published: event.is_published,
        }
    }
}

/// A person's registration for one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

/// Registration row joined with the title of its event for the admin list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationWithEvent {
    #[serde(flatten)]
    pub registration: EventRegistration,
    pub event_title: Option<String>,
}

/// Public registration form payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateRegistrationRequest {
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
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateRegistrationStatusRequest {
    pub status: RegistrationStatus,
}
