use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Most testimonials shown in the home page section.
pub const PUBLIC_TESTIMONIAL_LIMIT: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i32,
    pub event_name: Option<String>,
    pub image_url: Option<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    /// Shown publicly only when moderated in and picked for the home page.
    pub fn is_public(&self) -> bool {
        self.is_approved && self.is_featured
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpsertTestimonialRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Content is required"))
    )]
    pub content: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))
    )]
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_rating() -> i32 {
    5
}

impl From<&Testimonial> for UpsertTestimonialRequest {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            role: t.role.clone(),
            company: t.company.clone(),
            content: t.content.clone(),
            rating: t.rating,
            event_name: t.event_name.clone(),
            image_url: t.image_url.clone(),
            is_approved: t.is_approved,
            is_featured: t.is_featured,
        }
    }
}
