use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Categories offered by the admin blog form. Stored as free text so older
/// posts with other categories keep rendering.
pub const BLOG_CATEGORIES: [&str; 4] = ["news", "tech", "events", "tutorials"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Publication timestamp after a save. A post keeps its original
    /// timestamp while it stays published and loses it when unpublished.
    pub fn next_published_at(
        previous: Option<DateTime<Utc>>,
        is_published: bool,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        if is_published {
            Some(previous.unwrap_or(now))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpsertBlogPostRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    /// Left empty, a slug is derived from the title.
    #[serde(default)]
    pub slug: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Content is required"))
    )]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

fn default_category() -> String {
    BLOG_CATEGORIES[0].to_string()
}

impl UpsertBlogPostRequest {
    /// The slug to store: the given one, or one derived from the title.
    pub fn effective_slug(&self) -> String {
        let given = self.slug.trim();
        if given.is_empty() {
            slugify(&self.title)
        } else {
            given.to_string()
        }
    }
}

impl From<&BlogPost> for UpsertBlogPostRequest {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            cover_image: post.cover_image.clone(),
            is_published: post.is_published,
        }
    }
}

/// Lowercase, turn whitespace runs into `-`, drop anything outside `[a-z0-9-]`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }
    slug
}
