use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    #[default]
    Ai,
    Cloud,
    Iot,
    Web,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Cloud => "cloud",
            Self::Iot => "iot",
            Self::Web => "web",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(Self::Ai),
            "cloud" => Some(Self::Cloud),
            "iot" => Some(Self::Iot),
            "web" => Some(Self::Web),
            _ => None,
        }
    }
}

/// A showcased project or product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: ProductCategory,
    pub technologies: Vec<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpsertProductRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Product name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Description is required"))
    )]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[cfg_attr(
        feature = "validation",
        validate(url(message = "Demo URL must be a valid URL"))
    )]
    #[serde(default)]
    pub demo_url: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(url(message = "GitHub URL must be a valid URL"))
    )]
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl UpsertProductRequest {
    /// Technologies with surrounding whitespace and blank entries removed.
    pub fn clean_technologies(&self) -> Vec<String> {
        self.technologies
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&Product> for UpsertProductRequest {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            short_description: product.short_description.clone(),
            category: product.category,
            technologies: product.technologies.clone(),
            demo_url: product.demo_url.clone(),
            github_url: product.github_url.clone(),
            image_url: product.image_url.clone(),
            is_published: product.is_published,
            is_featured: product.is_featured,
        }
    }
}

/// Split the comma-separated technologies field of the admin form.
pub fn parse_technologies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
