use serde::{Deserialize, Serialize};

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Where the items of a public listing came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ListingSource {
    Live,
    /// Nothing was published yet; static sample content is shown instead.
    Fallback,
}

/// Items for a public page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub source: ListingSource,
}

impl<T> Listing<T> {
    /// Use `rows` when the query returned anything, otherwise the samples.
    pub fn or_fallback(rows: Vec<T>, fallback: impl FnOnce() -> Vec<T>) -> Self {
        if rows.is_empty() {
            Self {
                items: fallback(),
                source: ListingSource::Fallback,
            }
        } else {
            Self {
                items: rows,
                source: ListingSource::Live,
            }
        }
    }

    pub fn live(items: Vec<T>) -> Self {
        Self {
            items,
            source: ListingSource::Live,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            source: self.source,
        }
    }

    /// Keep items whose category matches `selected`, compared
    /// case-insensitively. `None` or "all" keeps everything.
    pub fn filter_category<F>(mut self, selected: Option<&str>, category_of: F) -> Self
    where
        F: Fn(&T) -> &str,
    {
        if let Some(wanted) = selected.map(str::trim).filter(|c| !is_all(c)) {
            self.items
                .retain(|item| category_of(item).eq_ignore_ascii_case(wanted));
        }
        self
    }
}

fn is_all(category: &str) -> bool {
    category.is_empty() || category.eq_ignore_ascii_case("all")
}

/// Query string for public listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Body of the single-flag admin toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublishRequest {
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureRequest {
    pub is_featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApproveRequest {
    pub is_approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MarkReadRequest {
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Treat blank optional form inputs as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
