//! Business context shared by promotion and event requests.

use serde::{Deserialize, Serialize};

/// What the caller knows about the business publishing the copy.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(default, rename_all = "camelCase")]
#[builder(default)]
pub struct BusinessContext {
    /// Business display name
    #[builder(setter(into, strip_option))]
    name: Option<String>,
    /// Free-form category, e.g. "Italian restaurant" or "hair salon"
    #[builder(setter(into, strip_option))]
    category: Option<String>,
    /// Short description written by the owner
    #[builder(setter(into, strip_option))]
    description: Option<String>,
    /// Neighborhood or city
    #[builder(setter(into, strip_option))]
    location: Option<String>,
}

impl BusinessContext {
    /// Returns a builder for constructing a BusinessContext.
    pub fn builder() -> BusinessContextBuilder {
        BusinessContextBuilder::default()
    }

    /// Context carrying only a category.
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Lower-cased category, empty when unknown.
    pub fn category_lowercase(&self) -> String {
        self.category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Business name, or a neutral stand-in for templates.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("our shop")
    }

    /// Whether any field carries information worth putting in a prompt.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.location.is_none()
    }
}
