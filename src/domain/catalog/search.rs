//! Public service search filter.
//!
//! Plain substring matching; there is no relevance ranking.

use super::{Service, ServiceCategory};

/// Criteria for browsing the public catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSearch {
    /// Case-insensitive text matched against title and description.
    pub text: Option<String>,
    /// Restrict to one category.
    pub category: Option<ServiceCategory>,
    /// Case-insensitive text matched against the provider's display name.
    pub provider_name: Option<String>,
}

impl ServiceSearch {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Returns true if `service` is publicly listed and satisfies every criterion.
    pub fn matches(&self, service: &Service, provider_name: Option<&str>) -> bool {
        if !service.status().is_listed() {
            return false;
        }

        let text_ok = match non_blank(&self.text) {
            None => true,
            Some(needle) => {
                contains_ci(service.title(), &needle) || contains_ci(service.description(), &needle)
            }
        };

        let category_ok = self.category.map_or(true, |c| c == service.category());

        let provider_ok = match non_blank(&self.provider_name) {
            None => true,
            Some(needle) => provider_name.map_or(false, |name| contains_ci(name, &needle)),
        };

        text_ok && category_ok && provider_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
