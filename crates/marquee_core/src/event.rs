//! Event parameters.

use crate::{BusinessContext, ImageAnalysisResult, format_money};
use serde::{Deserialize, Serialize};

/// Parameters for event copy.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(default, rename_all = "camelCase")]
#[builder(default)]
pub struct EventDetails {
    /// Working title the owner already has, if any
    #[builder(setter(into, strip_option))]
    event_name: Option<String>,
    /// Free-form type, e.g. "live music" or "pottery workshop"
    #[builder(setter(into, strip_option))]
    event_type: Option<String>,
    /// Whether entry is free
    is_free: bool,
    /// Ticket price when not free
    #[builder(setter(into, strip_option))]
    ticket_price: Option<f64>,
    /// Human-readable date, e.g. "Friday, June 6"
    #[builder(setter(into, strip_option))]
    date_label: Option<String>,
    /// Business hosting the event
    business: BusinessContext,
    /// Prior analysis of the event image
    #[builder(setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    image_analysis: Option<ImageAnalysisResult>,
}

impl EventDetails {
    /// Returns a builder for constructing EventDetails.
    pub fn builder() -> EventDetailsBuilder {
        EventDetailsBuilder::default()
    }

    /// Event name, else a title-cased event type, else "Special Event".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.event_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.event_type_lowercase() {
            t if t.is_empty() => "Special Event".to_string(),
            t => title_case(&t),
        }
    }

    /// Lower-cased event type, empty when unknown.
    pub fn event_type_lowercase(&self) -> String {
        self.event_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Admission phrase, e.g. "Free Entry" or "Tickets $15".
    pub fn admission_phrase(&self) -> String {
        if self.is_free {
            return "Free Entry".to_string();
        }
        match self.ticket_price {
            Some(price) if price > 0.0 => format!("Tickets {}", format_money(price)),
            Some(_) => "Free Entry".to_string(),
            None => "Tickets Available".to_string(),
        }
    }

    /// Trimmed date label, if given.
    pub fn date(&self) -> Option<&str> {
        self.date_label
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Upper-cases the first letter of each whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
