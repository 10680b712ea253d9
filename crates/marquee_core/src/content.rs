//! Content kinds and generated content.

use serde::{Deserialize, Serialize};

/// Description styles for promotions, in output order.
pub const PROMOTION_DESCRIPTION_STYLES: [&str; 4] = [
    "Simple & Direct",
    "Urgency & Scarcity",
    "Value-Focused",
    "Customer Appreciation",
];

/// Description styles for events, in output order.
pub const EVENT_DESCRIPTION_STYLES: [&str; 4] = [
    "Informative",
    "Exciting & Energetic",
    "Community-Focused",
    "Exclusive Experience",
];

/// The fixed content categories the pipeline produces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentKind {
    /// Promotion headlines
    Headlines,
    /// Promotion descriptions in four styles
    Descriptions,
    /// Promotion search keywords
    Keywords,
    /// Promotion terms and conditions
    Terms,
    /// Event titles
    EventTitles,
    /// Event descriptions in four styles
    EventDescriptions,
    /// Event search keywords
    EventKeywords,
    /// Event attendee guidelines
    EventGuidelines,
}

impl ContentKind {
    /// Exact number of items every result of this kind carries.
    pub fn expected_count(&self) -> usize {
        match self {
            ContentKind::Headlines | ContentKind::EventTitles => 4,
            ContentKind::Descriptions | ContentKind::EventDescriptions => 4,
            ContentKind::Keywords | ContentKind::EventKeywords => 10,
            ContentKind::Terms | ContentKind::EventGuidelines => 8,
        }
    }

    /// Field name requested in prompts and looked up when parsing JSON.
    pub fn json_field(&self) -> &'static str {
        match self {
            ContentKind::Headlines => "headlines",
            ContentKind::EventTitles => "titles",
            ContentKind::Descriptions | ContentKind::EventDescriptions => "descriptions",
            ContentKind::Keywords | ContentKind::EventKeywords => "keywords",
            ContentKind::Terms => "terms",
            ContentKind::EventGuidelines => "guidelines",
        }
    }

    /// Whether this kind belongs to the event domain.
    pub fn is_event(&self) -> bool {
        matches!(
            self,
            ContentKind::EventTitles
                | ContentKind::EventDescriptions
                | ContentKind::EventKeywords
                | ContentKind::EventGuidelines
        )
    }

    /// Whether results of this kind are titled descriptions.
    pub fn is_descriptions(&self) -> bool {
        matches!(self, ContentKind::Descriptions | ContentKind::EventDescriptions)
    }

    /// Required description styles, empty for list kinds.
    pub fn description_styles(&self) -> &'static [&'static str] {
        match self {
            ContentKind::Descriptions => &PROMOTION_DESCRIPTION_STYLES,
            ContentKind::EventDescriptions => &EVENT_DESCRIPTION_STYLES,
            _ => &[],
        }
    }
}

/// A description paired with the style it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Description {
    /// Style label, one of the kind's description styles
    pub title: String,
    /// Body text
    pub text: String,
}

impl Description {
    /// Creates a description.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Ordered generated items for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    /// Plain strings (headlines, titles, keywords, terms, guidelines)
    Lines(Vec<String>),
    /// Titled descriptions
    Descriptions(Vec<Description>),
}

impl GenerationResult {
    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            GenerationResult::Lines(lines) => lines.len(),
            GenerationResult::Descriptions(descriptions) => descriptions.len(),
        }
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain strings; descriptions yield their body text.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            GenerationResult::Lines(lines) => lines,
            GenerationResult::Descriptions(descriptions) => {
                descriptions.into_iter().map(|d| d.text).collect()
            }
        }
    }

    /// Titled descriptions; plain strings become untitled descriptions.
    pub fn into_descriptions(self) -> Vec<Description> {
        match self {
            GenerationResult::Descriptions(descriptions) => descriptions,
            GenerationResult::Lines(lines) => lines
                .into_iter()
                .map(|text| Description::new(String::new(), text))
                .collect(),
        }
    }
}
