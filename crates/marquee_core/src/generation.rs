//! Generation requests and their cache keys.

use crate::{
    BusinessContext, ContentKind, DiscountType, EventDetails, ImageAnalysisResult,
    PromotionDetails,
};
use serde::{Deserialize, Serialize};

/// A request for one content kind with its strongly typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum GenerationRequest {
    /// Four promotion headlines
    Headlines(PromotionDetails),
    /// Four styled promotion descriptions
    Descriptions(PromotionDetails),
    /// Ten promotion keywords
    Keywords(PromotionDetails),
    /// Eight terms and conditions
    Terms(PromotionDetails),
    /// Four event titles
    EventTitles(EventDetails),
    /// Four styled event descriptions
    EventDescriptions(EventDetails),
    /// Ten event keywords
    EventKeywords(EventDetails),
    /// Eight attendee guidelines
    EventGuidelines(EventDetails),
}

impl GenerationRequest {
    /// The content kind this request asks for.
    pub fn kind(&self) -> ContentKind {
        match self {
            GenerationRequest::Headlines(_) => ContentKind::Headlines,
            GenerationRequest::Descriptions(_) => ContentKind::Descriptions,
            GenerationRequest::Keywords(_) => ContentKind::Keywords,
            GenerationRequest::Terms(_) => ContentKind::Terms,
            GenerationRequest::EventTitles(_) => ContentKind::EventTitles,
            GenerationRequest::EventDescriptions(_) => ContentKind::EventDescriptions,
            GenerationRequest::EventKeywords(_) => ContentKind::EventKeywords,
            GenerationRequest::EventGuidelines(_) => ContentKind::EventGuidelines,
        }
    }

    /// Promotion parameters, for promotion kinds.
    pub fn promotion(&self) -> Option<&PromotionDetails> {
        match self {
            GenerationRequest::Headlines(p)
            | GenerationRequest::Descriptions(p)
            | GenerationRequest::Keywords(p)
            | GenerationRequest::Terms(p) => Some(p),
            _ => None,
        }
    }

    /// Event parameters, for event kinds.
    pub fn event(&self) -> Option<&EventDetails> {
        match self {
            GenerationRequest::EventTitles(e)
            | GenerationRequest::EventDescriptions(e)
            | GenerationRequest::EventKeywords(e)
            | GenerationRequest::EventGuidelines(e) => Some(e),
            _ => None,
        }
    }

    /// Business context of either domain.
    pub fn business(&self) -> &BusinessContext {
        match self {
            GenerationRequest::Headlines(p)
            | GenerationRequest::Descriptions(p)
            | GenerationRequest::Keywords(p)
            | GenerationRequest::Terms(p) => p.business(),
            GenerationRequest::EventTitles(e)
            | GenerationRequest::EventDescriptions(e)
            | GenerationRequest::EventKeywords(e)
            | GenerationRequest::EventGuidelines(e) => e.business(),
        }
    }

    /// Prior image analysis of either domain.
    pub fn image_analysis(&self) -> Option<&ImageAnalysisResult> {
        match self {
            GenerationRequest::Headlines(p)
            | GenerationRequest::Descriptions(p)
            | GenerationRequest::Keywords(p)
            | GenerationRequest::Terms(p) => p.image_analysis().as_ref(),
            GenerationRequest::EventTitles(e)
            | GenerationRequest::EventDescriptions(e)
            | GenerationRequest::EventKeywords(e)
            | GenerationRequest::EventGuidelines(e) => e.image_analysis().as_ref(),
        }
    }

    /// Stable key for caching and coalescing.
    ///
    /// Built from the kind and a fixed-order, normalized subset of the
    /// parameters. Image analysis and long free-text business fields are left
    /// out so requests that differ only in those share a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_core::{BusinessContext, GenerationRequest, PromotionDetails};
    ///
    /// let a = PromotionDetails::builder()
    ///     .discount_value(20.0)
    ///     .business(BusinessContext::with_category("Restaurant "))
    ///     .build()
    ///     .unwrap();
    /// let b = PromotionDetails::builder()
    ///     .discount_value(20.0)
    ///     .business(BusinessContext::with_category("restaurant"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(
    ///     GenerationRequest::Headlines(a.clone()).cache_key(),
    ///     GenerationRequest::Headlines(b).cache_key()
    /// );
    /// assert_ne!(
    ///     GenerationRequest::Headlines(a.clone()).cache_key(),
    ///     GenerationRequest::Keywords(a).cache_key()
    /// );
    /// ```
    pub fn cache_key(&self) -> String {
        let params = match (self.promotion(), self.event()) {
            (Some(promotion), _) => serde_json::to_string(&PromotionKey::from(promotion)),
            (_, Some(event)) => serde_json::to_string(&EventKey::from(event)),
            (None, None) => Ok(String::new()),
        };
        format!("{}:{}", self.kind(), params.unwrap_or_default())
    }
}

#[derive(Serialize)]
struct PromotionKey {
    discount_type: DiscountType,
    discount_value: Option<f64>,
    applicable_item: Option<String>,
    custom_offer: Option<String>,
    business_name: Option<String>,
    business_category: Option<String>,
}

impl From<&PromotionDetails> for PromotionKey {
    fn from(promotion: &PromotionDetails) -> Self {
        Self {
            discount_type: *promotion.discount_type(),
            discount_value: *promotion.discount_value(),
            applicable_item: normalize(promotion.applicable_item()),
            custom_offer: normalize(promotion.custom_offer()),
            business_name: normalize(promotion.business().name()),
            business_category: normalize(promotion.business().category()),
        }
    }
}

#[derive(Serialize)]
struct EventKey {
    event_name: Option<String>,
    event_type: Option<String>,
    is_free: bool,
    ticket_price: Option<f64>,
    date_label: Option<String>,
    business_name: Option<String>,
    business_category: Option<String>,
}

impl From<&EventDetails> for EventKey {
    fn from(event: &EventDetails) -> Self {
        Self {
            event_name: normalize(event.event_name()),
            event_type: normalize(event.event_type()),
            is_free: *event.is_free(),
            ticket_price: *event.ticket_price(),
            date_label: normalize(event.date_label()),
            business_name: normalize(event.business().name()),
            business_category: normalize(event.business().category()),
        }
    }
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
