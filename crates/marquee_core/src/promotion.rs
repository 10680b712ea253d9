//! Promotion parameters.

use crate::{BusinessContext, ImageAnalysisResult};
use serde::{Deserialize, Serialize};

/// Shape of the discount a promotion offers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DiscountType {
    /// Percentage off, e.g. 20%
    #[default]
    Percentage,
    /// Fixed amount off, e.g. $10
    FixedAmount,
    /// Buy one, get one
    Bogo,
    /// A free item with purchase
    FreeItem,
    /// Free-form offer described by `custom_offer`
    Custom,
}

/// Parameters for promotion copy.
///
/// # Examples
///
/// ```
/// use marquee_core::{BusinessContext, DiscountType, PromotionDetails};
///
/// let promo = PromotionDetails::builder()
///     .discount_type(DiscountType::Percentage)
///     .discount_value(20.0)
///     .business(BusinessContext::with_category("restaurant"))
///     .build()
///     .unwrap();
/// assert_eq!(promo.offer_phrase(), "20% Off");
/// ```
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
pub struct PromotionDetails {
    /// Discount shape
    discount_type: DiscountType,
    /// Percentage or currency amount, depending on `discount_type`
    #[builder(setter(into, strip_option))]
    discount_value: Option<f64>,
    /// What the discount applies to, e.g. "all pastries"
    #[builder(setter(into, strip_option))]
    applicable_item: Option<String>,
    /// Offer text for `DiscountType::Custom`
    #[builder(setter(into, strip_option))]
    custom_offer: Option<String>,
    /// Business publishing the promotion
    business: BusinessContext,
    /// Prior analysis of the promotion image
    #[builder(setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    image_analysis: Option<ImageAnalysisResult>,
}

impl PromotionDetails {
    /// Returns a builder for constructing PromotionDetails.
    pub fn builder() -> PromotionDetailsBuilder {
        PromotionDetailsBuilder::default()
    }

    /// Short offer phrase used in headlines, e.g. "20% Off" or "$5 Off".
    pub fn offer_phrase(&self) -> String {
        match (self.discount_type, self.discount_value) {
            (DiscountType::Percentage, Some(value)) => format!("{}% Off", format_number(value)),
            (DiscountType::Percentage, None) => "Special Discount".to_string(),
            (DiscountType::FixedAmount, Some(value)) => format!("{} Off", format_money(value)),
            (DiscountType::FixedAmount, None) => "Instant Savings".to_string(),
            (DiscountType::Bogo, _) => "Buy One, Get One Free".to_string(),
            (DiscountType::FreeItem, _) => match self.item() {
                Some(item) => format!("Free {}", item),
                None => "Free Gift".to_string(),
            },
            (DiscountType::Custom, _) => self
                .custom_offer
                .as_deref()
                .map(str::trim)
                .filter(|offer| !offer.is_empty())
                .unwrap_or("Special Offer")
                .to_string(),
        }
    }

    /// Trimmed applicable item, if one was given.
    pub fn item(&self) -> Option<&str> {
        self.applicable_item
            .as_deref()
            .map(str::trim)
            .filter(|item| !item.is_empty())
    }

    /// Applicable item, or a neutral stand-in for templates.
    pub fn item_or_default(&self) -> &str {
        self.item().unwrap_or("your favorites")
    }
}

/// Renders a number without a trailing `.0`, e.g. `20` or `12.5`.
pub fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        let rendered = format!("{:.2}", value);
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Renders a currency amount, e.g. `$10` or `$12.50`.
pub fn format_money(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("${:.0}", value)
    } else {
        format!("${:.2}", value)
    }
}
