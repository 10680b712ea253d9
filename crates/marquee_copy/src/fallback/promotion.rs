//! Template copy for promotions.

use super::tables::{self, CategoryProfile};
use marquee_core::{Description, DiscountType, PROMOTION_DESCRIPTION_STYLES, PromotionDetails};

struct PromotionContext<'a> {
    promotion: &'a PromotionDetails,
    profile: &'static CategoryProfile,
    offer: String,
    place: String,
}

impl<'a> PromotionContext<'a> {
    fn new(promotion: &'a PromotionDetails) -> Self {
        let profile = tables::category_profile(&promotion.business().category_lowercase());
        let place = promotion
            .business()
            .name()
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(profile.place)
            .to_string();
        Self {
            promotion,
            profile,
            offer: promotion.offer_phrase(),
            place,
        }
    }

    fn render(&self, template: &str) -> String {
        // "Free Cupcake on cupcakes" reads badly; free-item offers name the item already.
        let template = if *self.promotion.discount_type() == DiscountType::FreeItem {
            template.replace("on {item}", "with Any Purchase")
        } else {
            template.to_string()
        };
        template
            .replace("{offer}", &self.offer)
            .replace("{item}", self.promotion.item_or_default())
            .replace("{place}", &self.place)
    }
}

/// Headline candidates, at least six, each mentioning the offer.
pub fn headlines(promotion: &PromotionDetails) -> Vec<String> {
    let context = PromotionContext::new(promotion);
    context
        .profile
        .headlines
        .iter()
        .map(|template| context.render(template))
        .collect()
}

/// One description per promotion style, in style order.
pub fn descriptions(promotion: &PromotionDetails) -> Vec<Description> {
    let context = PromotionContext::new(promotion);
    let texts = [
        "Enjoy {offer} on {item} at {place}. Stop by and take advantage of this offer while it lasts.",
        "Hurry, this deal won't last! {offer} on {item} is available for a limited time only at {place}. Don't miss your chance to save.",
        "Make every dollar count with {offer} on {item}. It's the perfect time to get more of what you love from {place} for less.",
        "Thank you for supporting {place}! To show our appreciation, we're offering {offer} on {item}. We can't wait to see you.",
    ];
    PROMOTION_DESCRIPTION_STYLES
        .iter()
        .zip(texts)
        .map(|(style, text)| Description::new(*style, context.render(text)))
        .collect()
}

/// Keyword candidates, at least ten distinct after normalization.
pub fn keywords(promotion: &PromotionDetails) -> Vec<String> {
    let context = PromotionContext::new(promotion);
    let mut keywords = vec![context.offer.to_lowercase()];
    if let Some(item) = promotion.item() {
        keywords.push(item.to_lowercase());
        keywords.push(format!("{} deals", item.to_lowercase()));
    }
    let category = promotion.business().category_lowercase();
    if !category.is_empty() {
        keywords.push(category.clone());
        keywords.push(format!("{} near me", category));
    }
    if let Some(name) = promotion.business().name().as_deref().map(str::trim)
        && !name.is_empty()
    {
        keywords.push(name.to_lowercase());
    }
    keywords.extend(context.profile.keywords.iter().map(|k| k.to_string()));
    keywords.extend(tables::PROMOTION_KEYWORDS.iter().map(|k| k.to_string()));
    keywords
}

/// Terms candidates: discount-specific terms first, then general ones.
pub fn terms(promotion: &PromotionDetails) -> Vec<String> {
    let item = promotion.item_or_default();
    let specific = match promotion.discount_type() {
        DiscountType::Percentage => {
            format!("Discount applies to regular-priced {} only.", item)
        }
        DiscountType::FixedAmount => format!(
            "{} discount applies to a single purchase and cannot exceed the purchase total.",
            promotion.offer_phrase().trim_end_matches(" Off")
        ),
        DiscountType::Bogo => {
            "Free item must be of equal or lesser value than the purchased item.".to_string()
        }
        DiscountType::FreeItem => format!(
            "One free {} per customer while supplies last.",
            promotion.item().unwrap_or("gift")
        ),
        DiscountType::Custom => "See staff for full offer details.".to_string(),
    };

    std::iter::once(specific)
        .chain(tables::GENERAL_TERMS.iter().map(|t| t.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::BusinessContext;

    fn percent_off(category: &str) -> PromotionDetails {
        PromotionDetails::builder()
            .discount_type(DiscountType::Percentage)
            .discount_value(20.0)
            .business(BusinessContext::with_category(category))
            .build()
            .unwrap()
    }

    #[test]
    fn test_restaurant_headlines_mention_discount() {
        let headlines = headlines(&percent_off("restaurant"));
        assert!(headlines.len() >= 4);
        assert!(headlines.iter().all(|h| h.contains("20%")));
        assert!(headlines[0].contains("our restaurant"));
    }

    #[test]
    fn test_business_name_replaces_place() {
        let promotion = PromotionDetails::builder()
            .discount_type(DiscountType::FixedAmount)
            .discount_value(10.0)
            .business(BusinessContext::builder().name("Bloom").category("florist").build().unwrap())
            .build()
            .unwrap();
        let headlines = headlines(&promotion);
        assert_eq!(headlines[0], "$10 Off at Bloom");
    }

    #[test]
    fn test_free_item_headlines_read_naturally() {
        let promotion = PromotionDetails::builder()
            .discount_type(DiscountType::FreeItem)
            .applicable_item("Cupcake")
            .build()
            .unwrap();
        let headlines = headlines(&promotion);
        assert!(headlines.iter().any(|h| h == "Free Cupcake with Any Purchase"));
    }

    #[test]
    fn test_descriptions_cover_styles_in_order() {
        let descriptions = descriptions(&percent_off("salon"));
        let titles: Vec<&str> = descriptions.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, PROMOTION_DESCRIPTION_STYLES.to_vec());
        assert!(descriptions.iter().all(|d| d.text.contains("20% Off")));
    }

    #[test]
    fn test_terms_lead_with_discount_rule() {
        let promotion = PromotionDetails::builder()
            .discount_type(DiscountType::Bogo)
            .build()
            .unwrap();
        let terms = terms(&promotion);
        assert!(terms.len() >= 8);
        assert!(terms[0].contains("equal or lesser value"));
    }
}
