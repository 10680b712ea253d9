//! Deterministic fallback copy.
//!
//! Used when no provider is configured, when a provider call fails, and to
//! pad short provider results. Every function is pure and total.

mod event;
mod promotion;
mod tables;

use crate::normalize::fit_to_count;
use marquee_core::{Description, GenerationRequest, GenerationResult};

/// Raw fallback items for a list request, possibly more than needed.
pub fn fallback_lines(request: &GenerationRequest) -> Vec<String> {
    match request {
        GenerationRequest::Headlines(p) => promotion::headlines(p),
        GenerationRequest::Keywords(p) => promotion::keywords(p),
        GenerationRequest::Terms(p) => promotion::terms(p),
        GenerationRequest::EventTitles(e) => event::titles(e),
        GenerationRequest::EventKeywords(e) => event::keywords(e),
        GenerationRequest::EventGuidelines(e) => event::guidelines(e),
        GenerationRequest::Descriptions(p) => {
            promotion::descriptions(p).into_iter().map(|d| d.text).collect()
        }
        GenerationRequest::EventDescriptions(e) => {
            event::descriptions(e).into_iter().map(|d| d.text).collect()
        }
    }
}

/// Fallback descriptions in style order; empty for list requests.
pub fn fallback_descriptions(request: &GenerationRequest) -> Vec<Description> {
    match request {
        GenerationRequest::Descriptions(p) => promotion::descriptions(p),
        GenerationRequest::EventDescriptions(e) => event::descriptions(e),
        _ => Vec::new(),
    }
}

/// Complete fallback result with exactly the expected number of items.
///
/// # Examples
///
/// ```
/// use marquee_copy::fallback;
/// use marquee_core::{BusinessContext, DiscountType, GenerationRequest, PromotionDetails};
///
/// let promo = PromotionDetails::builder()
///     .discount_type(DiscountType::Percentage)
///     .discount_value(20.0)
///     .business(BusinessContext::with_category("restaurant"))
///     .build()
///     .unwrap();
/// let headlines = fallback(&GenerationRequest::Headlines(promo)).into_lines();
/// assert_eq!(headlines.len(), 4);
/// assert!(headlines.iter().all(|h| h.contains("20%")));
/// ```
pub fn fallback(request: &GenerationRequest) -> GenerationResult {
    let kind = request.kind();
    if kind.is_descriptions() {
        let mut descriptions = fallback_descriptions(request);
        descriptions.truncate(kind.expected_count());
        GenerationResult::Descriptions(descriptions)
    } else {
        let lines = fallback_lines(request);
        GenerationResult::Lines(fit_to_count(kind, lines, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{ContentKind, EventDetails, PromotionDetails};
    use std::collections::HashSet;

    fn all_requests() -> Vec<GenerationRequest> {
        let p = PromotionDetails::default();
        let e = EventDetails::default();
        vec![
            GenerationRequest::Headlines(p.clone()),
            GenerationRequest::Descriptions(p.clone()),
            GenerationRequest::Keywords(p.clone()),
            GenerationRequest::Terms(p),
            GenerationRequest::EventTitles(e.clone()),
            GenerationRequest::EventDescriptions(e.clone()),
            GenerationRequest::EventKeywords(e.clone()),
            GenerationRequest::EventGuidelines(e),
        ]
    }

    #[test]
    fn test_fallback_has_exact_count_for_empty_input() {
        for request in all_requests() {
            let result = fallback(&request);
            assert_eq!(result.len(), request.kind().expected_count(), "{}", request.kind());
        }
    }

    #[test]
    fn test_fallback_items_are_distinct() {
        for request in all_requests() {
            let lines = fallback(&request).into_lines();
            let unique: HashSet<String> = lines.iter().map(|l| l.to_lowercase()).collect();
            assert_eq!(unique.len(), lines.len(), "{}", request.kind());
        }
    }

    #[test]
    fn test_fallback_keywords_are_lowercase() {
        for request in all_requests()
            .into_iter()
            .filter(|r| matches!(r.kind(), ContentKind::Keywords | ContentKind::EventKeywords))
        {
            let keywords = fallback(&request).into_lines();
            assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }
}
