//! Parsing of image analysis answers.

use crate::normalize::clip_words;
use crate::parse::{clean_item, extract_json};
use marquee_core::ImageAnalysisResult;
use regex::Regex;
use std::sync::LazyLock;

/// Longest description kept from a free-text answer, in characters.
pub const MAX_ANALYSIS_DESCRIPTION_CHARS: usize = 300;

fn labelled(label: &str) -> Regex {
    Regex::new(&format!(r"(?im)\b(?:{})\b[^:\n]*:\s*(.+)$", label)).expect("valid regex literal")
}

static MOOD: LazyLock<Regex> = LazyLock::new(|| labelled("mood|atmosphere|tone"));
static COLORS: LazyLock<Regex> = LazyLock::new(|| labelled("colou?rs?|palette"));
static ELEMENTS: LazyLock<Regex> = LazyLock::new(|| labelled("elements?|objects?|features"));
static AUDIENCE: LazyLock<Regex> = LazyLock::new(|| labelled("audience|customers?"));
static PRODUCT: LazyLock<Regex> = LazyLock::new(|| labelled("product|products|items?"));
static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*)?(?:\*\*)?[A-Za-z ]{2,30}(?:\*\*)?\s*:").expect("valid regex literal")
});

/// Parses a vision model answer into an analysis result.
///
/// JSON answers are read directly (camelCase or snake_case keys) and must
/// carry a description or elements. Free-text answers fall back to phrase
/// capture after labels such as `Mood:` or `Colors:`, with the first
/// paragraph as the description.
///
/// # Examples
///
/// ```
/// use marquee_copy::parse_image_analysis;
///
/// let text = "A latte with foam art on a wooden counter.\n\n**Mood:** cozy\n**Colors:** brown, cream";
/// let analysis = parse_image_analysis(text).unwrap();
/// assert_eq!(analysis.mood, "cozy");
/// assert_eq!(analysis.colors, vec!["brown", "cream"]);
/// ```
pub fn parse_image_analysis(text: &str) -> Option<ImageAnalysisResult> {
    match extract_json(text) {
        Some(value) => parse_json(value),
        None => parse_heuristic(text),
    }
}

fn parse_json(value: serde_json::Value) -> Option<ImageAnalysisResult> {
    let mut analysis: ImageAnalysisResult = serde_json::from_value(value).ok()?;
    analysis.description = analysis.description.trim().to_string();
    if analysis.description.is_empty() && analysis.elements.is_empty() {
        return None;
    }
    Some(analysis)
}

fn capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_item(m.as_str().trim_start_matches(['*', '_', ' '])))
        .map(|value| value.trim_end_matches('.').trim().to_string())
        .filter(|value| !value.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .flat_map(|part| part.split(" and "))
        .map(|part| clean_item(part).trim_end_matches('.').to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

fn first_paragraph(text: &str) -> Option<String> {
    let paragraph = text
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty() && !LABEL_LINE.is_match(p))?;
    let joined = paragraph
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = clean_item(&joined);
    (!cleaned.is_empty()).then(|| clip_words(&cleaned, MAX_ANALYSIS_DESCRIPTION_CHARS))
}

fn parse_heuristic(text: &str) -> Option<ImageAnalysisResult> {
    let description = first_paragraph(text)?;
    Some(ImageAnalysisResult {
        description,
        elements: capture(&ELEMENTS, text).map(|v| split_list(&v)).unwrap_or_default(),
        mood: capture(&MOOD, text).unwrap_or_default(),
        colors: capture(&COLORS, text).map(|v| split_list(&v)).unwrap_or_default(),
        product_type: capture(&PRODUCT, text),
        target_audience: capture(&AUDIENCE, text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_json() {
        let text = r#"{"description": "Tacos on a tray", "elements": ["tacos", "limes"],
            "mood": "festive", "colors": ["green"], "productType": "food",
            "targetAudience": "families"}"#;
        let analysis = parse_image_analysis(text).unwrap();
        assert_eq!(analysis.description, "Tacos on a tray");
        assert_eq!(analysis.product_type.as_deref(), Some("food"));
        assert_eq!(analysis.target_audience.as_deref(), Some("families"));
    }

    #[test]
    fn test_snake_case_json_in_fences() {
        let text = "```json\n{\"description\": \"A bouquet\", \"product_type\": \"flowers\", \"target_audience\": \"gift buyers\"}\n```";
        let analysis = parse_image_analysis(text).unwrap();
        assert_eq!(analysis.product_type.as_deref(), Some("flowers"));
        assert_eq!(analysis.target_audience.as_deref(), Some("gift buyers"));
    }

    #[test]
    fn test_free_text_heuristics() {
        let text = "The image shows a bright yoga studio with mats laid out\nnear large windows.\n\n\
            - **Key elements:** yoga mats, plants and windows\n\
            - **Mood:** calm and inviting.\n\
            - **Color palette:** white, sage green\n\
            - **Target audience:** young professionals\n\
            - **Product:** yoga classes";
        let analysis = parse_image_analysis(text).unwrap();

        assert_eq!(
            analysis.description,
            "The image shows a bright yoga studio with mats laid out near large windows."
        );
        assert_eq!(analysis.elements, vec!["yoga mats", "plants", "windows"]);
        assert_eq!(analysis.mood, "calm and inviting");
        assert_eq!(analysis.colors, vec!["white", "sage green"]);
        assert_eq!(analysis.target_audience.as_deref(), Some("young professionals"));
        assert_eq!(analysis.product_type.as_deref(), Some("yoga classes"));
    }

    #[test]
    fn test_long_description_is_clipped() {
        let text = "word ".repeat(100);
        let analysis = parse_image_analysis(&text).unwrap();
        assert!(analysis.description.chars().count() <= MAX_ANALYSIS_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_empty_answer() {
        assert!(parse_image_analysis("").is_none());
        assert!(parse_image_analysis("{}").is_none());
    }
}
