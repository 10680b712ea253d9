//! Per-kind normalization and the exact-count contract.

use marquee_core::ContentKind;
use std::collections::HashSet;

/// Longest keyword kept, in characters.
pub const MAX_KEYWORD_CHARS: usize = 40;
/// Longest term or guideline kept, in characters.
pub const MAX_TERM_CHARS: usize = 200;
/// Longest headline or title kept, in characters.
pub const MAX_HEADLINE_CHARS: usize = 120;

/// Shortens `text` to at most `max` characters, preferring a word boundary.
///
/// # Examples
///
/// ```
/// use marquee_copy::clip_words;
///
/// assert_eq!(clip_words("short", 10), "short");
/// assert_eq!(clip_words("one two three four", 12), "one two");
/// ```
pub fn clip_words(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }

    let cut: String = text.chars().take(max).collect();
    let boundary_ok = text.chars().nth(max).is_some_and(char::is_whitespace);
    let clipped = if boundary_ok {
        cut.as_str()
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(index) if index >= cut.len() / 2 => &cut[..index],
            _ => cut.as_str(),
        }
    };
    clipped
        .trim_end()
        .trim_end_matches([',', ';', ':', '-'])
        .trim_end()
        .to_string()
}

fn normalize_keywords(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.split(','))
        .map(|keyword| {
            let keyword = keyword.trim().trim_start_matches('#').trim().to_lowercase();
            keyword.chars().take(MAX_KEYWORD_CHARS).collect::<String>().trim().to_string()
        })
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

fn clip_all(items: Vec<String>, max: usize) -> Vec<String> {
    items
        .iter()
        .map(|item| clip_words(item, max))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Applies the kind's cleanup rules without changing the count contract.
pub fn normalize_items(kind: ContentKind, items: Vec<String>) -> Vec<String> {
    match kind {
        ContentKind::Keywords | ContentKind::EventKeywords => normalize_keywords(items),
        ContentKind::Terms | ContentKind::EventGuidelines => clip_all(items, MAX_TERM_CHARS),
        ContentKind::Headlines | ContentKind::EventTitles => clip_all(items, MAX_HEADLINE_CHARS),
        ContentKind::Descriptions | ContentKind::EventDescriptions => items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    }
}

/// Normalizes `items`, removes case-insensitive duplicates, pads from
/// `fallback` and truncates to the kind's expected count.
///
/// Fallback items already present are skipped; if the fallback runs out of
/// new items the result is padded with its items regardless.
///
/// # Examples
///
/// ```
/// use marquee_copy::fit_to_count;
/// use marquee_core::ContentKind;
///
/// let parsed = vec!["Pasta Night".to_string(), "pasta night".to_string()];
/// let fallback: Vec<String> = (1..=6).map(|i| format!("Fallback {}", i)).collect();
/// let fitted = fit_to_count(ContentKind::Headlines, parsed, &fallback);
/// assert_eq!(fitted, vec!["Pasta Night", "Fallback 1", "Fallback 2", "Fallback 3"]);
/// ```
pub fn fit_to_count(kind: ContentKind, items: Vec<String>, fallback: &[String]) -> Vec<String> {
    let count = kind.expected_count();
    let mut seen = HashSet::new();
    let mut fitted: Vec<String> = normalize_items(kind, items)
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect();

    if fitted.len() < count {
        let padding = normalize_items(kind, fallback.to_vec());
        for item in &padding {
            if fitted.len() >= count {
                break;
            }
            if seen.insert(item.to_lowercase()) {
                fitted.push(item.clone());
            }
        }
        for item in padding.iter().cycle().take(count.saturating_sub(fitted.len())) {
            fitted.push(item.clone());
        }
    }

    fitted.truncate(count);
    fitted
}
