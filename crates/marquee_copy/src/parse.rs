//! Parsing of free-form completion text.
//!
//! Providers are asked for JSON but do not always comply. Each strategy here
//! is independent; [`parse_lines`] and [`parse_descriptions`] try them in
//! order and keep the first that yields anything.

use marquee_core::Description;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static ENUMERATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d{1,2}\s*[.)]|[-*•])\s+(.+)$").expect("valid regex literal")
});

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s*|\d{1,2}\s*[.)]\s*|[-*•]\s+)").expect("valid regex literal")
});

static LENGTH_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(?:\(\s*~?\d+\s*(?:chars?|characters?|words?)\s*\)|[-–—]\s*~?\d+\s*(?:chars?|characters?|words?))\s*$",
    )
    .expect("valid regex literal")
});

const QUOTES: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Removes list noise from one extracted item.
///
/// Strips trailing length annotations such as `(24 chars)`, markdown
/// emphasis and code marks, and one layer of surrounding quotes.
///
/// # Examples
///
/// ```
/// use marquee_copy::clean_item;
///
/// assert_eq!(clean_item("**\"Pasta Night: 20% Off\"** (21 chars)"), "Pasta Night: 20% Off");
/// assert_eq!(clean_item("\u{201C}Spring Savings\u{201D}"), "Spring Savings");
/// ```
pub fn clean_item(raw: &str) -> String {
    let mut text = strip_annotation(raw.trim()).to_string();
    text = text.replace("**", "").replace("__", "").replace('`', "");
    let mut text = text.trim();

    for marker in ['*', '_'] {
        if let Some(inner) = text
            .strip_prefix(marker)
            .and_then(|t| t.strip_suffix(marker))
        {
            text = inner.trim();
        }
    }

    let text = strip_quotes(text);
    strip_annotation(text).trim().to_string()
}

fn strip_annotation(text: &str) -> &str {
    match LENGTH_ANNOTATION.find(text) {
        Some(found) => &text[..found.start()],
        None => text,
    }
}

fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if QUOTES.contains(&first) && QUOTES.contains(&last) => {
            text[first.len_utf8()..text.len() - last.len_utf8()].trim()
        }
        _ => text,
    }
}

/// Removes markdown code fence lines.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the first JSON value found in `text`.
///
/// Tries the whole (fence-stripped) text, then object slices, then array
/// slices. A slice runs from an opening bracket to the last matching closing
/// bracket, and only opens where a line starts or after a line ending in a
/// colon, so bracketed fragments inside list items are never mistaken for
/// the answer.
pub fn extract_json(text: &str) -> Option<Value> {
    let text = strip_code_fences(text);
    let trimmed = text.trim();

    std::iter::once(trimmed)
        .chain(block_slices(trimmed, '{', '}'))
        .chain(block_slices(trimmed, '[', ']'))
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .filter(|value| value.is_object() || value.is_array())
}

fn block_slices(text: &str, open: char, close: char) -> impl Iterator<Item = &str> {
    let end = text.rfind(close);
    text.match_indices(open)
        .map(|(start, _)| start)
        .filter(move |&start| opens_block(text, start))
        .filter_map(move |start| end.filter(|&end| end > start).map(|end| &text[start..=end]))
}

fn opens_block(text: &str, start: usize) -> bool {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let prefix = text[line_start..start].trim();
    prefix.is_empty() || prefix.ends_with(':')
}

/// Picks the list inside a parsed value.
///
/// An object is searched for `field` first, then for a key naming the same
/// thing (`event_keywords` for `keywords`), then for its only array-valued
/// key. Objects with several candidate arrays and no matching key yield
/// nothing, since key order is not preserved.
fn array_for<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(map) => {
            if let Some(exact) = map.get(field).filter(|v| v.is_array() || v.is_string()) {
                return Some(exact);
            }
            let arrays: Vec<(&String, &Value)> =
                map.iter().filter(|(_, v)| v.is_array()).collect();
            let related: Vec<&Value> = arrays
                .iter()
                .filter(|(key, _)| related_key(key, field))
                .map(|(_, v)| *v)
                .collect();
            match (related.as_slice(), arrays.as_slice()) {
                ([only], _) => Some(*only),
                ([], [(_, only)]) => Some(*only),
                _ => None,
            }
        }
        _ => None,
    }
}

fn related_key(key: &str, field: &str) -> bool {
    let key = key.to_lowercase();
    let field = field.to_lowercase();
    key.contains(&field) || field.contains(&key)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(map) => ["text", "value", "title", "headline", "keyword"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

/// JSON strategy for list kinds.
///
/// Accepts a raw array, an object holding `field`, or an object with one
/// unambiguous array-valued field. A string value under `field` becomes one
/// item.
pub fn parse_json_lines(text: &str, field: &str) -> Option<Vec<String>> {
    let value = extract_json(text)?;
    let items = match array_for(&value, field)? {
        Value::Array(values) => values.iter().filter_map(value_text).collect(),
        Value::String(single) => vec![single.clone()],
        _ => Vec::new(),
    };
    non_empty(
        items
            .iter()
            .map(|item| clean_item(item))
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// Enumerated-lines strategy: `1.`, `2)`, `-`, `*` or `•` prefixed lines.
pub fn parse_enumerated(text: &str) -> Option<Vec<String>> {
    non_empty(
        text.lines()
            .filter_map(|line| ENUMERATED.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| clean_item(m.as_str()))
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// Plain-lines strategy: every non-empty line that is not a heading.
pub fn parse_plain(text: &str) -> Option<Vec<String>> {
    non_empty(
        strip_code_fences(text)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_heading(line))
            .map(clean_item)
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

fn is_heading(line: &str) -> bool {
    let line = line.trim_end_matches(['*', '_']).trim_end();
    line.ends_with(':') || line.starts_with('#')
}

/// Extracts list items with the first strategy that yields any.
///
/// # Examples
///
/// ```
/// use marquee_copy::parse_lines;
///
/// let json = r#"```json
/// {"headlines": ["Pasta Night", "Two for Tuesday"]}
/// ```"#;
/// assert_eq!(parse_lines(json, "headlines"), vec!["Pasta Night", "Two for Tuesday"]);
///
/// let listed = "Here you go:\n1. **Pasta Night** (11 chars)\n2. \"Two for Tuesday\"";
/// assert_eq!(parse_lines(listed, "headlines"), vec!["Pasta Night", "Two for Tuesday"]);
/// ```
pub fn parse_lines(text: &str, field: &str) -> Vec<String> {
    parse_json_lines(text, field)
        .or_else(|| parse_enumerated(text))
        .or_else(|| parse_plain(text))
        .unwrap_or_default()
}

/// Description candidate; `title` is empty when the source had none.
type Candidate = (String, String);

fn json_descriptions(value: &Value, field: &str) -> Option<Vec<Candidate>> {
    let value = match value {
        Value::Object(map) => map.get(field).unwrap_or(value),
        other => other,
    };

    let candidates: Vec<Candidate> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some((String::new(), text.clone())),
                Value::Object(map) => {
                    let title = ["title", "style", "label", "name"]
                        .iter()
                        .find_map(|key| map.get(*key).and_then(Value::as_str))
                        .unwrap_or_default();
                    let text = ["text", "description", "body", "content"]
                        .iter()
                        .find_map(|key| map.get(*key).and_then(Value::as_str))?;
                    Some((title.to_string(), text.to_string()))
                }
                _ => None,
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(title, text)| Some((title.clone(), text.as_str()?.to_string())))
            .collect(),
        _ => Vec::new(),
    };

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .map(|(title, text)| (clean_item(&title), clean_item(&text)))
        .filter(|(_, text)| !text.is_empty())
        .collect();
    (!candidates.is_empty()).then_some(candidates)
}

/// Splits `line` into a style label and the text after it, when the line
/// starts with one of `styles`.
fn split_label<'a>(line: &'a str, styles: &[&str]) -> Option<(usize, &'a str)> {
    styles.iter().enumerate().find_map(|(index, style)| {
        let spelled_out = style.replace('&', "and");
        [style.to_string(), spelled_out]
            .iter()
            .find_map(|label| {
                let prefix = line.get(..label.len())?;
                if !prefix.eq_ignore_ascii_case(label) {
                    return None;
                }
                let rest = line[label.len()..].trim_start_matches(['*', '_', ' ']);
                if rest.is_empty() {
                    Some("")
                } else {
                    rest.strip_prefix([':', '-', '\u{2013}', '\u{2014}', ')'])
                }
            })
            .map(|rest| (index, rest.trim_start_matches(['*', '_', ' ']).trim()))
    })
}

fn labelled_descriptions(text: &str, styles: &[&str]) -> Option<Vec<Candidate>> {
    let mut candidates: Vec<(String, Vec<String>)> = Vec::new();

    for raw in strip_code_fences(text).lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let unmarked = LIST_MARKER.replace(line, "");
        let unmarked = unmarked.trim_start_matches(['*', '_']).trim();

        match split_label(unmarked, styles) {
            Some((index, rest)) => {
                let mut body = Vec::new();
                if !rest.is_empty() {
                    body.push(rest.to_string());
                }
                candidates.push((styles[index].to_string(), body));
            }
            None => {
                if let Some((_, body)) = candidates.last_mut() {
                    body.push(line.to_string());
                }
            }
        }
    }

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .map(|(title, body)| (title, clean_item(&body.join(" "))))
        .filter(|(_, text)| !text.is_empty())
        .collect();
    (!candidates.is_empty()).then_some(candidates)
}

fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Assigns candidates to style slots.
///
/// Candidates whose title names a style take that slot; the rest fill the
/// remaining slots in order. Slots nobody filled stay `None`.
fn assign_to_styles(candidates: Vec<Candidate>, styles: &[&str]) -> Vec<Option<String>> {
    let mut slots: Vec<Option<String>> = vec![None; styles.len()];
    let normalized: Vec<String> = styles.iter().map(|s| normalize_label(s)).collect();
    let mut unmatched = Vec::new();

    for (title, text) in candidates {
        let wanted = normalize_label(&title);
        let position = normalized
            .iter()
            .position(|style| !wanted.is_empty() && *style == wanted);
        match position {
            Some(index) if slots[index].is_none() => slots[index] = Some(text),
            _ => unmatched.push(text),
        }
    }

    let mut unmatched = unmatched.into_iter();
    for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
        match unmatched.next() {
            Some(text) => *slot = Some(text),
            None => break,
        }
    }
    slots
}

/// Extracts description text per style, in style order.
///
/// Tries JSON (`[{title, text}]`, an array of strings, or an object keyed by
/// style), then labelled paragraphs (`**Value-Focused:** ...` or a label line
/// followed by body lines), then plain list lines. Styles the text does not
/// cover are returned as `None`.
pub fn parse_descriptions(text: &str, field: &str, styles: &[&str]) -> Vec<Option<String>> {
    let candidates = extract_json(text)
        .and_then(|value| json_descriptions(&value, field))
        .or_else(|| labelled_descriptions(text, styles))
        .or_else(|| {
            parse_enumerated(text)
                .or_else(|| parse_plain(text))
                .map(|lines| lines.into_iter().map(|l| (String::new(), l)).collect())
        })
        .unwrap_or_default();
    assign_to_styles(candidates, styles)
}

/// Pairs slot text with style titles, filling gaps from `fallback`.
///
/// `fallback` is looked up by title first, then by position.
pub fn complete_descriptions(
    slots: Vec<Option<String>>,
    styles: &[&str],
    fallback: &[Description],
) -> Vec<Description> {
    styles
        .iter()
        .enumerate()
        .map(|(index, style)| {
            let text = slots.get(index).cloned().flatten().unwrap_or_else(|| {
                fallback
                    .iter()
                    .find(|d| d.title == *style)
                    .or_else(|| fallback.get(index))
                    .map(|d| d.text.clone())
                    .unwrap_or_default()
            });
            Description::new(*style, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::PROMOTION_DESCRIPTION_STYLES;

    #[test]
    fn test_clean_item_strips_annotations() {
        assert_eq!(clean_item("Spring Sale (11 chars)"), "Spring Sale");
        assert_eq!(clean_item("Spring Sale - 11 characters"), "Spring Sale");
        assert_eq!(clean_item("Spring Sale (3 words)"), "Spring Sale");
        assert_eq!(clean_item("`code`"), "code");
        assert_eq!(clean_item("*Spring Sale*"), "Spring Sale");
        assert_eq!(clean_item("__Spring Sale__"), "Spring Sale");
    }

    #[test]
    fn test_clean_item_keeps_inner_apostrophes() {
        assert_eq!(clean_item("Luigi's Pasta Night"), "Luigi's Pasta Night");
        assert_eq!(clean_item("'Kids Eat Free'"), "Kids Eat Free");
    }

    #[test]
    fn test_json_raw_array() {
        assert_eq!(
            parse_json_lines(r#"["a", "b"]"#, "headlines"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let text = "Sure! Here are your keywords: {\"keywords\": [\"pizza\", \"deal\"]} Enjoy.";
        assert_eq!(
            parse_json_lines(text, "keywords"),
            Some(vec!["pizza".to_string(), "deal".to_string()])
        );
    }

    #[test]
    fn test_json_any_array_field() {
        let text = r#"{"items": ["one", "two"], "count": 2}"#;
        assert_eq!(
            parse_json_lines(text, "terms"),
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_json_related_field_wins_over_other_arrays() {
        let text = r#"{"notes": ["ignore"], "event_keywords": ["jazz", "live music"]}"#;
        assert_eq!(
            parse_json_lines(text, "keywords"),
            Some(vec!["jazz".to_string(), "live music".to_string()])
        );
    }

    #[test]
    fn test_json_ambiguous_arrays_are_rejected() {
        let text = r#"{"alpha": ["one"], "beta": ["two"]}"#;
        assert!(parse_json_lines(text, "terms").is_none());
    }

    #[test]
    fn test_bracket_inside_list_item_is_not_json() {
        let text = "1. Valid Monday through Friday only.\n\
            2. Items marked [1] are excluded.\n\
            3. Limit one per customer.";
        assert!(extract_json(text).is_none());
        assert_eq!(
            parse_lines(text, "terms"),
            vec![
                "Valid Monday through Friday only.",
                "Items marked [1] are excluded.",
                "Limit one per customer.",
            ]
        );
    }

    #[test]
    fn test_json_after_introducing_line() {
        let text = "Here are the headlines:\n[\"Pasta Night\", \"Two for Tuesday\"]";
        assert_eq!(
            parse_lines(text, "headlines"),
            vec!["Pasta Night", "Two for Tuesday"]
        );
    }

    #[test]
    fn test_json_string_field_is_single_item() {
        assert_eq!(
            parse_json_lines(r#"{"keywords": "pizza, pasta"}"#, "keywords"),
            Some(vec!["pizza, pasta".to_string()])
        );
    }

    #[test]
    fn test_invalid_json_falls_through() {
        assert!(parse_json_lines("{not json", "headlines").is_none());
        assert!(parse_json_lines("just text", "headlines").is_none());
    }

    #[test]
    fn test_enumerated_markers() {
        let text = "Headlines:\n1. One\n2) Two\n- Three\n* Four\n• Five";
        assert_eq!(
            parse_enumerated(text),
            Some(vec!["One", "Two", "Three", "Four", "Five"].into_iter().map(String::from).collect())
        );
    }

    #[test]
    fn test_plain_skips_headings() {
        let text = "Here are some ideas:\n\nFirst idea\n## Section\nSecond idea";
        assert_eq!(
            parse_plain(text),
            Some(vec!["First idea".to_string(), "Second idea".to_string()])
        );
    }

    #[test]
    fn test_parse_lines_empty_text() {
        assert!(parse_lines("", "headlines").is_empty());
        assert!(parse_lines("Headlines:", "headlines").is_empty());
    }

    #[test]
    fn test_descriptions_from_json_objects() {
        let text = r#"{"descriptions": [
            {"title": "Value-Focused", "text": "Value text."},
            {"title": "Simple & Direct", "text": "Simple text."}
        ]}"#;
        let slots = parse_descriptions(text, "descriptions", &PROMOTION_DESCRIPTION_STYLES);
        assert_eq!(slots[0].as_deref(), Some("Simple text."));
        assert_eq!(slots[1], None);
        assert_eq!(slots[2].as_deref(), Some("Value text."));
        assert_eq!(slots[3], None);
    }

    #[test]
    fn test_descriptions_from_label_map() {
        let text = r#"{"Urgency and Scarcity": "Hurry.", "Customer Appreciation": "Thanks."}"#;
        let slots = parse_descriptions(text, "descriptions", &PROMOTION_DESCRIPTION_STYLES);
        assert_eq!(slots[1].as_deref(), Some("Hurry."));
        assert_eq!(slots[3].as_deref(), Some("Thanks."));
    }

    #[test]
    fn test_descriptions_from_labelled_markdown() {
        let text = "Here are four descriptions:\n\n\
            **Simple & Direct:** Get 20% off all pasta.\n\n\
            **Urgency & Scarcity:**\nThis weekend only.\nDon't wait!\n\n\
            3. Value-Focused - More pasta for less.\n\n\
            ### Customer Appreciation\nThanks for being regulars.";
        let slots = parse_descriptions(text, "descriptions", &PROMOTION_DESCRIPTION_STYLES);
        assert_eq!(slots[0].as_deref(), Some("Get 20% off all pasta."));
        assert_eq!(slots[1].as_deref(), Some("This weekend only. Don't wait!"));
        assert_eq!(slots[2].as_deref(), Some("More pasta for less."));
        assert_eq!(slots[3].as_deref(), Some("Thanks for being regulars."));
    }

    #[test]
    fn test_untitled_descriptions_fill_in_order() {
        let text = r#"["First.", "Second."]"#;
        let slots = parse_descriptions(text, "descriptions", &PROMOTION_DESCRIPTION_STYLES);
        assert_eq!(slots[0].as_deref(), Some("First."));
        assert_eq!(slots[1].as_deref(), Some("Second."));
        assert_eq!(slots[2], None);
    }

    #[test]
    fn test_complete_descriptions_uses_fallback_for_gaps() {
        let fallback: Vec<Description> = PROMOTION_DESCRIPTION_STYLES
            .iter()
            .map(|style| Description::new(*style, format!("fallback {}", style)))
            .collect();
        let slots = vec![Some("Mine.".to_string()), None, None, None];

        let done = complete_descriptions(slots, &PROMOTION_DESCRIPTION_STYLES, &fallback);

        assert_eq!(done.len(), 4);
        assert_eq!(done[0].text, "Mine.");
        assert_eq!(done[1].title, "Urgency & Scarcity");
        assert_eq!(done[1].text, "fallback Urgency & Scarcity");
    }
}
