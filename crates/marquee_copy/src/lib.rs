//! Copy generation for local-business promotions and events.
//!
//! [`CopyService`] asks a completion provider for headlines, descriptions,
//! keywords, terms, event titles and guidelines, and always answers: when
//! the provider is missing, failing, or returns unusable text, deterministic
//! templates fill in. Identical concurrent requests share one provider call
//! and finished results are cached briefly.

mod analysis;
mod config;
mod fallback;
mod metrics;
mod normalize;
mod parse;
mod prompts;
mod service;

pub use analysis::{MAX_ANALYSIS_DESCRIPTION_CHARS, parse_image_analysis};
pub use config::{CopyConfig, ENV_PREFIX, MaxTokens};
pub use fallback::{fallback, fallback_descriptions, fallback_lines};
pub use metrics::CopyMetrics;
pub use normalize::{
    MAX_HEADLINE_CHARS, MAX_KEYWORD_CHARS, MAX_TERM_CHARS, clip_words, fit_to_count,
    normalize_items,
};
pub use parse::{
    clean_item, complete_descriptions, extract_json, parse_descriptions, parse_enumerated,
    parse_json_lines, parse_lines, parse_plain, strip_code_fences,
};
pub use prompts::{ANALYSIS_PROMPT, ANALYSIS_SYSTEM_PROMPT, COPY_SYSTEM_PROMPT, build_prompt};
pub use service::{CopyService, ServiceStatus, assemble_result};
