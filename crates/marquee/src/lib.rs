//! Marketing copy suggestions for local-business promotions and events.
//!
//! Marquee asks an OpenAI-compatible chat-completion API for headlines,
//! descriptions, keywords and terms (or event titles, descriptions, keywords
//! and guidelines), and answers from deterministic templates whenever the
//! API is missing, failing or unintelligible. Callers never see an error.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`marquee_core`]: request, result and provider-neutral message types
//! - [`marquee_error`]: error types
//! - [`marquee_interface`]: the [`CompletionDriver`] trait
//! - [`marquee_cache`]: [`TtlCache`] and [`RequestCoalescer`]
//! - [`marquee_models`]: the OpenAI-compatible driver
//! - [`marquee_copy`]: [`CopyService`], parsing and fallback copy
//!
//! # Examples
//!
//! ```
//! use marquee::{BusinessContext, CopyConfig, CopyService, DiscountType, PromotionDetails};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! # rt.block_on(async {
//! let service = CopyService::offline(CopyConfig::default());
//! let promo = PromotionDetails::builder()
//!     .discount_type(DiscountType::Percentage)
//!     .discount_value(20.0)
//!     .business(BusinessContext::with_category("bakery"))
//!     .build()
//!     .unwrap();
//!
//! let keywords = service.generate_keywords(&promo).await;
//! assert_eq!(keywords.len(), 10);
//! # });
//! ```

pub mod cli;
pub mod observability;

pub use marquee_cache::*;
pub use marquee_copy::*;
pub use marquee_core::*;
pub use marquee_error::*;
pub use marquee_interface::*;
pub use marquee_models::*;
