//! Core data types for the Marquee copy-assist library.
//!
//! Two groups of types live here: the provider-neutral completion request
//! types (messages, inputs, outputs) and the domain types describing what
//! copy to generate (promotion and event parameters, content kinds, results).

mod analysis;
mod business;
mod content;
mod event;
mod generation;
mod input;
mod media;
mod message;
mod output;
mod promotion;
mod request;
mod role;

pub use analysis::ImageAnalysisResult;
pub use business::{BusinessContext, BusinessContextBuilder};
pub use content::{
    ContentKind, Description, EVENT_DESCRIPTION_STYLES, GenerationResult,
    PROMOTION_DESCRIPTION_STYLES,
};
pub use event::{EventDetails, EventDetailsBuilder, title_case};
pub use generation::GenerationRequest;
pub use input::Input;
pub use media::MediaSource;
pub use message::Message;
pub use output::{Output, TokenUsageData};
pub use promotion::{
    DiscountType, PromotionDetails, PromotionDetailsBuilder, format_money, format_number,
};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
