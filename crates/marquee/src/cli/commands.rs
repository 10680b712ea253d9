//! Argument definitions.

use clap::{Args, Parser, Subcommand};
use marquee_core::{
    BusinessContext, DiscountType, EventDetails, ImageAnalysisResult, PromotionDetails,
};
use std::path::PathBuf;

/// Marketing copy suggestions for promotions and events.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "Marketing copy suggestions for local-business promotions and events")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file; MARQUEE_* environment variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ignore any configured API key and serve template copy only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Four promotion headlines
    Headlines(PromotionArgs),
    /// Four promotion descriptions, one per style
    Descriptions(PromotionArgs),
    /// Ten promotion keywords
    Keywords(PromotionArgs),
    /// Eight terms and conditions
    Terms(PromotionArgs),
    /// Four event titles
    EventTitles(EventArgs),
    /// Four event descriptions, one per style
    EventDescriptions(EventArgs),
    /// Ten event keywords
    EventKeywords(EventArgs),
    /// Eight attendee guidelines
    EventGuidelines(EventArgs),
    /// Describe an image with the vision model
    Analyze(AnalyzeArgs),
    /// Show provider and cache status
    Status,
}

/// What the business is.
#[derive(Args, Debug, Clone, Default)]
pub struct BusinessArgs {
    /// Business name
    #[arg(long)]
    pub business_name: Option<String>,

    /// Business category, e.g. "bakery" or "hair salon"
    #[arg(long)]
    pub category: Option<String>,

    /// Short description of the business
    #[arg(long)]
    pub business_description: Option<String>,

    /// Neighborhood or city
    #[arg(long)]
    pub location: Option<String>,
}

impl BusinessArgs {
    /// Builds the business context.
    pub fn to_context(&self) -> BusinessContext {
        let mut builder = BusinessContext::builder();
        if let Some(name) = &self.business_name {
            builder.name(name.as_str());
        }
        if let Some(category) = &self.category {
            builder.category(category.as_str());
        }
        if let Some(description) = &self.business_description {
            builder.description(description.as_str());
        }
        if let Some(location) = &self.location {
            builder.location(location.as_str());
        }
        builder.build().unwrap_or_default()
    }
}

/// Promotion parameters.
#[derive(Args, Debug, Clone)]
pub struct PromotionArgs {
    /// Discount shape: percentage, fixed_amount, bogo, free_item or custom
    #[arg(long, default_value = "percentage")]
    pub discount_type: DiscountType,

    /// Percentage or amount, depending on the discount type
    #[arg(long)]
    pub value: Option<f64>,

    /// What the discount applies to
    #[arg(long)]
    pub item: Option<String>,

    /// Offer text for custom discounts
    #[arg(long)]
    pub offer: Option<String>,

    #[command(flatten)]
    pub business: BusinessArgs,

    /// Promotion image URL, analyzed first to enrich the prompt
    #[arg(long = "image")]
    pub images: Vec<String>,
}

impl PromotionArgs {
    /// Builds the promotion, attaching `analysis` when present.
    pub fn to_details(
        &self,
        analysis: Option<ImageAnalysisResult>,
    ) -> anyhow::Result<PromotionDetails> {
        let mut builder = PromotionDetails::builder();
        builder
            .discount_type(self.discount_type)
            .business(self.business.to_context());
        if let Some(value) = self.value {
            builder.discount_value(value);
        }
        if let Some(item) = &self.item {
            builder.applicable_item(item.as_str());
        }
        if let Some(offer) = &self.offer {
            builder.custom_offer(offer.as_str());
        }
        if let Some(analysis) = analysis {
            builder.image_analysis(analysis);
        }
        Ok(builder.build()?)
    }
}

/// Event parameters.
#[derive(Args, Debug, Clone)]
pub struct EventArgs {
    /// Working title, if any
    #[arg(long)]
    pub name: Option<String>,

    /// Event type, e.g. "live music" or "pottery workshop"
    #[arg(long = "type")]
    pub event_type: Option<String>,

    /// Entry is free
    #[arg(long, conflicts_with = "price")]
    pub free: bool,

    /// Ticket price
    #[arg(long)]
    pub price: Option<f64>,

    /// Human-readable date, e.g. "Friday, June 6"
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub business: BusinessArgs,

    /// Event image URL, analyzed first to enrich the prompt
    #[arg(long = "image")]
    pub images: Vec<String>,
}

impl EventArgs {
    /// Builds the event, attaching `analysis` when present.
    pub fn to_details(&self, analysis: Option<ImageAnalysisResult>) -> anyhow::Result<EventDetails> {
        let mut builder = EventDetails::builder();
        builder
            .is_free(self.free)
            .business(self.business.to_context());
        if let Some(name) = &self.name {
            builder.event_name(name.as_str());
        }
        if let Some(event_type) = &self.event_type {
            builder.event_type(event_type.as_str());
        }
        if let Some(price) = self.price {
            builder.ticket_price(price);
        }
        if let Some(date) = &self.date {
            builder.date_label(date.as_str());
        }
        if let Some(analysis) = analysis {
            builder.image_analysis(analysis);
        }
        Ok(builder.build()?)
    }
}

/// Image analysis parameters.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Image URLs; only the first is sent
    #[arg(required = true)]
    pub images: Vec<String>,
}
