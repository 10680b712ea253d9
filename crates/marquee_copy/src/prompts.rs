//! Prompt construction.
//!
//! Prompts are pure functions of the request so identical requests produce
//! identical provider calls.

use marquee_core::{
    BusinessContext, ContentKind, DiscountType, EventDetails, GenerationRequest,
    ImageAnalysisResult, PromotionDetails, format_money, format_number,
};

/// System message for copy generation.
pub const COPY_SYSTEM_PROMPT: &str = "You are an expert copywriter for small local businesses. \
You write short, friendly, concrete marketing copy. Respond with valid JSON only, \
no markdown and no commentary.";

/// System message for image analysis.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You analyze marketing images for small local businesses. \
Respond with valid JSON only.";

/// User prompt for image analysis.
pub const ANALYSIS_PROMPT: &str = "Analyze this image for use in a local business promotion. \
Return a JSON object with these fields: \
\"description\" (one or two sentences), \
\"elements\" (array of notable visual elements), \
\"mood\" (a few words), \
\"colors\" (array of dominant colors), \
\"productType\" (what is being sold, if anything), \
\"targetAudience\" (who the image appeals to).";

/// Builds the user prompt for `request`.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let kind = request.kind();
    let mut sections = Vec::new();

    sections.push(task_line(kind));
    match (request.promotion(), request.event()) {
        (Some(promotion), _) => sections.push(promotion_section(promotion)),
        (_, Some(event)) => sections.push(event_section(event)),
        (None, None) => {}
    }
    if let Some(business) = business_section(request.business()) {
        sections.push(business);
    }
    if let Some(analysis) = request.image_analysis().map(analysis_section) {
        sections.push(analysis);
    }
    sections.push(format_line(kind));

    sections.join("\n\n")
}

fn task_line(kind: ContentKind) -> String {
    let count = kind.expected_count();
    match kind {
        ContentKind::Headlines => format!(
            "Write {} distinct headlines for this promotion. Each headline must be under 60 characters and mention the offer.",
            count
        ),
        ContentKind::Descriptions => format!(
            "Write {} promotion descriptions of 2 to 3 sentences each, one in each of these styles: {}.",
            count,
            kind.description_styles().join(", ")
        ),
        ContentKind::Keywords => format!(
            "Write {} search keywords or short phrases customers might use to find this promotion. Use lowercase.",
            count
        ),
        ContentKind::Terms => format!(
            "Write {} short terms and conditions for this promotion, one sentence each.",
            count
        ),
        ContentKind::EventTitles => format!(
            "Write {} distinct, catchy titles for this event. Each title must be under 60 characters.",
            count
        ),
        ContentKind::EventDescriptions => format!(
            "Write {} event descriptions of 2 to 3 sentences each, one in each of these styles: {}.",
            count,
            kind.description_styles().join(", ")
        ),
        ContentKind::EventKeywords => format!(
            "Write {} search keywords or short phrases people might use to find this event. Use lowercase.",
            count
        ),
        ContentKind::EventGuidelines => format!(
            "Write {} short guidelines for attendees of this event, one sentence each.",
            count
        ),
    }
}

fn format_line(kind: ContentKind) -> String {
    if kind.is_descriptions() {
        format!(
            "Respond as JSON: {{\"{}\": [{{\"title\": \"<style>\", \"text\": \"<description>\"}}]}} using the style names exactly as given, in that order.",
            kind.json_field()
        )
    } else {
        format!(
            "Respond as JSON: {{\"{}\": [\"...\"]}} with exactly {} items.",
            kind.json_field(),
            kind.expected_count()
        )
    }
}

fn promotion_section(promotion: &PromotionDetails) -> String {
    let mut lines = vec!["Promotion details:".to_string()];
    let offer = match (promotion.discount_type(), promotion.discount_value()) {
        (DiscountType::Percentage, Some(value)) => format!("{}% off", format_number(*value)),
        (DiscountType::FixedAmount, Some(value)) => format!("{} off", format_money(*value)),
        _ => promotion.offer_phrase(),
    };
    lines.push(format!("- Discount type: {}", promotion.discount_type()));
    lines.push(format!("- Offer: {}", offer));
    if let Some(item) = promotion.item() {
        lines.push(format!("- Applies to: {}", item));
    }
    if let Some(custom) = promotion.custom_offer().as_deref().map(str::trim)
        && !custom.is_empty()
        && *promotion.discount_type() != DiscountType::Custom
    {
        lines.push(format!("- Additional details: {}", custom));
    }
    lines.join("\n")
}

fn event_section(event: &EventDetails) -> String {
    let mut lines = vec!["Event details:".to_string()];
    if let Some(name) = event.event_name().as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(format!("- Working title: {}", name));
    }
    if let Some(kind) = event.event_type().as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        lines.push(format!("- Type: {}", kind));
    }
    lines.push(format!("- Admission: {}", event.admission_phrase()));
    if let Some(date) = event.date() {
        lines.push(format!("- Date: {}", date));
    }
    lines.join("\n")
}

fn business_section(business: &BusinessContext) -> Option<String> {
    if business.is_empty() {
        return None;
    }
    let mut lines = vec!["Business:".to_string()];
    let fields = [
        ("Name", business.name()),
        ("Category", business.category()),
        ("About", business.description()),
        ("Location", business.location()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("- {}: {}", label, value));
        }
    }
    (lines.len() > 1).then(|| lines.join("\n"))
}

fn analysis_section(analysis: &ImageAnalysisResult) -> String {
    format!(
        "The promotion image has been analyzed. Use it for tone and details.\n{}",
        analysis.prompt_context()
    )
}
