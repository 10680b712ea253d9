//! Template copy for events.

use super::tables::{self, EventProfile};
use marquee_core::{Description, EVENT_DESCRIPTION_STYLES, EventDetails};

struct EventContext {
    profile: &'static EventProfile,
    name: String,
    place: String,
    when: String,
    admission: String,
}

impl EventContext {
    fn new(event: &EventDetails) -> Self {
        let profile = tables::event_profile(&event.event_type_lowercase());
        let place = event
            .business()
            .name()
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("our place")
            .to_string();
        Self {
            profile,
            name: event.display_name(),
            place,
            when: event.date().map(|d| format!(" on {}", d)).unwrap_or_default(),
            admission: event.admission_phrase(),
        }
    }

    fn render(&self, template: &str) -> String {
        template
            .replace("{name}", &self.name)
            .replace("{place}", &self.place)
            .replace("{when}", &self.when)
            .replace("{admission}", &self.admission)
    }
}

/// Title candidates, at least six.
pub fn titles(event: &EventDetails) -> Vec<String> {
    let context = EventContext::new(event);
    context
        .profile
        .titles
        .iter()
        .map(|template| context.render(template))
        .collect()
}

/// One description per event style, in style order.
pub fn descriptions(event: &EventDetails) -> Vec<Description> {
    let context = EventContext::new(event);
    let texts = [
        "Join us for {name} at {place}{when}. {admission}. Everyone is welcome, so bring a friend.",
        "Get ready for {name}! It's going to be an unforgettable time at {place}{when}, and you won't want to miss a minute of it.",
        "{name} brings our neighbors together at {place}. Come meet new friends, support local, and be part of something special.",
        "Be among the few to experience {name} at {place}{when}. Space is limited, so reserve your spot early. {admission}.",
    ];
    EVENT_DESCRIPTION_STYLES
        .iter()
        .zip(texts)
        .map(|(style, text)| Description::new(*style, context.render(text)))
        .collect()
}

/// Keyword candidates, at least ten distinct after normalization.
pub fn keywords(event: &EventDetails) -> Vec<String> {
    let context = EventContext::new(event);
    let mut keywords = Vec::new();
    let event_type = event.event_type_lowercase();
    if !event_type.is_empty() {
        keywords.push(event_type.clone());
        keywords.push(format!("{} near me", event_type));
    }
    if event.event_name().is_some() {
        keywords.push(context.name.to_lowercase());
    }
    if *event.is_free() {
        keywords.push("free event".to_string());
    }
    let category = event.business().category_lowercase();
    if !category.is_empty() {
        keywords.push(category);
    }
    keywords.extend(context.profile.keywords.iter().map(|k| k.to_string()));
    keywords.extend(tables::EVENT_KEYWORDS.iter().map(|k| k.to_string()));
    keywords
}

/// Guideline candidates: admission first, then type-specific, then general.
pub fn guidelines(event: &EventDetails) -> Vec<String> {
    let context = EventContext::new(event);
    let admission = if context.admission == "Free Entry" {
        "Admission is free, but please arrive early as space is limited.".to_string()
    } else {
        "Please have your ticket ready at the door.".to_string()
    };

    std::iter::once(admission)
        .chain(context.profile.guidelines.iter().map(|g| g.to_string()))
        .chain(tables::GENERAL_GUIDELINES.iter().map(|g| g.to_string()))
        .collect()
}
