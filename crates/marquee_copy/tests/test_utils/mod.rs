//! Test utilities for Marquee copy tests.
//!
//! This module provides a mock completion driver and request helpers.

use marquee_core::{BusinessContext, DiscountType, EventDetails, PromotionDetails};

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockDriver};

/// 20% off at a restaurant.
#[allow(dead_code)]
pub fn restaurant_promotion() -> PromotionDetails {
    PromotionDetails::builder()
        .discount_type(DiscountType::Percentage)
        .discount_value(20.0)
        .applicable_item("all pasta dishes")
        .business(
            BusinessContext::builder()
                .name("Luigi's")
                .category("Italian restaurant")
                .build()
                .expect("valid business"),
        )
        .build()
        .expect("valid promotion")
}

/// A ticketed live music night.
#[allow(dead_code)]
pub fn music_event() -> EventDetails {
    EventDetails::builder()
        .event_name("Jazz Night")
        .event_type("live music")
        .ticket_price(15.0)
        .date_label("Friday, June 6")
        .business(
            BusinessContext::builder()
                .name("The Blue Room")
                .category("wine bar")
                .build()
                .expect("valid business"),
        )
        .build()
        .expect("valid event")
}
