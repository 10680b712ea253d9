//! Tests for the copy generation pipeline.

mod test_utils;

use futures::future::join_all;
use marquee_copy::{CopyConfig, CopyService, fallback, fallback_descriptions};
use marquee_core::{
    BusinessContext, ContentKind, DiscountType, EVENT_DESCRIPTION_STYLES, GenerationRequest,
    PROMOTION_DESCRIPTION_STYLES, PromotionDetails,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockBehavior, MockDriver, music_event, restaurant_promotion};

fn service_with(driver: &Arc<MockDriver>) -> CopyService {
    CopyService::with_driver(CopyConfig::default(), driver.clone())
}

fn all_requests() -> Vec<GenerationRequest> {
    let promo = restaurant_promotion();
    let event = music_event();
    vec![
        GenerationRequest::Headlines(promo.clone()),
        GenerationRequest::Descriptions(promo.clone()),
        GenerationRequest::Keywords(promo.clone()),
        GenerationRequest::Terms(promo),
        GenerationRequest::EventTitles(event.clone()),
        GenerationRequest::EventDescriptions(event.clone()),
        GenerationRequest::EventKeywords(event.clone()),
        GenerationRequest::EventGuidelines(event),
    ]
}

// ============================================================================
// Fallback behavior
// ============================================================================

#[tokio::test]
async fn test_offline_headlines_mention_discount() {
    let service = CopyService::offline(CopyConfig::default());
    let promo = PromotionDetails::builder()
        .discount_type(DiscountType::Percentage)
        .discount_value(20.0)
        .business(BusinessContext::with_category("restaurant"))
        .build()
        .expect("valid promotion");

    let headlines = service.generate_headlines(&promo).await;

    assert!(!service.is_available());
    assert_eq!(headlines.len(), 4);
    assert!(headlines.iter().all(|h| h.contains("20%")), "{:?}", headlines);
    assert_eq!(service.cache_len(), 0);
}

#[tokio::test]
async fn test_offline_results_have_exact_counts() {
    let service = CopyService::offline(CopyConfig::default());
    for request in all_requests() {
        let result = service.generate(&request).await;
        assert_eq!(result.len(), request.kind().expected_count(), "{}", request.kind());
    }
}

#[tokio::test]
async fn test_failing_provider_yields_full_fallback() {
    let behaviors = [
        MockBehavior::Status(503),
        MockBehavior::Status(401),
        MockBehavior::Disconnect,
        MockBehavior::Respond("   ".to_string()),
    ];

    for behavior in behaviors {
        let driver = Arc::new(MockDriver::new(behavior.clone()));
        let service = service_with(&driver);

        for request in all_requests() {
            let result = service.generate(&request).await;
            assert_eq!(result, fallback(&request), "{:?} {}", behavior, request.kind());
        }

        assert_eq!(driver.calls(), 8);
        assert_eq!(service.cache_len(), 0);
    }
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let driver = Arc::new(MockDriver::failing(500));
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    service.generate_headlines(&promo).await;
    service.generate_headlines(&promo).await;

    assert_eq!(driver.calls(), 2);
}

// ============================================================================
// Caching and coalescing
// ============================================================================

#[tokio::test]
async fn test_second_identical_request_hits_cache() {
    let driver = Arc::new(MockDriver::responding(
        r#"{"headlines": ["Pasta Night", "Two for Tuesday", "Noodle Deals", "Twenty Off"]}"#,
    ));
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    let first = service.generate_headlines(&promo).await;
    let second = service.generate_headlines(&promo).await;

    assert_eq!(first, second);
    assert_eq!(first[0], "Pasta Night");
    assert_eq!(driver.calls(), 1);
    assert_eq!(service.cache_len(), 1);

    service.clear_cache();
    service.generate_headlines(&promo).await;
    assert_eq!(driver.calls(), 2);
}

#[tokio::test]
async fn test_cache_key_ignores_case_and_image_analysis() {
    let driver = Arc::new(MockDriver::responding(r#"["A", "B", "C", "D"]"#));
    let service = service_with(&driver);

    let plain = restaurant_promotion();
    let shouty = PromotionDetails::builder()
        .discount_type(DiscountType::Percentage)
        .discount_value(20.0)
        .applicable_item("  ALL PASTA DISHES ")
        .business(
            BusinessContext::builder()
                .name("LUIGI'S")
                .category("italian restaurant")
                .description("Family owned since 1982")
                .build()
                .expect("valid business"),
        )
        .image_analysis(marquee_core::ImageAnalysisResult::default())
        .build()
        .expect("valid promotion");

    service.generate_headlines(&plain).await;
    service.generate_headlines(&shouty).await;

    assert_eq!(driver.calls(), 1);
}

#[tokio::test]
async fn test_kinds_do_not_share_cache_entries() {
    let driver = Arc::new(MockDriver::responding(r#"["one", "two"]"#));
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    service.generate_headlines(&promo).await;
    service.generate_keywords(&promo).await;

    assert_eq!(driver.calls(), 2);
    assert_eq!(service.cache_len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_identical_requests_share_one_call() {
    let driver = Arc::new(
        MockDriver::responding(r#"{"headlines": ["A", "B", "C", "D"]}"#)
            .with_delay(Duration::from_millis(100)),
    );
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    let results = join_all((0..5).map(|_| service.generate_headlines(&promo))).await;

    assert_eq!(driver.calls(), 1);
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(results[0], vec!["A", "B", "C", "D"]);
    assert_eq!(service.coalescer_stats().pending_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_failure() {
    let driver = Arc::new(MockDriver::failing(502).with_delay(Duration::from_millis(100)));
    let service = service_with(&driver);
    let event = music_event();
    let request = GenerationRequest::EventTitles(event.clone());

    let results = join_all((0..3).map(|_| service.generate_event_titles(&event))).await;

    assert_eq!(driver.calls(), 1);
    for result in results {
        assert_eq!(result, fallback(&request).into_lines());
    }
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_request_still_fills_cache() {
    let driver = Arc::new(
        MockDriver::responding(r#"{"headlines": ["A", "B", "C", "D"]}"#)
            .with_delay(Duration::from_millis(100)),
    );
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), service.generate_headlines(&promo)).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(driver.calls(), 1);
    assert_eq!(service.cache_len(), 1);
    assert_eq!(service.coalescer_stats().pending_count, 0);
    assert_eq!(service.generate_headlines(&promo).await, vec!["A", "B", "C", "D"]);
    assert_eq!(driver.calls(), 1);
}

// ============================================================================
// Parsing and normalization
// ============================================================================

#[tokio::test]
async fn test_markdown_list_is_cleaned_and_padded() {
    let driver = Arc::new(MockDriver::responding(
        "Here are your headlines:\n\
         1. **\"Pasta Perfection: 20% Off\"** (24 chars)\n\
         2. Twenty Percent Off Pasta Night - 30 characters\n\
         - 'Luigi's Pasta Deal'",
    ));
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    let headlines = service.generate_headlines(&promo).await;

    assert_eq!(headlines.len(), 4);
    assert_eq!(headlines[0], "Pasta Perfection: 20% Off");
    assert_eq!(headlines[1], "Twenty Percent Off Pasta Night");
    assert_eq!(headlines[2], "Luigi's Pasta Deal");
    let fallback_headlines = fallback(&GenerationRequest::Headlines(promo)).into_lines();
    assert!(fallback_headlines.contains(&headlines[3]));
}

#[tokio::test]
async fn test_long_results_are_truncated() {
    let terms: Vec<String> = (1..=12).map(|i| format!("Term number {}.", i)).collect();
    let driver = Arc::new(MockDriver::responding(
        serde_json::json!({ "terms": terms }).to_string(),
    ));
    let service = service_with(&driver);

    let result = service.generate_terms_conditions(&restaurant_promotion()).await;

    assert_eq!(result.len(), 8);
    assert_eq!(result, terms[..8].to_vec());
}

#[tokio::test]
async fn test_keywords_are_lowercase_and_distinct() {
    let driver = Arc::new(MockDriver::responding(
        r##"{"keywords": ["Pasta", "#pasta", "Date Night, Italian Food", "PIZZA", "pizza"]}"##,
    ));
    let service = service_with(&driver);

    let keywords = service.generate_keywords(&restaurant_promotion()).await;

    assert_eq!(keywords.len(), ContentKind::Keywords.expected_count());
    assert_eq!(&keywords[..4], &["pasta", "date night", "italian food", "pizza"]);
    assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
    let unique: HashSet<&String> = keywords.iter().collect();
    assert_eq!(unique.len(), keywords.len());
}

#[tokio::test]
async fn test_partial_descriptions_keep_labels_in_order() {
    let driver = Arc::new(MockDriver::responding(
        "**Value-Focused:** More pasta for less.\n\n**Simple & Direct:** 20% off pasta all week.",
    ));
    let service = service_with(&driver);
    let promo = restaurant_promotion();

    let descriptions = service.generate_descriptions(&promo).await;

    let titles: Vec<&str> = descriptions.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, PROMOTION_DESCRIPTION_STYLES.to_vec());
    assert_eq!(descriptions[0].text, "20% off pasta all week.");
    assert_eq!(descriptions[2].text, "More pasta for less.");

    let fallback = fallback_descriptions(&GenerationRequest::Descriptions(promo));
    assert_eq!(descriptions[1], fallback[1]);
    assert_eq!(descriptions[3], fallback[3]);
}

#[tokio::test]
async fn test_event_descriptions_from_json() {
    let driver = Arc::new(MockDriver::responding(
        r#"{"descriptions": [
            {"title": "Informative", "text": "Jazz every Friday."},
            {"title": "Exciting & Energetic", "text": "Feel the groove!"},
            {"title": "Community-Focused", "text": "Meet your neighbors."},
            {"title": "Exclusive Experience", "text": "Only 40 seats."},
            {"title": "Bonus", "text": "Extra text."}
        ]}"#,
    ));
    let service = service_with(&driver);

    let descriptions = service.generate_event_descriptions(&music_event()).await;

    assert_eq!(descriptions.len(), 4);
    let titles: Vec<&str> = descriptions.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, EVENT_DESCRIPTION_STYLES.to_vec());
    assert_eq!(descriptions[3].text, "Only 40 seats.");
}

#[tokio::test]
async fn test_plain_text_guidelines() {
    let driver = Arc::new(MockDriver::responding(
        "Guidelines:\nDoors open at 7pm.\nNo outside drinks.\nBe kind to the band.",
    ));
    let service = service_with(&driver);

    let guidelines = service.generate_event_guidelines(&music_event()).await;

    assert_eq!(guidelines.len(), 8);
    assert_eq!(guidelines[0], "Doors open at 7pm.");
    assert_eq!(guidelines[2], "Be kind to the band.");
}

// ============================================================================
// Provider request shape
// ============================================================================

#[tokio::test]
async fn test_request_carries_prompt_and_limits() {
    let driver = Arc::new(MockDriver::responding(r#"["a"]"#));
    let service = service_with(&driver);

    service.generate_headlines(&restaurant_promotion()).await;
    service.generate_event_keywords(&music_event()).await;

    let requests = driver.requests();
    assert_eq!(requests.len(), 2);

    let headline_request = &requests[0];
    assert_eq!(*headline_request.max_tokens(), Some(200));
    assert_eq!(*headline_request.temperature(), Some(0.8));
    assert_eq!(headline_request.messages().len(), 2);
    let prompt = headline_request.messages()[1].content()[0]
        .as_text()
        .expect("text prompt");
    assert!(prompt.contains("20% off"));
    assert!(prompt.contains("Luigi's"));

    assert_eq!(*requests[1].max_tokens(), Some(200));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_maintenance_evicts_expired_results() {
    let config = CopyConfig {
        cache_ttl_secs: 1,
        cleanup_interval_secs: 2,
        ..CopyConfig::default()
    };
    let driver = Arc::new(MockDriver::responding(r#"["A", "B", "C", "D"]"#));
    let service = CopyService::with_driver(config, driver.clone());

    service.generate_headlines(&restaurant_promotion()).await;
    assert_eq!(service.cache_len(), 1);

    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(service.cache_len(), 0);
    assert!(*service.status().maintenance_active());
}

#[tokio::test]
async fn test_shutdown_stops_maintenance_but_keeps_serving() {
    let service = CopyService::offline(CopyConfig::default());
    assert!(*service.status().maintenance_active());

    service.shutdown();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(!*service.status().maintenance_active());
    assert_eq!(service.generate_headlines(&restaurant_promotion()).await.len(), 4);
}

#[test]
fn test_no_runtime_means_no_maintenance() {
    let service = CopyService::offline(CopyConfig::default());
    let status = service.status();
    assert!(!*status.maintenance_active());
    assert!(!*status.available());
}

#[tokio::test]
async fn test_status_reports_provider() {
    let driver = Arc::new(MockDriver::responding("[]"));
    let service = service_with(&driver);

    let status = service.status();

    assert!(*status.available());
    assert_eq!(status.provider().as_deref(), Some("mock"));
    assert_eq!(status.model().as_deref(), Some("mock-model"));
}

#[test]
fn test_new_without_key_is_offline() {
    let service = CopyService::new(CopyConfig::default()).expect("builds");
    assert!(!service.is_available());
}

#[test]
fn test_new_with_key_is_available() {
    let config = CopyConfig {
        api_key: Some("sk-test".to_string()),
        ..CopyConfig::default()
    };
    let service = CopyService::new(config).expect("builds");
    assert!(service.is_available());
    assert_eq!(service.status().provider().as_deref(), Some("openai"));
}
