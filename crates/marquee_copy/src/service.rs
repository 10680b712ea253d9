//! The copy generation pipeline.

use crate::analysis::parse_image_analysis;
use crate::config::CopyConfig;
use crate::fallback::{fallback, fallback_descriptions, fallback_lines};
use crate::metrics::CopyMetrics;
use crate::normalize::fit_to_count;
use crate::parse::{complete_descriptions, parse_descriptions, parse_lines};
use crate::prompts::{ANALYSIS_PROMPT, ANALYSIS_SYSTEM_PROMPT, COPY_SYSTEM_PROMPT, build_prompt};
use derive_getters::Getters;
use marquee_cache::{CacheConfig, CoalescerStats, RequestCoalescer, TtlCache};
use marquee_core::{
    ContentKind, Description, EventDetails, GenerateRequest, GenerationRequest, GenerationResult,
    ImageAnalysisResult, Message, PromotionDetails,
};
use marquee_error::{BackendError, MarqueeResult};
use marquee_interface::CompletionDriver;
use marquee_models::OpenAICompatibleClient;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Snapshot of the service for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ServiceStatus {
    /// Whether a provider is configured
    available: bool,
    /// Provider name, when configured
    provider: Option<String>,
    /// Default model, when configured
    model: Option<String>,
    /// Cached results, expired ones included until cleaned
    cached_results: usize,
    /// In-flight coalesced requests
    pending_requests: usize,
    /// Whether the maintenance task is running
    maintenance_active: bool,
}

/// Generates marketing copy, never failing.
///
/// With a provider configured, requests go through a result cache and a
/// request coalescer before reaching the provider; provider output is parsed,
/// normalized and padded to the exact count for its kind. Without a provider,
/// or when the provider fails, deterministic fallback copy is returned.
///
/// A maintenance task evicting expired cache entries and stale in-flight
/// entries runs while the service is alive, when constructed inside a tokio
/// runtime.
///
/// # Examples
///
/// ```
/// use marquee_copy::{CopyConfig, CopyService};
/// use marquee_core::{BusinessContext, DiscountType, PromotionDetails};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// # rt.block_on(async {
/// let service = CopyService::offline(CopyConfig::default());
/// let promo = PromotionDetails::builder()
///     .discount_type(DiscountType::Percentage)
///     .discount_value(20.0)
///     .business(BusinessContext::with_category("restaurant"))
///     .build()
///     .unwrap();
///
/// let headlines = service.generate_headlines(&promo).await;
/// assert_eq!(headlines.len(), 4);
/// assert!(headlines.iter().all(|h| h.contains("20%")));
/// # });
/// ```
pub struct CopyService {
    driver: Option<Arc<dyn CompletionDriver>>,
    config: CopyConfig,
    cache: TtlCache<GenerationResult>,
    coalescer: RequestCoalescer<MarqueeResult<GenerationResult>>,
    metrics: CopyMetrics,
    maintenance: Option<JoinHandle<()>>,
}

impl CopyService {
    /// Builds the service, with an OpenAI-compatible client when the
    /// configuration carries an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CopyConfig) -> MarqueeResult<Self> {
        let driver: Option<Arc<dyn CompletionDriver>> = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let client = OpenAICompatibleClient::new(
                    key.trim().to_string(),
                    config.model.clone(),
                    config.base_url.clone(),
                    "openai",
                )
                .with_vision(true)
                .with_timeout(config.request_timeout())?;
                Some(Arc::new(client) as Arc<dyn CompletionDriver>)
            }
            _ => None,
        };
        Ok(Self::build(config, driver))
    }

    /// Builds the service around an existing driver.
    pub fn with_driver(config: CopyConfig, driver: Arc<dyn CompletionDriver>) -> Self {
        Self::build(config, Some(driver))
    }

    /// Builds a service that only serves fallback copy.
    pub fn offline(config: CopyConfig) -> Self {
        Self::build(config, None)
    }

    fn build(config: CopyConfig, driver: Option<Arc<dyn CompletionDriver>>) -> Self {
        match &driver {
            Some(driver) => info!(
                provider = driver.provider_name(),
                model = driver.model_name(),
                "Copy generation enabled"
            ),
            None => warn!("No completion provider configured; serving fallback copy only"),
        }

        let cache = TtlCache::new(
            CacheConfig::default()
                .with_default_ttl(config.cache_ttl())
                .with_max_size(config.cache_max_entries),
        );
        let coalescer = RequestCoalescer::new(config.pending_timeout());
        let maintenance = spawn_maintenance(cache.clone(), coalescer.clone(), config.cleanup_interval());

        Self {
            driver,
            config,
            cache,
            coalescer,
            metrics: CopyMetrics::new(),
            maintenance,
        }
    }

    /// Whether a provider is configured.
    pub fn is_available(&self) -> bool {
        self.driver.is_some()
    }

    /// Active configuration.
    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// In-flight request snapshot.
    pub fn coalescer_stats(&self) -> CoalescerStats {
        self.coalescer.stats()
    }

    /// Number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Status snapshot.
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            available: self.is_available(),
            provider: self.driver.as_ref().map(|d| d.provider_name().to_string()),
            model: self.driver.as_ref().map(|d| d.model_name().to_string()),
            cached_results: self.cache.len(),
            pending_requests: self.coalescer.stats().pending_count,
            maintenance_active: self
                .maintenance
                .as_ref()
                .is_some_and(|handle| !handle.is_finished()),
        }
    }

    /// Stops the maintenance task. Generation keeps working.
    pub fn shutdown(&self) {
        if let Some(handle) = &self.maintenance {
            handle.abort();
            debug!("Maintenance task stopped");
        }
    }

    fn max_tokens(&self, kind: ContentKind) -> u32 {
        let limits = &self.config.max_tokens;
        match kind {
            ContentKind::Headlines | ContentKind::EventTitles => limits.headlines,
            ContentKind::Descriptions | ContentKind::EventDescriptions => limits.descriptions,
            ContentKind::Keywords | ContentKind::EventKeywords => limits.keywords,
            ContentKind::Terms | ContentKind::EventGuidelines => limits.terms,
        }
    }

    /// Produces copy for any request kind.
    ///
    /// Always returns exactly the kind's expected number of items.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let kind = request.kind();
        let Some(driver) = self.driver.clone() else {
            debug!("No provider, serving fallback");
            self.metrics.record_fallback(kind);
            return fallback(request);
        };

        let key = request.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            self.metrics.record_cache_hit(kind);
            return hit;
        }

        let job = GenerationJob {
            driver,
            request: request.clone(),
            temperature: self.config.temperature,
            max_tokens: self.max_tokens(kind),
            cache: self.cache.clone(),
            key: key.clone(),
        };

        let outcome = self
            .coalescer
            .deduplicate(&key, move || job.run())
            .await
            .and_then(|result| result);
        match outcome {
            Ok(result) => {
                self.metrics.record_generated(kind);
                result
            }
            Err(e) => {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Copy generation failed, serving fallback"
                );
                self.metrics.record_fallback(kind);
                fallback(request)
            }
        }
    }

    /// Four promotion headlines.
    pub async fn generate_headlines(&self, promotion: &PromotionDetails) -> Vec<String> {
        self.generate(&GenerationRequest::Headlines(promotion.clone()))
            .await
            .into_lines()
    }

    /// Four promotion descriptions, one per style, in style order.
    pub async fn generate_descriptions(&self, promotion: &PromotionDetails) -> Vec<Description> {
        self.generate(&GenerationRequest::Descriptions(promotion.clone()))
            .await
            .into_descriptions()
    }

    /// Ten lower-cased, distinct promotion keywords.
    pub async fn generate_keywords(&self, promotion: &PromotionDetails) -> Vec<String> {
        self.generate(&GenerationRequest::Keywords(promotion.clone()))
            .await
            .into_lines()
    }

    /// Eight terms and conditions.
    pub async fn generate_terms_conditions(&self, promotion: &PromotionDetails) -> Vec<String> {
        self.generate(&GenerationRequest::Terms(promotion.clone()))
            .await
            .into_lines()
    }

    /// Four event titles.
    pub async fn generate_event_titles(&self, event: &EventDetails) -> Vec<String> {
        self.generate(&GenerationRequest::EventTitles(event.clone()))
            .await
            .into_lines()
    }

    /// Four event descriptions, one per style, in style order.
    pub async fn generate_event_descriptions(&self, event: &EventDetails) -> Vec<Description> {
        self.generate(&GenerationRequest::EventDescriptions(event.clone()))
            .await
            .into_descriptions()
    }

    /// Ten lower-cased, distinct event keywords.
    pub async fn generate_event_keywords(&self, event: &EventDetails) -> Vec<String> {
        self.generate(&GenerationRequest::EventKeywords(event.clone()))
            .await
            .into_lines()
    }

    /// Eight attendee guidelines.
    pub async fn generate_event_guidelines(&self, event: &EventDetails) -> Vec<String> {
        self.generate(&GenerationRequest::EventGuidelines(event.clone()))
            .await
            .into_lines()
    }

    /// Describes the first image with the vision model.
    ///
    /// Returns `None` without a vision-capable provider, for an empty list,
    /// and on any failure.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub async fn analyze_images(&self, images: &[String]) -> Option<ImageAnalysisResult> {
        let driver = self.driver.as_ref()?;
        let url = images.iter().map(|i| i.trim()).find(|i| !i.is_empty())?;
        if !driver.supports_vision() {
            debug!(provider = driver.provider_name(), "Provider has no vision support");
            return None;
        }

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(ANALYSIS_SYSTEM_PROMPT),
                Message::user_with_image(ANALYSIS_PROMPT, url),
            ])
            .max_tokens(Some(self.config.max_tokens.analysis))
            .temperature(Some(self.config.temperature))
            .model(Some(self.config.vision_model.clone()))
            .build()
            .ok()?;

        match driver.generate(&request).await {
            Ok(response) => {
                let analysis = parse_image_analysis(&response.text());
                if analysis.is_none() {
                    warn!("Image analysis answer could not be parsed");
                }
                analysis
            }
            Err(e) => {
                warn!(error = %e, "Image analysis failed");
                None
            }
        }
    }
}

impl Drop for CopyService {
    fn drop(&mut self) {
        if let Some(handle) = self.maintenance.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for CopyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyService")
            .field("provider", &self.driver.as_ref().map(|d| d.provider_name()))
            .field("config", &self.config)
            .field("cache", &self.cache.len())
            .field("coalescer", &self.coalescer)
            .finish()
    }
}

/// Everything one provider call needs, owned so it can outlive the caller.
struct GenerationJob {
    driver: Arc<dyn CompletionDriver>,
    request: GenerationRequest,
    temperature: f32,
    max_tokens: u32,
    cache: TtlCache<GenerationResult>,
    key: String,
}

impl GenerationJob {
    async fn run(self) -> MarqueeResult<GenerationResult> {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(COPY_SYSTEM_PROMPT),
                Message::user(build_prompt(&self.request)),
            ])
            .max_tokens(Some(self.max_tokens))
            .temperature(Some(self.temperature))
            .build()
            .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)))?;

        debug!(
            provider = self.driver.provider_name(),
            key = %self.key,
            "Requesting copy"
        );
        let response = self.driver.generate(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(BackendError::new("Provider returned no text").into());
        }

        let result = assemble_result(&self.request, &text);
        self.cache.insert(self.key, result.clone());
        Ok(result)
    }
}

/// Turns provider text into a complete result for `request`.
///
/// Parsed items come first; missing items are filled from fallback copy.
pub fn assemble_result(request: &GenerationRequest, text: &str) -> GenerationResult {
    let kind = request.kind();
    if kind.is_descriptions() {
        let styles = kind.description_styles();
        let slots = parse_descriptions(text, kind.json_field(), styles);
        let missing = slots.iter().filter(|slot| slot.is_none()).count();
        if missing > 0 {
            debug!(missing, "Filling description styles from fallback");
        }
        GenerationResult::Descriptions(complete_descriptions(
            slots,
            styles,
            &fallback_descriptions(request),
        ))
    } else {
        let items = parse_lines(text, kind.json_field());
        if items.len() < kind.expected_count() {
            debug!(parsed = items.len(), "Padding result from fallback");
        }
        GenerationResult::Lines(fit_to_count(kind, items, &fallback_lines(request)))
    }
}

fn spawn_maintenance(
    cache: TtlCache<GenerationResult>,
    coalescer: RequestCoalescer<MarqueeResult<GenerationResult>>,
    period: Duration,
) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        debug!("No tokio runtime, maintenance task not started");
        return None;
    };

    Some(runtime.spawn(async move {
        let mut ticker = tokio::time::interval(period.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let expired = cache.cleanup_expired();
            let stale = coalescer.cleanup();
            if expired > 0 || stale > 0 {
                debug!(expired, stale, "Maintenance pass");
            }
        }
    }))
}
