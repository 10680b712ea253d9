//! Counters for the copy pipeline.
//!
//! With the `metrics` feature the counters are OpenTelemetry instruments on
//! the global meter; without it every method is a no-op.

use marquee_core::ContentKind;

#[cfg(feature = "metrics")]
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Meter},
};

/// Pipeline outcome counters, labelled by content kind.
#[cfg(feature = "metrics")]
#[derive(Clone)]
pub struct CopyMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Results produced from provider output
    generated: Counter<u64>,
    /// Results produced entirely from fallback templates
    fallbacks: Counter<u64>,
    /// Results served from the cache
    cache_hits: Counter<u64>,
}

#[cfg(feature = "metrics")]
impl CopyMetrics {
    /// Create the instruments on the global meter.
    pub fn new() -> Self {
        use tracing::debug;
        let meter = global::meter("marquee_copy");

        let generated = meter
            .u64_counter("copy.generated")
            .with_description("Copy results produced from provider output")
            .build();
        let fallbacks = meter
            .u64_counter("copy.fallbacks")
            .with_description("Copy results produced from fallback templates")
            .build();
        let cache_hits = meter
            .u64_counter("copy.cache_hits")
            .with_description("Copy results served from the cache")
            .build();
        debug!("CopyMetrics instruments created");

        Self {
            _meter: meter,
            generated,
            fallbacks,
            cache_hits,
        }
    }

    fn labels(kind: ContentKind) -> [KeyValue; 1] {
        [KeyValue::new("kind", kind.to_string())]
    }

    /// Record a provider-backed result.
    pub fn record_generated(&self, kind: ContentKind) {
        self.generated.add(1, &Self::labels(kind));
    }

    /// Record a fallback result.
    pub fn record_fallback(&self, kind: ContentKind) {
        self.fallbacks.add(1, &Self::labels(kind));
    }

    /// Record a cache hit.
    pub fn record_cache_hit(&self, kind: ContentKind) {
        self.cache_hits.add(1, &Self::labels(kind));
    }
}

#[cfg(feature = "metrics")]
impl std::fmt::Debug for CopyMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyMetrics").finish_non_exhaustive()
    }
}

/// Pipeline outcome counters (no-op without the `metrics` feature).
#[cfg(not(feature = "metrics"))]
#[derive(Debug, Clone)]
pub struct CopyMetrics;

#[cfg(not(feature = "metrics"))]
impl CopyMetrics {
    /// Create the no-op counters.
    pub fn new() -> Self {
        Self
    }

    /// Record a provider-backed result.
    pub fn record_generated(&self, _kind: ContentKind) {}

    /// Record a fallback result.
    pub fn record_fallback(&self, _kind: ContentKind) {}

    /// Record a cache hit.
    pub fn record_cache_hit(&self, _kind: ContentKind) {}
}

impl Default for CopyMetrics {
    fn default() -> Self {
        Self::new()
    }
}
