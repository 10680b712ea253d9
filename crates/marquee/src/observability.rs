//! Metrics export for the `marquee` binary.
//!
//! The exporter is chosen from `OTEL_EXPORTER` (`stdout`, the default, or
//! `otlp`). OTLP sends over HTTP to `OTEL_EXPORTER_OTLP_ENDPOINT`. Exporting
//! requires the `metrics` feature; without it only the selection logic is
//! compiled.

use marquee_error::ConfigError;

/// OTLP endpoint used when `OTEL_EXPORTER_OTLP_ENDPOINT` is unset.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318";

/// Where metrics are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsExporter {
    /// Periodic dumps to stdout
    Stdout,
    /// OTLP over HTTP to the given endpoint
    Otlp(String),
}

impl MetricsExporter {
    /// Reads the exporter choice from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `OTEL_EXPORTER` names an unknown exporter.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::select(
            std::env::var("OTEL_EXPORTER").ok().as_deref(),
            std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
        )
    }

    /// Chooses an exporter from an exporter name and an optional endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::observability::{DEFAULT_OTLP_ENDPOINT, MetricsExporter};
    ///
    /// assert_eq!(MetricsExporter::select(None, None).unwrap(), MetricsExporter::Stdout);
    /// assert_eq!(
    ///     MetricsExporter::select(Some("OTLP"), None).unwrap(),
    ///     MetricsExporter::Otlp(DEFAULT_OTLP_ENDPOINT.to_string())
    /// );
    /// assert!(MetricsExporter::select(Some("prometheus"), None).is_err());
    /// ```
    pub fn select(exporter: Option<&str>, endpoint: Option<String>) -> Result<Self, ConfigError> {
        let name = exporter.map(|e| e.trim().to_lowercase()).unwrap_or_default();
        match name.as_str() {
            "" | "stdout" => Ok(Self::Stdout),
            "otlp" => Ok(Self::Otlp(
                endpoint
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string()),
            )),
            other => Err(ConfigError::invalid_field(
                "OTEL_EXPORTER",
                format!("must be \"stdout\" or \"otlp\", got \"{}\"", other),
            )),
        }
    }
}

#[cfg(feature = "metrics")]
mod export {
    use super::MetricsExporter;
    use opentelemetry::{KeyValue, global};
    use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
    use opentelemetry_sdk::Resource;
    use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
    use opentelemetry_stdout::MetricExporter as StdoutExporter;
    use std::sync::OnceLock;
    use std::time::Duration;
    use tracing::{info, instrument, warn};

    static PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

    /// Registers a global meter provider exporting every `interval`.
    ///
    /// Calling it again after a successful registration has no effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the OTLP exporter cannot be built.
    #[instrument(skip(exporter))]
    pub fn init_metrics(
        service_name: &'static str,
        interval: Duration,
        exporter: &MetricsExporter,
    ) -> anyhow::Result<()> {
        if PROVIDER.get().is_some() {
            return Ok(());
        }

        let reader = match exporter {
            MetricsExporter::Otlp(endpoint) => {
                info!(endpoint = %endpoint, "Exporting metrics over OTLP");
                let otlp = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| anyhow::anyhow!("Failed to create OTLP exporter: {}", e))?;
                PeriodicReader::builder(otlp).with_interval(interval).build()
            }
            MetricsExporter::Stdout => {
                info!("Exporting metrics to stdout");
                PeriodicReader::builder(StdoutExporter::default())
                    .with_interval(interval)
                    .build()
            }
        };

        let provider = SdkMeterProvider::builder()
            .with_resource(
                Resource::builder_empty()
                    .with_attributes([KeyValue::new("service.name", service_name)])
                    .build(),
            )
            .with_reader(reader)
            .build();
        global::set_meter_provider(provider.clone());
        if PROVIDER.set(provider).is_err() {
            warn!("Meter provider was registered concurrently");
        }
        Ok(())
    }

    /// Flushes pending metrics and stops the exporter.
    pub fn shutdown_metrics() {
        if let Some(provider) = PROVIDER.get()
            && let Err(e) = provider.shutdown()
        {
            warn!(error = %e, "Meter provider shutdown failed");
        }
    }
}

#[cfg(feature = "metrics")]
pub use export::{init_metrics, shutdown_metrics};
