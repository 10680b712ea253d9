//! Command dispatch.

use super::{Cli, Commands};
use anyhow::Context;
use marquee_copy::{CopyConfig, CopyService};
use marquee_core::{GenerationRequest, ImageAnalysisResult};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Loads configuration, builds the service and runs the command.
///
/// Returns the command's output as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the HTTP client
/// cannot be built, or the arguments do not form a valid request. Provider
/// failures are not errors; they produce template copy.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config =
        CopyConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.offline {
        info!("Offline mode, API key ignored");
        config.api_key = None;
    }

    let service = CopyService::new(config).context("Failed to build copy service")?;
    let output = execute(&service, cli.command).await;
    service.shutdown();

    Ok(serde_json::to_string_pretty(&output?)?)
}

/// Runs one command against `service`.
#[instrument(skip_all)]
pub async fn execute(service: &CopyService, command: Commands) -> anyhow::Result<Value> {
    let request = match command {
        Commands::Status => return Ok(serde_json::to_value(service.status())?),
        Commands::Analyze(args) => {
            return Ok(serde_json::to_value(service.analyze_images(&args.images).await)?);
        }
        Commands::Headlines(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::Headlines(args.to_details(analysis)?)
        }
        Commands::Descriptions(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::Descriptions(args.to_details(analysis)?)
        }
        Commands::Keywords(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::Keywords(args.to_details(analysis)?)
        }
        Commands::Terms(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::Terms(args.to_details(analysis)?)
        }
        Commands::EventTitles(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::EventTitles(args.to_details(analysis)?)
        }
        Commands::EventDescriptions(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::EventDescriptions(args.to_details(analysis)?)
        }
        Commands::EventKeywords(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::EventKeywords(args.to_details(analysis)?)
        }
        Commands::EventGuidelines(args) => {
            let analysis = analyze(service, &args.images).await;
            GenerationRequest::EventGuidelines(args.to_details(analysis)?)
        }
    };

    debug!(kind = %request.kind(), "Generating copy");
    Ok(serde_json::to_value(service.generate(&request).await)?)
}

async fn analyze(service: &CopyService, images: &[String]) -> Option<ImageAnalysisResult> {
    if images.is_empty() {
        return None;
    }
    service.analyze_images(images).await
}
