//! Water Judge server
//!
//! Loads `.env`, derives the judge identity from the mnemonic and serves the
//! judge endpoints.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use water_judge::agent::{OpenAICompatibleProvider, ReportCache, SamplingParams};
use water_judge::config::{JudgeConfig, OutputMode};
use water_judge::judge::{Analyzer, ReportFinalizer};
use water_judge::orchestrator::{JudgeService, WalletSigner};
use water_judge::server::{run_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = JudgeConfig::from_env().context("Refusing to start")?;
    info!("⚙️ Config: {:?}", config);

    let signer = WalletSigner::from_mnemonic(&config.mnemonic)
        .context("Could not derive judge identity")?;

    let sampling = match config.output_mode {
        OutputMode::Simplified => SamplingParams::COMPACT,
        OutputMode::Comprehensive => SamplingParams::EXTENDED,
    };
    let provider =
        OpenAICompatibleProvider::new(config.base_url.clone(), Some(config.api_key.clone()))
            .with_sampling(sampling)
        .with_request_timeout(config.completion_timeout)?;

    let analyzer = Analyzer::new(Arc::new(provider), config.model.clone(), config.output_mode)
        .with_timeout(config.completion_timeout);
    let finalizer = ReportFinalizer::new(analyzer).with_cache(Arc::new(ReportCache::new()));
    let service = JudgeService::new(finalizer, Arc::new(signer));

    info!("🧪 Judging with {} ({} mode)", config.model, config.output_mode);
    run_server(AppState::new(service), &config.bind_addr()).await
}
