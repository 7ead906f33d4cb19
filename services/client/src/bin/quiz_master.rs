//! services/client/src/bin/quiz_master.rs

use async_openai::{config::OpenAIConfig, Client};
use quiz_client_lib::{
    adapters::{GeminiQuizAdapter, OpenAiQuizAdapter},
    config::{Config, Provider},
    error::ClientError,
    ui::{run_terminal, QuizRuntime},
};
use quiz_master_core::{QuizGateway, QuizGenerationService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    // Logs go to stderr so they never interleave with the quiz screens on stdout.
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Using the {:?} provider.", config.provider);

    // --- 2. Initialize the Provider Adapter ---
    let api_key = config.provider_api_key()?.to_string();
    let provider: Arc<dyn QuizGenerationService> = match config.provider {
        Provider::Gemini => Arc::new(GeminiQuizAdapter::new(
            reqwest::Client::new(),
            api_key,
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
        )),
        Provider::OpenAi => {
            let openai_config = OpenAIConfig::new().with_api_key(api_key);
            Arc::new(OpenAiQuizAdapter::new(
                Client::with_config(openai_config),
                config.openai_model.clone(),
            ))
        }
    };

    // --- 3. Build the Runtime & Start the Session ---
    let gateway = QuizGateway::new(provider);
    let (runtime, completions) = QuizRuntime::new(gateway, config.default_question_count);

    info!("Starting interactive session.");
    run_terminal(runtime, completions).await
}
