//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use quiz_master_core::QuestionCount;
use std::str::FromStr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which generative AI backend answers quiz requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(ConfigError::InvalidValue(
                "QUIZ_PROVIDER".to_string(),
                format!("'{}' is not one of 'gemini' or 'openai'", other),
            )),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub provider: Provider,
    pub log_level: Level,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_model: String,
    pub default_question_count: QuestionCount,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = lookup("QUIZ_PROVIDER")
            .map(|value| value.parse::<Provider>())
            .transpose()?
            .unwrap_or(Provider::Gemini);

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load API Keys (as optional) ---
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());

        // --- Load Adapter-specific Settings ---
        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-3-flash-preview".to_string());
        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let openai_model = lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());

        let default_question_count = match lookup("DEFAULT_QUESTION_COUNT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|count| QuestionCount::try_from(count).ok())
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "DEFAULT_QUESTION_COUNT".to_string(),
                        format!("'{}' is not one of 5, 10, 20 or 30", raw),
                    )
                })?,
            None => QuestionCount::default(),
        };

        Ok(Self {
            provider,
            log_level,
            gemini_api_key,
            openai_api_key,
            gemini_model,
            gemini_base_url,
            openai_model,
            default_question_count,
        })
    }

    /// The API key of the selected provider, which must be present.
    pub fn provider_api_key(&self) -> Result<&str, ConfigError> {
        let (key, var) = match self.provider {
            Provider::Gemini => (&self.gemini_api_key, "GEMINI_API_KEY"),
            Provider::OpenAi => (&self.openai_api_key, "OPENAI_API_KEY"),
        };
        key.as_deref()
            .ok_or_else(|| ConfigError::MissingVar(var.to_string()))
    }
}
