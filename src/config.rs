use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub delivery: DeliveryConfig,
    pub enrichment: EnrichmentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Pause between prospects when an email was generated.
    pub delay_between_prospects_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Minimum personalization score an email must reach to be sent.
    pub min_personalization_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub model: String,
    pub timeout_seconds: u64,
    pub max_insights: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                timeout_seconds: 10,
                max_retries: 3,
                retry_backoff_ms: 2000,
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                    .to_string(),
            },
            delivery: DeliveryConfig {
                delay_between_prospects_ms: 30_000,
                max_retries: 3,
                retry_backoff_ms: 3000,
                min_personalization_score: 0.3,
            },
            enrichment: EnrichmentConfig {
                enabled: true,
                model: "gpt-4o-mini".to_string(),
                timeout_seconds: 30,
                max_insights: 4,
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
            },
        }
    }
}

pub async fn load_config(path: &str) -> crate::models::Result<Config> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Credentials pulled from the environment at startup. Anything the selected
/// mode needs and cannot find aborts the run before any prospect is touched.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub mailgun_api_key: Option<String>,
    pub mailgun_domain: String,
    pub from_email: String,
    pub from_name: String,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            mailgun_api_key: std::env::var("MAILGUN_API_KEY").ok(),
            mailgun_domain: std::env::var("MAILGUN_DOMAIN")
                .unwrap_or_else(|_| "mail.example.com".to_string()),
            from_email: std::env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "outreach@mail.example.com".to_string()),
            from_name: std::env::var("FROM_NAME").unwrap_or_else(|_| "Outreach".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
        }
    }

    /// Live sending needs Mailgun credentials; enrichment (when enabled)
    /// needs the model key. Dry-run without enrichment needs nothing.
    pub fn validate(
        &self,
        live_send: bool,
        enrichment_enabled: bool,
    ) -> std::result::Result<(), ConfigError> {
        if live_send && self.mailgun_api_key.is_none() {
            return Err(ConfigError::MissingEnv("MAILGUN_API_KEY"));
        }
        if enrichment_enabled && self.openai_api_key.is_none() {
            return Err(ConfigError::MissingEnv("OPENAI_API_KEY"));
        }
        Ok(())
    }
}
