use thiserror::Error;

/// Pipeline stage a failure is attributed to in the campaign report.
/// Insight generation has no variant: an empty insight set is a valid result
/// and enrichment errors are swallowed, so that stage cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Analysis,
    EmailGeneration,
    Delivery,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Analysis => write!(f, "analysis"),
            Stage::EmailGeneration => write!(f, "email_generation"),
            Stage::Delivery => write!(f, "delivery"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("non-success status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("retries exhausted for {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("delivery request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected message: {0}")]
    Rejected(String),
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("enrichment request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("enrichment response unusable: {0}")]
    Malformed(String),
}

/// Why the email stage refused to produce content for a prospect.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
pub enum GenerationError {
    #[error("no-insights")]
    NoInsights,
    #[error("banned phrase in body: {0:?}")]
    BannedPhrase(String),
    #[error("personalization score {score:.2} below minimum {minimum:.2}")]
    LowScore { score: f64, minimum: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable required")]
    MissingEnv(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
