use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One row of the prospect CSV after normalization. Immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectRecord {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "First name")]
    pub first_name: String,
    #[serde(rename = "Last name")]
    pub last_name: String,
    #[serde(rename = "LinkedIn")]
    pub linkedin: String,
    #[serde(rename = "Job position")]
    pub job_position: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Company name")]
    pub company_name: String,
    #[serde(rename = "Company URL")]
    pub company_url: String,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap())
}

impl ProspectRecord {
    /// Trim fields, lowercase the email, title-case names and normalize the
    /// company URL. Run once on load, before validation.
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        self.first_name = title_case(self.first_name.trim());
        self.last_name = title_case(self.last_name.trim());
        self.job_position = self.job_position.trim().to_string();
        self.country = self.country.trim().to_string();
        self.company_name = self.company_name.trim().to_string();
        self.company_url = clean_url(&self.company_url);
    }

    pub fn is_valid(&self) -> bool {
        if self.email.is_empty()
            || self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.company_name.is_empty()
            || self.company_url.is_empty()
        {
            return false;
        }

        if !email_regex().is_match(&self.email) {
            return false;
        }

        url::Url::parse(&self.company_url).is_ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Add a scheme when missing and strip the trailing slash.
pub fn clean_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return String::new();
    }

    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
