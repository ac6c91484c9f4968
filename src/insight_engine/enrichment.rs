use super::types::{Complexity, InsightCategory, OpportunityInsight};
use crate::config::EnrichmentConfig;
use crate::errors::EnrichmentError;
use crate::models::ProspectRecord;
use crate::site_analyzer::types::TechnicalAnalysis;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Summary handed to the enricher; everything the model needs, nothing more.
#[derive(Debug, Clone)]
pub struct EnrichmentRequest {
    pub company_name: String,
    pub contact_name: String,
    pub job_position: String,
    pub url: String,
    pub business_category: String,
    pub tech_tags: Vec<String>,
    pub seo_failures: Vec<String>,
    pub content_excerpt: String,
}

impl EnrichmentRequest {
    pub fn build(prospect: &ProspectRecord, analysis: &TechnicalAnalysis) -> Self {
        Self {
            company_name: prospect.company_name.clone(),
            contact_name: prospect.full_name(),
            job_position: prospect.job_position.clone(),
            url: analysis.url.clone(),
            business_category: analysis.business_category.as_str().to_string(),
            tech_tags: analysis.tech_tags.clone(),
            seo_failures: analysis
                .seo_checks
                .iter()
                .filter(|c| c.status == crate::site_analyzer::types::CheckStatus::Fail)
                .map(|c| format!("{}: {}", c.name, c.detail))
                .collect(),
            content_excerpt: analysis.content_excerpt.chars().take(1000).collect(),
        }
    }
}

#[async_trait]
pub trait InsightEnricher: Send + Sync {
    async fn enrich(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<Vec<OpportunityInsight>, EnrichmentError>;
}

/// OpenAI-compatible chat-completions enricher. Failures here never fail the
/// prospect; the caller falls back to rule-based candidates.
pub struct OpenAiEnricher {
    client: Client,
    api_key: String,
    model: String,
    max_insights: usize,
}

impl OpenAiEnricher {
    pub fn new(config: &EnrichmentConfig, api_key: String) -> crate::models::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            max_insights: config.max_insights,
        })
    }

    fn build_prompt(&self, request: &EnrichmentRequest) -> String {
        format!(
            "You are a technical consultant analyzing {company} ({category}) for \
             concrete improvement opportunities.\n\
             Contact: {contact}, {position}\n\
             Website: {url}\n\
             Detected technologies: {tech}\n\
             SEO problems found: {seo}\n\
             Page content excerpt:\n{content}\n\n\
             Return a JSON array of at most {max} objects, each with fields \
             \"category\" (one of technical_infrastructure, digital_marketing, \
             process_automation, user_experience, data_analytics, \
             industry_specific), \"title\" (short), \"description\" (1-2 \
             sentences specific to this business), \"impact\" (0.0-1.0) and \
             \"complexity\" (low, medium or high). Be specific; avoid generic \
             suggestions.",
            company = request.company_name,
            category = request.business_category,
            contact = request.contact_name,
            position = request.job_position,
            url = request.url,
            tech = request.tech_tags.join(", "),
            seo = request.seo_failures.join("; "),
            content = request.content_excerpt,
            max = self.max_insights,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    category: String,
    title: String,
    description: String,
    impact: f64,
    complexity: String,
}

#[async_trait]
impl InsightEnricher for OpenAiEnricher {
    async fn enrich(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<Vec<OpportunityInsight>, EnrichmentError> {
        info!("Requesting enrichment for {}", request.company_name);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": self.build_prompt(request) }
            ],
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Malformed(format!(
                "status {status} from completion endpoint"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| EnrichmentError::Malformed("empty choices".to_string()))?;

        let insights = parse_insight_array(content, self.max_insights)?;
        debug!("Enrichment produced {} insights", insights.len());
        Ok(insights)
    }
}

/// Parse the model output as a JSON array, falling back to the outermost
/// bracketed slice when the model wraps the array in prose.
pub fn parse_insight_array(
    content: &str,
    max: usize,
) -> Result<Vec<OpportunityInsight>, EnrichmentError> {
    let raw: Vec<RawInsight> = match serde_json::from_str(content.trim()) {
        Ok(v) => v,
        Err(_) => {
            let start = content.find('[');
            let end = content.rfind(']');
            match (start, end) {
                (Some(s), Some(e)) if e > s => serde_json::from_str(&content[s..=e])
                    .map_err(|e| EnrichmentError::Malformed(e.to_string()))?,
                _ => {
                    return Err(EnrichmentError::Malformed(
                        "no JSON array in response".to_string(),
                    ))
                }
            }
        }
    };

    let insights = raw
        .into_iter()
        .filter_map(|r| {
            let category = InsightCategory::parse(&r.category)?;
            let complexity = Complexity::parse(&r.complexity)?;
            if r.title.trim().is_empty() {
                return None;
            }
            Some(OpportunityInsight::new(
                category,
                r.title.trim(),
                r.description.trim(),
                r.impact,
                complexity,
            ))
        })
        .take(max)
        .collect();

    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: &str = r#"[
        {"category": "digital_marketing", "title": "Meta tags", "description": "Fix them.", "impact": 0.7, "complexity": "low"},
        {"category": "user_experience", "title": "Navigation", "description": "Simplify.", "impact": 0.5, "complexity": "medium"}
    ]"#;

    #[test]
    fn parses_plain_array() {
        let insights = parse_insight_array(ARRAY, 4).unwrap();
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].category, InsightCategory::DigitalMarketing);
    }

    #[test]
    fn extracts_array_wrapped_in_prose() {
        let wrapped = format!("Here are the insights:\n{ARRAY}\nHope this helps!");
        let insights = parse_insight_array(&wrapped, 4).unwrap();
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn caps_at_max_and_clamps_impact() {
        let big = r#"[
            {"category": "data_analytics", "title": "A", "description": "d", "impact": 1.7, "complexity": "low"},
            {"category": "data_analytics", "title": "B", "description": "d", "impact": -0.2, "complexity": "low"},
            {"category": "data_analytics", "title": "C", "description": "d", "impact": 0.5, "complexity": "low"}
        ]"#;
        let insights = parse_insight_array(big, 2).unwrap();
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].impact, 1.0);
        assert_eq!(insights[1].impact, 0.0);
    }

    #[test]
    fn unknown_categories_are_dropped() {
        let odd = r#"[
            {"category": "blockchain", "title": "A", "description": "d", "impact": 0.5, "complexity": "low"},
            {"category": "user_experience", "title": "B", "description": "d", "impact": 0.5, "complexity": "low"}
        ]"#;
        let insights = parse_insight_array(odd, 4).unwrap();
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn prose_without_array_is_malformed() {
        let err = parse_insight_array("I could not analyze this site.", 4).unwrap_err();
        assert!(matches!(err, EnrichmentError::Malformed(_)));
    }
}
