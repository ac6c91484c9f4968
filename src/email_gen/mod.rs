pub mod templates;

use crate::errors::GenerationError;
use crate::insight_engine::types::{InsightCategory, OpportunityInsight};
use crate::models::ProspectRecord;
use crate::site_analyzer::types::BusinessCategory;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

const MAX_FOCUS_INSIGHTS: usize = 2;

/// Generic phrases the quality gate refuses to send. Matching is
/// case-insensitive on the assembled body.
const BANNED_PHRASES: &[&str] = &[
    "ai chatbot",
    "ai-powered chatbot",
    "chatbot integration",
    "customer service chatbot",
    "customer engagement",
];

/// Terms that prove the body actually talks about its focus category.
const CATEGORY_TERMS: &[(InsightCategory, &[&str])] = &[
    (
        InsightCategory::TechnicalInfrastructure,
        &["performance", "infrastructure", "load"],
    ),
    (
        InsightCategory::DigitalMarketing,
        &["search", "seo", "marketing", "visibility"],
    ),
    (
        InsightCategory::ProcessAutomation,
        &["automation", "automate", "manual", "workflow"],
    ),
    (
        InsightCategory::UserExperience,
        &["experience", "usability", "navigation", "accessibility"],
    ),
    (
        InsightCategory::DataAnalytics,
        &["analytics", "tracking", "data"],
    ),
    (
        InsightCategory::IndustrySpecific,
        &[
            "industry", "cart", "order", "reservation", "booking", "scheduling", "onboarding",
            "qualification", "peers",
        ],
    ),
];

/// A validated outreach email, ready for the transport.
#[derive(Debug, Clone, Serialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
    pub focus_category: InsightCategory,
    pub personalization_score: f64,
    pub referenced_insights: Vec<String>,
}

/// Assemble and validate the email for one prospect. The insight slice is
/// expected in selection order (impact descending); the top insight's
/// category becomes the focus.
pub fn generate(
    prospect: &ProspectRecord,
    business: BusinessCategory,
    insights: &[OpportunityInsight],
    sender_name: &str,
    min_score: f64,
) -> Result<EmailContent, GenerationError> {
    let focus = insights.first().ok_or(GenerationError::NoInsights)?.category;

    let focus_insights: Vec<&OpportunityInsight> = insights
        .iter()
        .filter(|i| i.category == focus)
        .take(MAX_FOCUS_INSIGHTS)
        .collect();
    let secondary = insights.iter().find(|i| i.category != focus);

    let template = templates::lookup(business, focus);
    let subject = fill(template.subject, prospect);
    let body = assemble_body(template, prospect, &focus_insights, secondary, sender_name);

    let body_lower = body.to_lowercase();
    for phrase in BANNED_PHRASES {
        if body_lower.contains(phrase) {
            return Err(GenerationError::BannedPhrase((*phrase).to_string()));
        }
    }

    let mut referenced: Vec<&OpportunityInsight> = focus_insights.clone();
    if let Some(s) = secondary {
        referenced.push(s);
    }
    let score = personalization_score(&body_lower, prospect, &referenced, focus);

    if score < min_score {
        return Err(GenerationError::LowScore {
            score,
            minimum: min_score,
        });
    }

    info!(
        "Generated email for {} (focus {}, score {:.2})",
        prospect.company_name,
        focus.as_str(),
        score
    );

    Ok(EmailContent {
        subject,
        body,
        focus_category: focus,
        personalization_score: score,
        referenced_insights: referenced.iter().map(|i| i.title.clone()).collect(),
    })
}

fn fill(template: &str, prospect: &ProspectRecord) -> String {
    template
        .replace("{company}", &prospect.company_name)
        .replace("{first_name}", &prospect.first_name)
}

fn assemble_body(
    template: &templates::EmailTemplate,
    prospect: &ProspectRecord,
    focus_insights: &[&OpportunityInsight],
    secondary: Option<&OpportunityInsight>,
    sender_name: &str,
) -> String {
    let mut paragraphs = vec![
        format!("Hi {},", prospect.first_name),
        fill(template.hook, prospect),
    ];

    for insight in focus_insights {
        if !insight.description.is_empty() {
            paragraphs.push(insight.description.clone());
        }
    }

    if let Some(insight) = secondary {
        if !insight.description.is_empty() {
            paragraphs.push(format!("On a separate note: {}", insight.description));
        }
    }

    paragraphs.push(fill(template.invitation, prospect));
    paragraphs.push(format!("Best regards,\n{sender_name}"));

    paragraphs.join("\n\n")
}

/// Weighted score in [0, 1]: how specific the filled content is (0.4), how
/// many distinct insight categories the body references (0.1 each, up to
/// 0.3), whether the company is named (0.15) and whether the focus category's
/// vocabulary actually appears (0.15).
fn personalization_score(
    body_lower: &str,
    prospect: &ProspectRecord,
    referenced: &[&OpportunityInsight],
    focus: InsightCategory,
) -> f64 {
    let mut score = 0.0;

    // Specificity: name, company, and each referenced insight carrying a
    // substantial description count as filled slots.
    let mut slots = 2.0;
    let mut filled = 0.0;
    if !prospect.first_name.is_empty() {
        filled += 1.0;
    }
    if !prospect.company_name.is_empty() {
        filled += 1.0;
    }
    for insight in referenced {
        slots += 1.0;
        if insight.description.len() > 40 {
            filled += 1.0;
        }
    }
    score += 0.4 * (filled / slots);

    let categories: HashSet<InsightCategory> = referenced.iter().map(|i| i.category).collect();
    score += (0.1 * categories.len() as f64).min(0.3);

    if body_lower.contains(&prospect.company_name.to_lowercase()) {
        score += 0.15;
    }

    let terms = CATEGORY_TERMS
        .iter()
        .find(|(c, _)| *c == focus)
        .map(|(_, t)| *t)
        .unwrap_or(&[]);
    if terms.iter().any(|t| body_lower.contains(t)) {
        score += 0.15;
    }

    score.clamp(0.0, 1.0)
}
