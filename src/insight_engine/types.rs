use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    TechnicalInfrastructure,
    DigitalMarketing,
    ProcessAutomation,
    UserExperience,
    DataAnalytics,
    IndustrySpecific,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::TechnicalInfrastructure => "technical infrastructure",
            InsightCategory::DigitalMarketing => "digital marketing",
            InsightCategory::ProcessAutomation => "process automation",
            InsightCategory::UserExperience => "user experience",
            InsightCategory::DataAnalytics => "data analytics",
            InsightCategory::IndustrySpecific => "industry specific",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "technical_infrastructure" => Some(InsightCategory::TechnicalInfrastructure),
            "digital_marketing" => Some(InsightCategory::DigitalMarketing),
            "process_automation" => Some(InsightCategory::ProcessAutomation),
            "user_experience" => Some(InsightCategory::UserExperience),
            "data_analytics" => Some(InsightCategory::DataAnalytics),
            "industry_specific" => Some(InsightCategory::IndustrySpecific),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Complexity::Low),
            "medium" => Some(Complexity::Medium),
            "high" => Some(Complexity::High),
            _ => None,
        }
    }
}

/// A concrete improvement opportunity for one prospect. Impact stays in
/// [0, 1]; the selection step enforces uniqueness of (category, title).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityInsight {
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    pub impact: f64,
    pub complexity: Complexity,
}

impl OpportunityInsight {
    pub fn new(
        category: InsightCategory,
        title: &str,
        description: impl Into<String>,
        impact: f64,
        complexity: Complexity,
    ) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: description.into(),
            impact: impact.clamp(0.0, 1.0),
            complexity,
        }
    }
}
