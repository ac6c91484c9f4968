use serde::{Deserialize, Serialize};

/// Business category a site classifies into. Declaration order doubles as the
/// priority order when keyword scores tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    Ecommerce,
    Saas,
    Consulting,
    Healthcare,
    Restaurant,
    Other,
}

impl BusinessCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessCategory::Ecommerce => "e-commerce",
            BusinessCategory::Saas => "SaaS",
            BusinessCategory::Consulting => "consulting",
            BusinessCategory::Healthcare => "healthcare",
            BusinessCategory::Restaurant => "restaurant",
            BusinessCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Unknown,
}

/// One SEO finding. `detail` explains a Fail; empty for Pass/Unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl SeoCheck {
    pub fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            detail: String::new(),
        }
    }

    pub fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }

    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Unknown,
            detail: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceCounts {
    pub scripts: usize,
    pub stylesheets: usize,
    pub images: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub page_bytes: u64,
    pub load_time_ms: u64,
}

/// What the analyzer learned about one site. A failed fetch or empty markup
/// still produces one of these with every finding Unknown and category Other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<String>,
    pub tech_tags: Vec<String>,
    pub seo_checks: Vec<SeoCheck>,
    pub performance: PerformanceMetrics,
    pub resources: ResourceCounts,
    pub business_category: BusinessCategory,
    pub content_excerpt: String,
}

impl TechnicalAnalysis {
    /// Analysis for a site we could not read. Everything unknown, nothing
    /// invented.
    pub fn unknown(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            meta_description: String::new(),
            headings: Vec::new(),
            tech_tags: Vec::new(),
            seo_checks: super::SEO_CHECK_NAMES
                .iter()
                .map(|name| SeoCheck::unknown(name))
                .collect(),
            performance: PerformanceMetrics::default(),
            resources: ResourceCounts::default(),
            business_category: BusinessCategory::Other,
            content_excerpt: String::new(),
        }
    }

    pub fn has_tech(&self, tag: &str) -> bool {
        self.tech_tags.iter().any(|t| t == tag)
    }

    pub fn failed_check(&self, name: &str) -> Option<&SeoCheck> {
        self.seo_checks
            .iter()
            .find(|c| c.name == name && c.status == CheckStatus::Fail)
    }

    /// True when nothing useful was extracted, i.e. every check is Unknown.
    pub fn is_unknown(&self) -> bool {
        self.seo_checks
            .iter()
            .all(|c| c.status == CheckStatus::Unknown)
    }
}
