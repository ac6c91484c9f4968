use super::types::{Complexity, InsightCategory, OpportunityInsight};
use crate::site_analyzer::signatures::{ANALYTICS_TAGS, CHAT_TAGS, CRM_TAGS, MODERN_FRONTEND_TAGS};
use crate::site_analyzer::types::{BusinessCategory, TechnicalAnalysis};

const SLOW_LOAD_MS: u64 = 3000;
const MANY_SCRIPTS: usize = 10;
const MANY_IMAGES: usize = 15;

/// Derive rule-based candidates from what the analyzer observed. An
/// all-unknown analysis produces nothing.
pub fn candidates(analysis: &TechnicalAnalysis) -> Vec<OpportunityInsight> {
    if analysis.is_unknown() {
        return Vec::new();
    }

    let mut out = Vec::new();
    infrastructure_rules(analysis, &mut out);
    marketing_rules(analysis, &mut out);
    ux_rules(analysis, &mut out);
    automation_rules(analysis, &mut out);
    analytics_rules(analysis, &mut out);
    industry_rules(analysis, &mut out);
    out
}

fn infrastructure_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    if analysis.performance.load_time_ms > SLOW_LOAD_MS {
        out.push(OpportunityInsight::new(
            InsightCategory::TechnicalInfrastructure,
            "Page speed optimization",
            format!(
                "The site takes {:.1}s to load, which costs conversions and search ranking. \
                 Caching and asset optimization would bring this under 2s.",
                analysis.performance.load_time_ms as f64 / 1000.0
            ),
            0.8,
            Complexity::Medium,
        ));
    }

    if analysis.has_tech("jquery")
        && !MODERN_FRONTEND_TAGS.iter().any(|t| analysis.has_tech(t))
    {
        out.push(OpportunityInsight::new(
            InsightCategory::TechnicalInfrastructure,
            "Frontend modernization",
            "The site runs on a legacy jQuery stack without a modern framework, \
             limiting interactivity and maintainability.",
            0.6,
            Complexity::High,
        ));
    }

    if analysis.resources.scripts > MANY_SCRIPTS {
        out.push(OpportunityInsight::new(
            InsightCategory::TechnicalInfrastructure,
            "Script bundling",
            format!(
                "{} separate script files are loaded on the landing page; bundling \
                 and deferring them would cut render-blocking time.",
                analysis.resources.scripts
            ),
            0.5,
            Complexity::Low,
        ));
    }
}

fn marketing_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    if let Some(check) = analysis.failed_check("meta_description") {
        out.push(OpportunityInsight::new(
            InsightCategory::DigitalMarketing,
            "Meta description optimization",
            format!(
                "Search snippets are weakened ({}). A tuned description directly \
                 improves click-through from search results.",
                check.detail
            ),
            0.7,
            Complexity::Low,
        ));
    }

    if let Some(check) = analysis.failed_check("title") {
        out.push(OpportunityInsight::new(
            InsightCategory::DigitalMarketing,
            "Title tag optimization",
            format!("The page title hurts search visibility ({}).", check.detail),
            0.6,
            Complexity::Low,
        ));
    }

    if analysis.failed_check("canonical").is_some() {
        out.push(OpportunityInsight::new(
            InsightCategory::DigitalMarketing,
            "Canonical URL setup",
            "No canonical link is declared, risking duplicate-content dilution \
             across URL variants.",
            0.4,
            Complexity::Low,
        ));
    }
}

fn ux_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    if analysis.failed_check("single_h1").is_some() {
        out.push(OpportunityInsight::new(
            InsightCategory::UserExperience,
            "Heading structure cleanup",
            "The page heading hierarchy is broken, which hurts both readability \
             and how search engines understand the page.",
            0.5,
            Complexity::Low,
        ));
    }

    if analysis.headings.len() < 3 && !analysis.content_excerpt.is_empty() {
        out.push(OpportunityInsight::new(
            InsightCategory::UserExperience,
            "Content hierarchy improvement",
            "The page has almost no heading structure; visitors cannot scan it \
             and bounce faster.",
            0.4,
            Complexity::Low,
        ));
    }

    if let Some(check) = analysis.failed_check("image_alts") {
        out.push(OpportunityInsight::new(
            InsightCategory::UserExperience,
            "Image accessibility",
            format!("{}; this hurts accessibility and image search traffic.", check.detail),
            0.3,
            Complexity::Low,
        ));
    }

    if analysis.resources.images > MANY_IMAGES {
        out.push(OpportunityInsight::new(
            InsightCategory::UserExperience,
            "Image optimization",
            format!(
                "{} images load on the landing page; modern formats and lazy \
                 loading would noticeably speed up the first impression.",
                analysis.resources.images
            ),
            0.5,
            Complexity::Low,
        ));
    }
}

fn automation_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    if !CRM_TAGS.iter().any(|t| analysis.has_tech(t)) {
        out.push(OpportunityInsight::new(
            InsightCategory::ProcessAutomation,
            "Lead management automation",
            "No CRM or marketing automation tooling is visible on the site; \
             inbound leads are likely handled by hand.",
            0.6,
            Complexity::Medium,
        ));
    }

    if !CHAT_TAGS.iter().any(|t| analysis.has_tech(t)) {
        out.push(OpportunityInsight::new(
            InsightCategory::ProcessAutomation,
            "Support workflow automation",
            "No live support tooling was detected; routine inquiries are \
             presumably answered one by one over email.",
            0.4,
            Complexity::Medium,
        ));
    }
}

fn analytics_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    if !ANALYTICS_TAGS.iter().any(|t| analysis.has_tech(t)) {
        out.push(OpportunityInsight::new(
            InsightCategory::DataAnalytics,
            "Visitor analytics setup",
            "No analytics tooling was detected, so visitor behavior and \
             conversion funnels are invisible to the business.",
            0.6,
            Complexity::Low,
        ));
    }
}

fn industry_rules(analysis: &TechnicalAnalysis, out: &mut Vec<OpportunityInsight>) {
    let insight = match analysis.business_category {
        BusinessCategory::Ecommerce => Some((
            "Cart recovery automation",
            "Abandoned carts without automated recovery emails are the single \
             largest recoverable revenue leak for an online store.",
            0.8,
            Complexity::Medium,
        )),
        BusinessCategory::Restaurant => Some((
            "Online ordering and reservations",
            "Direct online ordering and reservation handling keep margin that \
             third-party platforms currently take.",
            0.7,
            Complexity::Medium,
        )),
        BusinessCategory::Healthcare => Some((
            "Appointment scheduling automation",
            "Online booking with automated reminders cuts no-shows and frees \
             front-desk time.",
            0.7,
            Complexity::Medium,
        )),
        BusinessCategory::Saas => Some((
            "Onboarding flow optimization",
            "Trial-to-paid conversion hinges on guided onboarding; in-app \
             guidance and usage tracking lift activation measurably.",
            0.7,
            Complexity::Medium,
        )),
        BusinessCategory::Consulting => Some((
            "Lead qualification workflow",
            "An automated intake and qualification flow lets the team spend \
             time only on prospects that fit.",
            0.6,
            Complexity::Medium,
        )),
        BusinessCategory::Other => None,
    };

    if let Some((title, description, impact, complexity)) = insight {
        out.push(OpportunityInsight::new(
            InsightCategory::IndustrySpecific,
            title,
            description,
            impact,
            complexity,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_analyzer::types::{PerformanceMetrics, SeoCheck};

    fn base_analysis() -> TechnicalAnalysis {
        TechnicalAnalysis {
            url: "https://acme.com".to_string(),
            title: "Acme".to_string(),
            meta_description: String::new(),
            headings: vec!["One".into(), "Two".into(), "Three".into()],
            tech_tags: vec!["google-analytics".into(), "hubspot".into()],
            seo_checks: vec![SeoCheck::pass("title"), SeoCheck::pass("meta_description")],
            performance: PerformanceMetrics {
                page_bytes: 100_000,
                load_time_ms: 1200,
            },
            resources: Default::default(),
            business_category: BusinessCategory::Other,
            content_excerpt: "some content".to_string(),
        }
    }

    #[test]
    fn unknown_analysis_yields_no_candidates() {
        let analysis = TechnicalAnalysis::unknown("https://down.example");
        assert!(candidates(&analysis).is_empty());
    }

    #[test]
    fn missing_meta_description_triggers_marketing_insight() {
        let mut analysis = base_analysis();
        analysis.seo_checks = vec![SeoCheck::fail("meta_description", "missing meta description")];
        let found = candidates(&analysis);
        assert!(found
            .iter()
            .any(|i| i.category == InsightCategory::DigitalMarketing
                && i.title == "Meta description optimization"));
    }

    #[test]
    fn slow_load_triggers_infrastructure_insight() {
        let mut analysis = base_analysis();
        analysis.performance.load_time_ms = 5200;
        let found = candidates(&analysis);
        assert!(found
            .iter()
            .any(|i| i.category == InsightCategory::TechnicalInfrastructure));
    }

    #[test]
    fn ecommerce_gets_industry_insight() {
        let mut analysis = base_analysis();
        analysis.business_category = BusinessCategory::Ecommerce;
        let found = candidates(&analysis);
        assert!(found
            .iter()
            .any(|i| i.category == InsightCategory::IndustrySpecific));
    }

    #[test]
    fn impacts_stay_in_range() {
        let mut analysis = base_analysis();
        analysis.business_category = BusinessCategory::Ecommerce;
        analysis.performance.load_time_ms = 9000;
        analysis.tech_tags.clear();
        for insight in candidates(&analysis) {
            assert!(insight.impact >= 0.0 && insight.impact <= 1.0);
        }
    }
}
