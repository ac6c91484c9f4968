pub mod enrichment;
pub mod rules;
pub mod types;

use crate::models::ProspectRecord;
use crate::site_analyzer::types::TechnicalAnalysis;
use enrichment::{EnrichmentRequest, InsightEnricher};
use std::collections::HashMap;
use tracing::{info, warn};
use types::{InsightCategory, OpportunityInsight};

const MAX_SELECTED: usize = 6;
const MAX_PER_CATEGORY: usize = 2;
const MIN_FOR_DIVERSITY: usize = 3;

/// Produce the final insight set for one prospect: rule-based candidates,
/// optionally augmented by the enricher, then diversity selection. Enrichment
/// failure is logged and ignored. An empty result is a valid outcome.
pub async fn generate(
    prospect: &ProspectRecord,
    analysis: &TechnicalAnalysis,
    enricher: Option<&dyn InsightEnricher>,
) -> Vec<OpportunityInsight> {
    let mut candidates = rules::candidates(analysis);

    if let Some(enricher) = enricher {
        let request = EnrichmentRequest::build(prospect, analysis);
        match enricher.enrich(&request).await {
            Ok(extra) => candidates.extend(extra),
            Err(e) => warn!(
                "Enrichment failed for {}, using rule-based insights only: {}",
                prospect.company_name, e
            ),
        }
    }

    let selected = select(candidates);
    info!(
        "Selected {} insights for {}",
        selected.len(),
        prospect.company_name
    );
    selected
}

/// Pick a diverse subset: impact-descending stable order (generation order
/// breaks ties), unique (category, title), at most two per category, six
/// total. Fewer than three deduplicated candidates are returned as-is.
pub fn select(mut candidates: Vec<OpportunityInsight>) -> Vec<OpportunityInsight> {
    dedup_by_key(&mut candidates);

    if candidates.len() < MIN_FOR_DIVERSITY {
        return candidates;
    }

    candidates.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut per_category: HashMap<InsightCategory, usize> = HashMap::new();
    let mut selected = Vec::with_capacity(MAX_SELECTED);

    for insight in candidates {
        if selected.len() == MAX_SELECTED {
            break;
        }
        let count = per_category.entry(insight.category).or_insert(0);
        if *count < MAX_PER_CATEGORY {
            *count += 1;
            selected.push(insight);
        }
    }

    selected
}

fn dedup_by_key(candidates: &mut Vec<OpportunityInsight>) {
    let mut seen = std::collections::HashSet::new();
    candidates.retain(|i| seen.insert((i.category, i.title.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Complexity;

    fn insight(category: InsightCategory, title: &str, impact: f64) -> OpportunityInsight {
        OpportunityInsight::new(category, title, "description", impact, Complexity::Low)
    }

    #[test]
    fn fewer_than_three_candidates_pass_through() {
        let candidates = vec![
            insight(InsightCategory::DigitalMarketing, "a", 0.2),
            insight(InsightCategory::DigitalMarketing, "b", 0.9),
        ];
        let selected = select(candidates);
        assert_eq!(selected.len(), 2);
        // No reordering happens below the diversity threshold.
        assert_eq!(selected[0].title, "a");
    }

    #[test]
    fn caps_at_two_per_category_and_six_total() {
        let mut candidates = Vec::new();
        for i in 0..5 {
            candidates.push(insight(
                InsightCategory::DigitalMarketing,
                &format!("m{i}"),
                0.9,
            ));
        }
        for i in 0..5 {
            candidates.push(insight(
                InsightCategory::UserExperience,
                &format!("u{i}"),
                0.8,
            ));
        }
        for i in 0..5 {
            candidates.push(insight(
                InsightCategory::DataAnalytics,
                &format!("d{i}"),
                0.7,
            ));
        }
        let selected = select(candidates);
        assert_eq!(selected.len(), 6);
        for category in [
            InsightCategory::DigitalMarketing,
            InsightCategory::UserExperience,
            InsightCategory::DataAnalytics,
        ] {
            assert_eq!(
                selected.iter().filter(|i| i.category == category).count(),
                2
            );
        }
    }

    #[test]
    fn duplicate_category_title_pairs_collapse() {
        let candidates = vec![
            insight(InsightCategory::DigitalMarketing, "same", 0.9),
            insight(InsightCategory::DigitalMarketing, "same", 0.5),
            insight(InsightCategory::UserExperience, "same", 0.4),
            insight(InsightCategory::DataAnalytics, "other", 0.3),
        ];
        let selected = select(candidates);
        assert_eq!(selected.len(), 3);
        assert_eq!(
            selected
                .iter()
                .filter(|i| i.title == "same"
                    && i.category == InsightCategory::DigitalMarketing)
                .count(),
            1
        );
    }

    #[test]
    fn sorted_by_impact_with_ties_in_generation_order() {
        let candidates = vec![
            insight(InsightCategory::DigitalMarketing, "first-tie", 0.5),
            insight(InsightCategory::UserExperience, "top", 0.9),
            insight(InsightCategory::DataAnalytics, "second-tie", 0.5),
        ];
        let selected = select(candidates);
        assert_eq!(selected[0].title, "top");
        assert_eq!(selected[1].title, "first-tie");
        assert_eq!(selected[2].title, "second-tie");
    }

    #[test]
    fn empty_candidates_yield_empty_selection() {
        assert!(select(Vec::new()).is_empty());
    }
}
