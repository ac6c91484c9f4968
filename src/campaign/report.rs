use super::state::{CampaignStatistics, ProspectState};
use crate::models::Result;
use crate::prospects::SkippedRow;
use crate::site_analyzer::types::BusinessCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Everything recorded about one prospect during the run.
#[derive(Debug, Clone, Serialize)]
pub struct ProspectOutcome {
    pub email: String,
    pub company_name: String,
    pub company_url: String,
    pub state: ProspectState,
    pub business_category: Option<BusinessCategory>,
    pub insights: Vec<String>,
    pub email_subject: Option<String>,
    pub personalization_score: Option<f64>,
    pub message_id: Option<String>,
}

impl ProspectOutcome {
    pub fn new(email: &str, company_name: &str, company_url: &str) -> Self {
        Self {
            email: email.to_string(),
            company_name: company_name.to_string(),
            company_url: company_url.to_string(),
            state: ProspectState::Pending,
            business_category: None,
            insights: Vec::new(),
            email_subject: None,
            personalization_score: None,
            message_id: None,
        }
    }
}

/// The exported run document. A pure snapshot of campaign state: rendering
/// it twice produces identical bytes.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub prospects_processed: usize,
    pub emails_generated: usize,
    pub emails_sent: usize,
    pub errors: usize,
    pub validation_failures: usize,
    pub success_rate: f64,
    pub average_personalization_score: f64,
    pub outcomes: Vec<ProspectOutcome>,
    pub skipped_rows: Vec<SkippedRow>,
}

impl CampaignReport {
    pub fn new(
        statistics: &CampaignStatistics,
        outcomes: Vec<ProspectOutcome>,
        skipped_rows: Vec<SkippedRow>,
        dry_run: bool,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            dry_run,
            prospects_processed: statistics.prospects_processed,
            emails_generated: statistics.emails_generated,
            emails_sent: statistics.emails_sent,
            errors: statistics.errors,
            validation_failures: statistics.validation_failures,
            success_rate: statistics.success_rate(),
            average_personalization_score: statistics.average_score(),
            outcomes,
            skipped_rows,
        }
    }

    pub fn render(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub async fn export(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, self.render(pretty)?).await?;
        info!("Exported campaign report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Stage;

    fn report() -> CampaignReport {
        let stats = CampaignStatistics {
            prospects_processed: 2,
            emails_generated: 1,
            emails_sent: 1,
            errors: 1,
            validation_failures: 0,
            score_total: 0.8,
        };
        let mut ok = ProspectOutcome::new("jane@acme.com", "Acme", "https://acme.com");
        ok.state = ProspectState::Completed;
        ok.personalization_score = Some(0.8);
        let mut failed = ProspectOutcome::new("bob@down.io", "Down", "https://down.io");
        failed.state = ProspectState::Failed {
            stage: Stage::Analysis,
            reason: "retries exhausted".to_string(),
        };
        CampaignReport::new(&stats, vec![ok, failed], Vec::new(), false)
    }

    #[test]
    fn double_render_is_byte_identical() {
        let report = report();
        assert_eq!(report.render(true).unwrap(), report.render(true).unwrap());
    }

    #[test]
    fn report_carries_statistics() {
        let report = report();
        assert_eq!(report.prospects_processed, 2);
        assert!((report.success_rate - 0.5).abs() < f64::EPSILON);
        assert!((report.average_personalization_score - 0.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn exports_to_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = report();
        report.export(&path, true).await.unwrap();
        report.export(&path, true).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render(true).unwrap());
    }
}
