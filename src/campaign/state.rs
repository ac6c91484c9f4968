use crate::errors::Stage;
use serde::Serialize;

/// Where a prospect currently is in the pipeline. Transitions only move
/// forward; terminal states are Completed, DryRun and Failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProspectState {
    Pending,
    Analyzing,
    GeneratingInsights,
    GeneratingEmail,
    Sending,
    Completed,
    DryRun,
    Failed { stage: Stage, reason: String },
}

impl ProspectState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProspectState::Completed | ProspectState::DryRun | ProspectState::Failed { .. }
        )
    }
}

/// Run counters, mutated exactly once per terminal transition and never
/// rolled back.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignStatistics {
    pub prospects_processed: usize,
    pub emails_generated: usize,
    pub emails_sent: usize,
    pub errors: usize,
    pub validation_failures: usize,
    #[serde(skip)]
    pub score_total: f64,
}

impl CampaignStatistics {
    pub fn average_score(&self) -> f64 {
        if self.emails_generated == 0 {
            0.0
        } else {
            self.score_total / self.emails_generated as f64
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.prospects_processed == 0 {
            0.0
        } else {
            (self.prospects_processed - self.errors) as f64 / self.prospects_processed as f64
        }
    }
}
