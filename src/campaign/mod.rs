pub mod report;
pub mod state;

use crate::config::Config;
use crate::email_gen;
use crate::email_sender::{send_with_retries, EmailTransport, OutgoingEmail};
use crate::errors::Stage;
use crate::fetcher::PageFetcher;
use crate::insight_engine::{self, enrichment::InsightEnricher};
use crate::models::{ProspectRecord, Result};
use crate::prospects::ProspectLoad;
use crate::site_analyzer::{self, types::PerformanceMetrics};
use report::{CampaignReport, ProspectOutcome};
use state::{CampaignStatistics, ProspectState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CampaignOptions {
    /// Generate everything but never hand emails to the transport.
    pub dry_run: bool,
    /// Like dry_run, but only the statistics block is printed at the end.
    pub stats_only: bool,
    /// Overrides the configured inter-prospect delay when set.
    pub delay_ms: Option<u64>,
    /// Stop before starting prospect N+1.
    pub limit: Option<usize>,
    pub sender_name: String,
}

impl CampaignOptions {
    fn live_send(&self) -> bool {
        !self.dry_run && !self.stats_only
    }
}

/// Sequential campaign runner. One prospect at a time through the pipeline;
/// a failure isolates to its prospect and the batch keeps going.
pub struct Campaign<'a> {
    config: &'a Config,
    fetcher: &'a dyn PageFetcher,
    enricher: Option<&'a dyn InsightEnricher>,
    transport: Option<&'a dyn EmailTransport>,
    options: CampaignOptions,
    statistics: CampaignStatistics,
    outcomes: Vec<ProspectOutcome>,
    delays_applied: usize,
    /// Set on ctrl-c. Checked only between prospects, so the one in flight
    /// always reaches a terminal state before the campaign stops.
    interrupted: Arc<AtomicBool>,
}

impl<'a> Campaign<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn PageFetcher,
        enricher: Option<&'a dyn InsightEnricher>,
        transport: Option<&'a dyn EmailTransport>,
        options: CampaignOptions,
    ) -> Self {
        Self {
            config,
            fetcher,
            enricher,
            transport,
            options,
            statistics: CampaignStatistics::default(),
            outcomes: Vec::new(),
            delays_applied: 0,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self, load: ProspectLoad) -> Result<CampaignReport> {
        self.statistics.validation_failures = load.skipped.len();

        let total = match self.options.limit {
            Some(limit) => load.prospects.len().min(limit),
            None => load.prospects.len(),
        };
        info!(
            "Starting campaign over {} prospects (dry_run={}, stats_only={})",
            total, self.options.dry_run, self.options.stats_only
        );

        {
            let interrupted = self.interrupted.clone();
            tokio::spawn(async move {
                if signal::ctrl_c().await.is_ok() {
                    interrupted.store(true, Ordering::SeqCst);
                }
            });
        }

        for (index, prospect) in load.prospects.iter().take(total).enumerate() {
            if self.interrupted.load(Ordering::SeqCst) {
                warn!("Interrupted, stopping after {} prospects", index);
                println!("🛑 Interrupted - exporting what was processed so far");
                break;
            }

            println!(
                "📋 Processing {}/{}: {} ({})",
                index + 1,
                total,
                prospect.company_name,
                prospect.email
            );

            let outcome = self.process_prospect(prospect).await;
            let email_generated = outcome.personalization_score.is_some();
            self.finish(outcome);

            // Rate limiting: only after a prospect that produced an email,
            // never after the last one, and not when shutdown is pending.
            if email_generated && index + 1 < total && !self.interrupted.load(Ordering::SeqCst) {
                self.pause_between_prospects().await;
            }
        }

        self.log_final_statistics();
        Ok(CampaignReport::new(
            &self.statistics,
            self.outcomes,
            load.skipped,
            !self.options.live_send(),
        ))
    }

    async fn process_prospect(&self, prospect: &ProspectRecord) -> ProspectOutcome {
        let mut outcome = ProspectOutcome::new(
            &prospect.email,
            &prospect.company_name,
            &prospect.company_url,
        );

        outcome.state = ProspectState::Analyzing;
        let started = Instant::now();
        let page = match self.fetcher.fetch(&prospect.company_url).await {
            Ok(page) => page,
            Err(e) => {
                outcome.state = ProspectState::Failed {
                    stage: Stage::Analysis,
                    reason: e.to_string(),
                };
                return outcome;
            }
        };
        let performance = PerformanceMetrics {
            page_bytes: page.html.len() as u64,
            load_time_ms: started.elapsed().as_millis() as u64,
        };
        let analysis = site_analyzer::analyze(&page, performance);
        outcome.business_category = Some(analysis.business_category);

        outcome.state = ProspectState::GeneratingInsights;
        let insights = insight_engine::generate(prospect, &analysis, self.enricher).await;
        outcome.insights = insights.iter().map(|i| i.title.clone()).collect();

        outcome.state = ProspectState::GeneratingEmail;
        let email = match email_gen::generate(
            prospect,
            analysis.business_category,
            &insights,
            &self.options.sender_name,
            self.config.delivery.min_personalization_score,
        ) {
            Ok(email) => email,
            Err(e) => {
                outcome.state = ProspectState::Failed {
                    stage: Stage::EmailGeneration,
                    reason: e.to_string(),
                };
                return outcome;
            }
        };
        outcome.email_subject = Some(email.subject.clone());
        outcome.personalization_score = Some(email.personalization_score);

        let transport = match self.transport {
            Some(t) if self.options.live_send() => t,
            _ => {
                outcome.state = ProspectState::DryRun;
                return outcome;
            }
        };

        outcome.state = ProspectState::Sending;
        let outgoing = OutgoingEmail {
            to_email: prospect.email.clone(),
            to_name: prospect.full_name(),
            subject: email.subject,
            body: email.body,
        };
        match send_with_retries(transport, &outgoing, &self.config.delivery).await {
            Ok(receipt) => {
                outcome.message_id = Some(receipt.message_id);
                outcome.state = ProspectState::Completed;
            }
            Err(e) => {
                outcome.state = ProspectState::Failed {
                    stage: Stage::Delivery,
                    reason: e.to_string(),
                };
            }
        }
        outcome
    }

    /// Record a terminal outcome. Statistics move exactly once per prospect.
    fn finish(&mut self, outcome: ProspectOutcome) {
        debug_assert!(outcome.state.is_terminal());
        self.statistics.prospects_processed += 1;

        if let Some(score) = outcome.personalization_score {
            self.statistics.emails_generated += 1;
            self.statistics.score_total += score;
        }

        match &outcome.state {
            ProspectState::Completed => {
                self.statistics.emails_sent += 1;
                println!("✅ Sent to {}", outcome.email);
            }
            ProspectState::DryRun => {
                println!("📝 Generated (not sent) for {}", outcome.email);
            }
            ProspectState::Failed { stage, reason } => {
                self.statistics.errors += 1;
                println!("❌ {} failed at {}: {}", outcome.company_name, stage, reason);
            }
            other => {
                warn!("Non-terminal outcome recorded: {:?}", other);
            }
        }

        self.outcomes.push(outcome);
    }

    async fn pause_between_prospects(&mut self) {
        let base = self
            .options
            .delay_ms
            .unwrap_or(self.config.delivery.delay_between_prospects_ms);
        // Jitter to avoid looking robotic
        let jitter = fastrand::u64(0..=1000);
        info!("Waiting {}ms before next prospect", base + jitter);
        self.delays_applied += 1;
        tokio::time::sleep(std::time::Duration::from_millis(base + jitter)).await;
    }

    fn log_final_statistics(&self) {
        println!("\n📊 Campaign summary");
        println!("   Prospects processed: {}", self.statistics.prospects_processed);
        println!("   Emails generated:    {}", self.statistics.emails_generated);
        println!("   Emails sent:         {}", self.statistics.emails_sent);
        println!("   Errors:              {}", self.statistics.errors);
        println!("   Skipped CSV rows:    {}", self.statistics.validation_failures);
        println!(
            "   Avg personalization: {:.2}",
            self.statistics.average_score()
        );
        info!(
            "Campaign finished: {} processed, {} sent, {} errors",
            self.statistics.prospects_processed,
            self.statistics.emails_sent,
            self.statistics.errors
        );
    }
}
