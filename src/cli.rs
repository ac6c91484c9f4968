use crate::campaign::{Campaign, CampaignOptions};
use crate::config::{Config, Credentials};
use crate::email_sender::{EmailTransport, MailgunTransport};
use crate::fetcher::ReqwestFetcher;
use crate::insight_engine::enrichment::{InsightEnricher, OpenAiEnricher};
use crate::models::Result;
use crate::prospects;
use clap::Parser;
use dialoguer::Confirm;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "prospect-mailer", about = "Analyze prospect websites and send personalized outreach")]
pub struct Args {
    /// Prospect CSV file
    pub csv: String,

    /// Generate emails without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the configured delay between prospects (milliseconds)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Process at most N prospects
    #[arg(long)]
    pub limit: Option<usize>,

    /// Report output path
    #[arg(long, default_value = "out/campaign_report.json")]
    pub output: PathBuf,

    /// Run the full pipeline but only print statistics
    #[arg(long)]
    pub stats_only: bool,

    /// Configuration file
    #[arg(long, default_value = "config.yml")]
    pub config: String,
}

pub async fn run(args: Args, config: Config) -> Result<()> {
    let credentials = Credentials::from_env();
    let live_send = !args.dry_run && !args.stats_only;
    credentials.validate(live_send, config.enrichment.enabled)?;

    let load = prospects::load_prospects(&args.csv)?;
    if load.prospects.is_empty() {
        println!("⚠️  No valid prospects in {} - nothing to do", args.csv);
    }

    if live_send && !load.prospects.is_empty() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Send real emails to {} prospects?",
                load.prospects.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted - re-run with --dry-run to preview without sending");
            return Ok(());
        }
    }

    let fetcher = ReqwestFetcher::new(&config.fetch)?;

    let enricher: Option<OpenAiEnricher> = match (&credentials.openai_api_key, config.enrichment.enabled) {
        (Some(key), true) => Some(OpenAiEnricher::new(&config.enrichment, key.clone())?),
        _ => {
            info!("Enrichment disabled, using rule-based insights only");
            None
        }
    };

    let transport: Option<MailgunTransport> = if live_send {
        Some(MailgunTransport::new(&credentials)?)
    } else {
        None
    };

    let options = CampaignOptions {
        dry_run: args.dry_run,
        stats_only: args.stats_only,
        delay_ms: args.delay_ms,
        limit: args.limit,
        sender_name: credentials.from_name.clone(),
    };

    let campaign = Campaign::new(
        &config,
        &fetcher,
        enricher.as_ref().map(|e| e as &dyn InsightEnricher),
        transport.as_ref().map(|t| t as &dyn EmailTransport),
        options,
    );
    let report = campaign.run(load).await?;

    if !args.stats_only {
        report.export(&args.output, config.output.pretty_json).await?;
        println!("💾 Report written to {}", args.output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::parse_from([
            "prospect-mailer",
            "prospects.csv",
            "--dry-run",
            "--delay-ms",
            "500",
            "--limit",
            "3",
        ]);
        assert_eq!(args.csv, "prospects.csv");
        assert!(args.dry_run);
        assert_eq!(args.delay_ms, Some(500));
        assert_eq!(args.limit, Some(3));
        assert!(!args.stats_only);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["prospect-mailer", "p.csv"]);
        assert_eq!(args.config, "config.yml");
        assert_eq!(args.output, PathBuf::from("out/campaign_report.json"));
    }
}
