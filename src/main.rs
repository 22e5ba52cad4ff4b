use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use surge_payouts::application::engine::PayoutEngine;
use surge_payouts::domain::config::{FallbackRule, MilestoneConfiguration, ZoneAssignment};
use surge_payouts::domain::entity::{EntityRecord, ZoneKey};
use surge_payouts::domain::filter::{EntityFilter, latest_week};
use surge_payouts::domain::milestone::{MilestoneSet, Payout};
use surge_payouts::domain::recommendation::{ZoneSummary, recommend};
use surge_payouts::error::SurgeError;
use surge_payouts::interfaces::config::ConfigDocument;
use surge_payouts::interfaces::csv::entity_reader::EntityReader;
use surge_payouts::interfaces::csv::payout_writer::PayoutWriter;
use surge_payouts::interfaces::csv::summary_reader::SummaryReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute milestone surge payouts for a seed/onboarding CSV file
    Compute(ComputeArgs),
    /// Suggest per-zone milestones from a zone-weekly summary CSV file
    Recommend(RecommendArgs),
}

#[derive(Args)]
struct ComputeArgs {
    /// Seed/onboarding CSV file
    input: PathBuf,

    /// Global milestones as threshold:payout pairs [default: 1:25,5:50,10:100]
    #[arg(long, value_name = "PAIRS", conflicts_with_all = ["zone", "config"])]
    milestones: Option<MilestoneSet>,

    /// Milestones for one zone, e.g. "Pune/Baner=1:25,5:50". Repeatable.
    #[arg(long, value_name = "CITY/ZONE=PAIRS", conflicts_with = "config")]
    zone: Vec<ZoneAssignment>,

    /// Zone whose milestones apply to DEs of unconfigured zones
    #[arg(long, value_name = "CITY/ZONE", requires = "zone", conflicts_with = "fallback")]
    fallback_zone: Option<ZoneKey>,

    /// Dedicated milestones for DEs of unconfigured zones
    #[arg(long, value_name = "PAIRS", requires = "zone")]
    fallback: Option<MilestoneSet>,

    /// JSON milestone configuration, e.g. the output of `recommend`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep only these weeks. Repeatable.
    #[arg(long)]
    week: Vec<String>,

    /// Keep only the latest week found in the input
    #[arg(long, conflicts_with = "week")]
    latest_week: bool,

    /// Keep only these cities. Repeatable.
    #[arg(long)]
    city: Vec<String>,

    /// Keep only these zones. Repeatable.
    #[arg(long)]
    zone_name: Vec<String>,

    /// Keep only these shifts. Repeatable.
    #[arg(long)]
    shift: Vec<String>,

    /// Keep only DEs with at least this many orders
    #[arg(long)]
    min_orders: Option<u32>,

    /// Keep only DEs with at most this many orders
    #[arg(long)]
    max_orders: Option<u32>,

    /// Output CSV file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Add an eligibility column next to each milestone payout
    #[arg(long)]
    eligibility: bool,

    /// Log and skip rows with a missing or non-numeric order count instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

impl ComputeArgs {
    fn milestone_configuration(&self) -> std::result::Result<MilestoneConfiguration, SurgeError> {
        if let Some(path) = &self.config {
            let document = ConfigDocument::from_reader(File::open(path)?)?;
            return MilestoneConfiguration::try_from(document);
        }

        if !self.zone.is_empty() {
            let rule = match (&self.fallback_zone, &self.fallback) {
                (Some(key), _) => FallbackRule::Zone(key.clone()),
                (None, Some(set)) => FallbackRule::Milestones(set.clone()),
                (None, None) => FallbackRule::FirstDefined,
            };
            return MilestoneConfiguration::per_zone(
                self.zone
                    .iter()
                    .map(|z| (z.key.clone(), z.milestones.clone())),
                rule,
            );
        }

        Ok(MilestoneConfiguration::global(
            self.milestones.clone().unwrap_or_default(),
        ))
    }

    fn filter(&self) -> EntityFilter {
        let set = |values: &[String]| -> HashSet<String> {
            values.iter().map(|v| v.trim().to_string()).collect()
        };
        EntityFilter {
            weeks: set(&self.week),
            cities: set(&self.city),
            zones: set(&self.zone_name),
            shifts: set(&self.shift),
            min_orders: self.min_orders,
            max_orders: self.max_orders,
        }
    }
}

#[derive(Args)]
struct RecommendArgs {
    /// Zone-weekly summary CSV file
    input: PathBuf,

    /// Only use summary rows for this week
    #[arg(long)]
    week: Option<String>,

    /// Output JSON file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Defaults to warn; override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _tracing = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compute(args) => compute(args),
        Command::Recommend(args) => recommend_milestones(args),
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path).into_diagnostic()?),
        None => Box::new(io::stdout().lock()),
    })
}

fn compute(args: ComputeArgs) -> Result<()> {
    let config = args.milestone_configuration().into_diagnostic()?;
    let engine = PayoutEngine::new(config);
    let mut filter = args.filter();

    let file = File::open(&args.input).into_diagnostic()?;
    let reader = EntityReader::new(file).into_diagnostic()?;
    let rows: Vec<std::result::Result<EntityRecord, SurgeError>> = reader
        .records()
        .filter_map(|row| match row {
            Err(e @ SurgeError::MalformedRecord { .. }) if args.skip_malformed => {
                tracing::warn!(error = %e, "skipping row");
                None
            }
            other => Some(other),
        })
        .collect();

    if args.latest_week {
        match latest_week(rows.iter().flatten()) {
            Some(week) => {
                tracing::info!(week, "keeping only the latest week");
                filter.weeks = HashSet::from([week.to_string()]);
            }
            None => tracing::warn!("--latest-week given but no row carries a week"),
        }
    }

    let rows = rows
        .into_iter()
        .filter(|row| row.as_ref().map_or(true, |de| filter.matches(de)));
    let records = engine.compute_batch(rows).into_diagnostic()?;

    let total: Payout = records.iter().map(|r| r.total_payout).sum();
    let on_fallback = records.iter().filter(|r| r.used_fallback).count();
    tracing::info!(
        des = records.len(),
        on_fallback,
        total_payout = %total,
        "computed surge payouts"
    );

    let mut writer =
        PayoutWriter::new(open_output(args.output.as_ref())?).with_eligibility(args.eligibility);
    writer.write_payouts(records).into_diagnostic()?;

    Ok(())
}

fn recommend_milestones(args: RecommendArgs) -> Result<()> {
    let file = File::open(&args.input).into_diagnostic()?;
    let summaries = SummaryReader::new(file)
        .into_diagnostic()?
        .summaries()
        .collect::<std::result::Result<Vec<ZoneSummary>, SurgeError>>()
        .into_diagnostic()?;

    let week = args.week.as_deref().map(str::trim);
    let zones = recommend(&summaries, week).into_diagnostic()?;
    if zones.is_empty() {
        tracing::warn!(week = ?week, "no summary rows to recommend milestones from");
    }

    let document = ConfigDocument::from_zone_sets(zones);
    let mut out = open_output(args.output.as_ref())?;
    writeln!(out, "{}", document.to_json_pretty().into_diagnostic()?).into_diagnostic()?;

    Ok(())
}
