//! Clearbill Responsibility Engine — Demo CLI
//!
//! Runs the full responsibility pipeline against a fictional patient panel
//! with simulated collaborators, or classifies a single carrier name.
//!
//! Usage:
//!   cargo run -p demo -- run
//!   cargo run -p demo -- run --twice
//!   cargo run -p demo -- classify "Aetna Medicare Advantage HMO"

mod mocks;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clearbill_audit::InMemoryAuditStore;
use clearbill_contracts::error::ClearbillResult;
use clearbill_engine::{classifier, Engine, EngineConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Clearbill — patient financial responsibility memo engine demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Clearbill responsibility engine demo",
    long_about = "Runs the Clearbill pipeline over a fictional patient panel:\n\
                  payer classification, benefit fusion, per-service-line\n\
                  estimates, posting decisions, and duplicate suppression."
)]
struct Cli {
    /// Optional TOML config overriding the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process the demo patient panel end to end.
    Run {
        /// Run the pipeline a second time to demonstrate duplicate
        /// suppression.
        #[arg(long)]
        twice: bool,
    },
    /// Classify one carrier name and print its payer category.
    Classify {
        /// Free-text carrier name, e.g. "Aetna Medicare Advantage HMO".
        carrier_name: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; set RUST_LOG=debug for the full decision trail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Run { twice } => run_panel(config, twice),
        Command::Classify { carrier_name } => {
            let category = classifier::classify(&config, "", &carrier_name);
            println!("{} → {}", carrier_name, category);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> ClearbillResult<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path),
        None => Ok(EngineConfig::default()),
    }
}

// ── Run scenario ──────────────────────────────────────────────────────────────

fn run_panel(config: EngineConfig, twice: bool) -> ClearbillResult<()> {
    println!();
    println!("Clearbill — Patient Financial Responsibility Engine");
    println!("====================================================");
    println!();
    println!("Pipeline per insurance record:");
    println!("  [1] Eligibility verification (with record-only fallback)");
    println!("  [2] Benefit fusion: verified values over record defaults");
    println!("  [3] Payer classification and per-service-line estimates");
    println!("  [4] Duplicate suppression against the audit log");
    println!("  [5] Posting decision → publish or suppress");
    println!();

    let audit = InMemoryAuditStore::new();
    let passes = if twice { 2 } else { 1 };

    for pass in 1..=passes {
        if twice {
            println!("— pass {} —", pass);
        }

        // One engine per pass, sharing the same audit store so the second
        // pass sees the first pass's rows.
        let engine = Engine::new(
            config.clone(),
            Box::new(mocks::SimulatedPractice::new(mocks::demo_patients())),
            Box::new(mocks::SimulatedVerification),
            Box::new(audit.clone()),
        );

        let summary = engine.run()?;
        println!();
        println!(
            "  patients: {}  posted: {}  suppressed: {}  duplicates: {}  errors: {}",
            summary.patients_processed,
            summary.memos_posted,
            summary.memos_suppressed,
            summary.duplicates_skipped,
            summary.errors
        );
        println!();
    }

    println!("Audit rows:");
    for row in audit.export() {
        println!("  [{:?}] {}", row.status, row.message);
    }
    println!();

    Ok(())
}
