//! CASEGATE export checker.
//!
//! Independent verification of a sealed export directory. Shares no state
//! with the runner: every hash, id, count, and ordering is recomputed from
//! the files on disk, and every check runs even after an earlier failure.
//!
//! Usage:
//!   casegate-check verification/
//!   casegate-check verification/ --schema custom.schema.json
//!   casegate-check verification/ --golden approved_report.json
//!   casegate-check verification/ --config strict.toml
//!
//! One line is printed per check; the final line is the verdict. Exit
//! codes: 0 — verified; 1 — verification failed; 2 — execution error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casegate_contracts::error::CasegateResult;
use casegate_verify::{
    verify_export, Check, CheckStatus, VerifyConfig, VerifyOptions, VerifyReport, VerifyResult,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// CASEGATE — independent verification of a sealed gate-report export.
#[derive(Parser)]
#[command(
    name = "casegate-check",
    about = "Recompute and verify every claim in a sealed export directory"
)]
struct Cli {
    /// The export directory to verify.
    export_dir: PathBuf,

    /// External JSON-Schema document (defaults to the built-in contract).
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Golden canonical report to diff against.
    #[arg(long)]
    golden: Option<PathBuf>,

    /// TOML verifier configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            print_report(&report);
            match report.result {
                VerifyResult::Pass => ExitCode::SUCCESS,
                VerifyResult::Fail => ExitCode::from(1),
            }
        }
        Err(e) => {
            eprintln!("casegate-check: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> CasegateResult<VerifyReport> {
    let config = match &cli.config {
        Some(path) => VerifyConfig::from_file(path)?,
        None => VerifyConfig::default(),
    };

    let options = VerifyOptions {
        schema: cli.schema.clone(),
        golden: cli.golden.clone(),
        config,
    };
    verify_export(&cli.export_dir, &options)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_report(report: &VerifyReport) {
    for check in &report.checks {
        println!("{}", render_check(check));
    }
    println!(
        "VERDICT {} ({} checks)",
        match report.result {
            VerifyResult::Pass => "VERIFIED",
            VerifyResult::Fail => "FAILED",
        },
        report.checks.len()
    );
}

fn render_check(check: &Check) -> String {
    let status = match check.status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Soft => "SOFT",
    };
    match check.reason_code {
        Some(code) => format!("CHECK {} {} [{}] {}", check.name, status, code, check.message),
        None => format!("CHECK {} {} {}", check.name, status, check.message),
    }
}
