//! CASEGATE export runner.
//!
//! Evaluates a case against the gate catalog and writes a sealed export
//! directory. Input is either a named scenario pack or a caller-supplied
//! case file plus audit log. The input chain is verified *before* any
//! evaluation — the runner refuses to seal a report over a log it cannot
//! trust.
//!
//! Usage:
//!   casegate-run export --scenario pass --out verification
//!   casegate-run export --case-file case.json --audit-file audit.ndjson --out verification
//!   casegate-run scenarios
//!
//! Exit codes: 0 — every gate passed; 1 — at least one BLOCK finding;
//! 2 — execution error (including a broken input chain).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use casegate_audit::{read_ndjson, verify_chain};
use casegate_contracts::{
    case::CaseFile,
    error::{CasegateError, CasegateResult, ReasonCode},
    report::ReportStatus,
};
use casegate_scenarios::{produce_export, scenario, ScenarioPack, NAMES};

// ── CLI definition ────────────────────────────────────────────────────────────

/// CASEGATE — deterministic, tamper-evident gate reports for case exports.
#[derive(Parser)]
#[command(
    name = "casegate-run",
    about = "Evaluate a case against the gate catalog and write a sealed export"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate and write the export directory.
    Export {
        /// Named scenario pack to export (see `scenarios`).
        #[arg(long, conflicts_with_all = ["case_file", "audit_file"])]
        scenario: Option<String>,

        /// Case file (JSON). Requires --audit-file.
        #[arg(long, requires = "audit_file")]
        case_file: Option<PathBuf>,

        /// Audit log (NDJSON, one event per line). Requires --case-file.
        #[arg(long, requires = "case_file")]
        audit_file: Option<PathBuf>,

        /// Export directory to create.
        #[arg(long, default_value = "verification")]
        out: PathBuf,
    },
    /// List the available scenario packs.
    Scenarios,
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

    match run(cli.command) {
        Ok(ReportStatus::Pass) => ExitCode::SUCCESS,
        Ok(ReportStatus::Fail) => ExitCode::from(1),
        Err(e) => {
            eprintln!("casegate-run: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> CasegateResult<ReportStatus> {
    match command {
        Command::Scenarios => {
            for name in NAMES {
                println!("{name}");
            }
            Ok(ReportStatus::Pass)
        }
        Command::Export {
            scenario: scenario_name,
            case_file,
            audit_file,
            out,
        } => {
            let pack = match (scenario_name, case_file, audit_file) {
                (Some(name), None, None) => scenario(&name)?,
                (None, Some(case), Some(audit)) => load_pack(&case, &audit)?,
                _ => {
                    return Err(CasegateError::InputMalformed {
                        reason: "provide either --scenario or both --case-file and --audit-file"
                            .to_string(),
                    })
                }
            };

            export(&pack, &out)
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Verify the input chain, then run the full pipeline and report status.
fn export(pack: &ScenarioPack, out: &Path) -> CasegateResult<ReportStatus> {
    let verification = verify_chain(&pack.events)?;
    if !verification.valid {
        let seqs: Vec<String> = verification
            .breaks
            .iter()
            .map(|b| b.seq.to_string())
            .chain(verification.seq_violations.iter().map(u64::to_string))
            .collect();
        return Err(CasegateError::IntegrityViolation {
            code: ReasonCode::ChainBrokenAtSeq,
            reason: format!(
                "refusing to export over a broken audit chain (seq {})",
                seqs.join(", ")
            ),
        });
    }

    let (canon, _meta) = produce_export(pack, out)?;

    println!(
        "EXPORT {} {} report {} ({} BLOCK, {} WARN, {} INFO) -> {}",
        canon.case_id,
        canon.summary.status,
        canon.report_id,
        canon.summary.block_count,
        canon.summary.warn_count,
        canon.summary.info_count,
        out.display()
    );
    Ok(canon.summary.status)
}

/// Build a pack from caller-supplied files.
fn load_pack(case_path: &Path, audit_path: &Path) -> CasegateResult<ScenarioPack> {
    let case_text =
        std::fs::read_to_string(case_path).map_err(|e| CasegateError::ExecutionError {
            reason: format!("failed to read case file '{}': {}", case_path.display(), e),
        })?;
    let case: CaseFile =
        serde_json::from_str(&case_text).map_err(|e| CasegateError::InputMalformed {
            reason: format!("case file '{}' is not valid: {}", case_path.display(), e),
        })?;
    let events = read_ndjson(audit_path)?;

    Ok(ScenarioPack {
        name: "file",
        case,
        events,
    })
}
