//! NDJSON persistence for audit logs.
//!
//! The external interface is one JSON object per line. Reads are strict:
//! an unparseable line is an `InputMalformed` error naming the 1-based
//! line number, because a half-read chain cannot be meaningfully verified.
//! Blank lines (including a trailing newline) are skipped.

use std::fs;
use std::io::Write;
use std::path::Path;

use casegate_contracts::{
    audit::AuditEvent,
    error::{CasegateError, CasegateResult},
};

/// Read an NDJSON audit log from `path`, in file order.
pub fn read_ndjson(path: &Path) -> CasegateResult<Vec<AuditEvent>> {
    let contents = fs::read_to_string(path).map_err(|e| CasegateError::ExecutionError {
        reason: format!("cannot read audit log '{}': {}", path.display(), e),
    })?;

    let mut events = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: AuditEvent =
            serde_json::from_str(line).map_err(|e| CasegateError::InputMalformed {
                reason: format!(
                    "audit log '{}' line {}: {}",
                    path.display(),
                    idx + 1,
                    e
                ),
            })?;
        events.push(event);
    }
    Ok(events)
}

/// Write `events` to `path` as NDJSON, one event per line, trailing newline.
pub fn write_ndjson(path: &Path, events: &[AuditEvent]) -> CasegateResult<()> {
    let mut file = fs::File::create(path).map_err(|e| CasegateError::ExecutionError {
        reason: format!("cannot create audit log '{}': {}", path.display(), e),
    })?;
    for event in events {
        let line = serde_json::to_string(event).map_err(|e| CasegateError::InputMalformed {
            reason: format!("cannot serialize audit event seq {}: {}", event.seq, e),
        })?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}
