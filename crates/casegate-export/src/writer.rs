//! Export directory writer.
//!
//! Writes the two report files plus a verbatim copy of the consumed audit
//! log, so a verifier can recompute the chain without trusting the
//! producer. The canonical report is written as its exact canonical bytes
//! — the same bytes that were hashed — with no trailing newline.

use std::fs;
use std::path::Path;

use tracing::info;

use casegate_audit::write_ndjson;
use casegate_canon::canonical_stringify;
use casegate_contracts::{
    audit::AuditEvent,
    error::{CasegateError, CasegateResult},
    report::{CanonReport, MetaReport},
};

pub const CANON_FILE: &str = "gate_report.canon.json";
pub const META_FILE: &str = "gate_report.meta.json";
pub const AUDIT_LOG_FILE: &str = "audit_log.ndjson";

/// Write the export directory at `dir`, creating it if needed.
///
/// The assembler never reads these files back; checking them is the
/// Verifier's job.
pub fn write_export(
    dir: &Path,
    canon: &CanonReport,
    meta: &MetaReport,
    events: &[AuditEvent],
) -> CasegateResult<()> {
    fs::create_dir_all(dir).map_err(|e| CasegateError::ExecutionError {
        reason: format!("cannot create export directory '{}': {}", dir.display(), e),
    })?;

    let canon_value = serde_json::to_value(canon).map_err(|e| CasegateError::ContractViolation {
        reason: format!("report serialization failed: {e}"),
    })?;
    let canon_bytes = canonical_stringify(&canon_value)?;
    fs::write(dir.join(CANON_FILE), canon_bytes.as_bytes())?;

    let meta_bytes =
        serde_json::to_string_pretty(meta).map_err(|e| CasegateError::ContractViolation {
            reason: format!("meta report serialization failed: {e}"),
        })?;
    fs::write(dir.join(META_FILE), meta_bytes.as_bytes())?;

    write_ndjson(&dir.join(AUDIT_LOG_FILE), events)?;

    info!(dir = %dir.display(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::{write_export, AUDIT_LOG_FILE, CANON_FILE, META_FILE};
    use crate::assemble::assemble;
    use casegate_audit::AuditLogBuilder;

    #[test]
    fn export_writes_all_three_files_with_canonical_canon_bytes() {
        let mut builder = AuditLogBuilder::new(1_700_000_000_000);
        builder.append("case_opened", json!({})).unwrap();
        let events = builder.into_events();
        let head = events.last().unwrap().chain_hash.clone();

        let (canon, meta) =
            assemble(vec![], BTreeMap::new(), "c-1", "r-1", &head, events.len() as u64).unwrap();

        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), &canon, &meta, &events).unwrap();

        assert!(dir.path().join(CANON_FILE).exists());
        assert!(dir.path().join(META_FILE).exists());
        assert!(dir.path().join(AUDIT_LOG_FILE).exists());

        // The file holds exactly the canonical bytes of the sealed report.
        let written = std::fs::read_to_string(dir.path().join(CANON_FILE)).unwrap();
        let expected =
            casegate_canon::canonical_stringify(&serde_json::to_value(&canon).unwrap()).unwrap();
        assert_eq!(written, expected);
        assert!(!written.ends_with('\n'));
    }

    /// Writing the same report twice yields byte-identical canon files.
    #[test]
    fn repeated_writes_are_byte_identical() {
        let (canon, meta) = assemble(
            vec![],
            BTreeMap::new(),
            "c-1",
            "r-1",
            casegate_contracts::audit::GENESIS_HASH,
            0,
        )
        .unwrap();

        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        write_export(dir_a.path(), &canon, &meta, &[]).unwrap();
        write_export(dir_b.path(), &canon, &meta, &[]).unwrap();

        let a = std::fs::read(dir_a.path().join(CANON_FILE)).unwrap();
        let b = std::fs::read(dir_b.path().join(CANON_FILE)).unwrap();
        assert_eq!(a, b);
    }
}
