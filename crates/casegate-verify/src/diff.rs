//! Deep diff against a golden fixture.
//!
//! Compares three strata of the canonical report: root fields,
//! `gate_outcomes`, and findings (`violations ∪ warnings`, matched by id
//! and classified as added / removed / changed-with-field-list).

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// A changed root field or gate outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub golden: String,
    pub actual: String,
}

/// A finding present in both reports whose content differs.
#[derive(Debug, Clone, PartialEq)]
pub struct FindingChange {
    pub id: String,
    /// Names of the differing fields.
    pub fields: Vec<String>,
}

/// The classified difference between an actual report and its golden
/// fixture.
#[derive(Debug, Clone, Default)]
pub struct GoldenDiff {
    pub root_changes: Vec<FieldChange>,
    pub gate_outcome_changes: Vec<FieldChange>,
    pub findings_added: Vec<String>,
    pub findings_removed: Vec<String>,
    pub findings_changed: Vec<FindingChange>,
}

impl GoldenDiff {
    pub fn is_empty(&self) -> bool {
        self.root_changes.is_empty()
            && self.gate_outcome_changes.is_empty()
            && self.findings_added.is_empty()
            && self.findings_removed.is_empty()
            && self.findings_changed.is_empty()
    }

    /// One-line summary for check messages.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for c in &self.root_changes {
            parts.push(format!("root field '{}' changed", c.field));
        }
        for c in &self.gate_outcome_changes {
            parts.push(format!(
                "gate '{}' outcome {} -> {}",
                c.field, c.golden, c.actual
            ));
        }
        for id in &self.findings_added {
            parts.push(format!("finding {id} added"));
        }
        for id in &self.findings_removed {
            parts.push(format!("finding {id} removed"));
        }
        for c in &self.findings_changed {
            parts.push(format!("finding {} changed: {}", c.id, c.fields.join(", ")));
        }
        parts.join("; ")
    }
}

fn render(v: Option<&Value>) -> String {
    v.map(Value::to_string).unwrap_or_else(|| "<absent>".to_string())
}

fn findings_by_id(report: &Value) -> BTreeMap<String, &Value> {
    let mut by_id = BTreeMap::new();
    for section in ["violations", "warnings"] {
        if let Some(arr) = report.get(section).and_then(Value::as_array) {
            for f in arr {
                if let Some(id) = f.get("id").and_then(Value::as_str) {
                    by_id.insert(id.to_string(), f);
                }
            }
        }
    }
    by_id
}

/// Diff `actual` against `golden`.
pub fn diff_reports(actual: &Value, golden: &Value) -> GoldenDiff {
    let mut diff = GoldenDiff::default();

    // Root fields, excluding the strata compared structurally below.
    let root_keys: BTreeSet<&str> = golden
        .as_object()
        .into_iter()
        .chain(actual.as_object())
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();
    for key in root_keys {
        if matches!(key, "gate_outcomes" | "violations" | "warnings") {
            continue;
        }
        let g = golden.get(key);
        let a = actual.get(key);
        if g != a {
            diff.root_changes.push(FieldChange {
                field: key.to_string(),
                golden: render(g),
                actual: render(a),
            });
        }
    }

    // Gate outcomes, keyed by gate id.
    let empty = serde_json::Map::new();
    let golden_outcomes = golden
        .get("gate_outcomes")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let actual_outcomes = actual
        .get("gate_outcomes")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let gate_ids: BTreeSet<&String> =
        golden_outcomes.keys().chain(actual_outcomes.keys()).collect();
    for gate_id in gate_ids {
        let g = golden_outcomes.get(gate_id);
        let a = actual_outcomes.get(gate_id);
        if g != a {
            diff.gate_outcome_changes.push(FieldChange {
                field: gate_id.clone(),
                golden: render(g),
                actual: render(a),
            });
        }
    }

    // Findings matched by id across violations ∪ warnings.
    let golden_findings = findings_by_id(golden);
    let actual_findings = findings_by_id(actual);

    for id in actual_findings.keys() {
        if !golden_findings.contains_key(id) {
            diff.findings_added.push(id.clone());
        }
    }
    for id in golden_findings.keys() {
        if !actual_findings.contains_key(id) {
            diff.findings_removed.push(id.clone());
        }
    }
    for (id, g) in &golden_findings {
        let Some(a) = actual_findings.get(id).copied() else {
            continue;
        };
        let g = *g;
        if g == a {
            continue;
        }
        let fields: BTreeSet<&str> = g
            .as_object()
            .into_iter()
            .chain(a.as_object())
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        let changed: Vec<String> = fields
            .into_iter()
            .filter(|f| g.get(f) != a.get(f))
            .map(str::to_string)
            .collect();
        if !changed.is_empty() {
            diff.findings_changed.push(FindingChange {
                id: id.clone(),
                fields: changed,
            });
        }
    }

    diff
}
