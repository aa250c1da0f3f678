//! Referential integrity: cascading deletes and read-only diagnostics.
//!
//! Cascades run after the parent record has been removed from the store.
//! The diagnostics scan the whole register and return a report; they never
//! mutate and never fail on a dangling reference.

use crate::core::error::LedgerError;
use crate::core::model::{Asset, Threat, Treatment, Vulnerability};
use crate::core::risk;
use crate::core::store::{Collection, Store};
use serde::Serialize;
use std::collections::HashSet;

/// One dangling reference or stale derived field, keyed to the record that
/// carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityViolation {
    pub collection: Collection,
    pub record_id: String,
    pub field: String,
    pub message: String,
}

/// What a cascade removed, for caller-facing reporting.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeOutcome {
    pub vulnerabilities_removed: usize,
    pub treatments_removed: usize,
}

/// Two-level cascade for a deleted asset: drop every vulnerability that
/// referenced it, then every treatment that referenced one of those
/// vulnerabilities.
pub fn cascade_delete_asset(store: &Store, asset_id: &str) -> Result<CascadeOutcome, LedgerError> {
    let vulnerabilities: Vec<Vulnerability> = store.get_all()?;
    let (doomed, kept): (Vec<_>, Vec<_>) = vulnerabilities
        .into_iter()
        .partition(|v| v.asset_id == asset_id);
    if doomed.is_empty() {
        return Ok(CascadeOutcome::default());
    }
    store.save_all(&kept)?;

    let doomed_ids: HashSet<&str> = doomed.iter().map(|v| v.id.as_str()).collect();
    let treatments: Vec<Treatment> = store.get_all()?;
    let before = treatments.len();
    let kept_treatments: Vec<Treatment> = treatments
        .into_iter()
        .filter(|t| !doomed_ids.contains(t.vulnerability_id.as_str()))
        .collect();
    let treatments_removed = before - kept_treatments.len();
    if treatments_removed > 0 {
        store.save_all(&kept_treatments)?;
    }

    Ok(CascadeOutcome {
        vulnerabilities_removed: doomed.len(),
        treatments_removed,
    })
}

/// Cascade for a deleted vulnerability: drop its treatments.
pub fn cascade_delete_vulnerability(
    store: &Store,
    vulnerability_id: &str,
) -> Result<CascadeOutcome, LedgerError> {
    let treatments: Vec<Treatment> = store.get_all()?;
    let before = treatments.len();
    let kept: Vec<Treatment> = treatments
        .into_iter()
        .filter(|t| t.vulnerability_id != vulnerability_id)
        .collect();
    let treatments_removed = before - kept.len();
    if treatments_removed > 0 {
        store.save_all(&kept)?;
    }
    Ok(CascadeOutcome {
        vulnerabilities_removed: 0,
        treatments_removed,
    })
}

/// Scan for dangling foreign keys. Read-only, idempotent; the report is the
/// whole output, nothing is healed.
pub fn validate(store: &Store) -> Result<Vec<IntegrityViolation>, LedgerError> {
    let assets: Vec<Asset> = store.get_all()?;
    let threats: Vec<Threat> = store.get_all()?;
    let vulnerabilities: Vec<Vulnerability> = store.get_all()?;
    let treatments: Vec<Treatment> = store.get_all()?;

    let asset_ids: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    let threat_ids: HashSet<&str> = threats.iter().map(|t| t.id.as_str()).collect();
    let vulnerability_ids: HashSet<&str> =
        vulnerabilities.iter().map(|v| v.id.as_str()).collect();

    let mut violations = Vec::new();

    for vuln in &vulnerabilities {
        if !asset_ids.contains(vuln.asset_id.as_str()) {
            violations.push(IntegrityViolation {
                collection: Collection::Vulnerabilities,
                record_id: vuln.id.clone(),
                field: "assetId".to_string(),
                message: format!("vulnerability {} references non-existent asset", vuln.id),
            });
        }
        if !threat_ids.contains(vuln.threat_id.as_str()) {
            violations.push(IntegrityViolation {
                collection: Collection::Vulnerabilities,
                record_id: vuln.id.clone(),
                field: "threatId".to_string(),
                message: format!("vulnerability {} references non-existent threat", vuln.id),
            });
        }
    }

    for treatment in &treatments {
        if !vulnerability_ids.contains(treatment.vulnerability_id.as_str()) {
            violations.push(IntegrityViolation {
                collection: Collection::Treatments,
                record_id: treatment.id.clone(),
                field: "vulnerabilityId".to_string(),
                message: format!(
                    "treatment {} references non-existent vulnerability",
                    treatment.id
                ),
            });
        }
    }

    Ok(violations)
}

/// Recompute every vulnerability's risk fields and report disagreements
/// with the stored cache. Read-only; `risk::recompute_all` is the repair.
pub fn validate_derived_fields(store: &Store) -> Result<Vec<IntegrityViolation>, LedgerError> {
    let vulnerabilities: Vec<Vulnerability> = store.get_all()?;
    let mut violations = Vec::new();

    for vuln in &vulnerabilities {
        let expected_score = risk::score(vuln.likelihood, vuln.impact);
        let expected_level = risk::classify(expected_score);
        if vuln.risk_score != expected_score || vuln.risk_level != expected_level {
            violations.push(IntegrityViolation {
                collection: Collection::Vulnerabilities,
                record_id: vuln.id.clone(),
                field: "riskScore".to_string(),
                message: format!(
                    "stored {}/{} disagrees with recomputed {}/{}",
                    vuln.risk_score, vuln.risk_level, expected_score, expected_level
                ),
            });
        }
    }

    Ok(violations)
}
