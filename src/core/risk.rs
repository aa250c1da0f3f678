//! Risk calculator: likelihood × impact scoring and band classification.
//!
//! Pure functions over small integers. Scale inputs are validated on write
//! paths by the store; everything here degrades to an `Unknown` sentinel so
//! it stays safe to call from rendering code holding stale data.

use crate::core::error::LedgerError;
use crate::core::model::{RiskLevel, Vulnerability};
use crate::core::store::Store;

/// One point on the 1–5 likelihood or impact scale.
pub struct ScalePoint {
    pub value: u8,
    pub label: &'static str,
    pub description: &'static str,
}

pub const LIKELIHOOD_SCALE: [ScalePoint; 5] = [
    ScalePoint {
        value: 1,
        label: "Rare",
        description: "May occur only in exceptional circumstances",
    },
    ScalePoint {
        value: 2,
        label: "Unlikely",
        description: "Could occur at some time",
    },
    ScalePoint {
        value: 3,
        label: "Possible",
        description: "Might occur at some time",
    },
    ScalePoint {
        value: 4,
        label: "Likely",
        description: "Will probably occur in most circumstances",
    },
    ScalePoint {
        value: 5,
        label: "Almost Certain",
        description: "Expected to occur in most circumstances",
    },
];

pub const IMPACT_SCALE: [ScalePoint; 5] = [
    ScalePoint {
        value: 1,
        label: "Insignificant",
        description: "Minimal impact, easily managed",
    },
    ScalePoint {
        value: 2,
        label: "Minor",
        description: "Some impact, manageable with routine procedures",
    },
    ScalePoint {
        value: 3,
        label: "Moderate",
        description: "Moderate impact, requires management attention",
    },
    ScalePoint {
        value: 4,
        label: "Major",
        description: "Significant impact, requires senior management intervention",
    },
    ScalePoint {
        value: 5,
        label: "Catastrophic",
        description: "Severe impact, threatens organizational viability",
    },
];

/// Risk score: plain product. Callers guarantee inputs in 1..=5; the
/// function does not clamp.
pub fn score(likelihood: u8, impact: u8) -> u8 {
    likelihood * impact
}

/// Band classification. The gaps are deliberate: 7, 13 and 14 fall between
/// bands and classify as `Unknown` (only 7 is reachable as a product of two
/// 1–5 values). Kept exactly as the register has always scored; do not
/// widen the bands.
pub fn classify(score: u8) -> RiskLevel {
    match score {
        1..=6 => RiskLevel::Low,
        8..=12 => RiskLevel::Medium,
        15..=25 => RiskLevel::High,
        _ => RiskLevel::Unknown,
    }
}

fn scale_label(scale: &'static [ScalePoint; 5], value: u8) -> &'static str {
    scale
        .iter()
        .find(|p| p.value == value)
        .map(|p| p.label)
        .unwrap_or("Unknown")
}

pub fn likelihood_label(value: u8) -> &'static str {
    scale_label(&LIKELIHOOD_SCALE, value)
}

pub fn impact_label(value: u8) -> &'static str {
    scale_label(&IMPACT_SCALE, value)
}

/// Consistency repair: overwrite every vulnerability's cached risk fields
/// from its current likelihood/impact and persist. Normal CRUD computes the
/// cache at write time; this exists for registers that drifted. Returns the
/// number of vulnerabilities written.
pub fn recompute_all(store: &Store) -> Result<usize, LedgerError> {
    let mut rows: Vec<Vulnerability> = store.get_all()?;
    for vuln in &mut rows {
        vuln.risk_score = score(vuln.likelihood, vuln.impact);
        vuln.risk_level = classify(vuln.risk_score);
    }
    store.save_all(&rows)?;
    Ok(rows.len())
}
