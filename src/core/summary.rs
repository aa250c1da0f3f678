//! Register-wide aggregates: entity counts, risk-band distribution, and the
//! 5x5 likelihood x impact matrix.

use crate::core::error::LedgerError;
use crate::core::model::{Asset, RiskLevel, Threat, Treatment, TreatmentStatus, Vulnerability};
use crate::core::risk;
use crate::core::store::Store;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub likelihood: u8,
    pub impact: u8,
    pub score: u8,
    pub level: RiskLevel,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSummary {
    pub assets: usize,
    pub threats: usize,
    pub vulnerabilities: usize,
    pub treatments: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub unknown_risk: usize,
    /// Treatments not yet Completed.
    pub active_treatments: usize,
    /// Row-major, likelihood 5 down to 1, impact 1 up to 5.
    pub matrix: Vec<MatrixCell>,
}

pub fn summarize(store: &Store) -> Result<RegisterSummary, LedgerError> {
    let assets: Vec<Asset> = store.get_all()?;
    let threats: Vec<Threat> = store.get_all()?;
    let vulnerabilities: Vec<Vulnerability> = store.get_all()?;
    let treatments: Vec<Treatment> = store.get_all()?;

    let band = |level: RiskLevel| {
        vulnerabilities
            .iter()
            .filter(|v| v.risk_level == level)
            .count()
    };

    let mut matrix = Vec::with_capacity(25);
    for likelihood in (1..=5u8).rev() {
        for impact in 1..=5u8 {
            let score = risk::score(likelihood, impact);
            matrix.push(MatrixCell {
                likelihood,
                impact,
                score,
                level: risk::classify(score),
                count: vulnerabilities
                    .iter()
                    .filter(|v| v.likelihood == likelihood && v.impact == impact)
                    .count(),
            });
        }
    }

    Ok(RegisterSummary {
        assets: assets.len(),
        threats: threats.len(),
        vulnerabilities: vulnerabilities.len(),
        treatments: treatments.len(),
        low_risk: band(RiskLevel::Low),
        medium_risk: band(RiskLevel::Medium),
        high_risk: band(RiskLevel::High),
        unknown_risk: band(RiskLevel::Unknown),
        active_treatments: treatments
            .iter()
            .filter(|t| t.status != TreatmentStatus::Completed)
            .count(),
        matrix,
    })
}
