//! Record types for the four register collections.
//!
//! Fields that were free-form strings in older registers (asset type,
//! criticality, treatment strategy/status) are closed enums here; the store
//! boundary rejects unrecognized values instead of accepting typos. Wire
//! names stay camelCase so persisted registers keep the layout callers and
//! exporters already understand.

use crate::core::error::LedgerError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum AssetType {
    Hardware,
    Software,
    Data,
    Facilities,
    Personnel,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum Strategy {
    Mitigate,
    Accept,
    Transfer,
    Avoid,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum TreatmentStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Classification band for a risk score. `Unknown` covers both out-of-band
/// scores and lookups against missing data; it is a rendering-safe sentinel,
/// never an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetType::Hardware => "Hardware",
            AssetType::Software => "Software",
            AssetType::Data => "Data",
            AssetType::Facilities => "Facilities",
            AssetType::Personnel => "Personnel",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Criticality::Low => "Low",
            Criticality::Medium => "Medium",
            Criticality::High => "High",
            Criticality::Critical => "Critical",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Mitigate => "Mitigate",
            Strategy::Accept => "Accept",
            Strategy::Transfer => "Transfer",
            Strategy::Avoid => "Avoid",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TreatmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TreatmentStatus::Planned => "Planned",
            TreatmentStatus::InProgress => "In Progress",
            TreatmentStatus::Completed => "Completed",
        };
        f.write_str(s)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub value: u8,
    pub criticality: Criticality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: String,
    pub asset_id: String,
    pub threat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub likelihood: u8,
    pub impact: u8,
    /// Cached product of likelihood and impact. Overwritten on every write
    /// path that touches either input; never independent truth.
    pub risk_score: u8,
    /// Cached classification of `risk_score`. Same cache discipline.
    pub risk_level: RiskLevel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub vulnerability_id: String,
    pub strategy: Strategy,
    pub status: TreatmentStatus,
    pub responsible: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn check_scale(field: &str, value: u8) -> Result<(), LedgerError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "{} must be between 1 and 5, got {}",
            field, value
        )))
    }
}

fn check_non_empty(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        Err(LedgerError::Validation(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

/// Caller-supplied asset fields for insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct AssetDraft {
    pub name: String,
    pub asset_type: AssetType,
    pub value: u8,
    pub criticality: Criticality,
    pub description: Option<String>,
}

impl AssetDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_non_empty("name", &self.name)?;
        check_scale("value", self.value)
    }

    pub fn into_record(self, id: String) -> Asset {
        Asset {
            id,
            name: self.name,
            asset_type: self.asset_type,
            value: self.value,
            criticality: self.criticality,
            description: self.description,
        }
    }
}

/// Partial asset update. `None` fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub asset_type: Option<AssetType>,
    pub value: Option<u8>,
    pub criticality: Option<Criticality>,
    pub description: Option<String>,
}

impl AssetPatch {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let Some(name) = &self.name {
            check_non_empty("name", name)?;
        }
        if let Some(value) = self.value {
            check_scale("value", value)?;
        }
        Ok(())
    }

    pub fn apply(&self, record: &mut Asset) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(asset_type) = self.asset_type {
            record.asset_type = asset_type;
        }
        if let Some(value) = self.value {
            record.value = value;
        }
        if let Some(criticality) = self.criticality {
            record.criticality = criticality;
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThreatDraft {
    pub name: String,
    pub category: String,
    pub description: String,
}

impl ThreatDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_non_empty("name", &self.name)
    }

    pub fn into_record(self, id: String) -> Threat {
        Threat {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
        }
    }
}

/// Caller-supplied vulnerability fields; the store assigns the id and the
/// derived risk fields.
#[derive(Debug, Clone)]
pub struct VulnerabilityDraft {
    pub asset_id: String,
    pub threat_id: String,
    pub description: Option<String>,
    pub likelihood: u8,
    pub impact: u8,
}

impl VulnerabilityDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_non_empty("assetId", &self.asset_id)?;
        check_non_empty("threatId", &self.threat_id)?;
        check_scale("likelihood", self.likelihood)?;
        check_scale("impact", self.impact)
    }
}

/// Partial vulnerability update. The store recomputes the derived risk
/// fields after applying it, whether or not likelihood/impact changed.
#[derive(Debug, Clone, Default)]
pub struct VulnerabilityPatch {
    pub asset_id: Option<String>,
    pub threat_id: Option<String>,
    pub description: Option<String>,
    pub likelihood: Option<u8>,
    pub impact: Option<u8>,
}

impl VulnerabilityPatch {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let Some(likelihood) = self.likelihood {
            check_scale("likelihood", likelihood)?;
        }
        if let Some(impact) = self.impact {
            check_scale("impact", impact)?;
        }
        Ok(())
    }

    pub fn apply(&self, record: &mut Vulnerability) {
        if let Some(asset_id) = &self.asset_id {
            record.asset_id = asset_id.clone();
        }
        if let Some(threat_id) = &self.threat_id {
            record.threat_id = threat_id.clone();
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(likelihood) = self.likelihood {
            record.likelihood = likelihood;
        }
        if let Some(impact) = self.impact {
            record.impact = impact;
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreatmentDraft {
    pub vulnerability_id: String,
    pub strategy: Strategy,
    pub status: TreatmentStatus,
    pub responsible: String,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

impl TreatmentDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_non_empty("vulnerabilityId", &self.vulnerability_id)?;
        check_non_empty("responsible", &self.responsible)
    }

    pub fn into_record(self, id: String) -> Treatment {
        Treatment {
            id,
            vulnerability_id: self.vulnerability_id,
            strategy: self.strategy,
            status: self.status,
            responsible: self.responsible,
            due_date: self.due_date,
            notes: self.notes,
        }
    }
}

/// Partial treatment update. Status transitions are unconstrained: any
/// status is settable at any time.
#[derive(Debug, Clone, Default)]
pub struct TreatmentPatch {
    pub vulnerability_id: Option<String>,
    pub strategy: Option<Strategy>,
    pub status: Option<TreatmentStatus>,
    pub responsible: Option<String>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

impl TreatmentPatch {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let Some(responsible) = &self.responsible {
            check_non_empty("responsible", responsible)?;
        }
        Ok(())
    }

    pub fn apply(&self, record: &mut Treatment) {
        if let Some(vulnerability_id) = &self.vulnerability_id {
            record.vulnerability_id = vulnerability_id.clone();
        }
        if let Some(strategy) = self.strategy {
            record.strategy = strategy;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(responsible) = &self.responsible {
            record.responsible = responsible.clone();
        }
        if let Some(due_date) = &self.due_date {
            record.due_date = Some(due_date.clone());
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
    }
}
