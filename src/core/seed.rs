//! Default threat catalog and demo dataset.

use crate::core::error::LedgerError;
use crate::core::model::{
    AssetDraft, AssetType, Criticality, Strategy, Threat, ThreatDraft, Treatment, TreatmentDraft,
    TreatmentStatus, VulnerabilityDraft,
};
use crate::core::store::Store;
use serde::Serialize;

/// Fixed catalog seeded into an empty register: (name, category,
/// description).
pub const DEFAULT_THREATS: [(&str, &str, &str); 12] = [
    (
        "Ransomware",
        "Malware",
        "Malicious software that encrypts data and demands payment",
    ),
    (
        "Phishing Attack",
        "Social Engineering",
        "Fraudulent attempts to obtain sensitive information",
    ),
    (
        "DDoS Attack",
        "Network Attack",
        "Distributed Denial of Service attack overwhelming systems",
    ),
    (
        "Insider Threat - Malicious",
        "Insider Threat",
        "Intentional harm by authorized users",
    ),
    (
        "Insider Threat - Negligent",
        "Insider Threat",
        "Unintentional security breaches by employees",
    ),
    (
        "SQL Injection",
        "Web Attack",
        "Code injection targeting database-driven applications",
    ),
    (
        "Zero-Day Exploit",
        "Vulnerability Exploit",
        "Attack on previously unknown vulnerability",
    ),
    (
        "Physical Security Breach",
        "Physical",
        "Unauthorized physical access to facilities or equipment",
    ),
    (
        "Data Breach",
        "Data Security",
        "Unauthorized access to confidential data",
    ),
    (
        "Supply Chain Attack",
        "Third Party",
        "Attack through trusted third-party vendors",
    ),
    (
        "Man-in-the-Middle",
        "Network Attack",
        "Interception of communications between parties",
    ),
    (
        "Credential Theft",
        "Authentication",
        "Theft of usernames and passwords",
    ),
];

/// Seed the default threat catalog when the Threat collection is empty.
/// No-op (returns 0) on an already-seeded register; safe to re-run.
pub fn seed_default_threats(store: &Store) -> Result<usize, LedgerError> {
    let existing: Vec<Threat> = store.get_all()?;
    if !existing.is_empty() {
        return Ok(0);
    }
    for (name, category, description) in DEFAULT_THREATS {
        store.insert_threat(ThreatDraft {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
        })?;
    }
    Ok(DEFAULT_THREATS.len())
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleOutcome {
    pub assets: usize,
    pub vulnerabilities: usize,
    pub treatments: usize,
}

struct SampleAsset {
    name: &'static str,
    asset_type: AssetType,
    value: u8,
    criticality: Criticality,
    description: &'static str,
}

struct SampleVulnerability {
    asset_name: &'static str,
    threat_name: &'static str,
    likelihood: u8,
    impact: u8,
    description: &'static str,
}

struct SampleTreatment {
    vuln_index: usize,
    strategy: Strategy,
    status: TreatmentStatus,
    responsible: &'static str,
    notes: &'static str,
}

const SAMPLE_ASSETS: [SampleAsset; 10] = [
    SampleAsset {
        name: "Web Server",
        asset_type: AssetType::Hardware,
        value: 5,
        criticality: Criticality::Critical,
        description: "Production web server hosting customer portal",
    },
    SampleAsset {
        name: "Database Server",
        asset_type: AssetType::Hardware,
        value: 5,
        criticality: Criticality::Critical,
        description: "Primary customer database",
    },
    SampleAsset {
        name: "Customer Data",
        asset_type: AssetType::Data,
        value: 5,
        criticality: Criticality::Critical,
        description: "Personally identifiable information",
    },
    SampleAsset {
        name: "Email System",
        asset_type: AssetType::Software,
        value: 4,
        criticality: Criticality::High,
        description: "Corporate email infrastructure",
    },
    SampleAsset {
        name: "Firewall",
        asset_type: AssetType::Hardware,
        value: 4,
        criticality: Criticality::High,
        description: "Network perimeter security",
    },
    SampleAsset {
        name: "Employee Workstations",
        asset_type: AssetType::Hardware,
        value: 3,
        criticality: Criticality::Medium,
        description: "Desktop computers for staff",
    },
    SampleAsset {
        name: "Backup System",
        asset_type: AssetType::Software,
        value: 4,
        criticality: Criticality::High,
        description: "Automated backup solution",
    },
    SampleAsset {
        name: "Office Building",
        asset_type: AssetType::Facilities,
        value: 3,
        criticality: Criticality::Medium,
        description: "Main office location",
    },
    SampleAsset {
        name: "IT Staff",
        asset_type: AssetType::Personnel,
        value: 4,
        criticality: Criticality::High,
        description: "IT department personnel",
    },
    SampleAsset {
        name: "Mobile Devices",
        asset_type: AssetType::Hardware,
        value: 3,
        criticality: Criticality::Medium,
        description: "Company-issued smartphones",
    },
];

const SAMPLE_VULNERABILITIES: [SampleVulnerability; 10] = [
    SampleVulnerability {
        asset_name: "Web Server",
        threat_name: "DDoS Attack",
        likelihood: 4,
        impact: 4,
        description: "Server vulnerable to volumetric attacks",
    },
    SampleVulnerability {
        asset_name: "Database Server",
        threat_name: "SQL Injection",
        likelihood: 3,
        impact: 5,
        description: "Input validation gaps in legacy code",
    },
    SampleVulnerability {
        asset_name: "Customer Data",
        threat_name: "Data Breach",
        likelihood: 3,
        impact: 5,
        description: "Insufficient encryption at rest",
    },
    SampleVulnerability {
        asset_name: "Email System",
        threat_name: "Phishing Attack",
        likelihood: 5,
        impact: 3,
        description: "Users susceptible to social engineering",
    },
    SampleVulnerability {
        asset_name: "Firewall",
        threat_name: "Zero-Day Exploit",
        likelihood: 2,
        impact: 5,
        description: "Outdated firmware version",
    },
    SampleVulnerability {
        asset_name: "Employee Workstations",
        threat_name: "Ransomware",
        likelihood: 4,
        impact: 3,
        description: "No endpoint protection deployed",
    },
    SampleVulnerability {
        asset_name: "Backup System",
        threat_name: "Insider Threat - Malicious",
        likelihood: 2,
        impact: 4,
        description: "Excessive admin privileges",
    },
    SampleVulnerability {
        asset_name: "Office Building",
        threat_name: "Physical Security Breach",
        likelihood: 2,
        impact: 3,
        description: "Limited access controls",
    },
    SampleVulnerability {
        asset_name: "IT Staff",
        threat_name: "Insider Threat - Negligent",
        likelihood: 3,
        impact: 3,
        description: "Insufficient security training",
    },
    SampleVulnerability {
        asset_name: "Mobile Devices",
        threat_name: "Credential Theft",
        likelihood: 3,
        impact: 3,
        description: "Weak password policies",
    },
];

const SAMPLE_TREATMENTS: [SampleTreatment; 6] = [
    SampleTreatment {
        vuln_index: 0,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::InProgress,
        responsible: "Network Team",
        notes: "Implement DDoS protection service",
    },
    SampleTreatment {
        vuln_index: 1,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::Planned,
        responsible: "Dev Team",
        notes: "Code review and input sanitization",
    },
    SampleTreatment {
        vuln_index: 2,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::InProgress,
        responsible: "Security Team",
        notes: "Deploy encryption solution",
    },
    SampleTreatment {
        vuln_index: 3,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::Planned,
        responsible: "HR & IT",
        notes: "Security awareness training program",
    },
    SampleTreatment {
        vuln_index: 4,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::Planned,
        responsible: "Network Team",
        notes: "Schedule firmware update",
    },
    SampleTreatment {
        vuln_index: 5,
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::InProgress,
        responsible: "IT Team",
        notes: "Deploy endpoint protection software",
    },
];

/// Load the demonstration dataset. Additive: existing records are
/// preserved, and vulnerability/treatment links only target records this
/// load itself inserted. Seeds the threat catalog first so the sample
/// vulnerabilities can resolve their threats by name.
pub fn load_sample_data(store: &Store) -> Result<SampleOutcome, LedgerError> {
    seed_default_threats(store)?;

    let mut outcome = SampleOutcome::default();
    let mut inserted_assets = Vec::with_capacity(SAMPLE_ASSETS.len());
    for sample in &SAMPLE_ASSETS {
        let asset = store.insert_asset(AssetDraft {
            name: sample.name.to_string(),
            asset_type: sample.asset_type,
            value: sample.value,
            criticality: sample.criticality,
            description: Some(sample.description.to_string()),
        })?;
        inserted_assets.push(asset);
        outcome.assets += 1;
    }

    let threats: Vec<Threat> = store.get_all()?;
    let mut inserted_vulns = Vec::with_capacity(SAMPLE_VULNERABILITIES.len());
    for sample in &SAMPLE_VULNERABILITIES {
        let asset = inserted_assets.iter().find(|a| a.name == sample.asset_name);
        let threat = threats.iter().find(|t| t.name == sample.threat_name);
        let (Some(asset), Some(threat)) = (asset, threat) else {
            continue;
        };
        let vuln = store.insert_vulnerability(VulnerabilityDraft {
            asset_id: asset.id.clone(),
            threat_id: threat.id.clone(),
            description: Some(sample.description.to_string()),
            likelihood: sample.likelihood,
            impact: sample.impact,
        })?;
        inserted_vulns.push(vuln);
        outcome.vulnerabilities += 1;
    }

    for sample in &SAMPLE_TREATMENTS {
        let Some(vuln) = inserted_vulns.get(sample.vuln_index) else {
            continue;
        };
        let _: Treatment = store.insert_treatment(TreatmentDraft {
            vulnerability_id: vuln.id.clone(),
            strategy: sample.strategy,
            status: sample.status,
            responsible: sample.responsible.to_string(),
            due_date: None,
            notes: Some(sample.notes.to_string()),
        })?;
        outcome.treatments += 1;
    }

    Ok(outcome)
}
