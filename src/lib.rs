//! riskledger: a local-first risk register.
//!
//! Catalogue assets, map them against a threat catalog, score the resulting
//! vulnerabilities by likelihood × impact, classify them into risk bands,
//! and track remediation treatments. All state is local: four JSON
//! collections in a register directory, rewritten in full on every mutation,
//! with no server, no accounts, and no background activity.
//!
//! # Crate structure
//!
//! - [`core::store`]: typed CRUD and persistence over the four collections
//! - [`core::risk`]: pure scoring and band classification
//! - [`core::integrity`]: cascading deletes and integrity diagnostics
//! - [`core::summary`]: register-wide aggregates and the 5×5 risk matrix
//!
//! The CLI defined in this file is a thin consumer of that surface; every
//! operation it performs is available as a library call.
//!
//! # Examples
//!
//! ```bash
//! # Initialize a register and seed the threat catalog
//! riskledger init
//!
//! # Catalogue an asset
//! riskledger asset add "Web Server" --type hardware --value 5 --criticality critical
//!
//! # Score a vulnerability (derived risk fields computed at write time)
//! riskledger vuln add --asset <ID> --threat <ID> --likelihood 4 --impact 4
//!
//! # Diagnostics and repair
//! riskledger check
//! riskledger recompute
//! ```

pub mod core;

mod cli;

use crate::cli::{
    AssetCli, AssetCommand, Cli, Command, FormatCli, OutputFormat, ThreatCli, ThreatCommand,
    TreatmentCli, TreatmentCommand, VulnCli, VulnCommand,
};
use crate::core::error::LedgerError;
use crate::core::integrity;
use crate::core::model::{
    Asset, AssetDraft, AssetPatch, RiskLevel, Threat, Treatment, TreatmentDraft, TreatmentPatch,
    Vulnerability, VulnerabilityDraft, VulnerabilityPatch,
};
use crate::core::output::{compact_line, or_dash, risk_badge};
use crate::core::risk;
use crate::core::seed;
use crate::core::store::Store;
use crate::core::summary;
use clap::Parser;
use serde::Serialize;
use std::collections::HashMap;

pub fn run() -> Result<(), LedgerError> {
    let cli = Cli::parse();
    let store = Store::open(&cli.dir)?;

    match cli.command {
        Command::Init => {
            let seeded = seed::seed_default_threats(&store)?;
            println!(
                "Risk register initialized at {} ({} threats seeded)",
                store.root().display(),
                seeded
            );
            Ok(())
        }
        Command::Asset(group) => run_asset(&store, group),
        Command::Threat(group) => run_threat(&store, group),
        Command::Vuln(group) => run_vuln(&store, group),
        Command::Treatment(group) => run_treatment(&store, group),
        Command::Check(FormatCli { format }) => run_check(&store, format),
        Command::Recompute => {
            let count = risk::recompute_all(&store)?;
            println!("Recomputed risk for {} vulnerabilities", count);
            Ok(())
        }
        Command::Summary(FormatCli { format }) => run_summary(&store, format),
        Command::Sample => {
            let outcome = seed::load_sample_data(&store)?;
            println!(
                "Sample data loaded: {} assets, {} vulnerabilities, {} treatments",
                outcome.assets, outcome.vulnerabilities, outcome.treatments
            );
            Ok(())
        }
        Command::Reset => {
            store.clear_all()?;
            println!("Register cleared.");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), LedgerError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found(what: &str, id: &str) -> LedgerError {
    LedgerError::NotFound(format!("{} {}", what, id))
}

fn run_asset(store: &Store, group: AssetCli) -> Result<(), LedgerError> {
    match group.command {
        AssetCommand::Add {
            name,
            asset_type,
            value,
            criticality,
            description,
        } => {
            let asset = store.insert_asset(AssetDraft {
                name,
                asset_type,
                value,
                criticality,
                description,
            })?;
            match group.format {
                OutputFormat::Json => print_json(&asset),
                OutputFormat::Text => {
                    println!("Added asset {} ({})", asset.id, asset.name);
                    Ok(())
                }
            }
        }
        AssetCommand::List { search, asset_type } => {
            let mut assets: Vec<Asset> = store.get_all()?;
            if let Some(search) = &search {
                let needle = search.to_lowercase();
                assets.retain(|a| a.name.to_lowercase().contains(&needle));
            }
            if let Some(kind) = asset_type {
                assets.retain(|a| a.asset_type == kind);
            }
            match group.format {
                OutputFormat::Json => print_json(&assets),
                OutputFormat::Text => {
                    if assets.is_empty() {
                        println!("No assets.");
                        return Ok(());
                    }
                    for asset in &assets {
                        println!(
                            "{}  {}  {}  value={}  {}  {}",
                            asset.id,
                            asset.name,
                            asset.asset_type,
                            asset.value,
                            asset.criticality,
                            compact_line(or_dash(asset.description.as_deref()), 60)
                        );
                    }
                    Ok(())
                }
            }
        }
        AssetCommand::Get { id } => {
            let asset: Asset = store.get_by_id(&id)?.ok_or_else(|| not_found("asset", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&asset),
                OutputFormat::Text => {
                    println!("id:          {}", asset.id);
                    println!("name:        {}", asset.name);
                    println!("type:        {}", asset.asset_type);
                    println!("value:       {}", asset.value);
                    println!("criticality: {}", asset.criticality);
                    println!("description: {}", or_dash(asset.description.as_deref()));
                    Ok(())
                }
            }
        }
        AssetCommand::Update {
            id,
            name,
            asset_type,
            value,
            criticality,
            description,
        } => {
            let patch = AssetPatch {
                name,
                asset_type,
                value,
                criticality,
                description,
            };
            let asset = store
                .update_asset(&id, &patch)?
                .ok_or_else(|| not_found("asset", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&asset),
                OutputFormat::Text => {
                    println!("Updated asset {} ({})", asset.id, asset.name);
                    Ok(())
                }
            }
        }
        AssetCommand::Delete { id } => {
            if !store.delete::<Asset>(&id)? {
                return Err(not_found("asset", &id));
            }
            let outcome = integrity::cascade_delete_asset(store, &id)?;
            println!(
                "Deleted asset {} ({} vulnerabilities and {} treatments removed)",
                id, outcome.vulnerabilities_removed, outcome.treatments_removed
            );
            Ok(())
        }
    }
}

fn run_threat(store: &Store, group: ThreatCli) -> Result<(), LedgerError> {
    match group.command {
        ThreatCommand::List { category } => {
            let mut threats: Vec<Threat> = store.get_all()?;
            if let Some(category) = &category {
                let needle = category.to_lowercase();
                threats.retain(|t| t.category.to_lowercase() == needle);
            }
            match group.format {
                OutputFormat::Json => print_json(&threats),
                OutputFormat::Text => {
                    if threats.is_empty() {
                        println!("No threats. Run `riskledger init` to seed the catalog.");
                        return Ok(());
                    }
                    for threat in &threats {
                        println!(
                            "{}  {}  [{}]  {}",
                            threat.id,
                            threat.name,
                            threat.category,
                            compact_line(&threat.description, 60)
                        );
                    }
                    Ok(())
                }
            }
        }
        ThreatCommand::Get { id } => {
            let threat: Threat = store
                .get_by_id(&id)?
                .ok_or_else(|| not_found("threat", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&threat),
                OutputFormat::Text => {
                    println!("id:          {}", threat.id);
                    println!("name:        {}", threat.name);
                    println!("category:    {}", threat.category);
                    println!("description: {}", threat.description);
                    Ok(())
                }
            }
        }
    }
}

/// Id -> name lookup that renders dangling references as "Unknown" instead
/// of failing.
fn name_or_unknown<'a>(names: &'a HashMap<&str, &str>, id: &str) -> &'a str {
    names.get(id).copied().unwrap_or("Unknown")
}

fn run_vuln(store: &Store, group: VulnCli) -> Result<(), LedgerError> {
    match group.command {
        VulnCommand::Add {
            asset,
            threat,
            likelihood,
            impact,
            description,
        } => {
            let vuln = store.insert_vulnerability(VulnerabilityDraft {
                asset_id: asset,
                threat_id: threat,
                description,
                likelihood,
                impact,
            })?;
            match group.format {
                OutputFormat::Json => print_json(&vuln),
                OutputFormat::Text => {
                    println!(
                        "Added vulnerability {} (score {}, {})",
                        vuln.id,
                        vuln.risk_score,
                        risk_badge(vuln.risk_level)
                    );
                    Ok(())
                }
            }
        }
        VulnCommand::List { level } => {
            let mut vulns: Vec<Vulnerability> = store.get_all()?;
            if let Some(level) = level {
                vulns.retain(|v| v.risk_level == level);
            }
            match group.format {
                OutputFormat::Json => print_json(&vulns),
                OutputFormat::Text => {
                    if vulns.is_empty() {
                        println!("No vulnerabilities.");
                        return Ok(());
                    }
                    let assets: Vec<Asset> = store.get_all()?;
                    let threats: Vec<Threat> = store.get_all()?;
                    let asset_names: HashMap<&str, &str> = assets
                        .iter()
                        .map(|a| (a.id.as_str(), a.name.as_str()))
                        .collect();
                    let threat_names: HashMap<&str, &str> = threats
                        .iter()
                        .map(|t| (t.id.as_str(), t.name.as_str()))
                        .collect();
                    for vuln in &vulns {
                        println!(
                            "{}  {} / {}  L{}xI{}  score={}  {}",
                            vuln.id,
                            name_or_unknown(&asset_names, &vuln.asset_id),
                            name_or_unknown(&threat_names, &vuln.threat_id),
                            vuln.likelihood,
                            vuln.impact,
                            vuln.risk_score,
                            risk_badge(vuln.risk_level)
                        );
                    }
                    Ok(())
                }
            }
        }
        VulnCommand::Get { id } => {
            let vuln: Vulnerability = store
                .get_by_id(&id)?
                .ok_or_else(|| not_found("vulnerability", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&vuln),
                OutputFormat::Text => {
                    println!("id:          {}", vuln.id);
                    println!("assetId:     {}", vuln.asset_id);
                    println!("threatId:    {}", vuln.threat_id);
                    println!(
                        "likelihood:  {} ({})",
                        vuln.likelihood,
                        risk::likelihood_label(vuln.likelihood)
                    );
                    println!(
                        "impact:      {} ({})",
                        vuln.impact,
                        risk::impact_label(vuln.impact)
                    );
                    println!("riskScore:   {}", vuln.risk_score);
                    println!("riskLevel:   {}", risk_badge(vuln.risk_level));
                    println!("description: {}", or_dash(vuln.description.as_deref()));
                    Ok(())
                }
            }
        }
        VulnCommand::Update {
            id,
            asset,
            threat,
            likelihood,
            impact,
            description,
        } => {
            let patch = VulnerabilityPatch {
                asset_id: asset,
                threat_id: threat,
                description,
                likelihood,
                impact,
            };
            let vuln = store
                .update_vulnerability(&id, &patch)?
                .ok_or_else(|| not_found("vulnerability", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&vuln),
                OutputFormat::Text => {
                    println!(
                        "Updated vulnerability {} (score {}, {})",
                        vuln.id,
                        vuln.risk_score,
                        risk_badge(vuln.risk_level)
                    );
                    Ok(())
                }
            }
        }
        VulnCommand::Delete { id } => {
            if !store.delete::<Vulnerability>(&id)? {
                return Err(not_found("vulnerability", &id));
            }
            let outcome = integrity::cascade_delete_vulnerability(store, &id)?;
            println!(
                "Deleted vulnerability {} ({} treatments removed)",
                id, outcome.treatments_removed
            );
            Ok(())
        }
    }
}

fn run_treatment(store: &Store, group: TreatmentCli) -> Result<(), LedgerError> {
    match group.command {
        TreatmentCommand::Add {
            vulnerability,
            strategy,
            status,
            responsible,
            due,
            notes,
        } => {
            let treatment = store.insert_treatment(TreatmentDraft {
                vulnerability_id: vulnerability,
                strategy,
                status,
                responsible,
                due_date: due,
                notes,
            })?;
            match group.format {
                OutputFormat::Json => print_json(&treatment),
                OutputFormat::Text => {
                    println!(
                        "Added treatment {} ({}, {})",
                        treatment.id, treatment.strategy, treatment.status
                    );
                    Ok(())
                }
            }
        }
        TreatmentCommand::List { status, strategy } => {
            let mut treatments: Vec<Treatment> = store.get_all()?;
            if let Some(status) = status {
                treatments.retain(|t| t.status == status);
            }
            if let Some(strategy) = strategy {
                treatments.retain(|t| t.strategy == strategy);
            }
            match group.format {
                OutputFormat::Json => print_json(&treatments),
                OutputFormat::Text => {
                    if treatments.is_empty() {
                        println!("No treatments.");
                        return Ok(());
                    }
                    for treatment in &treatments {
                        println!(
                            "{}  vuln={}  {}  {}  {}  due={}  {}",
                            treatment.id,
                            treatment.vulnerability_id,
                            treatment.strategy,
                            treatment.status,
                            treatment.responsible,
                            or_dash(treatment.due_date.as_deref()),
                            compact_line(or_dash(treatment.notes.as_deref()), 50)
                        );
                    }
                    Ok(())
                }
            }
        }
        TreatmentCommand::Get { id } => {
            let treatment: Treatment = store
                .get_by_id(&id)?
                .ok_or_else(|| not_found("treatment", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&treatment),
                OutputFormat::Text => {
                    println!("id:              {}", treatment.id);
                    println!("vulnerabilityId: {}", treatment.vulnerability_id);
                    println!("strategy:        {}", treatment.strategy);
                    println!("status:          {}", treatment.status);
                    println!("responsible:     {}", treatment.responsible);
                    println!("dueDate:         {}", or_dash(treatment.due_date.as_deref()));
                    println!("notes:           {}", or_dash(treatment.notes.as_deref()));
                    Ok(())
                }
            }
        }
        TreatmentCommand::Update {
            id,
            vulnerability,
            strategy,
            status,
            responsible,
            due,
            notes,
        } => {
            let patch = TreatmentPatch {
                vulnerability_id: vulnerability,
                strategy,
                status,
                responsible,
                due_date: due,
                notes,
            };
            let treatment = store
                .update_treatment(&id, &patch)?
                .ok_or_else(|| not_found("treatment", &id))?;
            match group.format {
                OutputFormat::Json => print_json(&treatment),
                OutputFormat::Text => {
                    println!(
                        "Updated treatment {} ({}, {})",
                        treatment.id, treatment.strategy, treatment.status
                    );
                    Ok(())
                }
            }
        }
        TreatmentCommand::Delete { id } => {
            if !store.delete::<Treatment>(&id)? {
                return Err(not_found("treatment", &id));
            }
            println!("Deleted treatment {}", id);
            Ok(())
        }
    }
}

fn run_check(store: &Store, format: OutputFormat) -> Result<(), LedgerError> {
    let referential = integrity::validate(store)?;
    let derived = integrity::validate_derived_fields(store)?;
    let total = referential.len() + derived.len();
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "referential": referential,
            "derived": derived,
            "total": total,
        })),
        OutputFormat::Text => {
            if total == 0 {
                println!("No integrity violations found.");
                return Ok(());
            }
            for violation in referential.iter().chain(derived.iter()) {
                println!(
                    "{} {} [{}]: {}",
                    violation.collection, violation.record_id, violation.field, violation.message
                );
            }
            println!("{} violations", total);
            Ok(())
        }
    }
}

fn run_summary(store: &Store, format: OutputFormat) -> Result<(), LedgerError> {
    let summary = summary::summarize(store)?;
    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!(
                "Assets: {}  Threats: {}  Vulnerabilities: {}  Treatments: {} ({} active)",
                summary.assets,
                summary.threats,
                summary.vulnerabilities,
                summary.treatments,
                summary.active_treatments
            );
            println!(
                "Risk distribution: {} {}  {} {}  {} {}  {} {}",
                risk_badge(RiskLevel::Low),
                summary.low_risk,
                risk_badge(RiskLevel::Medium),
                summary.medium_risk,
                risk_badge(RiskLevel::High),
                summary.high_risk,
                risk_badge(RiskLevel::Unknown),
                summary.unknown_risk
            );
            println!("Matrix (likelihood 5->1 rows, impact 1->5 columns):");
            for row in summary.matrix.chunks(5) {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| {
                        if cell.count > 0 {
                            format!("{:>2}[{}]", cell.score, cell.count)
                        } else {
                            format!("{:>2}   ", cell.score)
                        }
                    })
                    .collect();
                println!("  L{}  {}", row[0].likelihood, cells.join(" "));
            }
            Ok(())
        }
    }
}
