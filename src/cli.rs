//! CLI struct definitions for the riskledger command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use crate::core::model::{AssetType, Criticality, RiskLevel, Strategy, TreatmentStatus};
use crate::core::store::STORE_DIR;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "riskledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Local-first risk register: catalogue assets, map threats, score vulnerabilities, and track remediation treatments."
)]
pub(crate) struct Cli {
    /// Register directory.
    #[clap(long, global = true, default_value = STORE_DIR)]
    pub dir: PathBuf,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Initialize the register directory and seed the threat catalog.
    Init,
    /// Manage the asset inventory.
    Asset(AssetCli),
    /// Browse the threat catalog.
    Threat(ThreatCli),
    /// Manage scored vulnerabilities.
    Vuln(VulnCli),
    /// Manage remediation treatments.
    Treatment(TreatmentCli),
    /// Report referential and derived-field integrity violations.
    Check(FormatCli),
    /// Recompute the cached risk fields of every vulnerability.
    Recompute,
    /// Show register-wide counts and the risk matrix.
    Summary(FormatCli),
    /// Load the demonstration dataset (additive, preserves existing data).
    Sample,
    /// Wipe all four collections. Full reset, no undo.
    Reset,
}

#[derive(clap::Args, Debug)]
pub(crate) struct FormatCli {
    /// Output format.
    #[clap(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
#[clap(about = "Manage the asset inventory.")]
pub(crate) struct AssetCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: AssetCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum AssetCommand {
    /// Add a new asset.
    Add {
        /// Asset name (positional argument).
        #[clap(value_name = "NAME")]
        name: String,
        #[clap(long = "type", value_enum)]
        asset_type: AssetType,
        /// Asset value on the 1-5 scale.
        #[clap(long)]
        value: u8,
        #[clap(long, value_enum)]
        criticality: Criticality,
        #[clap(long)]
        description: Option<String>,
    },
    /// List assets.
    List {
        /// Case-insensitive name search.
        #[clap(long)]
        search: Option<String>,
        #[clap(long = "type", value_enum)]
        asset_type: Option<AssetType>,
    },
    /// Get an asset by id.
    Get {
        #[clap(long)]
        id: String,
    },
    /// Update an asset; omitted fields keep their prior value.
    Update {
        #[clap(long)]
        id: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long = "type", value_enum)]
        asset_type: Option<AssetType>,
        #[clap(long)]
        value: Option<u8>,
        #[clap(long, value_enum)]
        criticality: Option<Criticality>,
        #[clap(long)]
        description: Option<String>,
    },
    /// Delete an asset and cascade to its vulnerabilities and their
    /// treatments.
    Delete {
        #[clap(long)]
        id: String,
    },
}

#[derive(clap::Args, Debug)]
#[clap(about = "Browse the threat catalog.")]
pub(crate) struct ThreatCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: ThreatCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ThreatCommand {
    /// List catalog threats.
    List {
        /// Filter by category.
        #[clap(long)]
        category: Option<String>,
    },
    /// Get a threat by id.
    Get {
        #[clap(long)]
        id: String,
    },
}

#[derive(clap::Args, Debug)]
#[clap(about = "Manage scored vulnerabilities.")]
pub(crate) struct VulnCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: VulnCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum VulnCommand {
    /// Add a vulnerability pairing an asset with a threat.
    Add {
        /// Asset id.
        #[clap(long)]
        asset: String,
        /// Threat id.
        #[clap(long)]
        threat: String,
        /// Likelihood on the 1-5 scale.
        #[clap(long)]
        likelihood: u8,
        /// Impact on the 1-5 scale.
        #[clap(long)]
        impact: u8,
        #[clap(long)]
        description: Option<String>,
    },
    /// List vulnerabilities with resolved asset/threat names.
    List {
        /// Filter by risk level.
        #[clap(long, value_enum)]
        level: Option<RiskLevel>,
    },
    /// Get a vulnerability by id.
    Get {
        #[clap(long)]
        id: String,
    },
    /// Update a vulnerability; risk fields are recomputed.
    Update {
        #[clap(long)]
        id: String,
        #[clap(long)]
        asset: Option<String>,
        #[clap(long)]
        threat: Option<String>,
        #[clap(long)]
        likelihood: Option<u8>,
        #[clap(long)]
        impact: Option<u8>,
        #[clap(long)]
        description: Option<String>,
    },
    /// Delete a vulnerability and cascade to its treatments.
    Delete {
        #[clap(long)]
        id: String,
    },
}

#[derive(clap::Args, Debug)]
#[clap(about = "Manage remediation treatments.")]
pub(crate) struct TreatmentCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: TreatmentCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum TreatmentCommand {
    /// Add a treatment plan for a vulnerability.
    Add {
        /// Vulnerability id.
        #[clap(long)]
        vulnerability: String,
        #[clap(long, value_enum)]
        strategy: Strategy,
        #[clap(long, value_enum, default_value = "planned")]
        status: TreatmentStatus,
        #[clap(long)]
        responsible: String,
        /// Due date (opaque date string, e.g. 2026-09-30).
        #[clap(long)]
        due: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    /// List treatments.
    List {
        /// Filter by status.
        #[clap(long, value_enum)]
        status: Option<TreatmentStatus>,
        /// Filter by strategy.
        #[clap(long, value_enum)]
        strategy: Option<Strategy>,
    },
    /// Get a treatment by id.
    Get {
        #[clap(long)]
        id: String,
    },
    /// Update a treatment; omitted fields keep their prior value.
    Update {
        #[clap(long)]
        id: String,
        #[clap(long)]
        vulnerability: Option<String>,
        #[clap(long, value_enum)]
        strategy: Option<Strategy>,
        #[clap(long, value_enum)]
        status: Option<TreatmentStatus>,
        #[clap(long)]
        responsible: Option<String>,
        #[clap(long)]
        due: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    /// Delete a treatment.
    Delete {
        #[clap(long)]
        id: String,
    },
}
