//! Record store: typed CRUD and persistence for the four register
//! collections.
//!
//! A `Store` is a directory holding one JSON array file per collection.
//! Every mutation reads the full collection, applies the change, and writes
//! the full collection back through a temp-file rename, so a read issued
//! after any mutating call returns the persisted state. There is no cache
//! layer and no partial write.
//!
//! Deletes here never cascade; callers that remove an asset or a
//! vulnerability invoke the integrity module immediately afterwards.

use crate::core::error::LedgerError;
use crate::core::model::{
    Asset, AssetDraft, AssetPatch, Threat, ThreatDraft, Treatment, TreatmentDraft, TreatmentPatch,
    Vulnerability, VulnerabilityDraft, VulnerabilityPatch,
};
use crate::core::risk;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use ulid::Ulid;

/// Default store directory name used by the CLI.
pub const STORE_DIR: &str = ".riskledger";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Collection {
    Assets,
    Threats,
    Vulnerabilities,
    Treatments,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Assets,
        Collection::Threats,
        Collection::Vulnerabilities,
        Collection::Treatments,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Assets => "assets.json",
            Collection::Threats => "threats.json",
            Collection::Vulnerabilities => "vulnerabilities.json",
            Collection::Treatments => "treatments.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Collection::Assets => "assets",
            Collection::Threats => "threats",
            Collection::Vulnerabilities => "vulnerabilities",
            Collection::Treatments => "treatments",
        };
        f.write_str(s)
    }
}

/// A persisted record belonging to exactly one collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;
    fn id(&self) -> &str;
}

impl Record for Asset {
    const COLLECTION: Collection = Collection::Assets;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Threat {
    const COLLECTION: Collection = Collection::Threats;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Vulnerability {
    const COLLECTION: Collection = Collection::Vulnerabilities;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Treatment {
    const COLLECTION: Collection = Collection::Treatments;
    fn id(&self) -> &str {
        &self.id
    }
}

/// Handle on a register workspace directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) the register directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Store { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh record id: ULID, monotonic time component plus randomness.
    /// Never reused, no semantic meaning.
    pub fn new_id() -> String {
        Ulid::new().to_string()
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    /// Full collection in insertion order. A never-written collection reads
    /// as empty; an unreadable or unparsable file is a reported error, not
    /// an empty result.
    pub fn get_all<T: Record>(&self) -> Result<Vec<T>, LedgerError> {
        let path = self.collection_path(T::COLLECTION);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) fn save_all<T: Record>(&self, rows: &[T]) -> Result<(), LedgerError> {
        let path = self.collection_path(T::COLLECTION);
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(rows)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Linear lookup by id.
    pub fn get_by_id<T: Record>(&self, id: &str) -> Result<Option<T>, LedgerError> {
        Ok(self.get_all::<T>()?.into_iter().find(|r| r.id() == id))
    }

    /// Remove a record if present. Returns whether a removal occurred.
    /// Dependent records are the integrity module's concern.
    pub fn delete<T: Record>(&self, id: &str) -> Result<bool, LedgerError> {
        let mut rows = self.get_all::<T>()?;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Ok(false);
        }
        self.save_all(&rows)?;
        Ok(true)
    }

    /// Wipe all four collections. Full reset, no undo.
    pub fn clear_all(&self) -> Result<(), LedgerError> {
        for collection in Collection::ALL {
            let path = self.collection_path(collection);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn append<T: Record>(&self, record: T) -> Result<T, LedgerError> {
        let mut rows = self.get_all::<T>()?;
        rows.push(record.clone());
        self.save_all(&rows)?;
        Ok(record)
    }

    fn update_by_id<T, F>(&self, id: &str, mutate: F) -> Result<Option<T>, LedgerError>
    where
        T: Record,
        F: FnOnce(&mut T),
    {
        let mut rows = self.get_all::<T>()?;
        let Some(row) = rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        mutate(row);
        let updated = row.clone();
        self.save_all(&rows)?;
        Ok(Some(updated))
    }

    pub fn insert_asset(&self, draft: AssetDraft) -> Result<Asset, LedgerError> {
        draft.validate()?;
        self.append(draft.into_record(Self::new_id()))
    }

    pub fn update_asset(&self, id: &str, patch: &AssetPatch) -> Result<Option<Asset>, LedgerError> {
        patch.validate()?;
        self.update_by_id(id, |row| patch.apply(row))
    }

    pub fn insert_threat(&self, draft: ThreatDraft) -> Result<Threat, LedgerError> {
        draft.validate()?;
        self.append(draft.into_record(Self::new_id()))
    }

    /// Insert a vulnerability, computing the cached risk fields from the
    /// supplied likelihood and impact.
    pub fn insert_vulnerability(
        &self,
        draft: VulnerabilityDraft,
    ) -> Result<Vulnerability, LedgerError> {
        draft.validate()?;
        let score = risk::score(draft.likelihood, draft.impact);
        self.append(Vulnerability {
            id: Self::new_id(),
            asset_id: draft.asset_id,
            threat_id: draft.threat_id,
            description: draft.description,
            likelihood: draft.likelihood,
            impact: draft.impact,
            risk_score: score,
            risk_level: risk::classify(score),
        })
    }

    /// Apply a partial update and recompute the cached risk fields. The
    /// recompute is unconditional so the cache invariant holds even for
    /// patches that never touched likelihood or impact.
    pub fn update_vulnerability(
        &self,
        id: &str,
        patch: &VulnerabilityPatch,
    ) -> Result<Option<Vulnerability>, LedgerError> {
        patch.validate()?;
        self.update_by_id(id, |row: &mut Vulnerability| {
            patch.apply(row);
            row.risk_score = risk::score(row.likelihood, row.impact);
            row.risk_level = risk::classify(row.risk_score);
        })
    }

    pub fn insert_treatment(&self, draft: TreatmentDraft) -> Result<Treatment, LedgerError> {
        draft.validate()?;
        self.append(draft.into_record(Self::new_id()))
    }

    pub fn update_treatment(
        &self,
        id: &str,
        patch: &TreatmentPatch,
    ) -> Result<Option<Treatment>, LedgerError> {
        patch.validate()?;
        self.update_by_id(id, |row| patch.apply(row))
    }
}
