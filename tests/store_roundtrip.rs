use riskledger::core::error::LedgerError;
use riskledger::core::model::{
    Asset, AssetDraft, AssetPatch, AssetType, Criticality, RiskLevel, Strategy, Threat, Treatment,
    TreatmentDraft, TreatmentStatus, Vulnerability, VulnerabilityDraft, VulnerabilityPatch,
};
use riskledger::core::seed;
use riskledger::core::store::Store;
use std::collections::HashSet;
use tempfile::tempdir;

fn web_server_draft() -> AssetDraft {
    AssetDraft {
        name: "Web Server".to_string(),
        asset_type: AssetType::Hardware,
        value: 5,
        criticality: Criticality::Critical,
        description: Some("Production web server".to_string()),
    }
}

#[test]
fn test_get_all_defaults_to_empty() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    assert!(store.get_all::<Asset>().unwrap().is_empty());
    assert!(store.get_all::<Threat>().unwrap().is_empty());
    assert!(store.get_all::<Vulnerability>().unwrap().is_empty());
    assert!(store.get_all::<Treatment>().unwrap().is_empty());
}

#[test]
fn test_insert_then_get_by_id_round_trip() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let inserted = store.insert_asset(web_server_draft()).unwrap();
    assert!(!inserted.id.is_empty());

    let fetched: Asset = store.get_by_id(&inserted.id).unwrap().unwrap();
    assert_eq!(fetched, inserted);
    assert_eq!(fetched.name, "Web Server");
    assert_eq!(fetched.asset_type, AssetType::Hardware);
    assert_eq!(fetched.value, 5);
    assert_eq!(fetched.description.as_deref(), Some("Production web server"));
}

#[test]
fn test_partial_update_keeps_unspecified_fields() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let asset = store.insert_asset(web_server_draft()).unwrap();
    let patch = AssetPatch {
        value: Some(3),
        ..Default::default()
    };
    let updated = store.update_asset(&asset.id, &patch).unwrap().unwrap();

    assert_eq!(updated.value, 3);
    assert_eq!(updated.name, "Web Server");
    assert_eq!(updated.criticality, Criticality::Critical);
    assert_eq!(updated.description.as_deref(), Some("Production web server"));

    // Persisted, not just returned.
    let fetched: Asset = store.get_by_id(&asset.id).unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn test_update_and_delete_absent_id_signal_not_found() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let patch = AssetPatch::default();
    assert!(store.update_asset("no-such-id", &patch).unwrap().is_none());
    assert!(!store.delete::<Asset>("no-such-id").unwrap());
    assert!(store.get_by_id::<Asset>("no-such-id").unwrap().is_none());
}

#[test]
fn test_write_paths_reject_invalid_input() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let mut draft = web_server_draft();
    draft.value = 0;
    assert!(matches!(
        store.insert_asset(draft),
        Err(LedgerError::Validation(_))
    ));

    let mut draft = web_server_draft();
    draft.name = "   ".to_string();
    assert!(matches!(
        store.insert_asset(draft),
        Err(LedgerError::Validation(_))
    ));

    let vuln = VulnerabilityDraft {
        asset_id: "a1".to_string(),
        threat_id: "t1".to_string(),
        description: None,
        likelihood: 6,
        impact: 3,
    };
    assert!(matches!(
        store.insert_vulnerability(vuln),
        Err(LedgerError::Validation(_))
    ));

    let treatment = TreatmentDraft {
        vulnerability_id: "v1".to_string(),
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::Planned,
        responsible: "".to_string(),
        due_date: None,
        notes: None,
    };
    assert!(matches!(
        store.insert_treatment(treatment),
        Err(LedgerError::Validation(_))
    ));

    // Rejected writes leave the collections untouched.
    assert!(store.get_all::<Asset>().unwrap().is_empty());
    assert!(store.get_all::<Vulnerability>().unwrap().is_empty());
    assert!(store.get_all::<Treatment>().unwrap().is_empty());
}

#[test]
fn test_out_of_range_patch_is_rejected() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let asset = store.insert_asset(web_server_draft()).unwrap();
    let patch = AssetPatch {
        value: Some(9),
        ..Default::default()
    };
    assert!(matches!(
        store.update_asset(&asset.id, &patch),
        Err(LedgerError::Validation(_))
    ));
    let fetched: Asset = store.get_by_id(&asset.id).unwrap().unwrap();
    assert_eq!(fetched.value, 5);
}

#[test]
fn test_ids_are_unique() {
    // Id generation alone, at the volume the register guarantees.
    let mut ids = HashSet::new();
    for _ in 0..10_000 {
        assert!(ids.insert(Store::new_id()));
    }

    // And through the full insert path.
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();
    for _ in 0..1_000 {
        let treatment = store
            .insert_treatment(TreatmentDraft {
                vulnerability_id: "v1".to_string(),
                strategy: Strategy::Accept,
                status: TreatmentStatus::Planned,
                responsible: "Ops".to_string(),
                due_date: None,
                notes: None,
            })
            .unwrap();
        assert!(ids.insert(treatment.id));
    }
    assert_eq!(store.get_all::<Treatment>().unwrap().len(), 1_000);
}

#[test]
fn test_clear_all_wipes_every_collection() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    seed::seed_default_threats(&store).unwrap();
    store.insert_asset(web_server_draft()).unwrap();
    store.clear_all().unwrap();

    assert!(store.get_all::<Asset>().unwrap().is_empty());
    assert!(store.get_all::<Threat>().unwrap().is_empty());
    assert!(store.get_all::<Vulnerability>().unwrap().is_empty());
    assert!(store.get_all::<Treatment>().unwrap().is_empty());
}

#[test]
fn test_seed_default_threats_runs_once() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    assert_eq!(seed::seed_default_threats(&store).unwrap(), 12);
    assert_eq!(seed::seed_default_threats(&store).unwrap(), 0);

    let threats: Vec<Threat> = store.get_all().unwrap();
    assert_eq!(threats.len(), 12);
    assert!(threats.iter().any(|t| t.name == "DDoS Attack"));
    assert!(threats.iter().any(|t| t.name == "Ransomware"));
}

#[test]
fn test_vulnerability_insert_computes_derived_fields() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let cases = [
        (4u8, 4u8, 16u8, RiskLevel::High),
        (1, 5, 5, RiskLevel::Low),
        (3, 3, 9, RiskLevel::Medium),
    ];
    for (likelihood, impact, score, level) in cases {
        let vuln = store
            .insert_vulnerability(VulnerabilityDraft {
                asset_id: "a1".to_string(),
                threat_id: "t1".to_string(),
                description: None,
                likelihood,
                impact,
            })
            .unwrap();
        assert_eq!(vuln.risk_score, score);
        assert_eq!(vuln.risk_level, level);
    }
}

#[test]
fn test_vulnerability_update_recomputes_derived_fields() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let vuln = store
        .insert_vulnerability(VulnerabilityDraft {
            asset_id: "a1".to_string(),
            threat_id: "t1".to_string(),
            description: None,
            likelihood: 4,
            impact: 4,
        })
        .unwrap();

    let patch = VulnerabilityPatch {
        impact: Some(1),
        ..Default::default()
    };
    let updated = store.update_vulnerability(&vuln.id, &patch).unwrap().unwrap();
    assert_eq!(updated.likelihood, 4);
    assert_eq!(updated.risk_score, 4);
    assert_eq!(updated.risk_level, RiskLevel::Low);

    // A patch that never touches likelihood/impact still leaves the cache
    // consistent.
    let patch = VulnerabilityPatch {
        description: Some("updated".to_string()),
        ..Default::default()
    };
    let updated = store.update_vulnerability(&vuln.id, &patch).unwrap().unwrap();
    assert_eq!(updated.risk_score, 4);
    assert_eq!(updated.risk_level, RiskLevel::Low);
}

#[test]
fn test_persisted_layout_is_camel_case_json_arrays() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("register");
    let store = Store::open(&root).unwrap();

    store.insert_asset(web_server_draft()).unwrap();
    store
        .insert_vulnerability(VulnerabilityDraft {
            asset_id: "a1".to_string(),
            threat_id: "t1".to_string(),
            description: None,
            likelihood: 4,
            impact: 4,
        })
        .unwrap();

    let raw = std::fs::read_to_string(root.join("vulnerabilities.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["assetId"], "a1");
    assert_eq!(rows[0]["threatId"], "t1");
    assert_eq!(rows[0]["riskScore"], 16);
    assert_eq!(rows[0]["riskLevel"], "High");

    let raw = std::fs::read_to_string(root.join("assets.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["type"], "Hardware");
}

#[test]
fn test_corrupt_collection_file_is_reported_not_swallowed() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("register");
    let store = Store::open(&root).unwrap();

    std::fs::write(root.join("assets.json"), "{ not json").unwrap();
    assert!(matches!(
        store.get_all::<Asset>(),
        Err(LedgerError::Json(_))
    ));
}
