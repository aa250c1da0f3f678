use riskledger::core::integrity;
use riskledger::core::model::{
    Asset, AssetDraft, AssetType, Criticality, RiskLevel, Strategy, Treatment, TreatmentDraft,
    TreatmentStatus, Vulnerability, VulnerabilityDraft,
};
use riskledger::core::risk;
use riskledger::core::seed;
use riskledger::core::store::{Collection, Store};
use tempfile::tempdir;

fn asset_draft(name: &str) -> AssetDraft {
    AssetDraft {
        name: name.to_string(),
        asset_type: AssetType::Hardware,
        value: 4,
        criticality: Criticality::High,
        description: None,
    }
}

fn vuln_draft(asset_id: &str, threat_id: &str) -> VulnerabilityDraft {
    VulnerabilityDraft {
        asset_id: asset_id.to_string(),
        threat_id: threat_id.to_string(),
        description: None,
        likelihood: 3,
        impact: 4,
    }
}

fn treatment_draft(vulnerability_id: &str) -> TreatmentDraft {
    TreatmentDraft {
        vulnerability_id: vulnerability_id.to_string(),
        strategy: Strategy::Mitigate,
        status: TreatmentStatus::Planned,
        responsible: "Security Team".to_string(),
        due_date: None,
        notes: None,
    }
}

#[test]
fn test_cascade_delete_asset_removes_two_levels() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();
    seed::seed_default_threats(&store).unwrap();
    let threat_id = store.get_all::<riskledger::core::model::Threat>().unwrap()[0]
        .id
        .clone();

    let doomed = store.insert_asset(asset_draft("Doomed")).unwrap();
    let survivor = store.insert_asset(asset_draft("Survivor")).unwrap();

    let doomed_vuln_a = store
        .insert_vulnerability(vuln_draft(&doomed.id, &threat_id))
        .unwrap();
    let doomed_vuln_b = store
        .insert_vulnerability(vuln_draft(&doomed.id, &threat_id))
        .unwrap();
    let surviving_vuln = store
        .insert_vulnerability(vuln_draft(&survivor.id, &threat_id))
        .unwrap();

    store.insert_treatment(treatment_draft(&doomed_vuln_a.id)).unwrap();
    store.insert_treatment(treatment_draft(&doomed_vuln_a.id)).unwrap();
    store.insert_treatment(treatment_draft(&doomed_vuln_b.id)).unwrap();
    let surviving_treatment = store
        .insert_treatment(treatment_draft(&surviving_vuln.id))
        .unwrap();

    assert!(store.delete::<Asset>(&doomed.id).unwrap());
    let outcome = integrity::cascade_delete_asset(&store, &doomed.id).unwrap();
    assert_eq!(outcome.vulnerabilities_removed, 2);
    assert_eq!(outcome.treatments_removed, 3);

    let vulns: Vec<Vulnerability> = store.get_all().unwrap();
    assert_eq!(vulns.len(), 1);
    assert_eq!(vulns[0].id, surviving_vuln.id);

    let treatments: Vec<Treatment> = store.get_all().unwrap();
    assert_eq!(treatments.len(), 1);
    assert_eq!(treatments[0].id, surviving_treatment.id);

    // Nothing dangling remains after the cascade.
    assert!(integrity::validate(&store).unwrap().is_empty());
}

#[test]
fn test_cascade_delete_asset_with_no_dependents_is_a_noop() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let asset = store.insert_asset(asset_draft("Lonely")).unwrap();
    assert!(store.delete::<Asset>(&asset.id).unwrap());
    let outcome = integrity::cascade_delete_asset(&store, &asset.id).unwrap();
    assert_eq!(outcome.vulnerabilities_removed, 0);
    assert_eq!(outcome.treatments_removed, 0);
}

#[test]
fn test_cascade_delete_vulnerability_removes_treatments() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let vuln = store
        .insert_vulnerability(vuln_draft("a1", "t1"))
        .unwrap();
    let other = store
        .insert_vulnerability(vuln_draft("a1", "t1"))
        .unwrap();
    store.insert_treatment(treatment_draft(&vuln.id)).unwrap();
    store.insert_treatment(treatment_draft(&vuln.id)).unwrap();
    store.insert_treatment(treatment_draft(&other.id)).unwrap();

    assert!(store.delete::<Vulnerability>(&vuln.id).unwrap());
    let outcome = integrity::cascade_delete_vulnerability(&store, &vuln.id).unwrap();
    assert_eq!(outcome.treatments_removed, 2);

    let treatments: Vec<Treatment> = store.get_all().unwrap();
    assert_eq!(treatments.len(), 1);
    assert_eq!(treatments[0].vulnerability_id, other.id);
}

#[test]
fn test_validate_reports_dangling_asset_reference() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();
    seed::seed_default_threats(&store).unwrap();
    let threat_id = store.get_all::<riskledger::core::model::Threat>().unwrap()[0]
        .id
        .clone();

    let vuln = store
        .insert_vulnerability(vuln_draft("no-such-asset", &threat_id))
        .unwrap();

    let violations = integrity::validate(&store).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].collection, Collection::Vulnerabilities);
    assert_eq!(violations[0].record_id, vuln.id);
    assert_eq!(violations[0].field, "assetId");
}

#[test]
fn test_validate_reports_dangling_threat_and_treatment_references() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    let asset = store.insert_asset(asset_draft("Server")).unwrap();
    let vuln = store
        .insert_vulnerability(vuln_draft(&asset.id, "no-such-threat"))
        .unwrap();
    let treatment = store
        .insert_treatment(treatment_draft("no-such-vulnerability"))
        .unwrap();

    let violations = integrity::validate(&store).unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations
        .iter()
        .any(|v| v.record_id == vuln.id && v.field == "threatId"));
    assert!(violations
        .iter()
        .any(|v| v.record_id == treatment.id && v.field == "vulnerabilityId"));
}

#[test]
fn test_validate_is_idempotent_and_read_only() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path().join("register")).unwrap();

    store
        .insert_vulnerability(vuln_draft("ghost-asset", "ghost-threat"))
        .unwrap();

    let first = integrity::validate(&store).unwrap();
    let second = integrity::validate(&store).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    // The dangling record is still there: diagnostics never self-heal.
    assert_eq!(store.get_all::<Vulnerability>().unwrap().len(), 1);
}

#[test]
fn test_derived_field_drift_is_detected_and_repaired() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("register");
    let store = Store::open(&root).unwrap();

    let vuln = store
        .insert_vulnerability(vuln_draft("a1", "t1"))
        .unwrap();
    assert!(integrity::validate_derived_fields(&store).unwrap().is_empty());

    // Corrupt the cached fields behind the store's back.
    let path = root.join("vulnerabilities.json");
    let mut rows: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    rows[0]["riskScore"] = serde_json::json!(1);
    rows[0]["riskLevel"] = serde_json::json!("Low");
    std::fs::write(&path, serde_json::to_string_pretty(&rows).unwrap()).unwrap();

    let violations = integrity::validate_derived_fields(&store).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].record_id, vuln.id);
    assert_eq!(violations[0].field, "riskScore");

    // recompute_all is the repair, and running it again changes nothing.
    assert_eq!(risk::recompute_all(&store).unwrap(), 1);
    assert!(integrity::validate_derived_fields(&store).unwrap().is_empty());
    let after_first: Vec<Vulnerability> = store.get_all().unwrap();
    risk::recompute_all(&store).unwrap();
    let after_second: Vec<Vulnerability> = store.get_all().unwrap();
    assert_eq!(after_first, after_second);
    assert_eq!(after_first[0].risk_score, 12);
    assert_eq!(after_first[0].risk_level, RiskLevel::Medium);
}
