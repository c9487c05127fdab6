//! Integration tests for filtering and summarizing the sample snapshot.

use chrono::NaiveDate;
use proptest::prelude::*;
use siv_core::{
    filter, overview, query, summarize, Asset, AssetQuery, AssetType, Compliance, Criticality,
    FrameworkQuery, InMemoryRecordStore, InvestmentQuery, MaturityTier, RecordStore, SnapshotFile,
    Stores, ThreatEntry, ThreatLevel, ThreatQuery, DEFAULT_BUDGET,
};

fn sample_stores() -> Stores {
    SnapshotFile::builtin()
        .expect("builtin snapshot parses")
        .into_stores()
        .expect("builtin snapshot is valid")
}

fn sample_assets() -> InMemoryRecordStore<Asset> {
    sample_stores().assets
}

fn sample_threats() -> InMemoryRecordStore<ThreatEntry> {
    sample_stores().threats
}

fn ids(records: &[Asset]) -> Vec<&str> {
    records.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn sample_overview_counts() {
    let stats = overview(&sample_assets());
    assert_eq!(stats.total, 6);
    assert_eq!(stats.high_risk, 2);
    assert_eq!(stats.non_compliant, 1);
    assert_eq!(stats.review_needed, 1);
    assert_eq!(stats.criticality(Criticality::Critical), 2);
    assert_eq!(stats.asset_type(AssetType::Database), 2);
    assert_eq!(stats.total_vulnerabilities, 11);
}

#[test]
fn high_risk_assets_are_srv001_and_db001() {
    let store = sample_assets();
    let snapshot = store.all();
    let high: Vec<&str> = snapshot
        .iter()
        .filter(|a| a.is_high_risk())
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(high, vec!["SRV-001", "DB-001"]);

    let non_compliant = store.get("EP-045").expect("EP-045 present");
    assert_eq!(non_compliant.compliance, Compliance::NonCompliant);
}

#[test]
fn search_router_finds_core_router() {
    let result = query(&sample_assets(), &AssetQuery::new().search("router"));
    assert_eq!(ids(&result.filtered), vec!["NET-003"]);
    assert_eq!(result.filtered[0].name, "Core Router");
}

#[test]
fn type_server_preserves_order() {
    let servers = AssetQuery::for_assets("", Some("server"), None);
    let result = query(&sample_assets(), &servers);
    assert_eq!(ids(&result.filtered), vec!["SRV-001", "SRV-012"]);
    assert_eq!(result.stats.total, 2);
    assert_eq!(result.stats.high_risk, 1);
}

#[test]
fn unknown_type_yields_empty_result() {
    let result = query(
        &sample_assets(),
        &AssetQuery::for_assets("", Some("nonexistent-type"), None),
    );
    assert!(result.is_empty());
    assert_eq!(result.stats.total, 0);
    assert_eq!(result.stats.high_risk, 0);
    assert_eq!(result.stats.non_compliant, 0);
}

#[test]
fn filtered_and_overview_stats_differ() {
    let store = sample_assets();
    let filtered = query(&store, &AssetQuery::for_assets("", None, Some("medium")));
    let all = overview(&store);
    assert_eq!(filtered.stats.total, 2);
    assert_eq!(filtered.stats.high_risk, 0);
    assert_eq!(all.total, 6);
    assert_eq!(all.high_risk, 2);
}

#[test]
fn search_matches_owner() {
    let result = query(&sample_assets(), &AssetQuery::new().search("it operations"));
    assert_eq!(ids(&result.filtered), vec!["SRV-001", "SRV-012"]);
}

#[test]
fn threat_overview_and_selector() {
    let store = sample_threats();
    let stats = overview(&store);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.weakly_mitigated, 1);
    assert_eq!(stats.risk_level(ThreatLevel::High), 0);
    assert_eq!(stats.risk_level(ThreatLevel::Medium), 4);
    assert_eq!(stats.risk_level(ThreatLevel::Low), 2);
    assert_eq!(stats.highest_exposure.as_deref(), Some("Ransomware"));

    let result = query(&store, &ThreatQuery::for_threats("", Some("data breach")));
    assert_eq!(result.len(), 1);
    assert_eq!(result.filtered[0].name, "Data Breach");
}

#[test]
fn framework_maturity_overview() {
    let store = sample_stores().framework;
    let stats = overview(&store);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.average_score, Some(71.6));
    assert_eq!(stats.maturity(MaturityTier::Mature), 1);
    assert_eq!(stats.maturity(MaturityTier::Developing), 3);
    assert_eq!(stats.maturity(MaturityTier::Initial), 1);
    assert_eq!(stats.implemented_controls, 236);
    assert_eq!(stats.total_controls, 312);
    assert_eq!(stats.weakest_function.as_deref(), Some("Recover"));

    let detect = FrameworkQuery::for_framework("", Some("detect"), None);
    let result = query(&store, &detect);
    assert_eq!(result.len(), 1);
    assert_eq!(result.stats.implemented_controls, 32);
}

#[test]
fn framework_search_reaches_category_names() {
    let store = sample_stores().framework;
    let result = query(&store, &FrameworkQuery::new().search("communications"));
    let ids: Vec<&str> = result.filtered.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["respond", "recover"]);
}

#[test]
fn budget_allocation_overview() {
    let store = sample_stores().investments;
    let stats = overview(&store);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.total_current, 780_000);
    assert_eq!(stats.total_recommended, 1_000_000);
    assert_eq!(stats.budget_utilization(DEFAULT_BUDGET), Some(100.0));
    assert_eq!(stats.budget_utilization(2_000_000), Some(50.0));
    assert_eq!(stats.best_roi.as_deref(), Some("Security Monitoring"));

    let low = InvestmentQuery::for_investments("", Some("low"));
    let result = query(&store, &low);
    assert_eq!(result.len(), 2);
    assert_eq!(result.stats.total_recommended, 260_000);
    assert_eq!(result.stats.risk(ThreatLevel::Low), 2);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_asset_type() -> impl Strategy<Value = AssetType> {
    prop::sample::select(AssetType::ALL.to_vec())
}

fn arb_criticality() -> impl Strategy<Value = Criticality> {
    prop::sample::select(Criticality::ALL.to_vec())
}

fn arb_compliance() -> impl Strategy<Value = Compliance> {
    prop::sample::select(vec![
        Compliance::Compliant,
        Compliance::ReviewNeeded,
        Compliance::NonCompliant,
    ])
}

fn arb_assets() -> impl Strategy<Value = Vec<Asset>> {
    prop::collection::vec(
        (
            "[A-Za-z]{1,8}",
            "[A-Za-z ]{0,12}",
            arb_asset_type(),
            arb_criticality(),
            "[A-Za-z ]{0,10}",
            0u8..=100,
            0u32..20,
            arb_compliance(),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (prefix, name, asset_type, criticality, owner, score, vulns, compliance))| {
                    Asset::new(
                        format!("{}-{:03}", prefix, i),
                        name,
                        asset_type,
                        criticality,
                        owner,
                        score,
                    )
                    .with_vulnerabilities(vulns)
                    .with_compliance(compliance)
                    .with_last_updated(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                },
            )
            .collect()
    })
}

fn arb_selector() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("all".to_string())),
        Just(Some("server".to_string())),
        Just(Some("critical".to_string())),
        "[a-z-]{1,10}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn empty_query_is_identity(assets in arb_assets()) {
        prop_assert_eq!(filter(&assets, &AssetQuery::new()), assets);
    }

    #[test]
    fn search_results_contain_term(assets in arb_assets(), term in "[A-Za-z]{0,3}") {
        let hits = filter(&assets, &AssetQuery::new().search(term.clone()));
        let needle = term.to_lowercase();
        prop_assert!(hits.len() <= assets.len());
        for hit in &hits {
            prop_assert!(
                hit.name.to_lowercase().contains(&needle)
                    || hit.id.to_lowercase().contains(&needle)
                    || hit.owner.to_lowercase().contains(&needle)
            );
            prop_assert!(assets.contains(hit));
        }
    }

    #[test]
    fn filter_is_idempotent(
        assets in arb_assets(),
        term in "[A-Za-z]{0,2}",
        asset_type in arb_selector(),
        criticality in arb_selector(),
    ) {
        let q = AssetQuery::for_assets(term, asset_type.as_deref(), criticality.as_deref());
        let once = filter(&assets, &q);
        let twice = filter(&once, &q);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_preserves_relative_order(assets in arb_assets(), asset_type in arb_selector()) {
        let q = AssetQuery::for_assets("", asset_type.as_deref(), None);
        let hits = filter(&assets, &q);
        let positions: Vec<usize> = hits
            .iter()
            .map(|h| assets.iter().position(|a| a.id == h.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn summary_counts_match_definitions(assets in arb_assets()) {
        let stats = summarize(&assets);
        prop_assert_eq!(stats.total, assets.len() as u64);
        prop_assert_eq!(
            stats.high_risk,
            assets.iter().filter(|a| a.risk_score >= 80).count() as u64
        );
        prop_assert_eq!(
            stats.non_compliant,
            assets.iter().filter(|a| a.compliance == Compliance::NonCompliant).count() as u64
        );
        prop_assert_eq!(stats.by_criticality.values().sum::<u64>(), stats.total);
        prop_assert_eq!(stats.by_type.values().sum::<u64>(), stats.total);
    }
}
