//! End-to-end: property records → columns → batch classification → report.

use std::collections::BTreeMap;

use jenks_core::batch::{BatchClassifier, BatchConfig};
use jenks_core::cache::CacheConfig;
use jenks_core::dataset::AttributeColumns;
use jenks_core::grouping::{GroupBy, GroupedColumn};
use jenks_core::report::BreaksReport;
use jenks_core::ClassifyError;

// ─── helpers ─────────────────────────────────────────────────────────────────

fn tract(boro: &str, spanish: &str, korean: &str) -> BTreeMap<String, String> {
    let mut r = BTreeMap::new();
    r.insert("BoroName".to_string(), boro.to_string());
    r.insert("Spanish".to_string(), spanish.to_string());
    r.insert("Korean".to_string(), korean.to_string());
    r
}

fn tracts() -> Vec<BTreeMap<String, String>> {
    vec![
        tract("Queens", "9", "1"),
        tract("Queens", "4", ""),
        tract("Bronx", "10", "n/a"),
        tract("Bronx", "5", ""),
    ]
}

fn classifier(k: usize) -> BatchClassifier {
    BatchClassifier::new(BatchConfig { class_count: k, ..BatchConfig::default() })
}

// ─── whole-city columns ──────────────────────────────────────────────────────

#[test]
fn pipeline_renders_breaks_and_failures() {
    let columns = AttributeColumns::extract(&["Spanish", "Korean"], &tracts());
    let mut batch = classifier(2);
    let results = batch.classify_columns(&columns);

    assert_eq!(results[0].breaks().unwrap().as_slice(), &[4.0, 5.0, 10.0]);
    assert_eq!(
        results[1].outcome,
        Err(ClassifyError::InsufficientData { classes: 2, values: 1 })
    );

    let report = BreaksReport::new("Languages", &results).to_string();
    assert_eq!(
        report,
        "# Languages\n\n## Spanish\n4, 5, 10\n\n## Korean\ninsufficient data (2 classes, 1 values)\n"
    );
}

#[test]
fn every_value_lands_in_a_class() {
    let columns = AttributeColumns::extract(&["Spanish"], &tracts());
    let results = classifier(2).classify_columns(&columns);
    let breaks = results[0].breaks().unwrap();

    let classes: Vec<usize> = columns
        .column("Spanish")
        .unwrap()
        .iter()
        .map(|&v| breaks.class_of(v).unwrap())
        .collect();
    // 9, 4, 10, 5 in record order.
    assert_eq!(classes, vec![1, 0, 1, 0]);
}

// ─── per-subdivision ─────────────────────────────────────────────────────────

#[test]
fn grouped_run_classifies_each_borough() {
    let grouped = GroupedColumn::build("Spanish", &tracts(), GroupBy::Property("BoroName"));
    let mut batch = classifier(1);
    let results = batch.classify_groups(&grouped);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].group.as_deref(), Some("Queens"));
    assert_eq!(results[0].breaks().unwrap().as_slice(), &[4.0, 9.0]);
    assert_eq!(results[1].group.as_deref(), Some("Bronx"));
    assert_eq!(results[1].breaks().unwrap().as_slice(), &[5.0, 10.0]);

    let report = BreaksReport::new("Spanish by borough", &results).to_string();
    assert!(report.contains("## Spanish (Queens)\n4, 9\n"), "{report}");
    assert!(report.contains("## Spanish (Bronx)\n5, 10\n"), "{report}");
}

#[test]
fn grouped_and_whole_city_results_do_not_collide_in_cache() {
    let records = tracts();
    let columns = AttributeColumns::extract(&["Spanish"], &records);
    let grouped = GroupedColumn::build("Spanish", &records, GroupBy::Property("BoroName"));

    let mut batch = classifier(1);
    let city = batch.classify_columns(&columns);
    let boroughs = batch.classify_groups(&grouped);

    assert_eq!(city[0].breaks().unwrap().as_slice(), &[4.0, 10.0]);
    assert_ne!(city[0].outcome, boroughs[0].outcome);
    assert_eq!(batch.cache().len(), 3);
    assert_eq!(batch.cache().hits(), 0);
}

#[test]
fn small_cache_still_gives_correct_results() {
    let columns = AttributeColumns::extract(&["Spanish", "Korean"], &tracts());
    let mut batch = BatchClassifier::new(BatchConfig {
        class_count: 1,
        cache: CacheConfig { capacity: 1 },
    });
    let first = batch.classify_columns(&columns);
    let second = batch.classify_columns(&columns);
    assert_eq!(first, second);
    assert!(batch.cache().len() <= 1);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_pipeline_matches_sequential() {
    let columns = AttributeColumns::extract(&["Spanish", "Korean"], &tracts());
    let seq = classifier(2).classify_columns(&columns);
    let par = classifier(2).par_classify_columns(&columns);
    assert_eq!(seq, par);
}
