use std::collections::HashSet;

use script_catalogue::catalogue::{sample_scripts, Catalogue, Placement};
use script_catalogue::document::{DocumentRecord, RecordId};

fn record(id: &str, title: &str) -> DocumentRecord {
    DocumentRecord {
        id: RecordId::new(id),
        title: title.to_string(),
        date: "2024-01-01".to_string(),
        thumbnail_url: "thumb".to_string(),
        youtube_url: "yt".to_string(),
        tags: vec![],
        summary: "s".to_string(),
        content: "c".to_string(),
    }
}

fn ids(catalogue: &Catalogue) -> Vec<&str> {
    catalogue.iter().map(|r| r.id.as_str()).collect()
}

fn assert_unique(catalogue: &Catalogue) {
    let set: HashSet<_> = catalogue.iter().map(|r| &r.id).collect();
    assert_eq!(set.len(), catalogue.len(), "duplicate id in catalogue");
}

#[test]
fn invariant_merge_order_is_baseline_bulk_persisted() {
    let merged = Catalogue::merge(
        vec![record("1", "base")],
        vec![record("md-1", "bulk")],
        vec![record("u-1", "user")],
    );
    assert_eq!(ids(&merged), vec!["1", "md-1", "u-1"]);
}

#[test]
fn invariant_baseline_wins_over_persisted() {
    let merged = Catalogue::merge(
        vec![record("1", "Baseline Title")],
        vec![],
        vec![record("1", "Edited Title"), record("2", "Kept")],
    );

    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get(&RecordId::new("1")).unwrap().title, "Baseline Title");
    assert_eq!(merged.get(&RecordId::new("2")).unwrap().title, "Kept");
}

#[test]
fn invariant_bulk_wins_over_persisted() {
    let merged = Catalogue::merge(vec![], vec![record("md-0", "Bulk")], vec![record("md-0", "Stored")]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.records()[0].title, "Bulk");
}

#[test]
fn invariant_merge_is_idempotent() {
    let baseline = sample_scripts();
    let bulk = vec![record("md-1", "a"), record("md-2", "b")];
    let persisted = vec![record("2", "dup"), record("x", "new"), record("x", "dup again")];

    let first = Catalogue::merge(baseline.clone(), bulk.clone(), persisted.clone());
    let second = Catalogue::merge(baseline, bulk, persisted);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
    assert_unique(&first);
}

#[test]
fn invariant_insert_or_replace_keeps_position() {
    let mut catalogue = Catalogue::merge(
        vec![record("a", "A"), record("b", "B"), record("c", "C")],
        vec![],
        vec![],
    );

    let placement = catalogue.insert_or_replace(record("b", "B2"));
    assert_eq!(placement, Placement::Replaced { index: 1 });
    assert_eq!(ids(&catalogue), vec!["a", "b", "c"]);
    assert_eq!(catalogue.records()[1].title, "B2");
    assert_unique(&catalogue);
}

#[test]
fn invariant_insert_or_replace_prepends_new_ids() {
    let mut catalogue = Catalogue::merge(vec![record("a", "A")], vec![], vec![]);

    assert_eq!(catalogue.insert_or_replace(record("z", "Z")), Placement::Inserted);
    assert_eq!(ids(&catalogue), vec!["z", "a"]);
    assert_unique(&catalogue);
}

#[test]
fn invariant_delete_removes_only_matching_id() {
    let mut catalogue = Catalogue::merge(vec![record("a", "A"), record("b", "B")], vec![], vec![]);

    assert!(catalogue.delete(&RecordId::new("a")));
    assert!(!catalogue.delete(&RecordId::new("a")));
    assert!(!catalogue.contains(&RecordId::new("a")));
    assert!(catalogue.contains(&RecordId::new("b")));
    assert_eq!(ids(&catalogue), vec!["b"]);
}

#[test]
fn invariant_sample_scripts_have_unique_ids() {
    let merged = Catalogue::merge(sample_scripts(), vec![], vec![]);
    assert_eq!(merged.len(), 3);
    assert_unique(&merged);
}
