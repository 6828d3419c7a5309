//! Integration tests for the group-membership pagination and streaming engine
//!
//! Covers the testable properties of the two-phase traversal: completeness
//! under cursor chaining, static-before-dynamic phase ordering, graceful
//! degradation for unknown groups, query-filter rejection, stream/page
//! equivalence, and the canonical mixed-membership scenario.

use rolodex::{Contact, Rolodex};
use serde_json::json;

fn init_tracing() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

/// Create `n` contacts tagged into `group_key`, returning keys in index order.
fn seed_members(db: &Rolodex, group_key: &str, n: usize) -> Vec<String> {
    let mut keys: Vec<String> = (0..n)
        .map(|i| {
            db.contacts()
                .create(json!({"name": format!("member-{i}"), "groups": [group_key]}))
                .unwrap()
                .key
                .to_string()
        })
        .collect();
    keys.sort();
    keys
}

/// Follow the cursor chain to exhaustion, returning one Vec per page.
fn all_pages(db: &Rolodex, group_key: &str, max_results: usize) -> Vec<Vec<Contact>> {
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let (next, records) = db
            .group_contacts()
            .page(group_key, cursor.as_deref(), Some(max_results), None)
            .unwrap();
        pages.push(records);
        match next {
            Some(c) => cursor = Some(c),
            None => return pages,
        }
    }
}

#[test]
fn completeness_for_static_only_group_at_any_page_size() {
    init_tracing();
    let db = Rolodex::new();
    let group = db.groups().create(json!({"name": "g"})).unwrap();
    let n = 6;
    let expected = seed_members(&db, group.key.as_str(), n);

    for max_results in [1, n / 2, n, n + 1] {
        let keys: Vec<String> = all_pages(&db, group.key.as_str(), max_results)
            .into_iter()
            .flatten()
            .map(|c| c.key.to_string())
            .collect();
        assert_eq!(keys, expected, "max_results={max_results}");
    }
}

#[test]
fn static_pages_precede_dynamic_pages() {
    let db = Rolodex::new();
    let group = db
        .groups()
        .create(json!({"name": "g", "query": "msisdn:777"}))
        .unwrap();
    let static_keys = seed_members(&db, group.key.as_str(), 5);
    let dynamic_keys: Vec<String> = (0..3)
        .map(|i| {
            db.contacts()
                .create(json!({"name": format!("match-{i}"), "msisdn": "777"}))
                .unwrap()
                .key
                .to_string()
        })
        .collect();

    let pages = all_pages(&db, group.key.as_str(), 2);
    let mut phase_boundary_crossed = false;
    let mut seen_static = Vec::new();
    let mut seen_dynamic = Vec::new();
    for page in &pages {
        for contact in page {
            let key = contact.key.to_string();
            if static_keys.contains(&key) {
                assert!(
                    !phase_boundary_crossed,
                    "static member {key} appeared after a dynamic member"
                );
                seen_static.push(key);
            } else {
                phase_boundary_crossed = true;
                seen_dynamic.push(key);
            }
        }
    }
    assert_eq!(seen_static, static_keys);

    let mut sorted_dynamic = seen_dynamic.clone();
    sorted_dynamic.sort();
    let mut expected_dynamic = dynamic_keys;
    expected_dynamic.sort();
    assert_eq!(sorted_dynamic, expected_dynamic);

    // First ceil(5/2) = 3 pages hold exactly the static members.
    let static_page_total: usize = pages[..3].iter().map(|p| p.len()).sum();
    assert_eq!(static_page_total, 5);
}

#[test]
fn nonexistent_group_pages_empty_without_error() {
    let db = Rolodex::new();
    let (cursor, records) = db
        .group_contacts()
        .page("no-such-group", None, Some(10), None)
        .unwrap();
    assert!(cursor.is_none());
    assert!(records.is_empty());
}

#[test]
fn query_filter_always_rejected() {
    let db = Rolodex::new();
    let group = db.groups().create(json!({"name": "g"})).unwrap();
    let err = db
        .group_contacts()
        .page(group.key.as_str(), None, Some(10), Some("name:Ada"))
        .unwrap_err();
    assert!(err.is_usage());

    let err = db
        .group_contacts()
        .stream(group.key.as_str(), Some("name:Ada"))
        .err()
        .expect("stream must reject the query filter");
    assert!(err.is_usage());
}

#[test]
fn mixed_membership_scenario_returns_union_with_duplicate() {
    init_tracing();
    let db = Rolodex::new();
    let group = db
        .groups()
        .create(json!({"name": "g", "query": "msisdn:12345"}))
        .unwrap();

    // Three static members c1 < c2 < c3 in index order; c1 also matches the
    // smart query, as does the untagged c4.
    let static_keys = seed_members(&db, group.key.as_str(), 3);
    let (c1, c2, c3) = (&static_keys[0], &static_keys[1], &static_keys[2]);
    db.contacts()
        .update(c1, json!({"msisdn": "12345"}))
        .unwrap();
    let c4 = db
        .contacts()
        .create(json!({"name": "c4", "msisdn": "12345"}))
        .unwrap()
        .key
        .to_string();

    let pages = all_pages(&db, group.key.as_str(), 2);
    let page_keys: Vec<Vec<String>> = pages
        .iter()
        .map(|p| p.iter().map(|c| c.key.to_string()).collect())
        .collect();

    assert_eq!(page_keys[0], vec![c1.clone(), c2.clone()]);
    assert_eq!(page_keys[1], vec![c3.clone()]);

    // Exact dynamic batching is implementation-defined; the totals are not.
    let all: Vec<String> = page_keys.into_iter().flatten().collect();
    let mut expected = vec![c1.clone(), c2.clone(), c3.clone(), c1.clone(), c4];
    let mut got = all.clone();
    expected.sort();
    got.sort();
    assert_eq!(got, expected, "c1 must appear once per phase");
}

#[tokio::test]
async fn stream_equals_chained_pages() {
    let db = Rolodex::new();
    let group = db
        .groups()
        .create(json!({"name": "g", "query": "msisdn:42"}))
        .unwrap();
    seed_members(&db, group.key.as_str(), 7);
    for i in 0..4 {
        db.contacts()
            .create(json!({"name": format!("dyn-{i}"), "msisdn": "42"}))
            .unwrap();
    }

    let paged: Vec<String> = all_pages(&db, group.key.as_str(), 3)
        .into_iter()
        .flatten()
        .map(|c| c.key.to_string())
        .collect();

    let mut rx = db.group_contacts().stream(group.key.as_str(), None).unwrap();
    let mut streamed = Vec::new();
    while let Some(contact) = rx.recv().await {
        streamed.push(contact.key.to_string());
    }

    assert_eq!(streamed, paged);
    assert!(rx.finish().await.is_ok());
}

#[tokio::test]
async fn stream_of_empty_group_closes_immediately() {
    let db = Rolodex::new();
    let group = db.groups().create(json!({"name": "empty"})).unwrap();
    let mut rx = db.group_contacts().stream(group.key.as_str(), None).unwrap();
    assert!(rx.recv().await.is_none());
    assert!(rx.finish().await.is_ok());
}

#[test]
fn contact_deleted_between_scan_and_dereference_is_skipped() {
    let db = Rolodex::new();
    let group = db.groups().create(json!({"name": "g"})).unwrap();
    let keys = seed_members(&db, group.key.as_str(), 3);

    // Delete the middle member while keeping its index entry reachable via
    // a fresh traversal: the directory unindexes on delete, so instead
    // delete between two pages and verify the engine tolerates the gap.
    let (cursor, first) = db
        .group_contacts()
        .page(group.key.as_str(), None, Some(1), None)
        .unwrap();
    assert_eq!(first.len(), 1);
    db.contacts().delete(&keys[1]).unwrap();

    let remaining: Vec<String> = {
        let mut out = Vec::new();
        let mut cursor = cursor;
        while let Some(c) = cursor {
            let (next, records) = db
                .group_contacts()
                .page(group.key.as_str(), Some(&c), Some(1), None)
                .unwrap();
            out.extend(records.into_iter().map(|r| r.key.to_string()));
            cursor = next;
        }
        out
    };
    assert_eq!(remaining, vec![keys[2].clone()]);
}

#[test]
fn cursor_from_another_traversal_shape_fails_as_usage() {
    let db = Rolodex::new();
    let group = db.groups().create(json!({"name": "g"})).unwrap();
    let err = db
        .group_contacts()
        .page(group.key.as_str(), Some("complete nonsense"), None, None)
        .unwrap_err();
    assert!(err.is_usage());
}
