//! Integration tests for the collections API: CRUD, field validation, and
//! the plain (single-source) contact/group listings.

use rolodex::{Error, Limits, Rolodex};
use serde_json::json;

#[test]
fn contact_crud_flow() {
    let db = Rolodex::new();
    let contacts = db.contacts();

    let created = contacts
        .create(json!({"name": "Ada", "msisdn": "100", "extra": {"team": "eng"}}))
        .unwrap();
    assert_eq!(created.name.as_deref(), Some("Ada"));
    assert_eq!(created.extra.get("team").map(String::as_str), Some("eng"));

    let fetched = contacts.get(created.key.as_str()).unwrap();
    assert_eq!(fetched, created);

    let updated = contacts
        .update(created.key.as_str(), json!({"surname": "Lovelace"}))
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Ada"));
    assert_eq!(updated.surname.as_deref(), Some("Lovelace"));

    let deleted = contacts.delete(created.key.as_str()).unwrap();
    assert_eq!(deleted.surname.as_deref(), Some("Lovelace"));
    assert!(matches!(
        contacts.get(created.key.as_str()).unwrap_err(),
        Error::NotFound { entity: "contact", .. }
    ));
}

#[test]
fn invalid_contact_fields_name_the_offender() {
    let db = Rolodex::new();
    let err = db
        .contacts()
        .create(json!({"name": "Ada", "favourite_colour": "blue"}))
        .unwrap_err();
    match err {
        Error::Usage(msg) => assert!(msg.contains("favourite_colour")),
        other => panic!("expected Usage, got {other:?}"),
    }
}

#[test]
fn group_crud_flow_with_smartness() {
    let db = Rolodex::new();
    let groups = db.groups();

    let plain = groups.create(json!({"name": "colleagues"})).unwrap();
    assert!(!plain.is_smart());

    let smart = groups
        .create(json!({"name": "vip", "query": "msisdn:555"}))
        .unwrap();
    assert!(smart.is_smart());

    let renamed = groups
        .update(plain.key.as_str(), json!({"name": "ex-colleagues"}))
        .unwrap();
    assert_eq!(renamed.name, "ex-colleagues");

    groups.delete(smart.key.as_str()).unwrap();
    assert!(matches!(
        groups.get(smart.key.as_str()).unwrap_err(),
        Error::NotFound { entity: "group", .. }
    ));
}

#[test]
fn group_query_is_vetted_where_the_caller_supplies_it() {
    let db = Rolodex::new();
    let groups = db.groups();

    // A query the search grammar would reject never gets stored, so paging
    // the group later cannot fail on the caller's behalf.
    assert!(groups
        .create(json!({"name": "vip", "query": "no colon here"}))
        .unwrap_err()
        .is_usage());

    let group = groups
        .create(json!({"name": "vip", "query": "msisdn:555"}))
        .unwrap();
    assert!(groups
        .update(group.key.as_str(), json!({"query": "bad query"}))
        .unwrap_err()
        .is_usage());

    // An explicit null clears the query; a group paged afterwards is plain.
    let cleared = groups
        .update(group.key.as_str(), json!({"query": null}))
        .unwrap();
    assert!(!cleared.is_smart());
    let (cursor, members) = db
        .group_contacts()
        .page(group.key.as_str(), None, None, None)
        .unwrap();
    assert!(cursor.is_none());
    assert!(members.is_empty());
}

#[test]
fn plain_contact_listing_clamps_to_the_ceiling() {
    let limits = Limits {
        max_contacts_per_page: 3,
        ..Limits::default()
    };
    let db = Rolodex::with_limits(limits);
    for i in 0..5 {
        db.contacts()
            .create(json!({"name": format!("c{i}")}))
            .unwrap();
    }

    // Asking for more than the ceiling still returns at most the ceiling.
    let (cursor, records) = db.contacts().page(None, Some(50), None).unwrap();
    assert_eq!(records.len(), 3);
    let (cursor, records) = db.contacts().page(cursor.as_deref(), None, None).unwrap();
    assert_eq!(records.len(), 2);
    assert!(cursor.is_none());
}

#[test]
fn plain_listing_rejects_query_filter() {
    let db = Rolodex::new();
    assert!(db.contacts().page(None, None, Some("name:A")).unwrap_err().is_usage());
    assert!(db.groups().page(None, None, Some("name:A")).unwrap_err().is_usage());
    assert!(db.contacts().stream(Some("name:A")).unwrap_err().is_usage());
    assert!(db.groups().stream(Some("name:A")).unwrap_err().is_usage());
}

#[tokio::test]
async fn contact_stream_matches_paged_listing() {
    let db = Rolodex::with_limits(Limits {
        max_contacts_per_page: 2,
        ..Limits::default()
    });
    let mut expected: Vec<String> = (0..5)
        .map(|i| {
            db.contacts()
                .create(json!({"name": format!("c{i}")}))
                .unwrap()
                .key
                .to_string()
        })
        .collect();
    expected.sort();

    let mut rx = db.contacts().stream(None).unwrap();
    let mut streamed = Vec::new();
    while let Some(contact) = rx.recv().await {
        streamed.push(contact.key.to_string());
    }
    assert_eq!(streamed, expected);
}

#[tokio::test]
async fn group_stream_lists_all_groups() {
    let db = Rolodex::new();
    for i in 0..4 {
        db.groups().create(json!({"name": format!("g{i}")})).unwrap();
    }
    let mut rx = db.groups().stream(None).unwrap();
    let mut count = 0;
    while rx.recv().await.is_some() {
        count += 1;
    }
    assert_eq!(count, 4);
}

#[test]
fn listing_cursor_round_trips_between_pages() {
    let db = Rolodex::new();
    for i in 0..4 {
        db.contacts()
            .create(json!({"name": format!("c{i}")}))
            .unwrap();
    }
    let (cursor, first) = db.contacts().page(None, Some(3), None).unwrap();
    let cursor = cursor.expect("four contacts do not fit one page of three");
    let (done, second) = db.contacts().page(Some(&cursor), Some(3), None).unwrap();
    assert!(done.is_none());
    assert_eq!(first.len() + second.len(), 4);
    assert!(!second.iter().any(|c| first.contains(c)));
}
