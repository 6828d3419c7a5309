//! Fixture helpers for tests
//!
//! Small builders shared by the unit tests here and the engine/API suites.
//! Not part of the stable API surface.

use rolodex_core::{ContactFields, GroupKey};

/// A contact payload with only a name set
pub fn named_contact(name: &str) -> ContactFields {
    ContactFields {
        name: Some(name.to_string()),
        ..ContactFields::default()
    }
}

/// A named contact statically tagged into the given groups
pub fn contact_in_groups(name: &str, groups: &[&GroupKey]) -> ContactFields {
    ContactFields {
        name: Some(name.to_string()),
        groups: Some(groups.iter().map(|g| (*g).clone()).collect()),
        ..ContactFields::default()
    }
}

/// A named contact with an msisdn, optionally tagged into groups
pub fn contact_with_msisdn(name: &str, msisdn: &str, groups: &[&GroupKey]) -> ContactFields {
    ContactFields {
        name: Some(name.to_string()),
        msisdn: Some(msisdn.to_string()),
        groups: Some(groups.iter().map(|g| (*g).clone()).collect()),
        ..ContactFields::default()
    }
}
