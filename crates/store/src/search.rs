//! Structured contact search
//!
//! Queries take the form `field:value` and match contacts whose named field
//! equals the value exactly. Results come back in contact-key order, which
//! keeps offset pagination stable for an unchanged contact set: resuming at
//! `offset + returned` never duplicates or skips a match.

use std::collections::BTreeMap;

use rolodex_core::{Contact, ContactKey, Error, Result};

/// Check a query against the supported `field:value` grammar
///
/// Used to vet a smart group's query at the point the caller supplies it,
/// so that stored queries never fail later during membership traversal.
pub fn validate_query(query: &str) -> Result<()> {
    parse_query(query).map(|_| ())
}

fn parse_query(query: &str) -> Result<(&str, &str)> {
    let Some((field, value)) = query.split_once(':') else {
        return Err(Error::InvalidQuery(format!(
            "expected a query of the form 'field:value', got {query:?}"
        )));
    };

    if !Contact::SEARCH_FIELDS.contains(&field) {
        return Err(Error::InvalidQuery(format!(
            "unknown search field {field:?}"
        )));
    }
    Ok((field, value))
}

/// Run a `field:value` query, returning up to `limit` keys from `offset`
pub(crate) fn search_keys(
    contacts: &BTreeMap<ContactKey, Contact>,
    query: &str,
    limit: usize,
    offset: usize,
) -> Result<Vec<ContactKey>> {
    let (field, value) = parse_query(query)?;

    let mut out = Vec::new();
    for (key, contact) in contacts {
        if contact.search_field(field).flatten() == Some(value) {
            out.push(key.clone());
        }
    }
    Ok(out.into_iter().skip(offset).take(limit).collect())
}
