//! In-memory persistence collaborator for rolodex
//!
//! This crate provides:
//! - `Directory`: contact and group tables behind a `parking_lot::RwLock`,
//!   with a group-membership secondary index kept in step with the contact
//!   records
//! - Ordered key scans with opaque, store-native continuation tokens
//! - The `field:value` structured search primitive with offset pagination
//! - Fixture helpers for tests in [`testing`]
//!
//! The pagination engines consume this crate only through the
//! `rolodex_core::DirectoryRead` trait, which `Directory` implements.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod search;
pub mod testing;

mod continuation;

pub use directory::Directory;
pub use search::validate_query;
