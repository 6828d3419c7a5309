//! Core types for the rolodex contacts database
//!
//! This crate defines the foundational pieces shared by every layer:
//! - Contact and group records plus their key newtypes
//! - The error taxonomy and `Result` alias
//! - The two-phase traversal cursor codec
//! - Page-size limits with frozen defaults
//! - The `DirectoryRead` collaborator trait the engines are generic over

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod error;
pub mod limits;
pub mod traits;
pub mod types;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use limits::Limits;
pub use traits::DirectoryRead;
pub use types::{Contact, ContactFields, ContactKey, Group, GroupFields, GroupKey, KeyPage};
