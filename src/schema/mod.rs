//! schema
//!
//! The two concrete versions of the `User` resource.
//!
//! # Modules
//!
//! - [`v1`] - Spoke version: flat `passport_number` projection
//! - [`v2`] - Hub version: full `PassportDetail` composite plus hub-only
//!   fields
//!
//! # Schema Design
//!
//! - Self-describing: every record carries `apiVersion`
//! - Strict parsing: unknown spec fields are rejected
//! - The field mapping between the versions is fixed at build time; the
//!   structural conversion for the pair lives in [`v1`], next to the spoke
//!   it serves
//!
//! # Wire Format
//!
//! Records serialize as camelCase JSON (`apiVersion`, `passportNumber`,
//! `issuedBy`), the format external storage persists verbatim.

use thiserror::Error;

pub mod v1;
pub mod v2;

/// Errors from record shape validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("api version mismatch: expected '{expected}', found '{found}'")]
    ApiVersionMismatch {
        /// The version constant for this schema.
        expected: &'static str,
        /// The version the record actually carries.
        found: String,
    },
}

/// Check a record's recorded api version against its schema constant.
pub(crate) fn check_api_version(expected: &'static str, found: &str) -> Result<(), SchemaError> {
    if found != expected {
        return Err(SchemaError::ApiVersionMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}
