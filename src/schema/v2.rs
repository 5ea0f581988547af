//! schema::v2
//!
//! Hub version of the `User` resource.
//!
//! This is the canonical, most expressive version: every conversion routes
//! through it, and it is the version persisted by storage. It carries the
//! full [`PassportDetail`] composite (of which v1 can express only the
//! number projection) and the hub-only `nationality` field, which has no v1
//! representation at all.
//!
//! # Example
//!
//! ```
//! use hubspoke::schema::v2;
//! use hubspoke::types::ResourceName;
//!
//! let user = v2::User::new(
//!     ResourceName::new("u1").unwrap(),
//!     v2::UserSpec {
//!         email: "u1@example.com".into(),
//!         passport: v2::PassportDetail {
//!             number: "P123".into(),
//!             issued_by: "X".into(),
//!         },
//!         nationality: "wakandan".into(),
//!     },
//! );
//! assert!(user.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::{check_api_version, SchemaError};
use crate::convert::contract::Hub;
use crate::types::{ObjectMeta, ResourceName};

/// Version identifier carried by every v2 record.
pub const API_VERSION: &str = "users.hubspoke.dev/v2";

/// A v2 (hub) user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Version identifier (always `users.hubspoke.dev/v2`).
    pub api_version: String,

    /// Record metadata, including the annotation bag.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Version-specific payload.
    pub spec: UserSpec,
}

/// Spec payload of a v2 user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserSpec {
    /// Contact address. Present in both versions (Direct mapping).
    pub email: String,

    /// Passport details. v1 expresses only the number (Structural mapping).
    pub passport: PassportDetail,

    /// Nationality. Hub-only (Unmapped); dropped entirely in v1.
    #[serde(default)]
    pub nationality: String,
}

/// Passport composite. The spoke projects this down to its number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PassportDetail {
    /// Passport number, the one projection v1 can hold.
    pub number: String,

    /// Issuing authority. Lost in v1 unless recovered from a stash.
    #[serde(default)]
    pub issued_by: String,
}

impl PassportDetail {
    /// Build the composite from its v1 scalar projection.
    ///
    /// Fields the projection cannot carry start at their zero value.
    pub fn from_number(number: &str) -> Self {
        Self {
            number: number.to_string(),
            issued_by: String::new(),
        }
    }

    /// Project the composite down to the scalar v1 can hold.
    pub fn number_projection(&self) -> String {
        self.number.clone()
    }
}

impl User {
    /// Create a new v2 record with the correct api version.
    pub fn new(name: ResourceName, spec: UserSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            metadata: ObjectMeta::named(name),
            spec,
        }
    }

    /// Validate the record's shape.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ApiVersionMismatch` if the record does not
    /// carry the v2 version identifier.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_api_version(API_VERSION, &self.api_version)
    }
}

impl Hub for User {
    const API_VERSION: &'static str = API_VERSION;

    fn validate(&self) -> Result<(), SchemaError> {
        User::validate(self)
    }
}
