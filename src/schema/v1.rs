//! schema::v1
//!
//! Spoke version of the `User` resource, and the structural conversion
//! between v1 and v2.
//!
//! v1 is the legacy exposed version. It flattens the v2 passport composite
//! down to a bare `passport_number` and has no field for `nationality` at
//! all, so a v2 record squeezed into v1 loses information unless the
//! recovery store stashed the full record alongside.
//!
//! # Field Mapping
//!
//! | v2 (hub)             | v1 (spoke)        | kind       |
//! |----------------------|-------------------|------------|
//! | `spec.email`         | `spec.email`      | Direct     |
//! | `spec.passport`      | `spec.passport_number` | Structural (number projection) |
//! | `spec.nationality`   | —                 | Unmapped   |
//!
//! Structural mapping is pure and total: it never fails on field values,
//! only record shape is validated (and that happens in the conversion entry
//! points, not here).

use serde::{Deserialize, Serialize};

use super::{check_api_version, v2, SchemaError};
use crate::convert::contract::Spoke;
use crate::types::{ObjectMeta, ResourceName};

/// Version identifier carried by every v1 record.
pub const API_VERSION: &str = "users.hubspoke.dev/v1";

/// A v1 (spoke) user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Version identifier (always `users.hubspoke.dev/v1`).
    pub api_version: String,

    /// Record metadata, including the annotation bag the recovery store
    /// writes to.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Version-specific payload.
    pub spec: UserSpec,
}

/// Spec payload of a v1 user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserSpec {
    /// Contact address. Present in both versions.
    pub email: String,

    /// Scalar projection of the v2 passport composite.
    #[serde(default)]
    pub passport_number: String,
}

impl User {
    /// Create a new v1 record with the correct api version.
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
    /// carry the v1 version identifier.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_api_version(API_VERSION, &self.api_version)
    }
}

impl Spoke for User {
    type Hub = v2::User;

    const API_VERSION: &'static str = API_VERSION;

    /// Structural mapping v2 -> v1. Unmapped hub fields are dropped.
    fn from_hub(hub: &v2::User) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            metadata: hub.metadata.clone(),
            spec: UserSpec {
                email: hub.spec.email.clone(),
                passport_number: hub.spec.passport.number_projection(),
            },
        }
    }

    /// Structural mapping v1 -> v2. Unmapped hub fields start at their
    /// zero value; the recovery overlay fills them in when a stash exists.
    fn to_hub(&self) -> v2::User {
        v2::User {
            api_version: v2::API_VERSION.to_string(),
            metadata: self.metadata.clone(),
            spec: v2::UserSpec {
                email: self.spec.email.clone(),
                passport: v2::PassportDetail::from_number(&self.spec.passport_number),
                nationality: String::new(),
            },
        }
    }

    /// Copy the fields v1 cannot express from `recovered` into `hub`.
    ///
    /// `hub` is the structural baseline derived from the spoke, so every
    /// field this function does not touch keeps its spoke-derived value.
    /// That is the whole precedence policy: spoke-owned fields win over the
    /// stash by never being written here.
    fn restore_unmapped(hub: &mut v2::User, recovered: v2::User) {
        hub.spec.passport.issued_by = recovered.spec.passport.issued_by;
        hub.spec.nationality = recovered.spec.nationality;
    }

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn validate(&self) -> Result<(), SchemaError> {
        User::validate(self)
    }
}
