//! convert::contract
//!
//! The compile-time conversion contract between exactly two schema
//! versions.
//!
//! # Design
//!
//! The pair of versions is fixed at build time: [`Spoke::Hub`] names the
//! hub type as an associated type, so there is no runtime narrowing of a
//! generic "convertible" handle and no way to pair a spoke with the wrong
//! hub. Structural mapping is pure and total over field values; the only
//! failure mode left to the conversion layer is record shape validation and
//! the recovery store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::SchemaError;
use crate::types::ObjectMeta;

/// The canonical, most expressive schema version.
///
/// Hub records are what the recovery store serializes and restores, so the
/// type must round-trip through its serde representation.
pub trait Hub: Serialize + DeserializeOwned + Clone {
    /// Version identifier checked against stashed snapshots.
    const API_VERSION: &'static str;

    /// Validate the record's shape.
    fn validate(&self) -> Result<(), SchemaError>;
}

/// A non-canonical exposed schema version, paired with its hub at compile
/// time.
pub trait Spoke: Sized {
    /// The hub version this spoke converts to and from.
    type Hub: Hub;

    /// Version identifier carried by records of this spoke.
    const API_VERSION: &'static str;

    /// Structural mapping hub -> spoke.
    ///
    /// Pure and total: never fails on field values. Hub fields with no
    /// spoke representation are dropped.
    fn from_hub(hub: &Self::Hub) -> Self;

    /// Structural mapping spoke -> hub.
    ///
    /// Pure and total. Hub fields the spoke cannot express are left at
    /// their zero value; [`restore_unmapped`](Self::restore_unmapped)
    /// fills them in when a recovery snapshot exists.
    fn to_hub(&self) -> Self::Hub;

    /// Overlay onto `hub` the fields this spoke cannot express, taken from
    /// a recovered snapshot.
    ///
    /// Implementations must write *only* fields with no spoke
    /// representation. `hub` is the structural baseline derived from the
    /// spoke, so leaving a field untouched is what makes spoke-originated
    /// edits win over a possibly-stale stash.
    fn restore_unmapped(hub: &mut Self::Hub, recovered: Self::Hub);

    /// Record metadata.
    fn metadata(&self) -> &ObjectMeta;

    /// Mutable record metadata. The recovery store reads and writes the
    /// annotation bag through this.
    fn metadata_mut(&mut self) -> &mut ObjectMeta;

    /// Validate the record's shape.
    fn validate(&self) -> Result<(), SchemaError>;
}
