//! Hubspoke - lossless conversion between two versions of a resource schema
//!
//! Hubspoke converts resource records between a canonical *hub* version and a
//! less expressive exposed *spoke* version, without losing the fields the
//! spoke cannot represent. A serialized snapshot of the hub record rides
//! along in the spoke's annotation bag and is consumed on the reverse
//! conversion.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`types`] - Strong domain types: ResourceName, Annotations, ObjectMeta
//! - [`schema`] - The two concrete schema versions (v1 spoke, v2 hub)
//! - [`convert`] - Structural mapping contract, recovery store, and the two
//!   conversion entry points
//!
//! # Correctness Invariants
//!
//! Hubspoke maintains the following invariants:
//!
//! 1. Structural mapping is pure and total: it never fails on field values
//! 2. A hub record round-trips exactly through its spoke unless the spoke
//!    was mutated in between
//! 3. Spoke-owned fields always win over a recovered snapshot
//! 4. The recovery annotation is consumed exactly once and never nests
//!
//! # Concurrency
//!
//! All operations are synchronous, single-record, and free of shared state.
//! Conversions of distinct records may run in parallel without coordination.
//! Conversions of the *same* record must be serialized by the caller; this
//! is a documented precondition, not an enforced one.
//!
//! # Example
//!
//! ```
//! use hubspoke::convert::roundtrip::{convert_to_hub, convert_to_spoke};
//! use hubspoke::schema::{v1, v2};
//! use hubspoke::types::ResourceName;
//!
//! let hub = v2::User::new(
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
//!
//! let mut outcome = convert_to_spoke::<v1::User>(&hub).unwrap();
//! assert_eq!(outcome.spoke.spec.passport_number, "P123");
//!
//! let restored = convert_to_hub(&mut outcome.spoke).unwrap();
//! assert_eq!(restored.spec, hub.spec);
//! ```

pub mod convert;
pub mod schema;
pub mod types;
