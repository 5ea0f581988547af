//! convert::recovery
//!
//! Round-trip recovery store.
//!
//! When a hub record is converted down to a spoke, the spoke cannot hold
//! every hub field. This module stashes the full hub record as JSON inside
//! the spoke's annotation bag under a reserved key, and recovers it on the
//! reverse conversion. The stash is a one-time-use side channel: recovery
//! consumes the key so it is never read twice and never leaks to downstream
//! consumers of the record.
//!
//! # Snapshot Format
//!
//! The annotation value is the compact JSON serialization of the hub record
//! with its `metadata` member removed. Stripping metadata keeps the
//! snapshot from nesting an older snapshot of itself, so repeated
//! round-trips cannot grow the record without bound.
//!
//! # Example
//!
//! ```
//! use hubspoke::convert::recovery::{recover, stash, CONVERSION_DATA_ANNOTATION};
//! use hubspoke::schema::v2;
//! use hubspoke::types::{Annotations, ResourceName};
//!
//! let hub = v2::User::new(
//!     ResourceName::new("u1").unwrap(),
//!     v2::UserSpec::default(),
//! );
//!
//! let mut carrier = Annotations::new();
//! stash(&hub, &mut carrier).unwrap();
//! assert!(carrier.contains_key(CONVERSION_DATA_ANNOTATION));
//!
//! // Consuming read: first call yields the snapshot, second finds nothing.
//! let first: Option<v2::User> = recover(&mut carrier).unwrap();
//! assert!(first.is_some());
//! let second: Option<v2::User> = recover(&mut carrier).unwrap();
//! assert!(second.is_none());
//! ```

use serde::Deserialize;
use thiserror::Error;

use super::contract::Hub;
use crate::types::Annotations;

/// Reserved annotation key holding the serialized hub snapshot.
pub const CONVERSION_DATA_ANNOTATION: &str = "hubspoke.dev/conversion-data";

/// Errors from recovery store operations.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The hub record could not be serialized for stashing.
    #[error("failed to serialize recovery snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A stashed snapshot was present but does not deserialize against the
    /// hub schema. The annotation is left in place so the fault stays
    /// inspectable.
    #[error("failed to deserialize recovery snapshot: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// A stashed snapshot was present but recorded a different hub version.
    #[error("recovery snapshot version mismatch: expected '{expected}', found '{found}'")]
    VersionMismatch {
        /// The hub version this store expects.
        expected: &'static str,
        /// The version the snapshot actually carries.
        found: String,
    },
}

/// Minimal envelope parsed before the full snapshot, to check the version
/// without committing to the whole schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEnvelope {
    api_version: String,
}

/// Serialize `full` and write it into `carrier` under the reserved key.
///
/// The record's own metadata (and with it, its annotation bag) is stripped
/// from the snapshot before serializing. An existing snapshot under the
/// reserved key is overwritten; the freshest stash always wins.
///
/// # Errors
///
/// Returns `RecoveryError::Serialize` if the record cannot be serialized.
/// This should not occur for well-formed schemas but is surfaced rather
/// than swallowed.
pub fn stash<H: Hub>(full: &H, carrier: &mut Annotations) -> Result<(), RecoveryError> {
    let mut value = serde_json::to_value(full).map_err(RecoveryError::Serialize)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("metadata");
    }
    let data = serde_json::to_string(&value).map_err(RecoveryError::Serialize)?;
    carrier.insert(CONVERSION_DATA_ANNOTATION, data);
    Ok(())
}

/// Read, decode, and consume the snapshot under the reserved key.
///
/// Returns `Ok(None)` when the key is absent - the common case for a record
/// that never round-tripped. When the key is present the snapshot's
/// `apiVersion` is checked against `H::API_VERSION` before full
/// deserialization, and on success the key is removed from `carrier`, so a
/// second call returns `Ok(None)`.
///
/// # Errors
///
/// Returns `RecoveryError::VersionMismatch` or `RecoveryError::Deserialize`
/// when a snapshot is present but unreadable. The key is *not* removed in
/// these cases.
pub fn recover<H: Hub>(carrier: &mut Annotations) -> Result<Option<H>, RecoveryError> {
    let Some(data) = carrier.get(CONVERSION_DATA_ANNOTATION) else {
        return Ok(None);
    };

    let envelope: SnapshotEnvelope =
        serde_json::from_str(data).map_err(RecoveryError::Deserialize)?;
    if envelope.api_version != H::API_VERSION {
        return Err(RecoveryError::VersionMismatch {
            expected: H::API_VERSION,
            found: envelope.api_version,
        });
    }

    let restored: H = serde_json::from_str(data).map_err(RecoveryError::Deserialize)?;
    carrier.remove(CONVERSION_DATA_ANNOTATION);
    Ok(Some(restored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::v2;
    use crate::types::ResourceName;

    fn sample_hub() -> v2::User {
        let mut hub = v2::User::new(
            ResourceName::new("u1").unwrap(),
            v2::UserSpec {
                email: "u1@example.com".into(),
                passport: v2::PassportDetail {
                    number: "P123".into(),
                    issued_by: "X".into(),
                },
                nationality: "wakandan".into(),
            },
        );
        hub.metadata.annotations.insert("unrelated", "kept");
        hub
    }

    mod stash_fn {
        use super::*;

        #[test]
        fn writes_reserved_key() {
            let mut carrier = Annotations::new();
            stash(&sample_hub(), &mut carrier).unwrap();
            assert!(carrier.contains_key(CONVERSION_DATA_ANNOTATION));
        }

        #[test]
        fn snapshot_has_no_metadata() {
            let mut carrier = Annotations::new();
            stash(&sample_hub(), &mut carrier).unwrap();

            let data = carrier.get(CONVERSION_DATA_ANNOTATION).unwrap();
            let value: serde_json::Value = serde_json::from_str(data).unwrap();
            assert!(value.get("metadata").is_none());
            assert!(!data.contains(CONVERSION_DATA_ANNOTATION));
        }

        #[test]
        fn overwrites_previous_snapshot() {
            let mut carrier = Annotations::new();
            stash(&sample_hub(), &mut carrier).unwrap();

            let mut updated = sample_hub();
            updated.spec.nationality = "genovian".into();
            stash(&updated, &mut carrier).unwrap();

            let restored: v2::User = recover(&mut carrier).unwrap().unwrap();
            assert_eq!(restored.spec.nationality, "genovian");
        }

        #[test]
        fn leaves_other_annotations_alone() {
            let mut carrier = Annotations::new();
            carrier.insert("other", "value");
            stash(&sample_hub(), &mut carrier).unwrap();
            assert_eq!(carrier.get("other"), Some("value"));
            assert_eq!(carrier.len(), 2);
        }
    }

    mod recover_fn {
        use super::*;

        #[test]
        fn absent_key_is_not_an_error() {
            let mut carrier = Annotations::new();
            let result: Option<v2::User> = recover(&mut carrier).unwrap();
            assert!(result.is_none());
        }

        #[test]
        fn roundtrips_spec_fields() {
            let mut carrier = Annotations::new();
            stash(&sample_hub(), &mut carrier).unwrap();

            let restored: v2::User = recover(&mut carrier).unwrap().unwrap();
            assert_eq!(restored.spec, sample_hub().spec);
            // Metadata was stripped at stash time; the restored record gets
            // a default one.
            assert!(restored.metadata.annotations.is_empty());
        }

        #[test]
        fn consumes_the_key() {
            let mut carrier = Annotations::new();
            stash(&sample_hub(), &mut carrier).unwrap();

            let first: Option<v2::User> = recover(&mut carrier).unwrap();
            assert!(first.is_some());
            assert!(!carrier.contains_key(CONVERSION_DATA_ANNOTATION));

            let second: Option<v2::User> = recover(&mut carrier).unwrap();
            assert!(second.is_none());
        }

        #[test]
        fn corrupt_snapshot_is_surfaced_and_kept() {
            let mut carrier = Annotations::new();
            carrier.insert(CONVERSION_DATA_ANNOTATION, "not json at all");

            let result: Result<Option<v2::User>, _> = recover(&mut carrier);
            assert!(matches!(result, Err(RecoveryError::Deserialize(_))));
            assert!(carrier.contains_key(CONVERSION_DATA_ANNOTATION));
        }

        #[test]
        fn version_mismatch_is_surfaced_and_kept() {
            let mut carrier = Annotations::new();
            carrier.insert(
                CONVERSION_DATA_ANNOTATION,
                r#"{"apiVersion":"users.hubspoke.dev/v9","spec":{}}"#,
            );

            let result: Result<Option<v2::User>, _> = recover(&mut carrier);
            assert!(matches!(
                result,
                Err(RecoveryError::VersionMismatch { found, .. }) if found == "users.hubspoke.dev/v9"
            ));
            assert!(carrier.contains_key(CONVERSION_DATA_ANNOTATION));
        }

        #[test]
        fn schema_mismatch_is_a_deserialize_error() {
            let mut carrier = Annotations::new();
            carrier.insert(
                CONVERSION_DATA_ANNOTATION,
                r#"{"apiVersion":"users.hubspoke.dev/v2","spec":{"email":1}}"#,
            );

            let result: Result<Option<v2::User>, _> = recover(&mut carrier);
            assert!(matches!(result, Err(RecoveryError::Deserialize(_))));
        }
    }
}
