//! convert::roundtrip
//!
//! The two conversion entry points and the field precedence policy.
//!
//! # Precedence Policy
//!
//! On hub -> spoke, the hub is authoritative and complete: structural
//! mapping alone produces the correct spoke, and the full hub is stashed
//! into the spoke's annotations for a later reverse conversion.
//!
//! On spoke -> hub, the structural baseline comes from the spoke, then the
//! stash (if present) fills in only the fields the spoke cannot express.
//! Spoke-owned fields are never overwritten by the stash, so edits made to
//! the spoke between the two conversions always win over stale snapshot
//! data.
//!
//! # Degraded Fidelity
//!
//! A stash failure during [`convert_to_spoke`] does not fail the
//! conversion: the structurally valid spoke is still returned, flagged as
//! [`RoundTripFidelity::Degraded`]. Refusing to convert would be worse
//! than losing future-recovery capability.

use thiserror::Error;

use super::contract::{Hub, Spoke};
use super::recovery::{self, RecoveryError};
use crate::schema::SchemaError;

/// Errors from the conversion entry points.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The incoming record failed shape validation. No partial result is
    /// returned.
    #[error("malformed input record: {0}")]
    MalformedInput(#[from] SchemaError),

    /// A recovery snapshot was present but unreadable. Returning a record
    /// would be unsafe because the caller cannot tell which fields are
    /// stale zero-value placeholders.
    #[error("recovery failed: {0}")]
    Recovery(#[from] RecoveryError),
}

/// Round-trip fidelity of a hub -> spoke conversion.
#[derive(Debug)]
pub enum RoundTripFidelity {
    /// The hub snapshot was stashed; a later spoke -> hub conversion can
    /// restore every hub field.
    Full,

    /// Stashing failed; the spoke is structurally correct but a later
    /// reverse conversion falls back to zero-valued unmapped fields.
    Degraded(RecoveryError),
}

impl RoundTripFidelity {
    /// Check whether the stash was written.
    pub fn is_full(&self) -> bool {
        matches!(self, RoundTripFidelity::Full)
    }
}

/// Result of a hub -> spoke conversion.
#[derive(Debug)]
pub struct SpokeConversion<S> {
    /// The structurally converted spoke record.
    pub spoke: S,

    /// Whether the recovery stash was written alongside it.
    pub fidelity: RoundTripFidelity,
}

/// Convert a spoke record to its hub version.
///
/// Runs the structural mapping, then consumes any recovery snapshot from
/// the spoke's annotation bag and overlays the fields the spoke cannot
/// express. The reserved annotation is removed from `spoke` as a side of
/// the consuming read, so the returned hub never carries it either.
///
/// # Errors
///
/// - [`ConvertError::MalformedInput`] if the spoke fails shape validation
/// - [`ConvertError::Recovery`] if a snapshot is present but unreadable
///
/// # Example
///
/// ```
/// use hubspoke::convert::roundtrip::convert_to_hub;
/// use hubspoke::schema::v1;
/// use hubspoke::types::ResourceName;
///
/// let mut spoke = v1::User::new(
///     ResourceName::new("u1").unwrap(),
///     v1::UserSpec {
///         email: "u1@example.com".into(),
///         passport_number: "P123".into(),
///     },
/// );
///
/// // Never round-tripped: unmapped hub fields come back zero-valued.
/// let hub = convert_to_hub(&mut spoke).unwrap();
/// assert_eq!(hub.spec.passport.number, "P123");
/// assert_eq!(hub.spec.passport.issued_by, "");
/// ```
pub fn convert_to_hub<S: Spoke>(spoke: &mut S) -> Result<S::Hub, ConvertError> {
    spoke.validate()?;

    // Consume the stash before the structural mapping clones the
    // annotation bag, so the reserved key cannot leak into the hub.
    let recovered = recovery::recover::<S::Hub>(&mut spoke.metadata_mut().annotations)?;

    let mut hub = spoke.to_hub();
    if let Some(snapshot) = recovered {
        S::restore_unmapped(&mut hub, snapshot);
    }
    Ok(hub)
}

/// Convert a hub record to the spoke version.
///
/// Runs the structural mapping, then stashes the full hub record into the
/// spoke's annotation bag so a future [`convert_to_hub`] can restore the
/// fields the spoke drops.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedInput`] if the hub fails shape
/// validation. A stash failure is *not* an error: the spoke is returned
/// with [`RoundTripFidelity::Degraded`].
///
/// # Example
///
/// ```
/// use hubspoke::convert::roundtrip::convert_to_spoke;
/// use hubspoke::convert::recovery::CONVERSION_DATA_ANNOTATION;
/// use hubspoke::schema::{v1, v2};
/// use hubspoke::types::ResourceName;
///
/// let hub = v2::User::new(
///     ResourceName::new("u1").unwrap(),
///     v2::UserSpec {
///         email: "u1@example.com".into(),
///         passport: v2::PassportDetail {
///             number: "P123".into(),
///             issued_by: "X".into(),
///         },
///         nationality: "wakandan".into(),
///     },
/// );
///
/// let outcome = convert_to_spoke::<v1::User>(&hub).unwrap();
/// assert!(outcome.fidelity.is_full());
/// assert!(outcome
///     .spoke
///     .metadata
///     .annotations
///     .contains_key(CONVERSION_DATA_ANNOTATION));
/// ```
pub fn convert_to_spoke<S: Spoke>(hub: &S::Hub) -> Result<SpokeConversion<S>, ConvertError> {
    hub.validate()?;

    let mut spoke = S::from_hub(hub);
    let fidelity = match recovery::stash(hub, &mut spoke.metadata_mut().annotations) {
        Ok(()) => RoundTripFidelity::Full,
        Err(err) => RoundTripFidelity::Degraded(err),
    };
    Ok(SpokeConversion { spoke, fidelity })
}
