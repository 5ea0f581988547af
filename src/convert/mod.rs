//! convert
//!
//! Conversion between the hub and spoke schema versions.
//!
//! # Modules
//!
//! - [`contract`] - The compile-time [`Hub`](contract::Hub) /
//!   [`Spoke`](contract::Spoke) conversion contract
//! - [`recovery`] - Round-trip recovery store: stash and recover full hub
//!   snapshots through the annotation bag
//! - [`roundtrip`] - The two conversion entry points and the field
//!   precedence policy
//!
//! # Control Flow
//!
//! Converting hub to spoke runs the structural mapping and then stashes the
//! full hub record into the spoke's annotations, so a later spoke-to-hub
//! conversion can restore fields the spoke cannot express. Converting spoke
//! to hub consumes that stash (if present) and overlays only the unmapped
//! fields; everything the spoke owns comes from the spoke itself.

pub mod contract;
pub mod recovery;
pub mod roundtrip;

// Re-export commonly used items
pub use contract::{Hub, Spoke};
pub use recovery::{recover, stash, RecoveryError, CONVERSION_DATA_ANNOTATION};
pub use roundtrip::{
    convert_to_hub, convert_to_spoke, ConvertError, RoundTripFidelity, SpokeConversion,
};
