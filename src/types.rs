//! types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ResourceName`] - Validated resource name
//! - [`Annotations`] - Generic string key-value metadata bag
//! - [`ObjectMeta`] - Common record metadata (name, namespace, annotations)
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use hubspoke::types::{Annotations, ResourceName};
//!
//! // Valid constructions
//! let name = ResourceName::new("user-1").unwrap();
//! assert_eq!(name.as_str(), "user-1");
//!
//! let mut bag = Annotations::new();
//! bag.insert("example.dev/owner", "team-a");
//! assert_eq!(bag.get("example.dev/owner"), Some("team-a"));
//!
//! // Invalid constructions fail at creation time
//! assert!(ResourceName::new("").is_err());
//! assert!(ResourceName::new("-leading-dash").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid resource name: {0}")]
    InvalidResourceName(String),
}

/// Maximum length of a resource name.
const MAX_NAME_LEN: usize = 253;

/// A validated resource name.
///
/// Resource names follow DNS-subdomain rules:
/// - Cannot be empty
/// - At most 253 characters
/// - Only lowercase alphanumerics, `-`, and `.`
/// - Must start and end with an alphanumeric
///
/// # Example
///
/// ```
/// use hubspoke::types::ResourceName;
///
/// let name = ResourceName::new("user-1").unwrap();
/// assert_eq!(name.as_str(), "user-1");
///
/// assert!(ResourceName::new("").is_err());
/// assert!(ResourceName::new("Has-Capitals").is_err());
/// assert!(ResourceName::new("trailing.").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    /// Create a new validated resource name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidResourceName` if the name violates the
    /// DNS-subdomain rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Validate a name against the DNS-subdomain rules.
    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidResourceName(
                "resource name cannot be empty".into(),
            ));
        }

        if name.len() > MAX_NAME_LEN {
            return Err(TypeError::InvalidResourceName(format!(
                "resource name exceeds {MAX_NAME_LEN} characters"
            )));
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '.'))
        {
            return Err(TypeError::InvalidResourceName(format!(
                "resource name contains invalid character '{bad}'"
            )));
        }

        let starts_ok = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        let ends_ok = name
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !starts_ok || !ends_ok {
            return Err(TypeError::InvalidResourceName(
                "resource name must start and end with an alphanumeric".into(),
            ));
        }

        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceName> for String {
    fn from(value: ResourceName) -> Self {
        value.0
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An RFC3339 UTC timestamp.
///
/// # Example
///
/// ```
/// use hubspoke::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    ///
    /// ```
    /// use hubspoke::types::UtcTimestamp;
    ///
    /// let ts = UtcTimestamp::from_datetime("2024-01-01T00:00:00Z".parse().unwrap());
    /// assert_eq!(ts.as_datetime().timestamp(), 1_704_067_200);
    /// ```
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A generic string-to-string metadata bag attached to every record.
///
/// Values are opaque text blobs to every component except the recovery
/// store. Backed by a `BTreeMap` so serialization order is deterministic.
///
/// # Example
///
/// ```
/// use hubspoke::types::Annotations;
///
/// let mut bag = Annotations::new();
/// bag.insert("a", "1");
/// assert!(bag.contains_key("a"));
/// assert_eq!(bag.remove("a"), Some("1".to_string()));
/// assert_eq!(bag.remove("a"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(BTreeMap<String, String>);

impl Annotations {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert a key-value pair, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value if it was present.
    ///
    /// Removal is idempotent: removing an absent key returns `None`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries in the bag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in key order.
    ///
    /// ```
    /// use hubspoke::types::Annotations;
    ///
    /// let mut bag = Annotations::new();
    /// bag.insert("b", "2");
    /// bag.insert("a", "1");
    ///
    /// let entries: Vec<_> = bag.iter().collect();
    /// assert_eq!(entries, vec![("a", "1"), ("b", "2")]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Common metadata carried by every versioned record.
///
/// The annotation bag inside is the out-of-band channel the recovery store
/// writes to; everything else here is plain identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Record name.
    pub name: ResourceName,

    /// Optional namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// When the record was created, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<UtcTimestamp>,

    /// Generic key-value metadata bag.
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl ObjectMeta {
    /// Create metadata with just a name.
    pub fn named(name: ResourceName) -> Self {
        Self {
            name,
            namespace: None,
            created_at: None,
            annotations: Annotations::new(),
        }
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        // Placeholder identity for stripped-metadata snapshots.
        Self {
            name: ResourceName("unnamed".to_string()),
            namespace: None,
            created_at: None,
            annotations: Annotations::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod resource_name {
        use super::*;

        #[test]
        fn valid_names() {
            for name in ["a", "user-1", "a.b.c", "0leading-digit", "x-9"] {
                assert!(ResourceName::new(name).is_ok(), "expected valid: {name}");
            }
        }

        #[test]
        fn invalid_names() {
            for name in ["", "-a", "a-", ".a", "a.", "Has-Caps", "under_score", "sp ace"] {
                assert!(ResourceName::new(name).is_err(), "expected invalid: {name}");
            }
        }

        #[test]
        fn too_long_rejected() {
            let name = "a".repeat(254);
            assert!(ResourceName::new(name).is_err());
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<ResourceName, _> = serde_json::from_str("\"Bad Name\"");
            assert!(result.is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let name = ResourceName::new("user-1").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            let parsed: ResourceName = serde_json::from_str(&json).unwrap();
            assert_eq!(name, parsed);
        }
    }

    mod annotations {
        use super::*;

        #[test]
        fn insert_get_remove() {
            let mut bag = Annotations::new();
            assert!(bag.is_empty());

            bag.insert("k", "v");
            assert_eq!(bag.get("k"), Some("v"));
            assert_eq!(bag.len(), 1);

            assert_eq!(bag.remove("k"), Some("v".to_string()));
            assert_eq!(bag.remove("k"), None);
            assert!(bag.is_empty());
        }

        #[test]
        fn insert_returns_previous() {
            let mut bag = Annotations::new();
            assert_eq!(bag.insert("k", "v1"), None);
            assert_eq!(bag.insert("k", "v2"), Some("v1".to_string()));
            assert_eq!(bag.get("k"), Some("v2"));
        }

        #[test]
        fn serializes_as_plain_map() {
            let mut bag = Annotations::new();
            bag.insert("b", "2");
            bag.insert("a", "1");
            let json = serde_json::to_string(&bag).unwrap();
            assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn displays_rfc3339() {
            let ts = UtcTimestamp::from_datetime("2024-01-01T00:00:00Z".parse().unwrap());
            assert_eq!(ts.to_string(), "2024-01-01T00:00:00+00:00");
        }

        #[test]
        fn now_roundtrips_through_serde() {
            let ts = UtcTimestamp::now();
            let json = serde_json::to_string(&ts).unwrap();
            let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, parsed);
        }
    }

    mod object_meta {
        use super::*;

        #[test]
        fn named_has_empty_bag() {
            let meta = ObjectMeta::named(ResourceName::new("u1").unwrap());
            assert!(meta.annotations.is_empty());
            assert!(meta.namespace.is_none());
        }

        #[test]
        fn empty_bag_omitted_from_json() {
            let meta = ObjectMeta::named(ResourceName::new("u1").unwrap());
            let json = serde_json::to_string(&meta).unwrap();
            assert_eq!(json, r#"{"name":"u1"}"#);
        }

        #[test]
        fn deserializes_without_optional_fields() {
            let meta: ObjectMeta = serde_json::from_str(r#"{"name":"u1"}"#).unwrap();
            assert_eq!(meta.name.as_str(), "u1");
            assert!(meta.annotations.is_empty());
        }
    }
}
