//! Job identifier normalization.
//!
//! The catalog hands out identifiers in several shapes: plain integers,
//! zero-padded numeric strings (`"007"`) and application-generated mock ids
//! (`"mock-fav-1"`). Every membership test in the crate goes through
//! [`normalize`], so two identifiers for the same job must always produce
//! the same [`CanonicalKey`].

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix of identifiers minted by the application for mock postings.
const MOCK_PREFIX: &str = "mock-";

/// Normalized identifier used for equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true when `raw` reads as an unsigned integer.
fn is_unsigned_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Canonicalizes a raw identifier string.
///
/// Digit-only strings lose their leading zeros (`"007"` → `"7"`, `"000"` →
/// `"0"`). Everything else is returned unchanged. This works on the text
/// directly, so digit strings wider than any integer type still normalize.
pub fn normalize(raw: &str) -> CanonicalKey {
    if is_unsigned_digits(raw) {
        let trimmed = raw.trim_start_matches('0');
        if trimmed.is_empty() {
            CanonicalKey("0".to_string())
        } else {
            CanonicalKey(trimmed.to_string())
        }
    } else {
        CanonicalKey(raw.to_string())
    }
}

/// Returns true if both identifiers denote the same job.
pub fn equal(a: &JobId, b: &JobId) -> bool {
    a.key() == b.key()
}

/// A job identifier as received from the catalog.
///
/// The variant is decided once, when the value enters the crate. Equality and
/// hashing go through the canonical key, so `JobId::from(7)` equals
/// `JobId::from("007")`.
#[derive(Debug, Clone)]
pub enum JobId {
    /// Unsigned integer, kept in the textual form it arrived in.
    Numeric(String),
    /// Anything that is not an unsigned integer, compared literally.
    Opaque(String),
}

impl JobId {
    /// Classifies a raw identifier string.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_unsigned_digits(&raw) {
            JobId::Numeric(raw)
        } else {
            JobId::Opaque(raw)
        }
    }

    /// The identifier exactly as it arrived.
    pub fn raw(&self) -> &str {
        match self {
            JobId::Numeric(raw) | JobId::Opaque(raw) => raw,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, JobId::Numeric(_))
    }

    pub fn key(&self) -> CanonicalKey {
        normalize(self.raw())
    }

    /// Storage form: numeric ids left-padded with zeros to `width`, opaque ids
    /// unchanged. Ids already wider than `width` are not truncated.
    pub fn padded(&self, width: usize) -> String {
        match self {
            JobId::Numeric(raw) => format!("{:0>width$}", raw, width = width),
            JobId::Opaque(raw) => raw.clone(),
        }
    }

    /// Splits a `mock-<kind>-<n>` identifier into its kind and sequence number.
    pub fn mock_parts(&self) -> Option<(&str, u64)> {
        let JobId::Opaque(raw) = self else {
            return None;
        };
        let rest = raw.strip_prefix(MOCK_PREFIX)?;
        let (kind, n) = rest.rsplit_once('-')?;
        if kind.is_empty() {
            return None;
        }
        n.parse().ok().map(|n| (kind, n))
    }
}

impl PartialEq for JobId {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl Eq for JobId {}

impl Hash for JobId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl From<&str> for JobId {
    fn from(raw: &str) -> Self {
        JobId::parse(raw)
    }
}

impl From<String> for JobId {
    fn from(raw: String) -> Self {
        JobId::parse(raw)
    }
}

impl From<&String> for JobId {
    fn from(raw: &String) -> Self {
        JobId::parse(raw.as_str())
    }
}

impl From<u64> for JobId {
    fn from(n: u64) -> Self {
        JobId::Numeric(n.to_string())
    }
}

impl From<u32> for JobId {
    fn from(n: u32) -> Self {
        JobId::Numeric(n.to_string())
    }
}

impl From<i64> for JobId {
    fn from(n: i64) -> Self {
        JobId::parse(n.to_string())
    }
}

impl From<i32> for JobId {
    fn from(n: i32) -> Self {
        JobId::parse(n.to_string())
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.raw())
    }
}

struct JobIdVisitor;

impl<'de> Visitor<'de> for JobIdVisitor {
    type Value = JobId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a job identifier as an integer or a string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JobId, E> {
        Ok(JobId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JobId, E> {
        Ok(JobId::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JobId, E> {
        Ok(JobId::parse(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JobId, E> {
        Ok(JobId::parse(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JobId, E> {
        Ok(JobId::parse(v))
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JobIdVisitor)
    }
}
