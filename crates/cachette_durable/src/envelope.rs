//! The versioned serialization envelope for persisted entries.

use std::time::{Duration, SystemTime};

use cachette_tier::CacheEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version of the persisted entry format.
///
/// Bump this whenever the envelope shape changes incompatibly; entries carrying
/// any other version are discarded on read instead of being misinterpreted.
pub(crate) const SCHEMA_VERSION: u32 = 1;

/// The on-store representation of a cache entry.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub value: Value,
}

impl Envelope {
    pub(crate) fn from_entry(entry: &CacheEntry<Value>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            written_at_ms: entry
                .written_at()
                .and_then(|at| at.duration_since(SystemTime::UNIX_EPOCH).ok())
                .map(|since_epoch| u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)),
            ttl_ms: entry.ttl().map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
            tags: entry.tags().to_vec(),
            value: entry.value().clone(),
        }
    }

    /// Converts the envelope back into an entry.
    ///
    /// Returns `None` if the envelope was written by an incompatible version.
    pub(crate) fn into_entry(self) -> Option<CacheEntry<Value>> {
        if self.schema_version != SCHEMA_VERSION {
            return None;
        }
        Some(CacheEntry::from_parts(
            self.value,
            self.written_at_ms
                .map(|ms| SystemTime::UNIX_EPOCH + Duration::from_millis(ms)),
            self.ttl_ms.map(Duration::from_millis),
            self.tags,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_metadata() {
        let written = SystemTime::UNIX_EPOCH + Duration::from_millis(1_234_567);
        let entry = CacheEntry::from_parts(
            Value::from(42),
            Some(written),
            Some(Duration::from_millis(500)),
            vec!["x".to_string()],
        );

        let bytes = serde_json::to_vec(&Envelope::from_entry(&entry)).unwrap();
        let decoded: Envelope = serde_json::from_slice(&bytes).unwrap();
        let restored = decoded.into_entry().unwrap();

        assert_eq!(restored, entry);
    }

    #[test]
    fn incompatible_version_is_discarded() {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION + 1,
            written_at_ms: None,
            ttl_ms: None,
            tags: Vec::new(),
            value: Value::from("data"),
        };

        assert!(envelope.into_entry().is_none());
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let decoded: Envelope = serde_json::from_str(r#"{"schema_version":1,"value":7}"#).unwrap();
        let entry = decoded.into_entry().unwrap();

        assert!(entry.written_at().is_none());
        assert!(entry.ttl().is_none());
        assert!(entry.tags().is_empty());
    }
}
