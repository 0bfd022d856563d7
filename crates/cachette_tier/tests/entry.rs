//! Integration tests for `CacheEntry` metadata and freshness rules.

use std::time::{Duration, SystemTime};

use cachette_tier::CacheEntry;

fn at_secs(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn new_entry_has_no_metadata() {
    let entry = CacheEntry::new(42);
    assert_eq!(*entry.value(), 42);
    assert!(entry.written_at().is_none());
    assert!(entry.ttl().is_none());
    assert!(entry.tags().is_empty());
}

#[test]
fn with_ttl_sets_per_entry_ttl() {
    let entry = CacheEntry::with_ttl("data".to_string(), Duration::from_secs(60));
    assert_eq!(entry.ttl(), Some(Duration::from_secs(60)));
}

#[test]
fn from_parts_preserves_everything() {
    let written = at_secs(1_000);
    let entry = CacheEntry::from_parts(
        7,
        Some(written),
        Some(Duration::from_secs(30)),
        vec!["a".to_string(), "b".to_string()],
    );

    assert_eq!(*entry.value(), 7);
    assert_eq!(entry.written_at(), Some(written));
    assert_eq!(entry.ttl(), Some(Duration::from_secs(30)));
    assert_eq!(entry.tags(), ["a".to_string(), "b".to_string()]);
}

#[test]
fn entry_without_ttl_never_expires() {
    let mut entry = CacheEntry::new(1);
    entry.set_written_at(at_secs(0));

    assert!(!entry.is_expired_at(at_secs(1_000_000), None));
}

#[test]
fn entry_is_fresh_strictly_before_ttl_elapses() {
    let mut entry = CacheEntry::with_ttl(1, Duration::from_secs(10));
    entry.set_written_at(at_secs(100));

    assert!(!entry.is_expired_at(at_secs(100), None));
    assert!(!entry.is_expired_at(at_secs(109), None));
    // Fresh while `now < written_at + ttl`: the boundary itself is stale.
    assert!(entry.is_expired_at(at_secs(110), None));
    assert!(entry.is_expired_at(at_secs(200), None));
}

#[test]
fn fallback_ttl_applies_when_entry_has_none() {
    let mut entry = CacheEntry::new(1);
    entry.set_written_at(at_secs(100));

    assert!(!entry.is_expired_at(at_secs(105), Some(Duration::from_secs(10))));
    assert!(entry.is_expired_at(at_secs(115), Some(Duration::from_secs(10))));
}

#[test]
fn per_entry_ttl_takes_precedence_over_fallback() {
    let mut entry = CacheEntry::with_ttl(1, Duration::from_secs(120));
    entry.set_written_at(at_secs(100));

    // The fallback TTL of 10s would mark this stale, but the entry TTL wins.
    assert!(!entry.is_expired_at(at_secs(150), Some(Duration::from_secs(10))));
}

#[test]
fn ttl_without_timestamp_is_expired() {
    let entry = CacheEntry::with_ttl(1, Duration::from_secs(10));
    assert!(entry.is_expired_at(at_secs(0), None));
}

#[test]
fn timestamp_in_the_future_is_expired() {
    let mut entry = CacheEntry::with_ttl(1, Duration::from_secs(10));
    entry.set_written_at(at_secs(200));

    assert!(entry.is_expired_at(at_secs(100), None));
}

#[test]
fn has_any_tag_matches_on_intersection() {
    let mut entry = CacheEntry::new(1);
    entry.set_tags(vec!["records".to_string(), "user:7".to_string()]);

    assert!(entry.has_any_tag(&["user:7".to_string()]));
    assert!(entry.has_any_tag(&["other".to_string(), "records".to_string()]));
    assert!(!entry.has_any_tag(&["user:8".to_string()]));
    assert!(!entry.has_any_tag(&[]));
}

#[test]
fn deref_and_from_give_access_to_the_value() {
    let entry: CacheEntry<String> = "hello".to_string().into();
    assert_eq!(entry.len(), 5);
    assert_eq!(entry.into_value(), "hello");
}
