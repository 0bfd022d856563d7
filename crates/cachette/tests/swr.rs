//! Integration tests for stale-while-revalidate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use cachette::{Cache, CacheOptions, FsStore};
use tick::ClockControl;
use tokio::sync::Notify;

fn swr_options() -> CacheOptions {
    CacheOptions::new()
        .ttl(Duration::from_millis(10))
        .stale_while_revalidate(true)
}

fn counting_fetch(fetches: Arc<AtomicU32>, value: String) -> impl FnOnce() -> std::future::Ready<Result<String, std::io::Error>> {
    move || {
        fetches.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok(value))
    }
}

#[tokio::test]
async fn stale_read_serves_old_value_then_refreshes() {
    let control = ClockControl::new();
    let dir = tempfile::tempdir().unwrap();
    let cache = Cache::builder(control.to_clock())
        .durable(FsStore::new(dir.path()), "swr")
        .build();

    cache.set("p1", "A", swr_options()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let fetches = Arc::new(AtomicU32::new(0));

    // Phase one: the stale value comes back immediately.
    let value: String = cache
        .get("p1", counting_fetch(Arc::clone(&fetches), "B".to_string()), swr_options())
        .await
        .unwrap();
    assert_eq!(value, "A");

    cache.await_pending_revalidations().await;
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // Phase two: the refreshed value is fresh; no fetch runs.
    let value: String = cache
        .get(
            "p1",
            || async { Err::<String, _>(std::io::Error::other("must not fetch")) },
            swr_options(),
        )
        .await
        .unwrap();
    assert_eq!(value, "B");

    assert_eq!(cache.stats().revalidations, 1);
}

#[tokio::test]
async fn failed_refresh_leaves_the_stale_entry_in_place() {
    let control = ClockControl::new();
    let cache = Cache::builder(control.to_clock()).build();

    cache.set("p1", "A", swr_options()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let attempts = Arc::new(AtomicU32::new(0));
    let failing_fetch = |attempts: &Arc<AtomicU32>| {
        let attempts = Arc::clone(attempts);
        move || {
            attempts.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Err::<String, _>(std::io::Error::other("backend down")))
        }
    };

    let value: String = cache
        .get("p1", failing_fetch(&attempts), swr_options())
        .await
        .unwrap();
    assert_eq!(value, "A");
    cache.await_pending_revalidations().await;
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    // Still stale, so the next read revalidates again.
    let value: String = cache
        .get("p1", failing_fetch(&attempts), swr_options())
        .await
        .unwrap();
    assert_eq!(value, "A");
    cache.await_pending_revalidations().await;
    assert_eq!(attempts.load(Ordering::SeqCst), 2);

    assert_eq!(cache.stats().revalidations, 0);
}

#[tokio::test]
async fn concurrent_stale_reads_spawn_a_single_refresh() {
    let control = ClockControl::new();
    let cache = Cache::builder(control.to_clock()).build();

    cache.set("p1", "A", swr_options()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let gate = Arc::new(Notify::new());
    let started = Arc::new(AtomicU32::new(0));
    let gated_fetch = |gate: &Arc<Notify>, started: &Arc<AtomicU32>| {
        let gate = Arc::clone(gate);
        let started = Arc::clone(started);
        move || async move {
            started.fetch_add(1, Ordering::SeqCst);
            gate.notified().await;
            Ok::<_, std::io::Error>("B".to_string())
        }
    };

    // Both reads observe the stale entry while the first refresh is parked on
    // the gate; the second must not spawn a duplicate.
    let first: String = cache
        .get("p1", gated_fetch(&gate, &started), swr_options())
        .await
        .unwrap();
    let second: String = cache
        .get("p1", gated_fetch(&gate, &started), swr_options())
        .await
        .unwrap();
    assert_eq!(first, "A");
    assert_eq!(second, "A");

    gate.notify_one();
    cache.await_pending_revalidations().await;
    assert_eq!(started.load(Ordering::SeqCst), 1);

    let value: String = cache
        .get(
            "p1",
            || async { Err::<String, _>(std::io::Error::other("must not fetch")) },
            swr_options(),
        )
        .await
        .unwrap();
    assert_eq!(value, "B");
}

#[tokio::test]
async fn refresh_rewrites_under_the_same_tags() {
    let control = ClockControl::new();
    let cache = Cache::builder(control.to_clock()).build();
    let options = swr_options().tags(["records"]);

    cache.set("p1", "A", options.clone()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let fetches = Arc::new(AtomicU32::new(0));
    let _: String = cache
        .get("p1", counting_fetch(Arc::clone(&fetches), "B".to_string()), options.clone())
        .await
        .unwrap();
    cache.await_pending_revalidations().await;

    // The refreshed entry still carries the tag, so the sweep removes it.
    cache.invalidate_by_tags(["records"]).await;
    let value: String = cache
        .get("p1", counting_fetch(Arc::clone(&fetches), "C".to_string()), options)
        .await
        .unwrap();
    assert_eq!(value, "C");
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stale_entry_with_swr_disabled_fetches_synchronously() {
    let control = ClockControl::new();
    let cache = Cache::builder(control.to_clock()).build();
    let options = CacheOptions::new().ttl(Duration::from_millis(10));

    cache.set("p1", "A", options.clone()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let fetches = Arc::new(AtomicU32::new(0));
    let value: String = cache
        .get("p1", counting_fetch(Arc::clone(&fetches), "B".to_string()), options)
        .await
        .unwrap();

    // No stale serve: the caller waits for the fresh value.
    assert_eq!(value, "B");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stale_memory_entry_without_durable_copy_still_revalidates() {
    // No durable tier at all: the stale candidate comes from the memory tier.
    let control = ClockControl::new();
    let cache = Cache::builder(control.to_clock()).build();

    cache.set("p1", "A", swr_options()).await.unwrap();
    control.advance(Duration::from_millis(20));

    let fetches = Arc::new(AtomicU32::new(0));
    let value: String = cache
        .get("p1", counting_fetch(Arc::clone(&fetches), "B".to_string()), swr_options())
        .await
        .unwrap();
    assert_eq!(value, "A");

    cache.await_pending_revalidations().await;
    let value: String = cache
        .get(
            "p1",
            || async { Err::<String, _>(std::io::Error::other("must not fetch")) },
            swr_options(),
        )
        .await
        .unwrap();
    assert_eq!(value, "B");
}
