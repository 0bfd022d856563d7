//! Basic read-through caching over a filesystem-backed durable tier.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use cachette::{Cache, CacheOptions, FsStore};
use tick::Clock;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), cachette::Error> {
    let dir = tempfile::tempdir().expect("temp dir");
    let cache = Cache::builder(Clock::new_tokio())
        .name("demo")
        .durable(FsStore::new(dir.path()), "demo-v1")
        .default_ttl(Duration::from_secs(300))
        .build();

    let fetches = Arc::new(AtomicU32::new(0));
    let options = CacheOptions::new().tags(["records"]);

    for _ in 0..3 {
        let fetches = Arc::clone(&fetches);
        let records: Vec<String> = cache
            .get(
                "records?page=1",
                move || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, std::io::Error>(vec!["alpha".to_string(), "beta".to_string()])
                },
                options.clone(),
            )
            .await?;
        println!("got {} records", records.len());
    }

    println!("fetch ran {} time(s)", fetches.load(Ordering::SeqCst));
    println!("stats: {:?}", cache.stats());

    cache.invalidate_by_tags(["records"]).await;
    println!("after tag invalidation: {:?}", cache.stats());

    Ok(())
}
