//! Stale-while-revalidate: serve the old value now, refresh in the background.

use std::time::Duration;

use cachette::{Cache, CacheOptions};
use tick::Clock;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), cachette::Error> {
    let cache = Cache::builder(Clock::new_tokio()).name("demo").build();

    let options = CacheOptions::new()
        .ttl(Duration::from_millis(50))
        .stale_while_revalidate(true);

    cache.set("greeting", "hello", options.clone()).await?;

    // Let the entry go stale.
    tokio::time::sleep(Duration::from_millis(60)).await;

    // This read returns the stale "hello" immediately and kicks off a
    // detached refresh that rewrites the entry.
    let stale: String = cache
        .get(
            "greeting",
            || async { Ok::<_, std::io::Error>("hello, again".to_string()) },
            options.clone(),
        )
        .await?;
    println!("served immediately: {stale}");

    cache.await_pending_revalidations().await;

    let refreshed: String = cache
        .get(
            "greeting",
            || async { Err(std::io::Error::other("fetch should not run")) },
            options,
        )
        .await?;
    println!("after refresh: {refreshed}");

    Ok(())
}
