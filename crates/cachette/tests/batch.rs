//! Integration tests for concurrent batched reads.

use cachette::{BatchRequest, Cache, CacheOptions};
use tick::Clock;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn one_failed_fetch_does_not_fail_the_batch() {
    block_on(async {
        let cache = Cache::builder(Clock::new_frozen()).build();

        let requests: Vec<_> = ["ok", "bad"]
            .into_iter()
            .map(|key| BatchRequest {
                key: key.to_string(),
                fetch: {
                    let key = key.to_string();
                    move || async move {
                        if key == "bad" {
                            Err(std::io::Error::other("backend down"))
                        } else {
                            Ok(1)
                        }
                    }
                },
                options: CacheOptions::new(),
            })
            .collect();

        let values = cache.get_batch(requests).await;

        assert_eq!(values.len(), 1);
        assert_eq!(values.get("ok"), Some(&1));
        assert!(!values.contains_key("bad"));
    });
}

#[test]
fn cached_keys_are_answered_without_fetching() {
    block_on(async {
        let cache = Cache::builder(Clock::new_frozen()).build();
        cache.set("a", &10, CacheOptions::new()).await.unwrap();

        let requests: Vec<_> = [("a", 99), ("b", 20)]
            .into_iter()
            .map(|(key, fallback)| BatchRequest {
                key: key.to_string(),
                fetch: move || async move { Ok::<_, std::io::Error>(fallback) },
                options: CacheOptions::new(),
            })
            .collect();

        let values = cache.get_batch(requests).await;

        // "a" comes from the cache, not its fetch function.
        assert_eq!(values.get("a"), Some(&10));
        assert_eq!(values.get("b"), Some(&20));
    });
}

#[test]
fn batch_results_are_keyed_by_request_key() {
    block_on(async {
        let cache = Cache::builder(Clock::new_frozen()).build();

        let requests: Vec<_> = (0..5)
            .map(|i| BatchRequest {
                key: format!("key-{i}"),
                fetch: move || async move { Ok::<_, std::io::Error>(i * 10) },
                options: CacheOptions::new(),
            })
            .collect();

        let values = cache.get_batch(requests).await;

        assert_eq!(values.len(), 5);
        for i in 0..5 {
            assert_eq!(values.get(&format!("key-{i}")), Some(&(i * 10)));
        }
    });
}
