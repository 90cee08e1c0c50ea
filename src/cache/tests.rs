// src/cache/tests.rs
//!
//! Tests for the cache module
//!

#[cfg(test)]
mod store_tests {
    use crate::cache::*;
    use tempfile::TempDir;

    // ============================================================================
    // InMemoryKeyValueStore Tests
    // ============================================================================

    #[tokio::test]
    async fn test_in_memory_get_set() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get_value("missing").await.unwrap(), None);

        store.set_value("key", "one").await.unwrap();
        store.set_value("key", "two").await.unwrap();
        assert_eq!(store.get_value("key").await.unwrap().as_deref(), Some("two"));
    }

    // ============================================================================
    // JsonFileKeyValueStore Tests
    // ============================================================================

    #[tokio::test]
    async fn test_json_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/kv.json");

        let store = JsonFileKeyValueStore::open(&path).await.unwrap();
        store.set_value("form-a", r#"{"x":1}"#).await.unwrap();
        store.set_value("ttl_form-a", "42").await.unwrap();
        drop(store);

        let reopened = JsonFileKeyValueStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_value("form-a").await.unwrap().as_deref(),
            Some(r#"{"x":1}"#)
        );
        assert_eq!(reopened.get_value("ttl_form-a").await.unwrap().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_json_file_store_missing_and_empty_file() {
        let dir = TempDir::new().unwrap();

        let missing = JsonFileKeyValueStore::open(dir.path().join("none.json"))
            .await
            .unwrap();
        assert_eq!(missing.get_value("a").await.unwrap(), None);

        std::fs::write(dir.path().join("empty.json"), "").unwrap();
        let empty = JsonFileKeyValueStore::open(dir.path().join("empty.json"))
            .await
            .unwrap();
        assert_eq!(empty.get_value("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileKeyValueStore::open(&path).await;
        assert!(matches!(result, Err(CacheError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_json_file_store_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.json");
        let store = JsonFileKeyValueStore::open(&path).await.unwrap();
        store.set_value("form-a", "one").await.unwrap();

        // A directory where the file should go makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "x").unwrap();

        let result = store.set_value("form-a", "two").await;
        assert!(matches!(result, Err(CacheError::Store { .. })));
        assert_eq!(store.get_value("form-a").await.unwrap().as_deref(), Some("one"));

        let result = store.set_value("form-b", "new").await;
        assert!(matches!(result, Err(CacheError::Store { .. })));
        assert_eq!(store.get_value("form-b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_store_from_config() {
        let dir = TempDir::new().unwrap();
        let config = CacheConfig {
            store_path: Some(dir.path().join("kv.json")),
            ..CacheConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        store.set_value("k", "v").await.unwrap();
        assert!(dir.path().join("kv.json").exists());

        let memory = open_store(&CacheConfig::default()).await.unwrap();
        assert_eq!(memory.get_value("k").await.unwrap(), None);
    }
}

#[cfg(test)]
mod cached_item_store_tests {
    use crate::cache::*;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::future::{ready, Ready};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    const KEY: &str = "form-";
    const TTL_KEY: &str = "ttl_form-";

    fn now_millis() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis()
            .to_string()
    }

    fn counted(
        calls: &AtomicUsize,
        result: Result<Value, String>,
    ) -> impl FnOnce() -> Ready<Result<Value, String>> + Send + '_ {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            ready(result)
        }
    }

    fn setup(config: CacheConfig) -> (Arc<InMemoryKeyValueStore>, CachedItemStore) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let cached = CachedItemStore::new(store.clone(), config);
        (store, cached)
    }

    async fn seed(store: &InMemoryKeyValueStore, id: &str, value: Value, saved_at: &str) {
        store
            .set_value(&format!("{KEY}{id}"), &value.to_string())
            .await
            .unwrap();
        store
            .set_value(&format!("{TTL_KEY}{id}"), saved_at)
            .await
            .unwrap();
    }

    // ============================================================================
    // get_cached Tests
    // ============================================================================

    #[tokio::test]
    async fn test_fresh_hit_skips_server() {
        let (store, cached) = setup(CacheConfig::default());
        seed(&store, "a", json!({"v": "cached"}), &now_millis()).await;
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "server"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "cached"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 0);
        assert_eq!(file_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_fetches_server_and_saves() {
        let (store, cached) = setup(CacheConfig::default());
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "server"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "server"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 1);
        assert_eq!(file_calls.load(Ordering::SeqCst), 0);

        let saved = store.get_value("form-a").await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Value>(&saved).unwrap(), json!({"v": "server"}));
        let stamp: u64 = store.get_value("ttl_form-a").await.unwrap().unwrap().parse().unwrap();
        assert!(stamp > 0);

        // Second read is served from cache
        let again: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "other"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(again, json!({"v": "server"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_refreshes_from_server() {
        let (store, cached) = setup(CacheConfig::default());
        seed(&store, "a", json!({"v": "old"}), "0").await;
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "new"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "new"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 1);
        let saved = store.get_value("form-a").await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Value>(&saved).unwrap(), json!({"v": "new"}));
    }

    #[tokio::test]
    async fn test_server_failure_serves_stale_entry() {
        let (store, cached) = setup(CacheConfig::default());
        seed(&store, "a", json!({"v": "old"}), "0").await;
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Err("offline".to_string())),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "old"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 1);
        assert_eq!(file_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_server_failure_without_cache_uses_file() {
        let (store, cached) = setup(CacheConfig::default());
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Err("offline".to_string())),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "file"}));
        assert_eq!(file_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get_value("ttl_form-a").await.unwrap().as_deref(), Some("0"));

        // Bundled copy is saved as expired, so the next read goes to the server again
        let next: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "server"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(next, json!({"v": "server"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_everything_fails() {
        let (_store, cached) = setup(CacheConfig::default());
        let calls = AtomicUsize::new(0);

        let result: Result<Value, CacheError> = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&calls, Err("offline".to_string())),
                counted(&calls, Err("no such asset".to_string())),
            )
            .await;

        match result {
            Err(CacheError::NotFound { key, reason }) => {
                assert_eq!(key, "form-a");
                assert_eq!(reason, "no such asset");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_server_result_not_cached() {
        let (store, cached) = setup(CacheConfig::default());
        let calls = AtomicUsize::new(0);

        for empty in [json!({}), json!([]), Value::Null] {
            let value: Value = cached
                .get_cached(
                    "a",
                    KEY,
                    TTL_KEY,
                    counted(&calls, Ok(empty.clone())),
                    counted(&calls, Ok(json!({"v": "file"}))),
                )
                .await
                .unwrap();
            assert_eq!(value, empty);
        }

        assert_eq!(store.get_value("form-a").await.unwrap(), None);
        assert_eq!(store.get_value("ttl_form-a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_entry_counts_as_missing() {
        let (store, cached) = setup(CacheConfig::default());
        store.set_value("form-a", "{ broken").await.unwrap();
        store.set_value("ttl_form-a", &now_millis()).await.unwrap();
        let calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&calls, Ok(json!({"v": "server"}))),
                counted(&calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "server"}));
    }

    // ============================================================================
    // TTL Tests
    // ============================================================================

    #[tokio::test]
    async fn test_ttl_override() {
        let mut overrides = HashMap::new();
        overrides.insert(TTL_KEY.to_string(), 0);
        let (store, cached) = setup(CacheConfig {
            ttl_overrides: overrides,
            ..CacheConfig::default()
        });
        assert_eq!(cached.ttl_for(TTL_KEY), 0);
        assert_eq!(cached.ttl_for("ttl_faq-new-"), DEFAULT_TTL_MS);

        // Zero TTL: even a just-saved entry is stale
        seed(&store, "a", json!({"v": "cached"}), &now_millis()).await;
        let calls = AtomicUsize::new(0);
        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&calls, Ok(json!({"v": "server"}))),
                counted(&calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(value, json!({"v": "server"}));
    }

    #[tokio::test]
    async fn test_missing_stamp_is_stale() {
        let (store, cached) = setup(CacheConfig::default());
        store.set_value("form-a", r#"{"v":"old"}"#).await.unwrap();
        let calls = AtomicUsize::new(0);

        let value: Value = cached
            .get_cached(
                "a",
                KEY,
                TTL_KEY,
                counted(&calls, Ok(json!({"v": "server"}))),
                counted(&calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(value, json!({"v": "server"}));
    }

    // ============================================================================
    // get (server first) Tests
    // ============================================================================

    #[tokio::test]
    async fn test_get_prefers_server_over_fresh_cache() {
        let (store, cached) = setup(CacheConfig::default());
        seed(&store, "a", json!({"v": "cached"}), &now_millis()).await;
        let server_calls = AtomicUsize::new(0);
        let file_calls = AtomicUsize::new(0);

        let value: Value = cached
            .get(
                "a",
                KEY,
                TTL_KEY,
                counted(&server_calls, Ok(json!({"v": "server"}))),
                counted(&file_calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"v": "server"}));
        assert_eq!(server_calls.load(Ordering::SeqCst), 1);
        let saved = store.get_value("form-a").await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Value>(&saved).unwrap(), json!({"v": "server"}));
    }

    #[tokio::test]
    async fn test_get_falls_back_to_cache_then_file() {
        let (store, cached) = setup(CacheConfig::default());
        seed(&store, "a", json!({"v": "old"}), "0").await;
        let calls = AtomicUsize::new(0);

        let cached_value: Value = cached
            .get(
                "a",
                KEY,
                TTL_KEY,
                counted(&calls, Err("offline".to_string())),
                counted(&calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(cached_value, json!({"v": "old"}));

        let file_value: Value = cached
            .get(
                "b",
                KEY,
                TTL_KEY,
                counted(&calls, Err("offline".to_string())),
                counted(&calls, Ok(json!({"v": "file"}))),
            )
            .await
            .unwrap();
        assert_eq!(file_value, json!({"v": "file"}));
    }

    #[tokio::test]
    async fn test_typed_values() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Setting {
            id: String,
            value: String,
        }

        let (_store, cached) = setup(CacheConfig::default());
        let calls = AtomicUsize::new(0);

        let setting: Setting = cached
            .get_cached(
                "tenant",
                "system-settings-",
                "ttl_system-settings-",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    ready(Ok::<_, String>(Setting {
                        id: "tenant".to_string(),
                        value: "sunbird".to_string(),
                    }))
                },
                || ready(Err::<Setting, _>("unused".to_string())),
            )
            .await
            .unwrap();
        assert_eq!(setting.value, "sunbird");

        let again: Setting = cached
            .get_cached(
                "tenant",
                "system-settings-",
                "ttl_system-settings-",
                || ready(Err::<Setting, _>("offline".to_string())),
                || ready(Err::<Setting, _>("unused".to_string())),
            )
            .await
            .unwrap();
        assert_eq!(again, setting);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
