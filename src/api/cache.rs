use super::ApiError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Read cache keyed by the full request. Results stay fresh for `stale_after`; concurrent
/// callers asking for the same key share one fetch.
pub struct ResponseCache<V> {
    stale_after: Duration,
    entries: Mutex<HashMap<String, (Instant, V)>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    async fn fresh(&self, key: &str) -> Option<V> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.stale_after)
            .map(|(_, value)| value.clone())
    }

    /// Cached value for `key`, or the result of `fetch`. Failures are never cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        if let Some(value) = self.fresh(key).await {
            debug!("cache hit for {}", key);
            return Ok(value);
        }

        let slot = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let guard = slot.lock().await;

        // Whoever held the slot before us may have filled the entry
        let result = match self.fresh(key).await {
            Some(value) => {
                debug!("shared in-flight result for {}", key);
                Ok(value)
            }
            None => {
                let result = fetch().await;
                if let Ok(value) = &result {
                    let mut entries = self.entries.lock().await;
                    let stale_after = self.stale_after;
                    entries.retain(|_, (stored_at, _)| stored_at.elapsed() < stale_after);
                    entries.insert(key.to_string(), (Instant::now(), value.clone()));
                }
                result
            }
        };

        drop(guard);
        let mut in_flight = self.in_flight.lock().await;
        if Arc::strong_count(&slot) <= 2 {
            in_flight.remove(key);
        }
        result
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn invalidate(&self) {
        self.entries.lock().await.clear();
    }
}
