use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

use super::traits::JsonFetcher;
use crate::errors::CoreError;

type SharedResult = Result<Arc<Value>, CoreError>;

/// One cached response plus the bookkeeping needed to coalesce and
/// revalidate it. Keyed by the full request URL.
#[derive(Default)]
struct CacheSlot {
    /// Last successfully fetched body and when it arrived.
    value: Option<(Arc<Value>, Instant)>,

    /// Present while a fetch for this key is outstanding. Late callers
    /// subscribe; the leader publishes the shared outcome when it resolves.
    in_flight: Option<watch::Sender<Option<SharedResult>>>,

    /// Present while at least one `Subscription` for this key is alive.
    poller: Option<PollerState>,
}

struct PollerState {
    handle: JoinHandle<()>,
    subscribers: usize,
    rx: watch::Receiver<Option<Arc<Value>>>,
}

struct CacheInner {
    slots: Mutex<HashMap<String, CacheSlot>>,
    revalidate_after: Duration,
}

/// URL-keyed response cache with request coalescing and fixed-interval
/// revalidation.
///
/// This is an explicit object: the application root creates one at startup
/// and hands clones of it to whatever needs data. Dropping the last handle
/// (after all subscriptions are gone) disposes of it; nothing survives a
/// restart.
///
/// All access happens through async callers on the runtime; the slot map is
/// guarded by a mutex that is never held across an await, so a slow fetch
/// for one key never blocks reads of another.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<CacheInner>,
}

impl ResponseCache {
    pub fn new(revalidate_after: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                slots: Mutex::new(HashMap::new()),
                revalidate_after,
            }),
        }
    }

    /// Get the body for `url`, fetching it at most once however many callers
    /// arrive at the same time.
    ///
    /// - a cached value younger than the revalidation period is returned
    ///   without any I/O;
    /// - if a fetch for this key is already outstanding, the caller awaits
    ///   that same result;
    /// - otherwise this caller performs the fetch and publishes the outcome,
    ///   success or failure, to everyone waiting.
    ///
    /// Errors are not retried; the next attempt happens on the next call or
    /// poll tick.
    pub async fn get(
        &self,
        fetcher: &Arc<dyn JsonFetcher>,
        url: &str,
    ) -> Result<Arc<Value>, CoreError> {
        self.fetch_shared(fetcher, url, false).await
    }

    /// Subscribe to `url`: the first subscriber for a key starts a
    /// revalidation task that refetches on every poll interval and publishes
    /// each new value. Further subscribers share that task. When the last
    /// subscription for the key is dropped, the task is stopped.
    ///
    /// A failed revalidation keeps the previously published value available
    /// to readers; the failure is logged and the next attempt happens at the
    /// next tick.
    pub fn subscribe(&self, fetcher: &Arc<dyn JsonFetcher>, url: &str) -> Subscription {
        let mut slots = self.lock_slots();
        let slot = slots.entry(url.to_string()).or_default();

        if let Some(poller) = &mut slot.poller {
            poller.subscribers += 1;
            return Subscription {
                rx: poller.rx.clone(),
                _guard: Some(PollGuard {
                    inner: Arc::clone(&self.inner),
                    key: url.to_string(),
                }),
                _keepalive: None,
            };
        }

        let initial = slot.value.as_ref().map(|(value, _)| Arc::clone(value));
        let (tx, rx) = watch::channel(initial);
        let handle = tokio::spawn(revalidate_loop(
            Self {
                inner: Arc::clone(&self.inner),
            },
            Arc::clone(fetcher),
            url.to_string(),
            tx,
        ));
        slot.poller = Some(PollerState {
            handle,
            subscribers: 1,
            rx: rx.clone(),
        });

        Subscription {
            rx,
            _guard: Some(PollGuard {
                inner: Arc::clone(&self.inner),
                key: url.to_string(),
            }),
            _keepalive: None,
        }
    }

    /// Drop every cached value. Live subscriptions keep their last published
    /// view until their next tick lands; one-shot readers refetch.
    pub fn clear(&self) {
        let mut slots = self.lock_slots();
        for slot in slots.values_mut() {
            slot.value = None;
        }
    }

    /// Number of keys currently holding a cached value.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| slot.value.is_some())
            .count()
    }

    /// Refetch regardless of freshness. Still coalesces with any fetch that
    /// is already outstanding for the key.
    async fn refresh(
        &self,
        fetcher: &Arc<dyn JsonFetcher>,
        url: &str,
    ) -> Result<Arc<Value>, CoreError> {
        self.fetch_shared(fetcher, url, true).await
    }

    async fn fetch_shared(
        &self,
        fetcher: &Arc<dyn JsonFetcher>,
        url: &str,
        force: bool,
    ) -> Result<Arc<Value>, CoreError> {
        // Decide under the lock whether to serve from cache, wait on the
        // fetch already in flight, or lead a new one.
        let waiter = {
            let mut slots = self.lock_slots();
            let slot = slots.entry(url.to_string()).or_default();

            if !force {
                if let Some((value, fetched_at)) = &slot.value {
                    if fetched_at.elapsed() < self.inner.revalidate_after {
                        return Ok(Arc::clone(value));
                    }
                }
            }

            match &slot.in_flight {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _rx) = watch::channel(None);
                    slot.in_flight = Some(tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            loop {
                if let Some(result) = rx.borrow_and_update().clone() {
                    return result;
                }
                rx.changed().await.map_err(|_| {
                    CoreError::Transport(format!("in-flight request for {url} was dropped"))
                })?;
            }
        }

        tracing::debug!(key = %url, "cache miss, fetching");
        let result: SharedResult = fetcher.fetch_json(url).await.map(Arc::new);

        {
            let mut slots = self.lock_slots();
            if let Some(slot) = slots.get_mut(url) {
                if let Ok(value) = &result {
                    slot.value = Some((Arc::clone(value), Instant::now()));
                }
                if let Some(tx) = slot.in_flight.take() {
                    let _ = tx.send(Some(result.clone()));
                }
            }
        }

        result
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, CacheSlot>> {
        self.inner
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn revalidate_loop(
    cache: ResponseCache,
    fetcher: Arc<dyn JsonFetcher>,
    url: String,
    tx: watch::Sender<Option<Arc<Value>>>,
) {
    // The first tick completes immediately, so subscribing also primes the key.
    let mut ticker = interval(cache.inner.revalidate_after);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match cache.refresh(&fetcher, &url).await {
            Ok(value) => {
                let _ = tx.send(Some(value));
            }
            Err(error) => {
                tracing::warn!(
                    key = %url,
                    error = %error,
                    "revalidation fetch failed, keeping previous value"
                );
            }
        }
    }
}

/// Decrements the subscriber count for a key; stops the revalidation task
/// when the last subscription goes away.
struct PollGuard {
    inner: Arc<CacheInner>,
    key: String,
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        let mut slots = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(slot) = slots.get_mut(&self.key) else {
            return;
        };
        let stop = match &mut slot.poller {
            Some(poller) => {
                poller.subscribers -= 1;
                poller.subscribers == 0
            }
            None => false,
        };
        if stop {
            if let Some(poller) = slot.poller.take() {
                poller.handle.abort();
            }
        }
    }
}

/// Live view of one cache key, refreshed on the poll interval.
pub struct Subscription {
    rx: watch::Receiver<Option<Arc<Value>>>,
    _guard: Option<PollGuard>,
    /// Keeps the channel open for fixture-backed subscriptions that have no
    /// revalidation task behind them.
    _keepalive: Option<watch::Sender<Option<Arc<Value>>>>,
}

impl Subscription {
    /// A subscription pre-filled with a single value that never updates.
    pub(crate) fn fixed(value: Arc<Value>) -> Self {
        let (tx, rx) = watch::channel(Some(value));
        Self {
            rx,
            _guard: None,
            _keepalive: Some(tx),
        }
    }

    /// Latest published value. `None` until the first fetch lands.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Value>> {
        self.rx.borrow().clone()
    }

    /// Wait until the revalidation task publishes a newer value.
    pub async fn changed(&mut self) -> Result<(), CoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| CoreError::WatchClosed("revalidation task stopped".to_string()))
    }

    /// Wait for the first available value: the one already cached, or the
    /// first successful fetch.
    pub async fn ready(&mut self) -> Result<Arc<Value>, CoreError> {
        loop {
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Ok(value);
            }
            self.rx
                .changed()
                .await
                .map_err(|_| CoreError::WatchClosed("revalidation task stopped".to_string()))?;
        }
    }
}

/// Typed wrapper over a [`Subscription`] for one payload kind.
pub struct DataWatch<T> {
    sub: Subscription,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DataWatch<T> {
    pub(crate) fn new(sub: Subscription) -> Self {
        Self {
            sub,
            _marker: PhantomData,
        }
    }

    /// Wait until a newer value is published.
    pub async fn changed(&mut self) -> Result<(), CoreError> {
        self.sub.changed().await
    }
}

impl<T: DeserializeOwned> DataWatch<T> {
    /// Latest value, decoded. `None` until the first fetch lands.
    #[must_use]
    pub fn latest(&self) -> Option<Result<T, CoreError>> {
        self.sub.latest().map(|value| decode(&value))
    }

    /// Wait for the first available value and decode it.
    pub async fn ready(&mut self) -> Result<T, CoreError> {
        let value = self.sub.ready().await?;
        decode(&value)
    }
}

impl<T: Serialize> DataWatch<T> {
    /// Watch pre-filled with a fixture that never updates.
    pub(crate) fn fixed(value: &T) -> Self {
        // Serializing these plain payload structs cannot fail.
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        Self {
            sub: Subscription::fixed(Arc::new(value)),
            _marker: PhantomData,
        }
    }
}

/// Decode a cached body into a typed payload.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, CoreError> {
    serde_json::from_value(value.clone()).map_err(CoreError::from)
}
