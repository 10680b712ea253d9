//! In-flight request coalescing.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use marquee_error::{MarqueeError, MarqueeResult, TaskError};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{debug, error, instrument, trace};

/// Age after which a pending entry is no longer offered to new callers.
pub const DEFAULT_PENDING_TIMEOUT: Duration = Duration::from_secs(30);

type SharedOutput<T> = Shared<BoxFuture<'static, MarqueeResult<T>>>;

/// One in-flight operation shared by every caller using the same key.
struct PendingEntry<T>
where
    T: Clone + Send + Sync + 'static,
{
    id: u64,
    future: SharedOutput<T>,
    created_at: Instant,
}

#[track_caller]
fn task_error(key: &str, err: JoinError) -> TaskError {
    let panicked = err.is_panic();
    error!(key, panicked, "Coalesced operation did not finish");
    let what = if panicked { "panicked" } else { "was cancelled" };
    TaskError::new(format!("Operation for '{}' {}", key, what), panicked)
}

/// Snapshot of the pending map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoalescerStats {
    /// Number of pending entries, stale ones included
    pub pending_count: usize,
    /// Pending keys, sorted
    pub keys: Vec<String>,
}

struct CoalescerInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    pending: Mutex<HashMap<String, PendingEntry<T>>>,
    timeout: Duration,
    next_id: AtomicU64,
}

impl<T> CoalescerInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingEntry<T>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes the entry for `key` if it is still the one registered as `id`.
    fn settle(&self, key: &str, id: u64) {
        let mut pending = self.lock();
        if pending.get(key).is_some_and(|entry| entry.id == id) {
            pending.remove(key);
            trace!(key, "Pending entry settled");
        }
    }
}

/// Collapses concurrent calls that share a key into one execution.
///
/// The first caller for a key spawns the operation onto the tokio runtime;
/// callers arriving while it is in flight await the same shared output. The
/// operation runs to completion even if every caller stops waiting. The entry
/// is removed when the operation settles, so later calls start fresh work
/// instead of replaying a finished result. Entries older than the timeout are
/// not reused; the old operation is not cancelled.
///
/// Failures are part of `T` (typically a `Result`), so every attached caller
/// sees the same error. The outer [`MarqueeResult`] only fails when the
/// spawned task itself dies.
///
/// # Examples
///
/// ```
/// use marquee_cache::RequestCoalescer;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// # rt.block_on(async {
/// let coalescer: RequestCoalescer<u32> = RequestCoalescer::default();
/// let value = coalescer.deduplicate("answer", || async { 42 }).await;
/// assert_eq!(value.unwrap(), 42);
/// assert_eq!(coalescer.stats().pending_count, 0);
/// # });
/// ```
pub struct RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<CoalescerInner<T>>,
}

impl<T> RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a coalescer whose entries go stale after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(CoalescerInner {
                pending: Mutex::new(HashMap::new()),
                timeout,
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Staleness threshold.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Runs `operation` unless an equivalent call is already in flight.
    ///
    /// Only the caller that registers the entry invokes `operation`, and the
    /// resulting future is spawned immediately. Lookup and registration happen
    /// under a single lock acquisition with no await in between.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn deduplicate<F, Fut>(&self, key: &str, operation: F) -> MarqueeResult<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let shared = {
            let now = Instant::now();
            let mut pending = self.inner.lock();

            let fresh = pending
                .get(key)
                .filter(|entry| now.saturating_duration_since(entry.created_at) < self.inner.timeout)
                .map(|entry| entry.future.clone());

            match fresh {
                Some(future) => {
                    debug!(key, "Attaching to in-flight request");
                    future
                }
                None => {
                    if pending.contains_key(key) {
                        debug!(key, "Discarding stale pending entry");
                    }
                    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                    let owner = Arc::downgrade(&self.inner);
                    let owned_key = key.to_string();
                    let settle_key = owned_key.clone();
                    let handle = tokio::spawn(async move {
                        let output = operation().await;
                        if let Some(inner) = owner.upgrade() {
                            inner.settle(&settle_key, id);
                        }
                        output
                    });
                    let weak = Arc::downgrade(&self.inner);
                    let future = handle
                        .map(move |joined| -> MarqueeResult<T> {
                            joined.map_err(|e| {
                                if let Some(inner) = weak.upgrade() {
                                    inner.settle(&owned_key, id);
                                }
                                MarqueeError::from(task_error(&owned_key, e))
                            })
                        })
                        .boxed()
                        .shared();

                    pending.insert(
                        key.to_string(),
                        PendingEntry {
                            id,
                            future: future.clone(),
                            created_at: now,
                        },
                    );
                    future
                }
            }
        };

        shared.await
    }

    /// Whether a fresh entry exists for `key`.
    pub fn is_pending(&self, key: &str) -> bool {
        let now = Instant::now();
        self.inner.lock().get(key).is_some_and(|entry| {
            now.saturating_duration_since(entry.created_at) < self.inner.timeout
        })
    }

    /// Forgets the entry for `key`; callers already attached are unaffected.
    pub fn clear(&self, key: &str) -> bool {
        self.inner.lock().remove(key).is_some()
    }

    /// Forgets every entry.
    pub fn clear_all(&self) {
        self.inner.lock().clear();
    }

    /// Evicts entries older than the timeout and returns how many were removed.
    #[instrument(skip(self))]
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let timeout = self.inner.timeout;
        let mut pending = self.inner.lock();
        let before = pending.len();
        pending.retain(|_, entry| now.saturating_duration_since(entry.created_at) < timeout);
        let removed = before - pending.len();
        if removed > 0 {
            debug!(removed, "Evicted stale pending entries");
        }
        removed
    }

    /// Count and keys of pending entries.
    pub fn stats(&self) -> CoalescerStats {
        let pending = self.inner.lock();
        let mut keys: Vec<String> = pending.keys().cloned().collect();
        keys.sort();
        CoalescerStats {
            pending_count: keys.len(),
            keys,
        }
    }
}

impl<T> Default for RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_PENDING_TIMEOUT)
    }
}

impl<T> Clone for RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for RequestCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCoalescer")
            .field("timeout", &self.inner.timeout)
            .field("pending", &self.stats().pending_count)
            .finish()
    }
}
