use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use leetboard_analytics::{Rejection, UserRecord};

use crate::sources::{Origin, SourceAttempt, SourceChain};

/// One immutable loaded batch plus how it was obtained.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Increments on every reload; 0 before the first load.
    pub version: u64,
    pub origin: Origin,
    pub loaded_at: u64,
    pub records: Vec<UserRecord>,
    pub rejected: Vec<Rejection>,
    pub attempts: Vec<SourceAttempt>,
}

impl Snapshot {
    fn unloaded() -> Self {
        Self {
            version: 0,
            origin: Origin::Fallback,
            loaded_at: 0,
            records: Vec::new(),
            rejected: Vec::new(),
            attempts: Vec::new(),
        }
    }

    pub fn find(&self, leetcode_id: &str) -> Option<&UserRecord> {
        let wanted = leetcode_id.trim();
        self.records
            .iter()
            .find(|record| record.leetcode_id.eq_ignore_ascii_case(wanted))
    }
}

/// Shared handle to the current snapshot. Readers clone an `Arc`; reloads swap it whole.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    chain: SourceChain,
    current: RwLock<Arc<Snapshot>>,
    reloading: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(chain: SourceChain) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                chain,
                current: RwLock::new(Arc::new(Snapshot::unloaded())),
                reloading: Mutex::new(()),
            }),
        }
    }

    pub fn chain(&self) -> &SourceChain {
        &self.inner.chain
    }

    pub async fn current(&self) -> Arc<Snapshot> {
        self.inner.current.read().await.clone()
    }

    /// Run the fallback chain and publish the result. Concurrent reloads are serialized.
    pub async fn reload(&self, refresh: bool) -> Arc<Snapshot> {
        let _guard = self.inner.reloading.lock().await;
        let outcome = self.inner.chain.load(refresh).await;
        let previous_version = self.inner.current.read().await.version;

        let snapshot = Arc::new(Snapshot {
            version: previous_version + 1,
            origin: outcome.origin,
            loaded_at: now_unix_secs(),
            records: outcome.report.records,
            rejected: outcome.report.rejected,
            attempts: outcome.attempts,
        });

        *self.inner.current.write().await = snapshot.clone();
        info!(
            version = snapshot.version,
            origin = %snapshot.origin,
            records = snapshot.records.len(),
            rejected = snapshot.rejected.len(),
            "snapshot published"
        );

        snapshot
    }
}

/// Current unix timestamp in seconds; 0 if the clock is before the epoch.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
