mod postgres;
mod snapshot;
mod supabase;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use leetboard_analytics::{IngestReport, RawShape, ingest};

use crate::cache::{CacheService, DEFAULT_SNAPSHOT_CACHE_TTL, snapshot_key};

pub use postgres::PostgresSource;
pub use snapshot::{SnapshotLocation, SnapshotSource};
pub use supabase::{DEFAULT_SUPABASE_TABLE, SupabaseClient, SupabaseConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Snapshot,
    Supabase,
    Postgres,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Snapshot => "snapshot",
            SourceKind::Supabase => "supabase",
            SourceKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the records of a loaded batch came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Source(SourceKind),
    /// Every source failed or came back empty.
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Source(kind) => f.write_str(kind.as_str()),
            Origin::Fallback => f.write_str("empty fallback"),
        }
    }
}

/// One strategy in the fallback chain.
#[derive(Clone, Debug)]
pub enum DataSource {
    Snapshot(SnapshotSource),
    Supabase(SupabaseClient),
    Postgres(PostgresSource),
}

impl DataSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            DataSource::Snapshot(_) => SourceKind::Snapshot,
            DataSource::Supabase(_) => SourceKind::Supabase,
            DataSource::Postgres(_) => SourceKind::Postgres,
        }
    }

    pub fn shape(&self) -> RawShape {
        match self {
            DataSource::Snapshot(_) => RawShape::Snapshot,
            DataSource::Supabase(_) | DataSource::Postgres(_) => RawShape::Row,
        }
    }

    /// Remote sources go through the snapshot cache; the synced file is read directly.
    fn is_cached(&self) -> bool {
        !matches!(self, DataSource::Snapshot(_))
    }

    pub async fn fetch(&self) -> anyhow::Result<Vec<Value>> {
        match self {
            DataSource::Snapshot(source) => source.fetch().await,
            DataSource::Supabase(client) => client.fetch_all_users().await,
            DataSource::Postgres(source) => source.fetch().await,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    Loaded { records: usize, rejected: usize },
    /// The source answered but produced no usable record.
    Empty { rejected: usize },
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttempt {
    pub source: SourceKind,
    pub outcome: AttemptOutcome,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub origin: Origin,
    pub report: IngestReport,
    pub attempts: Vec<SourceAttempt>,
}

/// Ordered list of data sources tried until one yields records.
#[derive(Clone, Debug)]
pub struct SourceChain {
    sources: Vec<DataSource>,
    cache: CacheService,
    cache_ttl: Duration,
}

impl SourceChain {
    pub fn new(cache: CacheService) -> Self {
        Self {
            sources: Vec::new(),
            cache,
            cache_ttl: DEFAULT_SNAPSHOT_CACHE_TTL,
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    /// The first configured Supabase connector, used for live lookups.
    pub fn supabase(&self) -> Option<&SupabaseClient> {
        self.sources.iter().find_map(|source| match source {
            DataSource::Supabase(client) => Some(client),
            _ => None,
        })
    }

    /// Try each source in order. Never fails: when nothing loads, the outcome
    /// is an empty batch with [`Origin::Fallback`].
    ///
    /// `refresh` drops cached remote batches before fetching.
    pub async fn load(&self, refresh: bool) -> LoadOutcome {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let kind = source.kind();
            let fetched = self.fetch_source(source, refresh).await;

            let values = match fetched {
                Ok(values) => values,
                Err(err) => {
                    warn!(source = %kind, error = %format!("{err:#}"), "data source failed");
                    attempts.push(SourceAttempt {
                        source: kind,
                        outcome: AttemptOutcome::Failed(format!("{err:#}")),
                    });
                    continue;
                }
            };

            let report = ingest(values, source.shape());
            for rejection in &report.rejected {
                warn!(
                    source = %kind,
                    index = rejection.index,
                    leetcode_id = ?rejection.leetcode_id,
                    reason = %rejection.reason,
                    "record rejected at ingestion"
                );
            }

            if report.records.is_empty() {
                warn!(source = %kind, rejected = report.rejected.len(), "data source returned no usable records");
                attempts.push(SourceAttempt {
                    source: kind,
                    outcome: AttemptOutcome::Empty {
                        rejected: report.rejected.len(),
                    },
                });
                continue;
            }

            info!(
                source = %kind,
                records = report.records.len(),
                rejected = report.rejected.len(),
                "records loaded"
            );
            attempts.push(SourceAttempt {
                source: kind,
                outcome: AttemptOutcome::Loaded {
                    records: report.records.len(),
                    rejected: report.rejected.len(),
                },
            });

            return LoadOutcome {
                origin: Origin::Source(kind),
                report,
                attempts,
            };
        }

        warn!(attempted = attempts.len(), "all data sources failed; using empty batch");
        LoadOutcome {
            origin: Origin::Fallback,
            report: IngestReport::default(),
            attempts,
        }
    }

    async fn fetch_source(&self, source: &DataSource, refresh: bool) -> anyhow::Result<Vec<Value>> {
        if !source.is_cached() {
            return source.fetch().await;
        }

        let key = snapshot_key(&self.cache, source.kind().as_str());
        if refresh && let Err(e) = self.cache.del(&key).await {
            warn!(?e, cache_key = %key, "failed to drop cached snapshot before refresh");
        }

        self.cache
            .get_or_load_json(&key, self.cache_ttl, || source.fetch())
            .await
    }
}
