pub mod cache;
pub mod sources;
pub mod store;

pub use cache::CacheService;
pub use sources::{
    AttemptOutcome, DataSource, Origin, PostgresSource, SnapshotSource, SourceAttempt,
    SourceChain, SourceKind, SupabaseClient, SupabaseConfig,
};
pub use store::{Snapshot, SnapshotStore, now_unix_secs};
