use anyhow::Context as _;
use serde_json::Value;
use sqlx::PgPool;

use super::supabase::{DEFAULT_SUPABASE_TABLE, is_identifier};

/// Direct connection to the database behind the hosted API.
#[derive(Clone, Debug)]
pub struct PostgresSource {
    pool: PgPool,
    table: String,
}

impl PostgresSource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_SUPABASE_TABLE.to_owned(),
        }
    }

    pub fn with_table(pool: PgPool, table: &str) -> anyhow::Result<Self> {
        if !is_identifier(table) {
            anyhow::bail!("invalid profile table name `{table}`");
        }

        Ok(Self {
            pool,
            table: table.to_owned(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Rows are serialized by Postgres so they share the REST row shape.
    pub async fn fetch(&self) -> anyhow::Result<Vec<Value>> {
        let query = format!("SELECT to_jsonb(p)::text FROM {} p", self.table);
        let rows: Vec<String> = sqlx::query_scalar(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to select profiles from `{}`", self.table))?;

        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_str(row)
                    .with_context(|| format!("profile row {index} is not valid JSON"))
            })
            .collect()
    }
}
