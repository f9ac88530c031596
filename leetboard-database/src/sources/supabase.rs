use std::env;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use leetboard_analytics::SkillFilter;

pub const DEFAULT_SUPABASE_TABLE: &str = "user_profiles";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Endpoint and credentials for the hosted profile table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_SUPABASE_TABLE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `SUPABASE_*` variables.
    ///
    /// Returns `Ok(None)` when disabled or when neither URL nor key is set, and
    /// an error when only one of the two is present.
    pub fn from_env_optional() -> anyhow::Result<Option<Self>> {
        let enabled = env::var("SUPABASE_ENABLED")
            .ok()
            .map(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(true);

        if !enabled {
            return Ok(None);
        }

        let read = |key: &str| {
            env::var(key)
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let (url, anon_key) = match (read("SUPABASE_URL"), read("SUPABASE_ANON_KEY")) {
            (None, None) => return Ok(None),
            (Some(url), Some(key)) => (url, key),
            (Some(_), None) => anyhow::bail!("SUPABASE_URL is set but SUPABASE_ANON_KEY is missing"),
            (None, Some(_)) => anyhow::bail!("SUPABASE_ANON_KEY is set but SUPABASE_URL is missing"),
        };

        let mut config = Self::new(url, anon_key);
        if let Some(table) = read("SUPABASE_TABLE") {
            config.table = table;
        }
        if let Some(seconds) = read("HTTP_TIMEOUT_SECONDS").and_then(|raw| raw.parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(seconds.max(1));
        }

        Ok(Some(config))
    }
}

/// PostgREST client for the profile table. Constructed explicitly and passed around.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    table_url: String,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> anyhow::Result<Self> {
        let base = config.url.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            anyhow::bail!("supabase url must start with http:// or https://, got `{base}`");
        }
        if !is_identifier(&config.table) {
            anyhow::bail!("invalid supabase table name `{}`", config.table);
        }

        let mut headers = HeaderMap::new();
        let api_key =
            HeaderValue::from_str(&config.anon_key).context("supabase anon key is not a valid header")?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .context("supabase anon key is not a valid header")?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("failed to build supabase http client")?;

        Ok(Self {
            http,
            table_url: format!("{base}/rest/v1/{}", config.table),
        })
    }

    pub fn from_env_optional() -> anyhow::Result<Option<Self>> {
        SupabaseConfig::from_env_optional()?
            .map(Self::new)
            .transpose()
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn select_request(&self, params: &[(&str, String)]) -> anyhow::Result<reqwest::Request> {
        self.http
            .get(&self.table_url)
            .query(params)
            .build()
            .context("failed to build supabase request")
    }

    async fn select(&self, params: &[(&str, String)]) -> anyhow::Result<Vec<Value>> {
        debug!(url = %self.table_url, ?params, "supabase select");

        let request = self.select_request(params)?;
        let response = self
            .http
            .execute(request)
            .await
            .context("supabase request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("supabase returned {status}: {}", body.trim());
        }

        response
            .json::<Vec<Value>>()
            .await
            .context("supabase response is not a JSON array")
    }

    pub async fn fetch_all_users(&self) -> anyhow::Result<Vec<Value>> {
        self.select(&[("select", "*".to_owned())]).await
    }

    pub async fn fetch_user_by_leetcode_id(&self, leetcode_id: &str) -> anyhow::Result<Option<Value>> {
        let rows = self.select(&lookup_params(leetcode_id)).await?;

        Ok(rows.into_iter().next())
    }

    /// Server-side search over display name, LeetCode id and school, most solved first.
    pub async fn search_users(&self, term: &str) -> anyhow::Result<Vec<Value>> {
        self.select(&[
            ("select", "*".to_owned()),
            ("or", search_filter(term)),
            ("order", "total_solved.desc".to_owned()),
        ])
        .await
    }

    pub async fn filter_by_skill_level(&self, filter: &SkillFilter) -> anyhow::Result<Vec<Value>> {
        match filter {
            SkillFilter::All => self.fetch_all_users().await,
            SkillFilter::Level(level) => {
                self.select(&[
                    ("select", "*".to_owned()),
                    ("skill_level", format!("eq.{}", level.as_str())),
                    ("order", "total_solved.desc".to_owned()),
                ])
                .await
            }
            SkillFilter::Unknown(_) => Ok(Vec::new()),
        }
    }

    /// Fetch up to `limit` rows to check that the endpoint and key work.
    pub async fn probe(&self, limit: usize) -> anyhow::Result<usize> {
        let rows = self
            .select(&[("select", "*".to_owned()), ("limit", limit.max(1).to_string())])
            .await?;
        Ok(rows.len())
    }
}

/// Top-level `eq.` filters take the rest of the value literally, so the id is sent unquoted.
fn lookup_params(leetcode_id: &str) -> [(&'static str, String); 3] {
    [
        ("select", "*".to_owned()),
        ("leetcode_id", format!("eq.{}", leetcode_id.trim())),
        ("limit", "1".to_owned()),
    ]
}

fn search_filter(term: &str) -> String {
    let pattern = quote_value(&format!("*{}*", term.trim()));
    format!("(display_name.ilike.{pattern},leetcode_id.ilike.{pattern},school.ilike.{pattern})")
}

/// Double-quote a filter value so reserved characters (`,.:()`) stay literal.
fn quote_value(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

pub(crate) fn is_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && raw.split('.').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
}
