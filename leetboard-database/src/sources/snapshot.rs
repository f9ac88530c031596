use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotLocation {
    Path(PathBuf),
    Url(String),
}

/// Synced `users_analytics.json` export, read from disk or over HTTP.
#[derive(Clone, Debug)]
pub struct SnapshotSource {
    location: SnapshotLocation,
    http: reqwest::Client,
}

impl SnapshotSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self {
            location: SnapshotLocation::Path(path.as_ref().to_path_buf()),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            location: SnapshotLocation::Url(url.into()),
            http,
        }
    }

    /// Build from `SNAPSHOT_URL` (preferred) or `SNAPSHOT_PATH`. Returns `None` when neither is set.
    pub fn from_env_optional(http: &reqwest::Client) -> Option<Self> {
        let read = |key: &str| {
            env::var(key)
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = read("SNAPSHOT_URL") {
            return Some(Self::url(url, http.clone()));
        }

        read("SNAPSHOT_PATH").map(|path| Self {
            location: SnapshotLocation::Path(PathBuf::from(path)),
            http: http.clone(),
        })
    }

    pub fn location(&self) -> &SnapshotLocation {
        &self.location
    }

    pub async fn fetch(&self) -> anyhow::Result<Vec<Value>> {
        match &self.location {
            SnapshotLocation::Path(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read snapshot file `{}`", path.display()))?;
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("snapshot file `{}` is not a JSON array", path.display()))
            }
            SnapshotLocation::Url(url) => {
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("snapshot request to `{url}` failed"))?
                    .error_for_status()
                    .with_context(|| format!("snapshot endpoint `{url}` returned an error status"))?;

                response
                    .json::<Vec<Value>>()
                    .await
                    .with_context(|| format!("snapshot at `{url}` is not a JSON array"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{SnapshotLocation, SnapshotSource};

    #[tokio::test]
    async fn reads_json_array_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "leetboard-snapshot-{}-array.json",
            std::process::id()
        ));
        std::fs::write(&path, json!([{ "leetcode_id": "a" }]).to_string()).expect("write");

        let source = SnapshotSource::path(&path);
        assert_eq!(source.location(), &SnapshotLocation::Path(path.clone()));

        let values = source.fetch().await.expect("readable snapshot");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["leetcode_id"], "a");

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn missing_file_is_an_error_with_the_path() {
        let path = std::env::temp_dir().join("leetboard-snapshot-does-not-exist.json");
        let err = SnapshotSource::path(&path)
            .fetch()
            .await
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("leetboard-snapshot-does-not-exist.json"));
    }
}
