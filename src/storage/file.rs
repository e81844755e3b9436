use crate::{
    error::{Result, StudioError},
    storage::traits::{QuotaStore, GENERATION_COUNT_KEY},
};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// JSON object on disk used as a small key-value store.
///
/// Only the counter key is touched; other keys survive a write.
pub struct JsonFileQuotaStore {
    path: PathBuf,
}

impl JsonFileQuotaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StudioError::StorageError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(StudioError::StorageError(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl QuotaStore for JsonFileQuotaStore {
    async fn read(&self) -> Result<u32> {
        let map = self.load().await?;
        // Unparsable values count as zero, same as a missing key.
        let count = match map.get(GENERATION_COUNT_KEY) {
            Some(Value::Number(n)) => n.as_u64().map(|n| n.min(u32::MAX as u64) as u32),
            Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        Ok(count.unwrap_or(0))
    }

    async fn write(&self, count: u32) -> Result<()> {
        let mut map = self.load().await?;
        map.insert(GENERATION_COUNT_KEY.to_string(), json!(count));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_string_pretty(&Value::Object(map))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        log::debug!("Persisted {}={} to {}", GENERATION_COUNT_KEY, count, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_zero() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = JsonFileQuotaStore::new(dir.path().join("quota.json"));
        assert_eq!(store.read().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_read_across_instances() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("quota.json");

        JsonFileQuotaStore::new(&path).write(2).await?;
        assert_eq!(JsonFileQuotaStore::new(&path).read().await?, 2);

        let raw = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&raw)?;
        assert_eq!(value[GENERATION_COUNT_KEY], json!(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_preserves_other_keys() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quota.json");
        std::fs::write(&path, r#"{"theme": "dark", "generationCount": 1}"#)?;

        let store = JsonFileQuotaStore::new(&path);
        assert_eq!(store.read().await?, 1);
        store.write(2).await?;

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value["theme"], json!("dark"));
        assert_eq!(value[GENERATION_COUNT_KEY], json!(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_string_and_garbage_values() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quota.json");

        std::fs::write(&path, r#"{"generationCount": "3"}"#)?;
        assert_eq!(JsonFileQuotaStore::new(&path).read().await?, 3);

        std::fs::write(&path, r#"{"generationCount": "lots"}"#)?;
        assert_eq!(JsonFileQuotaStore::new(&path).read().await?, 0);

        std::fs::write(&path, "[1, 2]")?;
        assert!(JsonFileQuotaStore::new(&path).read().await.is_err());
        Ok(())
    }
}
