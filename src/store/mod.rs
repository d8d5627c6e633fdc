pub mod seed;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors from the section store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid JSON in section '{section}': {source}")]
    Corrupt {
        section: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Durable mapping from section name to an arbitrary JSON value,
/// one row per section. `put` replaces content wholesale; absence of
/// a row is not an error.
#[derive(Clone)]
pub struct SectionStore {
    pool: SqlitePool,
}

impl SectionStore {
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS portfolio_data (
        section TEXT PRIMARY KEY,
        content TEXT NOT NULL
    )";

    /// Open (creating if missing) the store at the given sqlx URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("section store ready at {}", url);
        Ok(store)
    }

    /// In-memory store for tests. A single connection keeps every
    /// operation on the same database instance.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(Self::SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Fetch the content of one section, or None if no row exists.
    pub async fn get(&self, name: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query("SELECT content FROM portfolio_data WHERE section = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("content")?;
                let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    section: name.to_string(),
                    source,
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Upsert one section, replacing its content wholesale. The write is
    /// committed before this returns; callers treat it as authoritative.
    pub async fn put(&self, name: &str, content: &serde_json::Value) -> Result<(), StoreError> {
        let raw = content.to_string();
        sqlx::query("INSERT OR REPLACE INTO portfolio_data (section, content) VALUES (?1, ?2)")
            .bind(name)
            .bind(raw)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Every section keyed by name, used to assemble the public
    /// portfolio document.
    pub async fn get_all(
        &self,
    ) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
        let rows = sqlx::query("SELECT section, content FROM portfolio_data")
            .fetch_all(&self.pool)
            .await?;

        let mut sections = serde_json::Map::new();
        for row in rows {
            let name: String = row.try_get("section")?;
            let raw: String = row.try_get("content")?;
            let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                section: name.clone(),
                source,
            })?;
            sections.insert(name, value);
        }
        Ok(sections)
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM portfolio_data")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count == 0)
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = SectionStore::in_memory().await.unwrap();
        let value = json!({"title": "Shefali", "highlights": ["a", "b"]});

        store.put("about", &value).await.unwrap();
        assert_eq!(store.get("about").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn missing_section_reads_as_absent() {
        let store = SectionStore::in_memory().await.unwrap();
        assert_eq!(store.get("projects").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_wholesale() {
        let store = SectionStore::in_memory().await.unwrap();
        store.put("skills", &json!(["Rust", "SQL"])).await.unwrap();
        store.put("skills", &json!(["Rust"])).await.unwrap();

        assert_eq!(store.get("skills").await.unwrap(), Some(json!(["Rust"])));
    }

    #[tokio::test]
    async fn get_all_returns_every_section() {
        let store = SectionStore::in_memory().await.unwrap();
        store.put("about", &json!({"title": "x"})).await.unwrap();
        store.put("projects", &json!([])).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains_key("about"));
        assert!(all.contains_key("projects"));
    }

    #[tokio::test]
    async fn empty_check() {
        let store = SectionStore::in_memory().await.unwrap();
        assert!(store.is_empty().await.unwrap());
        store.put("about", &json!({})).await.unwrap();
        assert!(!store.is_empty().await.unwrap());
    }
}
