use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::{detail::DetailSession, error::Result};

/// Trait for storing and retrieving mounted detail sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: DetailSession) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<DetailSession>>;
    async fn delete(&self, id: &str) -> Result<()>;
    /// Drop sessions idle for longer than `max_idle`; returns how many were dropped
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize>;
    async fn len(&self) -> Result<usize>;
}

/// In-memory implementation of SessionStorage
#[derive(Clone, Default)]
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, DetailSession>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: DetailSession) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DetailSession>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize> {
        let cutoff = Utc::now() - max_idle;
        let mut evicted = 0;
        self.sessions.retain(|_, session| {
            let keep = session.last_active >= cutoff;
            if !keep {
                evicted += 1;
            }
            keep
        });
        Ok(evicted)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::sample_claim;

    #[tokio::test]
    async fn test_save_get_delete() {
        let storage = InMemorySessionStorage::new();
        let session = DetailSession::new("abc123", sample_claim("ABC123"));
        let id = session.id.clone();

        storage.save(session).await.unwrap();
        assert!(storage.get(&id).await.unwrap().is_some());

        storage.delete(&id).await.unwrap();
        assert!(storage.get(&id).await.unwrap().is_none());
        assert_eq!(storage.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_saved_mutations_are_visible() {
        let storage = InMemorySessionStorage::new();
        let session = DetailSession::new("abc123", sample_claim("ABC123"));
        let id = session.id.clone();
        storage.save(session).await.unwrap();

        let mut loaded = storage.get(&id).await.unwrap().unwrap();
        loaded.send_message("Hello");
        storage.save(loaded).await.unwrap();

        let reloaded = storage.get(&id).await.unwrap().unwrap();
        assert_eq!(reloaded.chat.len(), 4);
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_recent_sessions() {
        let storage = InMemorySessionStorage::new();

        let mut stale = DetailSession::new("abc123", sample_claim("ABC123"));
        stale.last_active = Utc::now() - Duration::hours(2);
        let stale_id = stale.id.clone();
        let fresh = DetailSession::new("abc123", sample_claim("ABC123"));
        let fresh_id = fresh.id.clone();

        storage.save(stale).await.unwrap();
        storage.save(fresh).await.unwrap();

        let evicted = storage.evict_idle(Duration::minutes(30)).await.unwrap();
        assert_eq!(evicted, 1);
        assert!(storage.get(&stale_id).await.unwrap().is_none());
        assert!(storage.get(&fresh_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_evict_idle_reports_only_removed_sessions() {
        let storage = InMemorySessionStorage::new();
        for _ in 0..3 {
            let mut stale = DetailSession::new("xyz789", sample_claim("XYZ789"));
            stale.last_active = Utc::now() - Duration::hours(1);
            storage.save(stale).await.unwrap();
        }

        assert_eq!(storage.evict_idle(Duration::minutes(30)).await.unwrap(), 3);

        storage
            .save(DetailSession::new("xyz789", sample_claim("XYZ789")))
            .await
            .unwrap();
        assert_eq!(storage.evict_idle(Duration::minutes(30)).await.unwrap(), 0);
        assert_eq!(storage.len().await.unwrap(), 1);
    }
}
