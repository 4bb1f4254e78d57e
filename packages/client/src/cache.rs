//! TTL-bounded cache of the layout list.
//!
//! Entries expire after the TTL and are dropped early whenever an
//! invalidation signal arrives on the subscribed broadcast channel.

use pagecraft_model::{CacheInvalidation, LayoutSummary};
use std::time::{Duration, Instant};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::error::ClientError;
use crate::LayoutClient;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct LayoutListCache {
    ttl: Duration,
    entry: Option<(Instant, Vec<LayoutSummary>)>,
    invalidations: Option<broadcast::Receiver<CacheInvalidation>>,
}

impl LayoutListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: None,
            invalidations: None,
        }
    }

    /// Drop the cached list whenever a signal arrives on `receiver`
    pub fn with_invalidations(mut self, receiver: broadcast::Receiver<CacheInvalidation>) -> Self {
        self.invalidations = Some(receiver);
        self
    }

    /// Cached list, if still fresh at `now`
    pub fn get(&mut self, now: Instant) -> Option<&[LayoutSummary]> {
        self.drain_invalidations();
        match &self.entry {
            Some((fetched_at, list)) if now.duration_since(*fetched_at) < self.ttl => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn store(&mut self, list: Vec<LayoutSummary>, now: Instant) {
        self.entry = Some((now, list));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Cached list, refetched from the server when stale or invalidated
    pub async fn layouts(&mut self, client: &LayoutClient) -> Result<Vec<LayoutSummary>, ClientError> {
        let now = Instant::now();
        if let Some(list) = self.get(now) {
            return Ok(list.to_vec());
        }

        let list = client.list_layouts().await?;
        self.store(list.clone(), now);
        Ok(list)
    }

    fn drain_invalidations(&mut self) {
        let Some(receiver) = self.invalidations.as_mut() else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok(signal) => {
                    tracing::debug!(layout = %signal.layout_id, "dropping cached layout list");
                    self.entry = None;
                }
                Err(TryRecvError::Lagged(_)) => self.entry = None,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    self.invalidations = None;
                    break;
                }
            }
        }
    }
}

impl Default for LayoutListCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(slug: &str) -> LayoutSummary {
        LayoutSummary {
            id: slug.to_string(),
            slug: slug.to_string(),
            name: slug.to_string(),
            updated_at: Utc::now(),
            has_draft: false,
        }
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let mut cache = LayoutListCache::new(Duration::from_secs(30));
        let now = Instant::now();
        cache.store(vec![summary("home")], now);

        assert_eq!(cache.get(now + Duration::from_secs(29)).map(|l| l.len()), Some(1));
        assert!(cache.get(now + Duration::from_secs(30)).is_none());
    }

    #[test]
    fn test_broadcast_invalidates() {
        let (sender, receiver) = broadcast::channel(4);
        let mut cache = LayoutListCache::default().with_invalidations(receiver);
        let now = Instant::now();
        cache.store(vec![summary("home")], now);

        sender
            .send(CacheInvalidation {
                layout_id: "home".to_string(),
                slug: "home".to_string(),
            })
            .unwrap();

        assert!(cache.get(now).is_none());
        cache.store(vec![summary("home")], now);
        assert!(cache.get(now).is_some());
    }

    #[test]
    fn test_closed_channel_keeps_ttl_behaviour() {
        let (sender, receiver) = broadcast::channel::<CacheInvalidation>(4);
        let mut cache = LayoutListCache::default().with_invalidations(receiver);
        drop(sender);
        let now = Instant::now();
        cache.store(vec![summary("home")], now);

        assert!(cache.get(now).is_some());
    }
}
