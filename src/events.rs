//! Category change notifications.
//!
//! Writers publish on [`CategoryFeed`] after a product is stored. Readers go
//! through [`CategoryCache`], which keeps the last category list tagged with
//! the feed version it was fetched under and refetches once the version
//! moves.

use std::sync::RwLock;

use tokio::sync::watch;

use crate::domain::types::CategoryName;
use crate::repository::ProductReader;
use crate::services::catalog::normalize_categories;

/// Monotonic version counter bumped whenever the category set may change.
#[derive(Debug)]
pub struct CategoryFeed {
    tx: watch::Sender<u64>,
}

impl Default for CategoryFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Signals that categories changed. Succeeds without subscribers.
    pub fn publish(&self) {
        self.tx.send_modify(|version| *version += 1);
        log::debug!("Category feed advanced to version {}", self.version());
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }
}

/// Category list shared by every page's navigation.
#[derive(Debug)]
pub struct CategoryCache {
    feed: watch::Receiver<u64>,
    entries: RwLock<Option<(u64, Vec<CategoryName>)>>,
}

impl CategoryCache {
    pub fn new(feed: &CategoryFeed) -> Self {
        Self {
            feed: feed.subscribe(),
            entries: RwLock::new(None),
        }
    }

    /// Returns the cached list when it matches the current feed version,
    /// otherwise loads a fresh one. A load that overlapped a publish is
    /// handed back to the caller but not stored. Failed loads yield an empty
    /// list and leave the cache untouched.
    pub fn categories<R>(&self, repo: &R) -> Vec<CategoryName>
    where
        R: ProductReader,
    {
        let version = *self.feed.borrow();

        if let Ok(entries) = self.entries.read() {
            if let Some((cached_version, categories)) = entries.as_ref() {
                if *cached_version == version {
                    return categories.clone();
                }
            }
        }

        let categories = match repo.list_categories() {
            Ok(categories) => normalize_categories(categories),
            Err(e) => {
                log::error!("Failed to list categories: {e}");
                return Vec::new();
            }
        };

        if *self.feed.borrow() == version {
            match self.entries.write() {
                Ok(mut entries) => *entries = Some((version, categories.clone())),
                Err(e) => log::error!("Category cache lock poisoned: {e}"),
            }
        }

        categories
    }
}
