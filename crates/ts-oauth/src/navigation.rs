//! Navigation/URL capability
//!
//! The session controller reads the current URL (to detect returned
//! authorization codes, provider errors, or fragment tokens) and rewrites
//! the visible URL after consuming them. Both are behind a trait so tests
//! and non-browser hosts can supply an in-memory implementation.

use parking_lot::RwLock;
use std::sync::Arc;

/// Access to the environment's current URL.
pub trait Navigation {
    /// The full URL the application was (re)entered with.
    fn current_url(&self) -> String;

    /// Replace the visible URL in place, without triggering a reload.
    fn replace_url(&self, url: &str);
}

/// In-memory navigation state. Clones share the same URL cell.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigation {
    url: Arc<RwLock<String>>,
}

impl MemoryNavigation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Arc::new(RwLock::new(url.into())),
        }
    }

    /// The URL as last replaced (test observability).
    pub fn url(&self) -> String {
        self.url.read().clone()
    }
}

impl Navigation for MemoryNavigation {
    fn current_url(&self) -> String {
        self.url.read().clone()
    }

    fn replace_url(&self, url: &str) {
        *self.url.write() = url.to_string();
    }
}
