use std::collections::VecDeque;

use crate::policy::{Access, PolicyKind, ReplacementPolicy};
use crate::reference::Page;

/// Evicts the resident page whose last access lies furthest in the past.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    capacity: usize,
    // residency order, only used for display
    frames: Vec<Page>,
    // least recently used first. Holds exactly the resident pages,
    // evicted pages are removed in the same step so the front is always a valid victim.
    recency: VecDeque<Page>,
}

impl LruPolicy {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            frames: Vec::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
        }
    }

    fn touch(&mut self, page: Page) {
        if let Some(pos) = self.recency.iter().position(|p| *p == page) {
            self.recency.remove(pos);
        }
        self.recency.push_back(page);
    }

    fn evict_least_recent(&mut self) -> Option<Page> {
        let victim = self.recency.pop_front()?;
        let slot = self.frames.iter().position(|p| *p == victim)?;
        self.frames.remove(slot);

        Some(victim)
    }
}

impl ReplacementPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page, _upcoming: &[Page]) -> Access {
        if self.frames.contains(&page) {
            self.touch(page);
            return Access::Hit;
        }

        let evicted = if self.frames.len() >= self.capacity {
            self.evict_least_recent()
        } else {
            None
        };
        if let Some(evicted) = evicted {
            log::debug!("lru: page {page} replaces least recently used page {evicted}");
        }
        self.frames.push(page);
        self.touch(page);

        Access::Fault { evicted }
    }

    fn frames(&self) -> Vec<Page> {
        self.frames.clone()
    }
}
