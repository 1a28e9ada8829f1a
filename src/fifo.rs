use std::collections::VecDeque;

use crate::policy::{Access, PolicyKind, ReplacementPolicy};
use crate::reference::Page;

/// Evicts the page that has been resident the longest. Hits never reorder the frames.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    capacity: usize,
    // oldest first
    frames: VecDeque<Page>,
}

impl FifoPolicy {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page, _upcoming: &[Page]) -> Access {
        if self.frames.contains(&page) {
            return Access::Hit;
        }

        let evicted = if self.frames.len() >= self.capacity {
            self.frames.pop_front()
        } else {
            None
        };
        if let Some(evicted) = evicted {
            log::debug!("fifo: page {page} replaces oldest page {evicted}");
        }
        self.frames.push_back(page);

        Access::Fault { evicted }
    }

    fn frames(&self) -> Vec<Page> {
        self.frames.iter().copied().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn evicts_in_insertion_order() {
        let mut fifo = FifoPolicy::new(2);
        assert_eq!(fifo.access(1, &[]), Access::Fault { evicted: None });
        assert_eq!(fifo.access(2, &[]), Access::Fault { evicted: None });
        // a hit on 1 must not protect it
        assert_eq!(fifo.access(1, &[]), Access::Hit);
        assert_eq!(fifo.access(3, &[]), Access::Fault { evicted: Some(1) });
        assert_eq!(fifo.frames(), vec![2, 3]);
    }

    #[test]
    fn single_frame_replaces_on_every_miss() {
        let mut fifo = FifoPolicy::new(1);
        assert_eq!(fifo.access(4, &[]), Access::Fault { evicted: None });
        assert_eq!(fifo.access(4, &[]), Access::Hit);
        assert_eq!(fifo.access(5, &[]), Access::Fault { evicted: Some(4) });
        assert_eq!(fifo.access(6, &[]), Access::Fault { evicted: Some(5) });
        assert_eq!(fifo.frames(), vec![6]);
    }
}
