use std::cmp::Reverse;

use crate::policy::{Access, PolicyKind, ReplacementPolicy};
use crate::reference::Page;

/// Belady's optimal policy: evicts the resident page whose next use lies furthest ahead.
///
/// Needs the whole remaining reference string, so it only serves as a lower bound
/// for the online policies. Each fault with full frames scans `upcoming` once per frame.
#[derive(Debug, Clone)]
pub struct OptPolicy {
    capacity: usize,
    frames: Vec<Page>,
}

impl OptPolicy {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Slot of the page to evict.
    ///
    /// Pages that are never used again count as infinitely far away.
    /// Ties go to the lowest slot: `min_by_key` keeps the first of equal keys.
    fn victim_slot(&self, upcoming: &[Page]) -> Option<usize> {
        self.frames
            .iter()
            .enumerate()
            .map(|(slot, resident)| (slot, next_use(*resident, upcoming)))
            .min_by_key(|(_, distance)| Reverse(distance.unwrap_or(usize::MAX)))
            .map(|(slot, _)| slot)
    }
}

/// distance from the current step to the next reference of `page`, if any
fn next_use(page: Page, upcoming: &[Page]) -> Option<usize> {
    upcoming.iter().position(|p| *p == page).map(|i| i + 1)
}

impl ReplacementPolicy for OptPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Opt
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn access(&mut self, page: Page, upcoming: &[Page]) -> Access {
        if self.frames.contains(&page) {
            return Access::Hit;
        }

        if self.frames.len() < self.capacity {
            self.frames.push(page);
            return Access::Fault { evicted: None };
        }

        let Some(slot) = self.victim_slot(upcoming) else {
            // capacity is never zero, so a full frame set has a victim
            self.frames.push(page);
            return Access::Fault { evicted: None };
        };
        let evicted = std::mem::replace(&mut self.frames[slot], page);
        log::debug!("opt: page {page} replaces page {evicted} in slot {slot}");

        Access::Fault {
            evicted: Some(evicted),
        }
    }

    fn frames(&self) -> Vec<Page> {
        self.frames.clone()
    }
}
