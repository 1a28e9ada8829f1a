use crate::reference::Page;

/// Outcome of a single reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Hit,
    /// `evicted` is `None` while free frames are left
    Fault { evicted: Option<Page> },
}

impl Access {
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Fault { .. })
    }

    pub fn evicted(&self) -> Option<Page> {
        match self {
            Access::Hit => None,
            Access::Fault { evicted } => *evicted,
        }
    }
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Hit => f.write_str("Hit"),
            Access::Fault { evicted } => match evicted {
                Some(evicted) => f.write_fmt(format_args!("Fault evicted={evicted}")),
                None => f.write_str("Fault"),
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fifo,
    Lru,
    Opt,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Fifo, PolicyKind::Lru, PolicyKind::Opt];

    pub fn title(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO (First-In, First-Out)",
            PolicyKind::Lru => "LRU (Least Recently Used)",
            PolicyKind::Opt => "Optimal",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Fifo => f.write_str("FIFO"),
            PolicyKind::Lru => f.write_str("LRU"),
            PolicyKind::Opt => f.write_str("OPT"),
        }
    }
}

/// A page replacement policy working on a fixed number of frames.
///
/// Every policy owns its frames for exactly one run, [`crate::simulation::simulate`]
/// feeds it the reference string from left to right.
pub trait ReplacementPolicy {
    fn kind(&self) -> PolicyKind;

    /// number of frames
    fn capacity(&self) -> usize;

    /// Processes `page`. `upcoming` holds the rest of the reference string after `page`,
    /// online policies ignore it.
    fn access(&mut self, page: Page, upcoming: &[Page]) -> Access;

    /// resident pages in display order
    fn frames(&self) -> Vec<Page>;
}
