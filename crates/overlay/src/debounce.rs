//! Per-block mutation debounce.
//!
//! A mutated block is only tokenized after a quiet period with no further
//! mutations. The tracker is a pure deadline table driven by an injected
//! clock so the host loop (and the tests) decide when time passes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use core_types::BlockId;

pub const STABILITY_WINDOW: Duration = Duration::from_millis(800);

#[derive(Debug, Default)]
pub struct StabilityTracker {
    deadlines: HashMap<BlockId, Instant>,
}

impl StabilityTracker {
    pub fn new() -> Self {
        StabilityTracker::default()
    }

    /// Records a mutation of `block` at `now`, restarting its quiet period.
    pub fn touch(&mut self, block: BlockId, now: Instant) {
        self.deadlines.insert(block, now + STABILITY_WINDOW);
    }

    pub fn is_pending(&self, block: &str) -> bool {
        self.deadlines.contains_key(block)
    }

    /// Earliest pending deadline, for hosts that sleep until the next one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every block whose quiet period has elapsed by
    /// `now`, ordered by deadline.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<BlockId> {
        let mut ready: Vec<(BlockId, Instant)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(block, deadline)| (block.clone(), *deadline))
            .collect();
        ready.sort_by_key(|(_, deadline)| *deadline);
        for (block, _) in &ready {
            self.deadlines.remove(block);
        }
        ready.into_iter().map(|(block, _)| block).collect()
    }
}
