//! Materialized page tracking with halo prefetch
//!
//! Tracks which flipbook slots have been requested for rendering. The set
//! only grows within a session: source documents in this domain are small
//! (tens of pages), so never evicting trades a small memory cost for zero
//! re-fetch latency and simpler staleness reasoning.

use crate::config::PrefetchConfig;
use std::collections::BTreeSet;

/// Index into the flipbook slot sequence.
///
/// Slot 0 is the synthetic title slot; slots `1..=total_pages` map 1:1 to
/// document pages `0..total_pages`.
pub type SlotIndex = u16;

/// How a navigation target was reached, for halo sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Single-step flip to an adjacent slot
    Step,

    /// Direct jump, e.g. from a table of contents
    Jump,
}

/// Set of slots requested for materialization.
///
/// Monotonically non-decreasing: slots are never evicted once marked.
/// Out-of-range requests are clipped, never an error, so callers do not
/// pre-validate bounds.
#[derive(Debug, Clone)]
pub struct PageSet {
    config: PrefetchConfig,
    total_pages: u16,
    seeded: bool,
    loaded: BTreeSet<SlotIndex>,
    newly_loaded: Vec<SlotIndex>,
}

impl PageSet {
    /// Create an empty page set with the default prefetch policy
    pub fn new() -> Self {
        Self::with_config(PrefetchConfig::default())
    }

    /// Create an empty page set with a custom prefetch policy
    pub fn with_config(config: PrefetchConfig) -> Self {
        Self {
            config,
            total_pages: 0,
            seeded: false,
            loaded: BTreeSet::new(),
            newly_loaded: Vec::new(),
        }
    }

    /// Seed the set after the document's page count becomes known.
    ///
    /// Marks the title slot plus up to the first `seed_pages` document
    /// pages, so the initial render shows real content immediately for the
    /// common case of short documents. Repeat calls are no-ops.
    pub fn seed(&mut self, total_pages: u16) {
        if self.seeded {
            return;
        }

        self.total_pages = total_pages;
        self.seeded = true;

        let upper = self.config.seed_pages.min(total_pages);
        for slot in 0..=upper {
            self.mark(slot);
        }
    }

    /// Request materialization of `target` and a symmetric halo around it.
    ///
    /// The halo radius depends on how the target was reached: sequential
    /// flips load the immediate neighbors, jumps load a wider window. The
    /// whole range is clipped to `[0, total_pages]`. No-op before `seed`.
    pub fn ensure_loaded(&mut self, target: SlotIndex, kind: NavigationKind) {
        if !self.seeded {
            return;
        }

        let radius = match kind {
            NavigationKind::Step => self.config.step_halo,
            NavigationKind::Jump => self.config.jump_halo,
        };

        let start = target.saturating_sub(radius);
        let end = target.saturating_add(radius).min(self.total_pages);

        for slot in start..=end {
            self.mark(slot);
        }
    }

    /// Check whether a slot has been requested for materialization
    pub fn is_loaded(&self, slot: SlotIndex) -> bool {
        self.loaded.contains(&slot)
    }

    /// All materialized slots in ascending order
    pub fn loaded_indices(&self) -> Vec<SlotIndex> {
        self.loaded.iter().copied().collect()
    }

    /// Number of materialized slots
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Check whether no slots have been materialized yet
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Whether `seed` has been called
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// The document page count supplied to `seed` (0 before seeding)
    pub fn total_pages(&self) -> u16 {
        self.total_pages
    }

    /// Drain the slots marked since the previous call, in mark order.
    ///
    /// Lets the caller issue exactly one render request per slot that
    /// became materialized; a slot never reappears in a later delta.
    pub fn take_newly_loaded(&mut self) -> Vec<SlotIndex> {
        std::mem::take(&mut self.newly_loaded)
    }

    fn mark(&mut self, slot: SlotIndex) {
        if self.loaded.insert(slot) {
            self.newly_loaded.push(slot);
        }
    }
}

impl Default for PageSet {
    fn default() -> Self {
        Self::new()
    }
}
