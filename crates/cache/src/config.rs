//! Prefetch configuration for page materialization.
//!
//! The seed window and halo widths are tunable constants rather than a
//! load-bearing contract: flipping is usually sequential, so a narrow halo
//! around single-step flips hides load latency on the next flip, while a
//! direct jump loads a wider halo since the reader's next move is less
//! predictable.

/// Configuration for the page materialization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchConfig {
    /// Number of document pages materialized up front after load, in
    /// addition to the title slot
    pub seed_pages: u16,

    /// Halo radius around the target of a single-step flip
    pub step_halo: u16,

    /// Halo radius around the target of a direct jump
    pub jump_halo: u16,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            seed_pages: 5,
            step_halo: 1,
            jump_halo: 2,
        }
    }
}

impl PrefetchConfig {
    /// Create a new prefetch configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pages materialized up front after load
    pub fn with_seed_pages(mut self, pages: u16) -> Self {
        self.seed_pages = pages;
        self
    }

    /// Set the halo radius for single-step flips
    pub fn with_step_halo(mut self, radius: u16) -> Self {
        self.step_halo = radius;
        self
    }

    /// Set the halo radius for direct jumps
    pub fn with_jump_halo(mut self, radius: u16) -> Self {
        self.jump_halo = radius;
        self
    }
}
