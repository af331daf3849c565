//! Navigation state machine over the flipbook slot sequence
//!
//! Two states: `Idle` and a transient `Flipping` while the collaborator's
//! flip animation plays. Requests are never rejected: at the boundaries and
//! mid-flip they degrade to no-ops, and arbitrary `go_to` targets are
//! clamped, since UI affordances like a table-of-contents link may race
//! with a still-loading document.
//!
//! `current_index` is reconciled on the collaborator's settle event, not on
//! the initiating call, so it always reflects what is visually presented
//! rather than what was requested.

use flipbook_cache::{NavigationKind, SlotIndex};

/// Whether a flip animation is currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipState {
    /// No animation playing; requests are accepted
    Idle,

    /// Animation toward `target` in flight; requests are ignored until the
    /// settle event arrives
    Flipping {
        /// Slot the in-flight animation was asked to land on
        target: SlotIndex,
    },
}

/// An accepted navigation request, to be forwarded to the materialization
/// cache and the animation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipRequest {
    /// Destination slot
    pub target: SlotIndex,

    /// How the destination was reached, for halo sizing
    pub kind: NavigationKind,
}

/// Finite-state controller for page navigation.
///
/// Bounds are unknown until the document load completes; before that every
/// request clamps into the single-slot range `[0, 0]` and no-ops.
#[derive(Debug, Clone)]
pub struct NavigationController {
    current: SlotIndex,
    last_slot: SlotIndex,
    state: FlipState,
}

impl NavigationController {
    /// Create a controller positioned on the title slot with no bounds yet
    pub fn new() -> Self {
        Self {
            current: 0,
            last_slot: 0,
            state: FlipState::Idle,
        }
    }

    /// Set the valid slot range once the page count is known.
    ///
    /// The last slot equals the page count because slot 0 is the title.
    pub fn set_bounds(&mut self, total_pages: u16) {
        self.last_slot = total_pages;
        self.current = self.current.min(self.last_slot);
    }

    /// Request a flip to the next slot. No-op at the last slot or mid-flip.
    pub fn next(&mut self) -> Option<FlipRequest> {
        if self.current >= self.last_slot {
            return None;
        }
        self.begin_flip(self.current + 1, NavigationKind::Step)
    }

    /// Request a flip to the previous slot. No-op at the title slot or
    /// mid-flip.
    pub fn previous(&mut self) -> Option<FlipRequest> {
        if self.current == 0 {
            return None;
        }
        self.begin_flip(self.current - 1, NavigationKind::Step)
    }

    /// Request a jump to an arbitrary slot.
    ///
    /// The index is clamped into the valid range, never rejected. A request
    /// for the slot already presented is a no-op.
    pub fn go_to(&mut self, index: i64) -> Option<FlipRequest> {
        let target = index.clamp(0, i64::from(self.last_slot)) as SlotIndex;
        if target == self.current {
            return None;
        }
        self.begin_flip(target, NavigationKind::Jump)
    }

    /// Reconcile to the slot the animation actually settled on.
    ///
    /// The settle point may lag a programmatic request; whatever the
    /// collaborator reports is authoritative for `current_index`.
    pub fn on_flip_settled(&mut self, index: SlotIndex) {
        self.current = index.min(self.last_slot);
        self.state = FlipState::Idle;
    }

    /// Slot currently presented to the reader
    pub fn current_index(&self) -> SlotIndex {
        self.current
    }

    /// Index of the last valid slot
    pub fn last_slot(&self) -> SlotIndex {
        self.last_slot
    }

    /// Whether a flip animation is in flight
    pub fn is_flipping(&self) -> bool {
        matches!(self.state, FlipState::Flipping { .. })
    }

    /// Current state of the flip machine
    pub fn state(&self) -> FlipState {
        self.state
    }

    fn begin_flip(&mut self, target: SlotIndex, kind: NavigationKind) -> Option<FlipRequest> {
        if self.is_flipping() {
            return None;
        }
        self.state = FlipState::Flipping { target };
        Some(FlipRequest { target, kind })
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}
