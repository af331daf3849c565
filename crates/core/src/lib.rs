//! Flipbook Viewer Core Library
//!
//! State model for a progressive paginated document viewer: which pages to
//! materialize, when, at what scale, and how navigation state evolves. The
//! actual rasterization of a page and the flip animation are owned by
//! external collaborators reached through the [`DocumentSource`] trait and
//! the flip-settled event.

pub mod composer;
pub mod document;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod source;
pub mod viewport;

pub use composer::{FlipbookViewer, PageSlot, ViewerEvent, ViewerSnapshot};
pub use document::{page_for_slot, slot_count, slot_for_page, DocumentHandle, TITLE_SLOT};
pub use error::{LoadError, PageRenderError};
pub use loader::{LoadCoordinator, LoadPhase};
pub use navigation::{FlipRequest, FlipState, NavigationController};
pub use source::DocumentSource;
pub use viewport::{
    flipbook_dimensions, FlipbookDimensions, ViewportConfig, ViewportEngine, WindowSize,
};

pub use flipbook_cache::{NavigationKind, PageSet, PrefetchConfig, SlotIndex};
