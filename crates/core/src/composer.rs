//! Flipbook view composition and event dispatch
//!
//! `FlipbookViewer` owns the load coordinator, the materialization cache,
//! the navigation controller and the viewport engine, and turns raw host
//! events into calls on them. It assembles the ordered slot list the
//! rendering collaborator displays: the title slot, materialized pages,
//! and positional placeholders for pages whose content is still streaming
//! in. Placeholders are never skipped, so flip animation offsets stay
//! correct while the document loads.
//!
//! The composer holds no independent state beyond the rendered surfaces
//! and the transient fullscreen flag.

use crate::document::{page_for_slot, TITLE_SLOT};
use crate::error::LoadError;
use crate::loader::{LoadCoordinator, LoadPhase};
use crate::navigation::{FlipRequest, NavigationController};
use crate::source::DocumentSource;
use crate::viewport::{FlipbookDimensions, ViewportConfig, ViewportEngine, WindowSize};
use flipbook_cache::{PageSet, PrefetchConfig, SlotIndex};
use std::collections::{BTreeSet, HashMap};

/// One position in the flipbook sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PageSlot {
    /// The synthetic title slot at index 0
    Title,

    /// A slot whose page content has been rendered and is displayed
    Materialized(SlotIndex),

    /// A slot holding its position while content is pending or its render
    /// failed
    Placeholder(SlotIndex),
}

/// Discrete commands received from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ViewerEvent {
    /// Flip to the next slot
    Next,

    /// Flip to the previous slot
    Previous,

    /// Jump to an arbitrary slot; any integer is accepted and clamped
    GoTo(i64),

    /// Zoom in one step
    ZoomIn,

    /// Zoom out one step
    ZoomOut,

    /// Restore the default zoom scale
    ResetZoom,

    /// Toggle the fullscreen presentation flag
    ToggleFullscreen,

    /// The host window was resized (debounced by the host)
    Resize(WindowSize),

    /// The flip animation settled on a slot
    FlipSettled(SlotIndex),
}

/// Host-facing state tuple for rendering controls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewerSnapshot {
    /// Slot currently presented
    pub current_index: SlotIndex,

    /// Document page count, once the load has completed
    pub total_pages: Option<u16>,

    /// Stored zoom scale
    pub zoom_scale: f32,

    /// Whether the fullscreen presentation is active
    pub is_fullscreen: bool,

    /// Current flipbook display dimensions
    pub dimensions: FlipbookDimensions,

    /// Where the document load stands
    pub load_phase: LoadPhase,
}

impl ViewerSnapshot {
    /// Label for the "page X of N" control
    pub fn page_label(&self) -> String {
        match (self.current_index, self.total_pages) {
            (TITLE_SLOT, _) => "Cover".to_string(),
            (slot, Some(total)) => format!("Page {} of {}", slot, total),
            (slot, None) => format!("Page {}", slot),
        }
    }
}

/// Progressive paginated viewer over a [`DocumentSource`].
pub struct FlipbookViewer<S: DocumentSource> {
    source: S,
    loader: LoadCoordinator,
    pages: PageSet,
    navigation: NavigationController,
    viewport: ViewportEngine,
    surfaces: HashMap<SlotIndex, S::Surface>,
    render_failed: BTreeSet<SlotIndex>,
    fullscreen: bool,
}

impl<S: DocumentSource> FlipbookViewer<S> {
    /// Create a viewer for a source with the given descriptor
    pub fn new(source: S, descriptor: impl Into<String>) -> Self {
        Self {
            source,
            loader: LoadCoordinator::new(descriptor),
            pages: PageSet::new(),
            navigation: NavigationController::new(),
            viewport: ViewportEngine::new(),
            surfaces: HashMap::new(),
            render_failed: BTreeSet::new(),
            fullscreen: false,
        }
    }

    /// Set the prefetch policy
    pub fn with_prefetch_config(mut self, config: PrefetchConfig) -> Self {
        self.pages = PageSet::with_config(config);
        self
    }

    /// Set the viewport and zoom configuration
    pub fn with_viewport_config(mut self, config: ViewportConfig) -> Self {
        self.viewport = ViewportEngine::with_config(config);
        self
    }

    /// Load the document's page count and seed the initial page window.
    ///
    /// Idempotent after success; safe to call again after a failure to let
    /// the host offer a retry affordance. On success the cache is seeded,
    /// navigation bounds are set, and the seed window is rendered.
    pub fn load(&mut self) -> Result<u16, LoadError> {
        let count = self.loader.load(&self.source)?;
        self.pages.seed(count);
        self.navigation.set_bounds(count);
        self.materialize_pending();
        Ok(count)
    }

    /// Dispatch one host event.
    ///
    /// Returns the accepted flip request, if the event started one, so the
    /// host can drive the animation collaborator toward its target.
    pub fn handle_event(&mut self, event: ViewerEvent) -> Option<FlipRequest> {
        match event {
            ViewerEvent::Next => {
                let request = self.navigation.next();
                self.prefetch_for(request);
                request
            }
            ViewerEvent::Previous => {
                let request = self.navigation.previous();
                self.prefetch_for(request);
                request
            }
            ViewerEvent::GoTo(index) => {
                let request = self.navigation.go_to(index);
                self.prefetch_for(request);
                request
            }
            ViewerEvent::FlipSettled(index) => {
                self.navigation.on_flip_settled(index);
                None
            }
            ViewerEvent::ZoomIn => {
                self.viewport.zoom_in();
                None
            }
            ViewerEvent::ZoomOut => {
                self.viewport.zoom_out();
                None
            }
            ViewerEvent::ResetZoom => {
                self.viewport.reset_zoom();
                None
            }
            ViewerEvent::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                None
            }
            ViewerEvent::Resize(window) => {
                self.viewport.handle_resize(window);
                None
            }
        }
    }

    /// Ordered slot list for the rendering collaborator.
    ///
    /// Length `total_pages + 1` once loaded; just the title slot while the
    /// load is pending so the host can show the loading presentation.
    pub fn slots(&self) -> Vec<PageSlot> {
        let Some(total) = self.loader.page_count() else {
            return vec![PageSlot::Title];
        };

        let mut slots = Vec::with_capacity(usize::from(total) + 1);
        slots.push(PageSlot::Title);
        for slot in 1..=total {
            if self.surfaces.contains_key(&slot) {
                slots.push(PageSlot::Materialized(slot));
            } else {
                slots.push(PageSlot::Placeholder(slot));
            }
        }
        slots
    }

    /// Current state tuple for host controls
    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            current_index: self.navigation.current_index(),
            total_pages: self.loader.page_count(),
            zoom_scale: self.viewport.zoom_scale(),
            is_fullscreen: self.fullscreen,
            dimensions: self.viewport.dimensions(),
            load_phase: self.loader.phase(),
        }
    }

    /// Rendered surface for a slot, if one was produced
    pub fn surface(&self, slot: SlotIndex) -> Option<&S::Surface> {
        self.surfaces.get(&slot)
    }

    /// Slots whose render failed and which stay placeholders
    pub fn failed_slots(&self) -> Vec<SlotIndex> {
        self.render_failed.iter().copied().collect()
    }

    /// The materialization cache
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// The navigation controller
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// The viewport engine
    pub fn viewport(&self) -> &ViewportEngine {
        &self.viewport
    }

    /// Whether the fullscreen presentation is active
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn prefetch_for(&mut self, request: Option<FlipRequest>) {
        if let Some(request) = request {
            self.pages.ensure_loaded(request.target, request.kind);
            self.materialize_pending();
        }
    }

    /// Render every slot newly marked by the cache, exactly once each.
    ///
    /// A failed render is logged and recorded; the slot stays a placeholder
    /// for the rest of the session and is not retried.
    fn materialize_pending(&mut self) {
        let scale = self.viewport.effective_scale();

        for slot in self.pages.take_newly_loaded() {
            let Some(page_index) = page_for_slot(slot) else {
                continue; // title slot has no backing page
            };

            match self.source.render_page(page_index, scale) {
                Ok(surface) => {
                    self.surfaces.insert(slot, surface);
                }
                Err(err) => {
                    log::warn!("slot {} stays placeholder: {}", slot, err);
                    self.render_failed.insert(slot);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageRenderError;
    use std::cell::RefCell;

    /// In-memory source: surfaces are the echoed page index, with optional
    /// per-page failure injection.
    struct FakeSource {
        page_count: u16,
        failing_pages: Vec<u16>,
        render_log: RefCell<Vec<u16>>,
    }

    impl FakeSource {
        fn new(page_count: u16) -> Self {
            Self {
                page_count,
                failing_pages: Vec::new(),
                render_log: RefCell::new(Vec::new()),
            }
        }

        fn with_failing_pages(mut self, pages: Vec<u16>) -> Self {
            self.failing_pages = pages;
            self
        }
    }

    impl DocumentSource for FakeSource {
        type Surface = u16;

        fn fetch_page_count(&self) -> Result<u16, LoadError> {
            Ok(self.page_count)
        }

        fn render_page(&self, page_index: u16, _scale: f32) -> Result<u16, PageRenderError> {
            self.render_log.borrow_mut().push(page_index);
            if self.failing_pages.contains(&page_index) {
                return Err(PageRenderError::new(page_index, "injected failure"));
            }
            Ok(page_index)
        }
    }

    fn loaded_viewer(page_count: u16) -> FlipbookViewer<FakeSource> {
        let mut viewer = FlipbookViewer::new(FakeSource::new(page_count), "guide.pdf");
        viewer.load().unwrap();
        viewer
    }

    #[test]
    fn test_slots_before_load() {
        let viewer = FlipbookViewer::new(FakeSource::new(10), "guide.pdf");

        assert_eq!(viewer.slots(), vec![PageSlot::Title]);
        assert_eq!(viewer.snapshot().load_phase, LoadPhase::Pending);
    }

    #[test]
    fn test_load_seeds_and_renders_initial_window() {
        let viewer = loaded_viewer(10);

        let slots = viewer.slots();
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0], PageSlot::Title);
        for slot in 1..=5 {
            assert_eq!(slots[slot as usize], PageSlot::Materialized(slot));
        }
        for slot in 6..=10 {
            assert_eq!(slots[slot as usize], PageSlot::Placeholder(slot));
        }
    }

    #[test]
    fn test_render_called_once_per_materialized_slot() {
        let viewer = loaded_viewer(10);

        // Seed window is slots 1..=5, backing pages 0..=4; the title slot
        // never reaches the renderer.
        assert_eq!(*viewer.source.render_log.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_jump_materializes_halo_and_preserves_placeholders() {
        let mut viewer = loaded_viewer(10);

        let request = viewer.handle_event(ViewerEvent::GoTo(9)).unwrap();
        assert_eq!(request.target, 9);

        let slots = viewer.slots();
        assert_eq!(slots[6], PageSlot::Placeholder(6));
        for slot in 7..=10 {
            assert_eq!(slots[slot as usize], PageSlot::Materialized(slot));
        }
    }

    #[test]
    fn test_failed_render_stays_placeholder() {
        let source = FakeSource::new(6).with_failing_pages(vec![2]);
        let mut viewer = FlipbookViewer::new(source, "guide.pdf");
        viewer.load().unwrap();

        // Page 2 backs slot 3.
        assert_eq!(viewer.slots()[3], PageSlot::Placeholder(3));
        assert_eq!(viewer.failed_slots(), vec![3]);
        assert!(viewer.pages().is_loaded(3));
    }

    #[test]
    fn test_failed_render_is_not_retried() {
        let source = FakeSource::new(6).with_failing_pages(vec![2]);
        let mut viewer = FlipbookViewer::new(source, "guide.pdf");
        viewer.load().unwrap();

        let renders_after_load = viewer.source.render_log.borrow().len();

        // Navigating over the failed slot again marks nothing new, so no
        // further render request is issued for it.
        viewer.handle_event(ViewerEvent::GoTo(3));
        assert_eq!(viewer.source.render_log.borrow().len(), renders_after_load);
    }

    #[test]
    fn test_flip_settled_updates_snapshot() {
        let mut viewer = loaded_viewer(10);

        viewer.handle_event(ViewerEvent::GoTo(4));
        assert_eq!(viewer.snapshot().current_index, 0);

        viewer.handle_event(ViewerEvent::FlipSettled(4));
        assert_eq!(viewer.snapshot().current_index, 4);
    }

    #[test]
    fn test_zoom_events() {
        let mut viewer = loaded_viewer(3);

        viewer.handle_event(ViewerEvent::ZoomIn);
        assert!((viewer.snapshot().zoom_scale - 0.96).abs() < 1e-5);

        viewer.handle_event(ViewerEvent::ResetZoom);
        assert_eq!(viewer.snapshot().zoom_scale, 0.8);

        viewer.handle_event(ViewerEvent::ZoomOut);
        assert!((viewer.snapshot().zoom_scale - 0.8 / 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let mut viewer = loaded_viewer(3);

        assert!(!viewer.is_fullscreen());
        viewer.handle_event(ViewerEvent::ToggleFullscreen);
        assert!(viewer.snapshot().is_fullscreen);
        viewer.handle_event(ViewerEvent::ToggleFullscreen);
        assert!(!viewer.is_fullscreen());
    }

    #[test]
    fn test_resize_updates_dimensions() {
        let mut viewer = loaded_viewer(3);

        viewer.handle_event(ViewerEvent::Resize(WindowSize::new(900.0, 700.0)));
        let dims = viewer.snapshot().dimensions;
        assert_eq!(dims.width, 780.0);
        assert_eq!(dims.height, 560.0);
    }

    #[test]
    fn test_load_failure_phase() {
        struct DeadSource;
        impl DocumentSource for DeadSource {
            type Surface = ();
            fn fetch_page_count(&self) -> Result<u16, LoadError> {
                Err(LoadError::Unreachable("503".to_string()))
            }
            fn render_page(&self, _p: u16, _s: f32) -> Result<(), PageRenderError> {
                Ok(())
            }
        }

        let mut viewer = FlipbookViewer::new(DeadSource, "guide.pdf");
        assert!(viewer.load().is_err());
        assert_eq!(viewer.snapshot().load_phase, LoadPhase::Failed);
        assert_eq!(viewer.slots(), vec![PageSlot::Title]);
    }

    #[test]
    fn test_page_label() {
        let mut viewer = loaded_viewer(10);

        assert_eq!(viewer.snapshot().page_label(), "Cover");

        viewer.handle_event(ViewerEvent::GoTo(3));
        viewer.handle_event(ViewerEvent::FlipSettled(3));
        assert_eq!(viewer.snapshot().page_label(), "Page 3 of 10");
    }

    #[test]
    fn test_snapshot_serializes_for_host_bridge() {
        let viewer = loaded_viewer(4);

        let json = serde_json::to_string(&viewer.snapshot()).unwrap();
        let back: ViewerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, viewer.snapshot());
    }

    #[test]
    fn test_surface_accessor() {
        let viewer = loaded_viewer(6);

        // Slot 2 is backed by page 1; the fake source echoes the page index.
        assert_eq!(viewer.surface(2), Some(&1));
        assert_eq!(viewer.surface(6), None);
    }
}
