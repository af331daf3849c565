//! Viewport sizing and zoom
//!
//! Pure sizing rules plus a small engine that owns the stored zoom scale.
//! The dimension bounds guarantee the flipbook never exceeds the host
//! viewport while capping absolute size on very large displays. The engine
//! owns no other component's state and is re-invoked reactively on every
//! (host-debounced) window resize.

/// Host window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl WindowSize {
    /// Create a window size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Computed flipbook display dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlipbookDimensions {
    pub width: f32,
    pub height: f32,
}

/// Tunables for sizing, zoom, and compact-layout detection.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportConfig {
    /// Lower zoom bound
    pub min_zoom: f32,

    /// Upper zoom bound
    pub max_zoom: f32,

    /// Scale applied on reset and at startup
    pub default_zoom: f32,

    /// Multiplier for one zoom-in step (zoom-out divides by it)
    pub zoom_step: f32,

    /// Effective-scale ceiling in compact layout, so zoom gestures on
    /// small screens cannot overflow the container
    pub compact_zoom_cap: f32,

    /// Window width below which the layout is treated as compact
    pub compact_breakpoint: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            default_zoom: 0.8,
            zoom_step: 1.2,
            compact_zoom_cap: 0.9,
            compact_breakpoint: 768.0,
        }
    }
}

impl ViewportConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom bounds
    pub fn with_zoom_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }

    /// Set the default zoom scale
    pub fn with_default_zoom(mut self, scale: f32) -> Self {
        self.default_zoom = scale;
        self
    }

    /// Set the compact layout breakpoint in logical pixels
    pub fn with_compact_breakpoint(mut self, width: f32) -> Self {
        self.compact_breakpoint = width;
        self
    }
}

/// Compute the flipbook's display dimensions for a window.
///
/// Compact layout keeps a slim inset and scales with the window; standard
/// layout leaves room for surrounding chrome and caps at 1000x800 so the
/// flipbook does not balloon on large displays.
pub fn flipbook_dimensions(window: WindowSize, compact: bool) -> FlipbookDimensions {
    if compact {
        FlipbookDimensions {
            width: (window.width - 20.0).min(window.width * 0.9),
            height: (window.height - 100.0).min(window.height * 0.85),
        }
    } else {
        FlipbookDimensions {
            width: (window.width - 120.0).min(1000.0),
            height: (window.height - 140.0).min(800.0),
        }
    }
}

/// Owns the zoom scale and the last reported window geometry.
#[derive(Debug, Clone)]
pub struct ViewportEngine {
    config: ViewportConfig,
    window: WindowSize,
    zoom_scale: f32,
}

impl ViewportEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(ViewportConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: ViewportConfig) -> Self {
        Self {
            config,
            window: WindowSize::new(1280.0, 800.0),
            zoom_scale: config.default_zoom,
        }
    }

    /// Record a new window size
    pub fn handle_resize(&mut self, window: WindowSize) {
        self.window = window;
    }

    /// Whether the current window width falls in the compact layout
    pub fn is_compact(&self) -> bool {
        self.window.width < self.config.compact_breakpoint
    }

    /// Display dimensions for the current window and layout
    pub fn dimensions(&self) -> FlipbookDimensions {
        flipbook_dimensions(self.window, self.is_compact())
    }

    /// Multiply the stored scale by one zoom step, clamped to the bounds
    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom_scale * self.config.zoom_step)
    }

    /// Divide the stored scale by one zoom step, clamped to the bounds
    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom_scale / self.config.zoom_step)
    }

    /// Restore the default scale
    pub fn reset_zoom(&mut self) -> f32 {
        self.zoom_scale = self.config.default_zoom;
        self.zoom_scale
    }

    /// Set an absolute scale, clamped to the bounds
    pub fn set_zoom(&mut self, scale: f32) -> f32 {
        self.zoom_scale = scale.clamp(self.config.min_zoom, self.config.max_zoom);
        self.zoom_scale
    }

    /// The stored zoom scale
    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    /// The scale actually applied to the flipbook.
    ///
    /// In compact layout this is additionally capped regardless of the
    /// stored value; the stored scale is preserved so leaving compact
    /// layout restores it.
    pub fn effective_scale(&self) -> f32 {
        if self.is_compact() {
            self.zoom_scale.min(self.config.compact_zoom_cap)
        } else {
            self.zoom_scale
        }
    }

    /// Last reported window size
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// The engine's configuration
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self::new()
    }
}
