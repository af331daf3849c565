//! Document source collaborator interface
//!
//! The core is agnostic to whether the underlying document is a PDF, an
//! image sequence, or another paginated asset: it only needs the source to
//! report a page count and render a page at a given index and scale. The
//! rendered surface type is opaque to the core and flows straight through
//! to the host.

use crate::error::{LoadError, PageRenderError};

/// External supplier of document metadata and page rasters.
///
/// `fetch_page_count` is called once per load attempt; `render_page` is
/// called once per slot that becomes materialized. Render calls are
/// fire-and-forget from the core's perspective: a failure leaves that slot
/// a placeholder and touches nothing else.
pub trait DocumentSource {
    /// Rasterized page content, owned by the rendering collaborator
    type Surface;

    /// Report the document's total page count
    fn fetch_page_count(&self) -> Result<u16, LoadError>;

    /// Rasterize one page at the given zero-based index and zoom scale
    fn render_page(&self, page_index: u16, scale: f32) -> Result<Self::Surface, PageRenderError>;
}
