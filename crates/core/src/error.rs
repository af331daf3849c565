//! Error taxonomy for the viewer core
//!
//! Load failure is terminal for a document instance and surfaced once to
//! the host. Render failure is isolated to a single slot, which stays a
//! placeholder. Out-of-range navigation is not an error at all: it is
//! clamped silently at the call site.

/// Failure to load the document source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The source could not be reached
    #[error("document source unreachable: {0}")]
    Unreachable(String),

    /// The source was reached but its content is not a readable document
    #[error("document source malformed: {0}")]
    Malformed(String),
}

/// A single page failed to rasterize.
///
/// Does not affect navigation or other pages; the slot remains a
/// placeholder for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("page {page_index} failed to render: {reason}")]
pub struct PageRenderError {
    /// Zero-based document page index
    pub page_index: u16,

    /// Collaborator-reported reason
    pub reason: String,
}

impl PageRenderError {
    /// Create a render error for a page
    pub fn new(page_index: u16, reason: impl Into<String>) -> Self {
        Self {
            page_index,
            reason: reason.into(),
        }
    }
}
