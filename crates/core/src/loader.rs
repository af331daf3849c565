//! One-shot document load coordination
//!
//! Performs the single asynchronous-from-the-host's-perspective load of the
//! document's page count. A successful load is cached for the lifetime of
//! the viewer, so re-invocation is idempotent; a failed load is terminal
//! for that attempt and the host decides whether to offer a retry.

use crate::document::DocumentHandle;
use crate::error::LoadError;
use crate::source::DocumentSource;

/// Where the one-time document load currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoadPhase {
    /// Load not yet attempted or still outstanding; the host shows the
    /// loading presentation
    Pending,

    /// Page count known, viewer operational
    Loaded,

    /// Last attempt failed; the host shows the failure presentation
    Failed,
}

/// Coordinates the one-time page-count load for a document instance.
pub struct LoadCoordinator {
    descriptor: String,
    phase: LoadPhase,
    handle: Option<DocumentHandle>,
}

impl LoadCoordinator {
    /// Create a coordinator for the given source descriptor.
    ///
    /// The caller guarantees a non-empty descriptor before invoking `load`.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            phase: LoadPhase::Pending,
            handle: None,
        }
    }

    /// Load the page count from the source.
    ///
    /// Exactly-once semantics: after a success the cached count is returned
    /// without consulting the source again. After a failure the call may be
    /// repeated safely; there is no automatic retry.
    pub fn load<S: DocumentSource>(&mut self, source: &S) -> Result<u16, LoadError> {
        if let Some(handle) = &self.handle {
            return Ok(handle.page_count());
        }

        match source.fetch_page_count() {
            Ok(0) => {
                let err = LoadError::Malformed("document reports zero pages".to_string());
                log::error!("failed to load {}: {}", self.descriptor, err);
                self.phase = LoadPhase::Failed;
                Err(err)
            }
            Ok(count) => {
                self.handle = Some(DocumentHandle::new(self.descriptor.clone(), count));
                self.phase = LoadPhase::Loaded;
                Ok(count)
            }
            Err(err) => {
                log::error!("failed to load {}: {}", self.descriptor, err);
                self.phase = LoadPhase::Failed;
                Err(err)
            }
        }
    }

    /// Current load phase
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Handle to the loaded document, if the load has succeeded
    pub fn handle(&self) -> Option<&DocumentHandle> {
        self.handle.as_ref()
    }

    /// Page count of the loaded document, if known
    pub fn page_count(&self) -> Option<u16> {
        self.handle.as_ref().map(DocumentHandle::page_count)
    }

    /// The source descriptor this coordinator was created with
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        result: Result<u16, LoadError>,
        fetches: Cell<u32>,
    }

    impl CountingSource {
        fn new(result: Result<u16, LoadError>) -> Self {
            Self {
                result,
                fetches: Cell::new(0),
            }
        }
    }

    impl DocumentSource for CountingSource {
        type Surface = ();

        fn fetch_page_count(&self) -> Result<u16, LoadError> {
            self.fetches.set(self.fetches.get() + 1);
            self.result.clone()
        }

        fn render_page(&self, _page_index: u16, _scale: f32) -> Result<(), crate::PageRenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_success() {
        let source = CountingSource::new(Ok(12));
        let mut loader = LoadCoordinator::new("guide.pdf");

        assert_eq!(loader.phase(), LoadPhase::Pending);
        assert_eq!(loader.load(&source), Ok(12));
        assert_eq!(loader.phase(), LoadPhase::Loaded);
        assert_eq!(loader.page_count(), Some(12));
    }

    #[test]
    fn test_load_is_idempotent_after_success() {
        let source = CountingSource::new(Ok(7));
        let mut loader = LoadCoordinator::new("guide.pdf");

        assert_eq!(loader.load(&source), Ok(7));
        assert_eq!(loader.load(&source), Ok(7));
        assert_eq!(source.fetches.get(), 1);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let source =
            CountingSource::new(Err(LoadError::Unreachable("timed out".to_string())));
        let mut loader = LoadCoordinator::new("guide.pdf");

        assert!(loader.load(&source).is_err());
        assert_eq!(loader.phase(), LoadPhase::Failed);
        assert_eq!(loader.page_count(), None);
    }

    #[test]
    fn test_retry_after_failure_can_succeed() {
        let bad = CountingSource::new(Err(LoadError::Unreachable("timed out".to_string())));
        let good = CountingSource::new(Ok(4));
        let mut loader = LoadCoordinator::new("guide.pdf");

        assert!(loader.load(&bad).is_err());
        assert_eq!(loader.load(&good), Ok(4));
        assert_eq!(loader.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_zero_pages_is_malformed() {
        let source = CountingSource::new(Ok(0));
        let mut loader = LoadCoordinator::new("guide.pdf");

        match loader.load(&source) {
            Err(LoadError::Malformed(_)) => {}
            other => panic!("expected Malformed error, got {:?}", other),
        }
        assert_eq!(loader.phase(), LoadPhase::Failed);
    }

    #[test]
    fn test_handle_is_immutable_once_loaded() {
        let source = CountingSource::new(Ok(5));
        let mut loader = LoadCoordinator::new("guide.pdf");
        loader.load(&source).unwrap();

        let handle = loader.handle().unwrap();
        assert_eq!(handle.descriptor(), "guide.pdf");
        assert_eq!(handle.page_count(), 5);
    }
}
