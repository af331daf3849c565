//! Document handle and slot arithmetic
//!
//! The flipbook presents `total_pages + 1` slots: a synthetic title slot at
//! index 0 followed by one slot per document page.

use flipbook_cache::SlotIndex;

/// The synthetic title slot at the front of the flipbook
pub const TITLE_SLOT: SlotIndex = 0;

/// Number of slots presented for a document with `total_pages` pages
pub fn slot_count(total_pages: u16) -> u16 {
    total_pages.saturating_add(1)
}

/// Document page index backing a slot, or `None` for the title slot
pub fn page_for_slot(slot: SlotIndex) -> Option<u16> {
    slot.checked_sub(1)
}

/// Slot presenting a given document page
pub fn slot_for_page(page: u16) -> SlotIndex {
    page.saturating_add(1)
}

/// Reference to the source document being viewed.
///
/// Holds the opaque source descriptor (a URL, path, or similar) together
/// with the externally-reported page count. Immutable once loaded; torn
/// down with the viewer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentHandle {
    descriptor: String,
    page_count: u16,
}

impl DocumentHandle {
    /// Create a handle for a loaded document
    pub fn new(descriptor: impl Into<String>, page_count: u16) -> Self {
        Self {
            descriptor: descriptor.into(),
            page_count,
        }
    }

    /// The opaque source descriptor
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Number of document pages (excludes the title slot)
    pub fn page_count(&self) -> u16 {
        self.page_count
    }

    /// Index of the last slot, i.e. the final document page
    pub fn last_slot(&self) -> SlotIndex {
        self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count_includes_title() {
        assert_eq!(slot_count(10), 11);
        assert_eq!(slot_count(1), 2);
    }

    #[test]
    fn test_title_slot_has_no_page() {
        assert_eq!(page_for_slot(TITLE_SLOT), None);
    }

    #[test]
    fn test_slot_page_mapping_round_trips() {
        assert_eq!(page_for_slot(slot_for_page(0)), Some(0));
        assert_eq!(page_for_slot(slot_for_page(9)), Some(9));
        assert_eq!(slot_for_page(0), 1);
    }

    #[test]
    fn test_handle_accessors() {
        let handle = DocumentHandle::new("https://example.com/guide.pdf", 12);

        assert_eq!(handle.descriptor(), "https://example.com/guide.pdf");
        assert_eq!(handle.page_count(), 12);
        assert_eq!(handle.last_slot(), 12);
    }
}
