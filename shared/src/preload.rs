//! Warm-up of every page image after an upload.

use crate::page_path;
use crate::view::ViewState;

/// The first page is revealed as soon as its own image arrives.
pub const REVEAL_PAGE: u32 = 1;

/// Page images requested once per upload so later navigation is served from
/// the browser cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Warmup {
    generation: u64,
    total_pages: u32,
}

impl Warmup {
    pub fn for_view(view: &ViewState) -> Self {
        Self {
            generation: view.generation(),
            total_pages: view.total_pages(),
        }
    }

    /// Pages with their plain, cacheable URLs, in page order.
    pub fn requests(&self) -> impl Iterator<Item = (u32, String)> {
        (1..=self.total_pages).map(|page| (page, page_path(page)))
    }

    /// Whether the arrival of `page` should reveal the document. Only page 1
    /// counts, and only while its upload is still the current one.
    pub fn reveals(&self, page: u32, view: &ViewState) -> bool {
        page == REVEAL_PAGE
            && self.total_pages >= REVEAL_PAGE
            && view.has_document()
            && view.generation() == self.generation
    }
}
