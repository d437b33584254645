//! Paging, zoom and rotation state of the viewer.
//!
//! `ViewState` is a plain snapshot. Every change goes through
//! [`ViewState::apply`], so each control maps to exactly one transition and
//! the transitions can be exercised without a browser.

/// Zoom is counted in tenths so the lower guard compares exactly.
const ZOOM_UNIT: f64 = 10.0;
const DEFAULT_ZOOM_TENTHS: u32 = 10;
const MIN_ZOOM_TENTHS: u32 = 2;
const ROTATION_STEP: u16 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// A new upload started; everything from the previous document is void.
    Reset,
    DocumentLoaded { total_pages: u32 },
    NextPage,
    PrevPage,
    /// The `zoom-out` control. Enlarges the page.
    ZoomOutClicked,
    /// The `zoom-in` control. Shrinks the page, but not past 0.2.
    ZoomInClicked,
    Rotate,
    /// A fresh page image was requested.
    PageShown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    current_page: u32,
    total_pages: u32,
    zoom_tenths: u32,
    rotation: u16,
    generation: u64,
}

/// Identifies the page a refresh was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    page: u32,
    loaded: bool,
}

impl RefreshTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            zoom_tenths: DEFAULT_ZOOM_TENTHS,
            rotation: 0,
            generation: 0,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn apply(self, action: ViewAction) -> Self {
        match action {
            ViewAction::Reset => Self {
                generation: self.generation + 1,
                ..Self::default()
            },
            ViewAction::DocumentLoaded { total_pages } => Self {
                current_page: 1,
                total_pages,
                ..self
            },
            ViewAction::NextPage => {
                if self.total_pages == 0 || self.current_page >= self.total_pages {
                    return self;
                }
                Self {
                    current_page: self.current_page + 1,
                    ..self
                }
            }
            ViewAction::PrevPage => {
                if self.total_pages == 0 || self.current_page <= 1 {
                    return self;
                }
                Self {
                    current_page: self.current_page - 1,
                    ..self
                }
            }
            ViewAction::ZoomOutClicked => Self {
                zoom_tenths: self.zoom_tenths.saturating_add(1),
                ..self
            },
            ViewAction::ZoomInClicked => {
                if self.zoom_tenths <= MIN_ZOOM_TENTHS {
                    return self;
                }
                Self {
                    zoom_tenths: self.zoom_tenths - 1,
                    ..self
                }
            }
            ViewAction::Rotate => Self {
                rotation: (self.rotation + ROTATION_STEP) % 360,
                ..self
            },
            ViewAction::PageShown => Self {
                rotation: 0,
                ..self
            },
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_document(&self) -> bool {
        self.total_pages > 0
    }

    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_tenths) / ZOOM_UNIT
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ticket_for(&self, page: u32) -> RefreshTicket {
        RefreshTicket {
            generation: self.generation,
            page,
            loaded: self.has_document(),
        }
    }

    /// A refresh is still wanted only for the same loaded document and page.
    /// Tickets taken while an upload is pending never become current.
    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.loaded
            && self.has_document()
            && ticket.generation == self.generation
            && ticket.page == self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total_pages: u32) -> ViewState {
        ViewState::default()
            .apply(ViewAction::Reset)
            .apply(ViewAction::DocumentLoaded { total_pages })
    }

    #[test]
    fn document_loaded_starts_on_first_page() {
        let view = loaded(3);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn paging_is_clamped_to_document() {
        let mut view = loaded(3);
        for _ in 0..5 {
            view = view.apply(ViewAction::NextPage);
        }
        assert_eq!(view.current_page(), 3);
        for _ in 0..5 {
            view = view.apply(ViewAction::PrevPage);
        }
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn paging_without_document_is_noop() {
        let view = ViewState::default();
        assert_eq!(view.apply(ViewAction::NextPage), view);
        assert_eq!(view.apply(ViewAction::PrevPage), view);
    }

    #[test]
    fn rotation_wraps_in_quarter_turns() {
        let mut view = loaded(1);
        let mut seen = Vec::new();
        for _ in 0..6 {
            view = view.apply(ViewAction::Rotate);
            seen.push(view.rotation());
        }
        assert_eq!(seen, vec![90, 180, 270, 0, 90, 180]);
        assert_eq!(view.apply(ViewAction::PageShown).rotation(), 0);
    }

    #[test]
    fn zoom_out_control_always_grows() {
        let mut view = loaded(1);
        for _ in 0..30 {
            view = view.apply(ViewAction::ZoomOutClicked);
        }
        assert_eq!(view.zoom(), 4.0);
    }

    #[test]
    fn zoom_in_control_stops_at_guard() {
        let mut view = loaded(1);
        let mut last = view.zoom();
        for _ in 0..8 {
            view = view.apply(ViewAction::ZoomInClicked);
            assert!(view.zoom() < last);
            last = view.zoom();
        }
        assert_eq!(view.zoom(), 0.2);
        assert_eq!(view.apply(ViewAction::ZoomInClicked).zoom(), 0.2);
    }

    #[test]
    fn reset_clears_view_and_bumps_generation() {
        let view = loaded(4)
            .apply(ViewAction::NextPage)
            .apply(ViewAction::ZoomOutClicked)
            .apply(ViewAction::Rotate);
        let reset = view.apply(ViewAction::Reset);
        assert_eq!(reset.current_page(), 1);
        assert_eq!(reset.total_pages(), 0);
        assert_eq!(reset.zoom(), 1.0);
        assert_eq!(reset.rotation(), 0);
        assert_eq!(reset.generation(), view.generation() + 1);
    }

    #[test]
    fn refresh_ticket_goes_stale_on_navigation_or_new_upload() {
        let view = loaded(3);
        let ticket = view.ticket_for(view.current_page());
        assert!(view.is_current(ticket));
        assert!(view.apply(ViewAction::ZoomOutClicked).is_current(ticket));

        let moved = view.apply(ViewAction::NextPage);
        assert!(!moved.is_current(ticket));
        assert!(moved.apply(ViewAction::PrevPage).is_current(ticket));

        let reloaded = view
            .apply(ViewAction::Reset)
            .apply(ViewAction::DocumentLoaded { total_pages: 3 });
        assert!(!reloaded.is_current(ticket));
    }

    #[test]
    fn refresh_during_pending_upload_is_never_current() {
        let pending = loaded(3).apply(ViewAction::Reset);
        let ticket = pending.ticket_for(1);
        assert!(!pending.has_document());
        assert!(!pending.is_current(ticket));

        let arrived = pending.apply(ViewAction::DocumentLoaded { total_pages: 3 });
        assert!(!arrived.is_current(ticket));
        assert!(arrived.is_current(arrived.ticket_for(1)));
    }
}
