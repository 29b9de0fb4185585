//! Page strip logic for data tables.
//!
//! [`PaginationView`] turns a page position into the buttons a table footer
//! shows: a window of at most [`MAX_VISIBLE_PAGES`] numbered pages around
//! the current one, the first and last page when the window does not reach
//! them, and an ellipsis wherever pages are skipped.
//!
//! ```
//! use judge_console::pagination::PaginationView;
//!
//! let view = PaginationView::new(6, 20, true, true);
//! assert_eq!(view.to_string(), "‹ 1 … 4 5 [6] 7 8 … 20 ›");
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use judge_console_core::{ConnectionId, Property, Signal};
use judge_console_net::PageMeta;

use crate::list::{ListController, ListSource};

/// Maximum number of numbered buttons in the window around the current page.
///
/// The first and last page anchors are not counted, so a strip can show up
/// to two more numbered buttons than this.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// One element of the page strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Display state of a pagination footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationView {
    page: u32,
    total_pages: u32,
    has_next_page: bool,
    has_previous_page: bool,
    meta: Option<PageMeta>,
}

impl PaginationView {
    /// A view built from bare page numbers. Hidden when there is at most one
    /// page.
    pub fn new(page: u32, total_pages: u32, has_next_page: bool, has_previous_page: bool) -> Self {
        Self {
            page,
            total_pages,
            has_next_page,
            has_previous_page,
            meta: None,
        }
    }

    /// A view built from a full response meta. Always visible, so the summary
    /// and page-size selector stay on screen for short lists.
    pub fn from_meta(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            total_pages: meta.total_pages,
            has_next_page: meta.has_next_page,
            has_previous_page: meta.has_previous_page,
            meta: Some(meta),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.meta.is_some() || self.total_pages > 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.has_previous_page
    }

    pub fn can_go_next(&self) -> bool {
        self.has_next_page
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.can_go_previous().then(|| self.page.saturating_sub(1).max(1))
    }

    pub fn next_page(&self) -> Option<u32> {
        self.can_go_next().then(|| self.page.saturating_add(1))
    }

    /// The numbered pages shown around the current one, or `None` when there
    /// are no pages.
    pub fn window(&self) -> Option<(u32, u32)> {
        if self.total_pages == 0 {
            return None;
        }
        let current = self.page.clamp(1, self.total_pages);
        let span = MAX_VISIBLE_PAGES - 1;

        let start = current.saturating_sub(span / 2).max(1);
        let end = (start + span).min(self.total_pages);
        let start = end.saturating_sub(span).max(1);
        Some((start, end))
    }

    /// The full strip, empty when the view is hidden.
    pub fn items(&self) -> Vec<PageItem> {
        let Some((start, end)) = self.window().filter(|_| self.is_visible()) else {
            return Vec::new();
        };
        let page_item = |number: u32| PageItem::Page {
            number,
            current: number == self.page,
        };

        let mut items = Vec::with_capacity(MAX_VISIBLE_PAGES as usize + 4);
        if start > 1 {
            items.push(page_item(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(page_item));
        if end < self.total_pages {
            if end + 1 < self.total_pages {
                items.push(PageItem::Ellipsis);
            }
            items.push(page_item(self.total_pages));
        }
        items
    }

    /// "Showing 11–20 of 57", when built from a meta.
    pub fn summary(&self) -> Option<String> {
        let meta = self.meta.as_ref()?;
        Some(match meta.item_range() {
            Some((first, last)) => format!("Showing {first}–{last} of {}", meta.total),
            None => "No results".to_string(),
        })
    }

    /// Page sizes for the selector, including the current one if it is not a
    /// standard option.
    pub fn page_size_options(&self) -> Vec<u32> {
        let mut options = PAGE_SIZE_OPTIONS.to_vec();
        if let Some(limit) = self.meta.map(|meta| meta.limit)
            && !options.contains(&limit)
        {
            options.push(limit);
            options.sort_unstable();
        }
        options
    }
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_visible() {
            return Ok(());
        }
        f.write_str("‹")?;
        for item in self.items() {
            match item {
                PageItem::Page {
                    number,
                    current: true,
                } => write!(f, " [{number}]")?,
                PageItem::Page { number, .. } => write!(f, " {number}")?,
                PageItem::Ellipsis => f.write_str(" …")?,
            }
        }
        f.write_str(" ›")
    }
}

/// Interactive pagination footer.
///
/// Clicking a button emits [`page_requested`](Self::page_requested); nothing
/// changes locally until a new view arrives from the list.
pub struct Paginator {
    view: Property<PaginationView>,
    view_changed: Signal<PaginationView>,
    page_requested: Signal<u32>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginationView::new(1, 0, false, false))
    }
}

impl Paginator {
    pub fn new(view: PaginationView) -> Self {
        Self {
            view: Property::new(view),
            view_changed: Signal::new(),
            page_requested: Signal::new(),
        }
    }

    pub fn view(&self) -> PaginationView {
        self.view.get()
    }

    /// Replace the displayed view. Returns `true` if it changed.
    pub fn set_view(&self, view: PaginationView) -> bool {
        let changed = self.view.set(view.clone());
        if changed {
            self.view_changed.emit(view);
        }
        changed
    }

    pub fn view_changed(&self) -> &Signal<PaginationView> {
        &self.view_changed
    }

    pub fn page_requested(&self) -> &Signal<u32> {
        &self.page_requested
    }

    /// Request `page` if it exists and is not the current one.
    pub fn go_to(&self, page: u32) -> bool {
        let view = self.view.get();
        if page == 0 || page > view.total_pages || page == view.page {
            return false;
        }
        self.page_requested.emit(page);
        true
    }

    /// Handle a click on a strip element. Ellipses are inert.
    pub fn select(&self, item: PageItem) -> bool {
        match item {
            PageItem::Page { number, .. } => self.go_to(number),
            PageItem::Ellipsis => false,
        }
    }

    pub fn next(&self) -> bool {
        match self.view.get().next_page() {
            Some(page) => {
                self.page_requested.emit(page);
                true
            }
            None => false,
        }
    }

    pub fn previous(&self) -> bool {
        match self.view.get().previous_page() {
            Some(page) => {
                self.page_requested.emit(page);
                true
            }
            None => false,
        }
    }

    /// Wire this footer to a list: page clicks go to the controller, and the
    /// view follows the controller's page meta.
    ///
    /// Returns the connection ids on `page_requested` and on the controller's
    /// `state_changed`.
    pub fn bind<S: ListSource>(
        self: &Arc<Self>,
        controller: &ListController<S>,
    ) -> (ConnectionId, ConnectionId) {
        if let Some(meta) = controller.meta() {
            self.set_view(PaginationView::from_meta(meta));
        }

        let target = controller.clone();
        let to_controller = self.page_requested.connect(move |&page| target.set_page(page));

        let paginator: Weak<Self> = Arc::downgrade(self);
        let from_controller = controller.state_changed().connect(move |state| {
            if let (Some(paginator), Some(meta)) = (paginator.upgrade(), state.meta) {
                paginator.set_view(PaginationView::from_meta(meta));
            }
        });

        (to_controller, from_controller)
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("view", &self.view.get())
            .finish()
    }
}
