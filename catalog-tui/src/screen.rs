//! State of the catalog screen and the user actions that change it.

use std::ops::Range;

use catalog_lib::Error;
use catalog_lib::Product;
use catalog_lib::ProductId;
use log::{debug, error, info};

use crate::selection::SelectionTracker;

/// Outcome of the one catalog fetch.
pub type FetchResult = Result<Vec<Product>, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The fetch has not completed. The whole screen is a spinner.
    Loading,
    /// The fetch completed, successfully or not.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleSelectAll,
    Clear,
    ToggleRow(ProductId),
    /// Toggle the row under the cursor.
    ToggleCursor,
    CursorUp,
    CursorDown,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct CatalogScreen {
    load_state: LoadState,
    products: Vec<Product>,
    selection: SelectionTracker,
    cursor: usize,
    scroll: usize,
    viewport_rows: usize,
    tick: usize,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            load_state: LoadState::Loading,
            products: Vec::new(),
            selection: SelectionTracker::new(),
            cursor: 0,
            scroll: 0,
            viewport_rows: 1,
            tick: 0,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Products in fetch order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Index of the highlighted row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first visible row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Spinner animation tick.
    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Rows that fit on screen, starting at the scroll offset.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll + self.viewport_rows).min(self.products.len());
        self.scroll.min(end)..end
    }

    /// Sets how many rows fit on screen and keeps the cursor visible.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_cursor_visible();
    }

    /// Applies the fetch outcome. Only the first outcome is applied.
    ///
    /// A failure leaves the list empty. Either way loading ends. Returns
    /// whether the outcome was applied.
    pub fn apply_fetch(&mut self, result: FetchResult) -> bool {
        if self.load_state == LoadState::Ready {
            debug!("Ignoring fetch outcome, the catalog is already loaded");
            return false;
        }

        match result {
            Ok(products) => {
                info!("Loaded {} products", products.len());
                self.products = products;
            }
            Err(e) => {
                error!("Failed to load products: {}", e);
                self.products.clear();
            }
        }
        self.load_state = LoadState::Ready;
        self.cursor = 0;
        self.scroll = 0;
        true
    }

    /// Ends loading without a result, leaving the list empty.
    pub fn abandon_fetch(&mut self) {
        if self.load_state == LoadState::Loading {
            error!("Fetch ended without a result");
            self.load_state = LoadState::Ready;
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Control {
        if action == Action::Quit {
            return Control::Quit;
        }
        if self.is_loading() {
            debug!("Ignoring {:?} while loading", action);
            return Control::Continue;
        }

        match action {
            Action::ToggleSelectAll => self.selection.toggle_select_all(&self.products),
            Action::Clear => self.selection.clear(),
            Action::ToggleRow(id) => {
                if let Some(index) = self.products.iter().position(|p| p.id == id) {
                    self.cursor = index;
                    self.ensure_cursor_visible();
                }
                self.selection.toggle(id, &self.products);
            }
            Action::ToggleCursor => {
                if !self.selection.is_engaged() {
                    debug!("No checkboxes shown, ignoring toggle");
                } else if let Some(product) = self.products.get(self.cursor) {
                    self.selection.toggle(product.id, &self.products);
                }
            }
            Action::CursorUp => self.move_cursor(-1),
            Action::CursorDown => self.move_cursor(1),
            Action::PageUp(n) => self.move_cursor(-(n.max(1) as isize)),
            Action::PageDown(n) => self.move_cursor(n.max(1) as isize),
            Action::Home => self.move_cursor(isize::MIN),
            Action::End => self.move_cursor(isize::MAX),
            Action::Quit => return Control::Quit,
        }
        Control::Continue
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(last) = self.products.len().checked_sub(1) else {
            return;
        };
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.viewport_rows {
            self.scroll = self.cursor + 1 - self.viewport_rows;
        }
        let max_scroll = self.products.len().saturating_sub(self.viewport_rows);
        self.scroll = self.scroll.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use catalog_lib::ApiError;
    use rust_decimal::Decimal;

    use super::*;

    fn products(n: i64) -> Vec<Product> {
        (1..=n)
            .map(|id| Product {
                id: ProductId(id),
                title: format!("Product {}", id),
                price: Decimal::new(id, 0),
                description: String::new(),
                category: "misc".to_string(),
                image: String::new(),
                rating: None,
            })
            .collect()
    }

    fn loaded(n: i64) -> CatalogScreen {
        let mut screen = CatalogScreen::new();
        screen.apply_fetch(Ok(products(n)));
        screen
    }

    #[test]
    fn test_starts_loading() {
        let screen = CatalogScreen::new();
        assert!(screen.is_loading());
        assert!(screen.products().is_empty());
    }

    #[test]
    fn test_failed_fetch_ends_loading_with_empty_list() {
        let mut screen = CatalogScreen::new();
        assert!(screen.apply_fetch(Err(Error::Api(ApiError::http(500, "down")))));

        assert_eq!(screen.load_state(), LoadState::Ready);
        assert!(screen.products().is_empty());
    }

    #[test]
    fn test_fetch_is_applied_once() {
        let mut screen = loaded(3);
        assert!(!screen.apply_fetch(Ok(products(5))));
        assert_eq!(screen.products().len(), 3);
    }

    #[test]
    fn test_abandon_fetch_ends_loading() {
        let mut screen = CatalogScreen::new();
        screen.abandon_fetch();
        assert!(!screen.is_loading());
        assert!(screen.products().is_empty());
    }

    #[test]
    fn test_actions_ignored_while_loading() {
        let mut screen = CatalogScreen::new();
        assert_eq!(screen.dispatch(Action::ToggleSelectAll), Control::Continue);
        assert!(!screen.selection().is_engaged());
        assert_eq!(screen.dispatch(Action::Quit), Control::Quit);
    }

    #[test]
    fn test_select_all_counts_every_product() {
        let mut screen = loaded(4);
        screen.dispatch(Action::ToggleSelectAll);
        assert_eq!(screen.selection().len(), 4);
        screen.dispatch(Action::ToggleSelectAll);
        assert_eq!(screen.selection().len(), 0);
    }

    #[test]
    fn test_toggle_cursor_requires_selection_mode() {
        let mut screen = loaded(3);
        screen.dispatch(Action::ToggleCursor);
        assert!(screen.selection().is_empty());

        screen.dispatch(Action::ToggleSelectAll);
        screen.dispatch(Action::CursorDown);
        screen.dispatch(Action::ToggleCursor);
        assert_eq!(screen.selection().selected(), vec![ProductId(1), ProductId(3)]);
    }

    #[test]
    fn test_toggle_row_moves_cursor() {
        let mut screen = loaded(3);
        screen.dispatch(Action::ToggleRow(ProductId(3)));
        assert_eq!(screen.cursor(), 2);
        assert!(screen.selection().is_selected(ProductId(3)));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut screen = loaded(3);
        screen.dispatch(Action::CursorUp);
        assert_eq!(screen.cursor(), 0);
        screen.dispatch(Action::PageDown(10));
        assert_eq!(screen.cursor(), 2);
        screen.dispatch(Action::Home);
        assert_eq!(screen.cursor(), 0);
        screen.dispatch(Action::End);
        assert_eq!(screen.cursor(), 2);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut screen = loaded(10);
        screen.set_viewport_rows(3);

        for _ in 0..4 {
            screen.dispatch(Action::CursorDown);
        }
        assert_eq!(screen.cursor(), 4);
        assert_eq!(screen.scroll(), 2);
        assert_eq!(screen.visible_range(), 2..5);

        screen.dispatch(Action::End);
        assert_eq!(screen.scroll(), 7);
        assert_eq!(screen.visible_range(), 7..10);

        screen.dispatch(Action::PageUp(3));
        assert_eq!(screen.cursor(), 6);
        assert_eq!(screen.scroll(), 6);
    }

    #[test]
    fn test_growing_viewport_pulls_scroll_back() {
        let mut screen = loaded(5);
        screen.set_viewport_rows(2);
        screen.dispatch(Action::End);
        assert_eq!(screen.scroll(), 3);

        screen.set_viewport_rows(10);
        assert_eq!(screen.scroll(), 0);
        assert_eq!(screen.visible_range(), 0..5);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut screen = CatalogScreen::new();
        screen.apply_fetch(Ok(Vec::new()));
        screen.dispatch(Action::End);
        screen.dispatch(Action::ToggleSelectAll);
        assert_eq!(screen.cursor(), 0);
        assert!(screen.selection().is_engaged());
        assert_eq!(screen.visible_range(), 0..0);
    }
}
