//! Multi-select state for the product list.
//!
//! Two independent pieces of state: the set of selected ids and whether
//! selection mode (checkboxes) is engaged. "Clear" empties the set but keeps
//! selection mode on, so checkboxes can be visible with nothing checked.

use std::collections::BTreeSet;

use catalog_lib::Product;
use catalog_lib::ProductId;
use log::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    engaged: bool,
    selected: BTreeSet<ProductId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Ids not among `loaded` are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, id: ProductId, loaded: &[Product]) -> bool {
        if !loaded.iter().any(|p| p.id == id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.log_selection();
        true
    }

    /// Selects every loaded product and engages selection mode.
    pub fn select_all(&mut self, loaded: &[Product]) {
        self.selected = loaded.iter().map(|p| p.id).collect();
        self.engaged = true;
        self.log_selection();
    }

    /// Empties the selection and disengages selection mode.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.engaged = false;
        self.log_selection();
    }

    /// The "Select All"/"Deselect All" button.
    pub fn toggle_select_all(&mut self, loaded: &[Product]) {
        if self.engaged {
            self.deselect_all();
        } else {
            self.select_all(loaded);
        }
    }

    /// Empties the selection. Selection mode is left as it is.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.log_selection();
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn selected(&self) -> Vec<ProductId> {
        self.selected.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checkbox state for a row: `None` when no checkbox is shown.
    ///
    /// Selected ids are kept while selection mode is off, they are just not
    /// visible.
    pub fn checkbox(&self, id: ProductId) -> Option<bool> {
        self.engaged.then(|| self.is_selected(id))
    }

    fn log_selection(&self) {
        let ids: Vec<i64> = self.selected.iter().map(|id| id.value()).collect();
        info!("Selected product IDs: {:?}", ids);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use super::*;

    fn products(ids: &[i64]) -> Vec<Product> {
        ids.iter()
            .map(|&id| Product {
                id: ProductId(id),
                title: format!("Product {}", id),
                price: Decimal::new(id * 100, 2),
                description: String::new(),
                category: "misc".to_string(),
                image: format!("https://example.com/{}.png", id),
                rating: None,
            })
            .collect()
    }

    #[test]
    fn test_toggle_parity() {
        let loaded = products(&[1, 2, 3, 4, 5]);
        let sequence = [1, 2, 3, 2, 5, 1, 1, 4, 4, 4, 3];
        let mut tracker = SelectionTracker::new();
        let mut counts: HashMap<i64, usize> = HashMap::new();

        for id in sequence {
            assert!(tracker.toggle(ProductId(id), &loaded));
            *counts.entry(id).or_default() += 1;
        }

        let mut odd: Vec<_> = counts
            .into_iter()
            .filter(|(_, n)| n % 2 == 1)
            .map(|(id, _)| ProductId(id))
            .collect();
        odd.sort();
        assert_eq!(tracker.selected(), odd);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let loaded = products(&[1, 2]);
        let mut tracker = SelectionTracker::new();

        assert!(!tracker.toggle(ProductId(99), &loaded));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_select_all_then_deselect_all_round_trip() {
        let loaded = products(&[1, 2, 3]);
        let mut tracker = SelectionTracker::new();
        let before = tracker.clone();

        tracker.select_all(&loaded);
        assert_eq!(tracker.len(), 3);
        assert!(tracker.is_engaged());

        tracker.deselect_all();
        assert_eq!(tracker, before);
        assert!(!tracker.is_engaged());
        assert_eq!(tracker.len(), 0);
    }

    #[test]
    fn test_clear_keeps_flag() {
        let loaded = products(&[1, 2, 3]);

        let mut engaged = SelectionTracker::new();
        engaged.select_all(&loaded);
        engaged.clear();
        assert!(engaged.is_empty());
        assert!(engaged.is_engaged());

        let mut idle = SelectionTracker::new();
        idle.toggle(ProductId(2), &loaded);
        idle.clear();
        assert!(idle.is_empty());
        assert!(!idle.is_engaged());
    }

    #[test]
    fn test_toggle_select_all_alternates() {
        let loaded = products(&[4, 5]);
        let mut tracker = SelectionTracker::new();

        tracker.toggle_select_all(&loaded);
        assert_eq!(tracker.selected(), vec![ProductId(4), ProductId(5)]);

        tracker.toggle_select_all(&loaded);
        assert!(tracker.is_empty());
        assert!(!tracker.is_engaged());
    }

    #[test]
    fn test_checkbox_hidden_until_engaged() {
        let loaded = products(&[1, 2]);
        let mut tracker = SelectionTracker::new();
        tracker.toggle(ProductId(1), &loaded);

        // Selected but invisible.
        assert!(tracker.is_selected(ProductId(1)));
        assert_eq!(tracker.checkbox(ProductId(1)), None);

        tracker.select_all(&loaded);
        tracker.toggle(ProductId(2), &loaded);
        assert_eq!(tracker.checkbox(ProductId(1)), Some(true));
        assert_eq!(tracker.checkbox(ProductId(2)), Some(false));
    }

    #[test]
    fn test_membership_ignores_list_order() {
        let forward = products(&[1, 2, 3]);
        let mut reversed = forward.clone();
        reversed.reverse();

        let mut a = SelectionTracker::new();
        a.select_all(&forward);
        let mut b = SelectionTracker::new();
        b.select_all(&reversed);

        assert_eq!(a, b);
    }
}
