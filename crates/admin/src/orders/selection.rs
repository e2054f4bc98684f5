//! Multi-select state for the order list.

use std::collections::BTreeSet;

use order_desk_core::OrderId;

/// Ids of the rows marked for a bulk action.
///
/// Members must be on the currently loaded page; the list state calls
/// [`SelectionSet::retain`] after every page commit to keep it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<OrderId>,
}

impl SelectionSet {
    /// An empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    /// Flip membership of `id`.
    pub fn toggle(&mut self, id: OrderId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select every visible row, or clear if exactly those rows are selected.
    ///
    /// Select-all is all-or-nothing: a partial selection becomes the full
    /// visible set rather than growing by the missing rows.
    pub fn toggle_all(&mut self, visible: &[OrderId]) {
        let visible: BTreeSet<OrderId> = visible.iter().copied().collect();

        if !visible.is_empty() && self.ids == visible {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop members that are not in `visible`.
    pub fn retain(&mut self, visible: &[OrderId]) {
        self.ids.retain(|id| visible.contains(id));
    }

    #[must_use]
    pub fn is_selected(&self, id: OrderId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether every id in `visible` is selected (false for no rows).
    #[must_use]
    pub fn covers(&self, visible: &[OrderId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members in ascending id order.
    #[must_use]
    pub fn ids(&self) -> Vec<OrderId> {
        self.ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(raw: &[i64]) -> Vec<OrderId> {
        raw.iter().copied().map(OrderId::new).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionSet::new();

        selection.toggle(OrderId::new(3));
        assert!(selection.is_selected(OrderId::new(3)));

        selection.toggle(OrderId::new(3));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let visible = ids(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let mut selection = SelectionSet::new();
        for id in ids(&[2, 5, 9]) {
            selection.toggle(id);
        }

        selection.toggle_all(&visible);

        assert_eq!(selection.size(), 10);
        assert_eq!(selection.ids(), visible);
    }

    #[test]
    fn test_toggle_all_clears_full_selection() {
        let visible = ids(&[4, 8]);
        let mut selection = SelectionSet::new();
        selection.toggle_all(&visible);
        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_with_no_rows_is_empty() {
        let mut selection = SelectionSet::new();
        selection.toggle(OrderId::new(1));

        selection.toggle_all(&[]);
        assert!(selection.is_empty());

        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain_drops_rows_no_longer_visible() {
        let mut selection = SelectionSet::new();
        selection.toggle_all(&ids(&[3, 7, 9]));

        selection.retain(&ids(&[1, 2, 3, 9]));

        assert_eq!(selection.ids(), ids(&[3, 9]));
    }

    #[test]
    fn test_ids_are_sorted() {
        let mut selection = SelectionSet::new();
        for id in ids(&[7, 3, 5]) {
            selection.toggle(id);
        }
        assert_eq!(selection.ids(), ids(&[3, 5, 7]));
    }

    proptest! {
        #[test]
        fn prop_toggle_all_twice_from_empty_is_empty(
            visible in prop::collection::vec(any::<i64>(), 0..30)
        ) {
            let visible: Vec<OrderId> = visible.into_iter().map(OrderId::new).collect();
            let mut selection = SelectionSet::new();

            selection.toggle_all(&visible);
            selection.toggle_all(&visible);

            prop_assert!(selection.is_empty());
        }

        #[test]
        fn prop_retain_leaves_a_subset(
            selected in prop::collection::vec(0i64..50, 0..30),
            visible in prop::collection::vec(0i64..50, 0..30),
        ) {
            let visible: Vec<OrderId> = visible.into_iter().map(OrderId::new).collect();
            let mut selection = SelectionSet::new();
            for id in selected {
                selection.toggle(OrderId::new(id));
            }

            selection.retain(&visible);

            prop_assert!(selection.ids().iter().all(|id| visible.contains(id)));
        }
    }
}
