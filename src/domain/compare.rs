use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::ProductId;

/// Products selected for side-by-side comparison.
///
/// Holds at most [`ComparedSet::CAPACITY`] ids in selection order. Once full,
/// further additions are ignored rather than evicting earlier picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparedSet(Vec<ProductId>);

impl ComparedSet {
    pub const CAPACITY: usize = 3;

    /// Rebuilds a set from stored ids, dropping duplicates and overflow.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut set = Self::default();
        for id in ids {
            set.add(id);
        }
        set
    }

    /// Adds `id`; returns `false` when it was already present or the set is full.
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.0.contains(&id) || self.is_full() {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.0.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= Self::CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.0
    }

    /// Selected products in selection order; ids missing from `products` are skipped.
    pub fn resolve(&self, products: &[Product]) -> Vec<Product> {
        self.0
            .iter()
            .filter_map(|id| products.iter().find(|product| &product.id == id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::product;

    fn id(value: &str) -> ProductId {
        ProductId::new(value).unwrap()
    }

    #[test]
    fn additions_beyond_capacity_are_dropped() {
        let mut set = ComparedSet::default();
        assert!(set.add(id("a")));
        assert!(set.add(id("b")));
        assert!(set.add(id("c")));
        assert!(!set.add(id("d")));

        assert_eq!(set.ids(), &[id("a"), id("b"), id("c")]);
        assert!(!set.contains(&id("d")));
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut set = ComparedSet::default();
        set.add(id("a"));
        assert!(!set.add(id("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_frees_a_slot() {
        let mut set = ComparedSet::from_ids([id("a"), id("b"), id("c"), id("d")]);
        assert_eq!(set.len(), 3);
        assert!(set.remove(&id("b")));
        assert!(set.add(id("d")));
        assert_eq!(set.ids(), &[id("a"), id("c"), id("d")]);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn resolve_keeps_selection_order_and_skips_unknown_ids() {
        let products = vec![product("a", "A", "Gear", 1.0), product("b", "B", "Gear", 2.0)];
        let set = ComparedSet::from_ids([id("b"), id("missing"), id("a")]);

        let resolved: Vec<_> = set
            .resolve(&products)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(resolved, ["b", "a"]);
    }
}
