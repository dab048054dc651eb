//! Local collection state and filtering
//!
//! The store holds the authoritative local copy of the todo collection plus
//! the current filter criteria, and keeps the derived visible subset in sync
//! with both. It knows nothing about rendering or the network: the gateway
//! refresh path replaces its contents, user interaction swaps its filter.

use crate::model::{Category, Priority, TodoId, TodoItem};

/// User-selected constraints narrowing the visible subset of todos
///
/// An absent field places no constraint on that dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl FilterCriteria {
    /// A filter constraining only the category
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            priority: None,
        }
    }

    /// A filter constraining only the priority
    pub fn priority(priority: Priority) -> Self {
        Self {
            category: None,
            priority: Some(priority),
        }
    }

    /// Whether the filter places no constraint at all
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.priority.is_none()
    }

    /// Whether `item` satisfies every set constraint
    pub fn matches(&self, item: &TodoItem) -> bool {
        let category_ok = self.category.map_or(true, |c| item.category == c);
        let priority_ok = self.priority.map_or(true, |p| item.priority == p);
        category_ok && priority_ok
    }
}

/// Holds the full todo collection, the current filter, and the derived
/// visible subset
///
/// The visible subset is recomputed synchronously inside every mutator, so a
/// caller can never observe a stale subset after an update returns. Item
/// order is whatever the server returned; the store never re-sorts.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    items: Vec<TodoItem>,
    criteria: FilterCriteria,
    visible: Vec<TodoItem>,
}

impl CollectionStore {
    /// Create an empty store with no filter constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection, keeping the current filter
    pub fn replace_all(&mut self, items: Vec<TodoItem>) {
        self.items = items;
        self.recompute();
    }

    /// Swap in new filter criteria
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    /// Drop all filter constraints; afterwards `visible()` equals the
    /// full collection exactly
    pub fn clear_filter(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// The full collection, in server order
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// The current filter criteria
    pub fn filter(&self) -> FilterCriteria {
        self.criteria
    }

    /// The filtered subset, in server order
    pub fn visible(&self) -> &[TodoItem] {
        &self.visible
    }

    /// Look up an item in the full collection by id
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of items in the full collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the full collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        self.visible = self
            .items
            .iter()
            .filter(|item| self.criteria.matches(item))
            .cloned()
            .collect();
    }
}
