//! Grid selection state with per-category capacity limits.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::{Category, GameKind, GridRules};

/// Chosen primary and secondary numbers for one grid.
///
/// Both sets are bounded by the variant's [`GridRules`]; toggling never
/// duplicates a value and never grows a full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    rules: GridRules,
    primary: BTreeSet<u8>,
    secondary: BTreeSet<u8>,
}

/// Sorted value copy of a selection, used to tag requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

impl SelectionState {
    #[must_use]
    pub const fn new(rules: GridRules) -> Self {
        Self {
            rules,
            primary: BTreeSet::new(),
            secondary: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn for_game(kind: GameKind) -> Self {
        Self::new(kind.rules())
    }

    #[must_use]
    pub const fn rules(&self) -> GridRules {
        self.rules
    }

    #[must_use]
    pub const fn primary(&self) -> &BTreeSet<u8> {
        &self.primary
    }

    #[must_use]
    pub const fn secondary(&self) -> &BTreeSet<u8> {
        &self.secondary
    }

    const fn set(&self, category: Category) -> &BTreeSet<u8> {
        match category {
            Category::Primary => &self.primary,
            Category::Secondary => &self.secondary,
        }
    }

    /// Toggle `n` in `category` and return its new membership.
    ///
    /// A present value is always removed. An absent value is added only while
    /// the category is below its maximum; otherwise the call is a no-op.
    pub fn toggle(&mut self, category: Category, n: u8) -> bool {
        debug_assert!(
            self.rules.accepts(category, n),
            "{n} is outside the {category:?} domain"
        );
        let max = self.rules.max(category);
        let set = match category {
            Category::Primary => &mut self.primary,
            Category::Secondary => &mut self.secondary,
        };
        if set.remove(&n) {
            return false;
        }
        if set.len() < max {
            set.insert(n);
            true
        } else {
            false
        }
    }

    pub fn toggle_primary(&mut self, n: u8) -> bool {
        self.toggle(Category::Primary, n)
    }

    pub fn toggle_secondary(&mut self, n: u8) -> bool {
        self.toggle(Category::Secondary, n)
    }

    #[must_use]
    pub fn is_selected(&self, category: Category, n: u8) -> bool {
        self.set(category).contains(&n)
    }

    #[must_use]
    pub fn is_full(&self, category: Category) -> bool {
        self.set(category).len() >= self.rules.max(category)
    }

    /// Unselected controls are disabled while their category is full.
    #[must_use]
    pub fn is_disabled(&self, category: Category, n: u8) -> bool {
        self.is_full(category) && !self.is_selected(category, n)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.primary.len() == self.rules.primary_max
            && self.secondary.len() == self.rules.secondary_max
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.set(category).len()
    }

    pub fn reset(&mut self) {
        self.primary.clear();
        self.secondary.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            primary: self.primary.iter().copied().collect(),
            secondary: self.secondary.iter().copied().collect(),
        }
    }
}
