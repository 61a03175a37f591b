//! Minimal change set for a book's `book_tags` rows

use std::collections::HashSet;

/// Tag ids to insert and delete so that `current` becomes `desired`.
///
/// Ids present in both sets appear in neither list. Both lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub to_add: Vec<i32>,
    pub to_remove: Vec<i32>,
}

impl TagDiff {
    pub fn between(current: &HashSet<i32>, desired: &HashSet<i32>) -> Self {
        let mut to_add: Vec<i32> = desired.difference(current).copied().collect();
        let mut to_remove: Vec<i32> = current.difference(desired).copied().collect();
        to_add.sort_unstable();
        to_remove.sort_unstable();
        Self { to_add, to_remove }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
