//! Tag model and the per-book tag set

use std::collections::{btree_map, BTreeMap, HashSet};

use sqlx::FromRow;

/// Tag row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

impl Tag {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Set of tags keyed by tag id.
///
/// Inserting a tag whose id is already present keeps the first entry, so the
/// set never holds two tags with the same id. Iteration is in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeMap<i32, Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a tag with the same id was already present.
    pub fn insert(&mut self, tag: Tag) -> bool {
        match self.0.entry(tag.id) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(tag);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, id: i32) -> bool {
        self.0.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<&Tag> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> HashSet<i32> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.values()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = btree_map::IntoValues<i32, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
