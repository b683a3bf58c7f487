//! In-memory item storage for a single table.
//!
//! Items live in one [`BTreeMap`] keyed by [`PrimaryKey`], so iteration walks
//! items in key order: partition key first, then sort key, each compared per
//! its declared scalar type. Mutation goes through `&mut self`; the table
//! registry's lock serializes access.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::debug;

use crate::schema::PrimaryKey;
use crate::value::Item;

/// Ordered item storage for one table.
#[derive(Debug, Default)]
pub struct TableStorage {
    items: BTreeMap<PrimaryKey, Item>,
}

impl TableStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the item with the given key.
    #[must_use]
    pub fn get(&self, key: &PrimaryKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Insert or replace the item at the given key, returning the previous
    /// item if one was stored.
    pub fn upsert(&mut self, key: PrimaryKey, item: Item) -> Option<Item> {
        let previous = self.items.insert(key, item);
        if previous.is_some() {
            debug!(len = self.items.len(), "replaced existing item");
        } else {
            debug!(len = self.items.len(), "inserted new item");
        }
        previous
    }

    /// Remove the item with the given key, returning it if it was stored.
    pub fn delete(&mut self, key: &PrimaryKey) -> Option<Item> {
        let removed = self.items.remove(key);
        if removed.is_some() {
            debug!(len = self.items.len(), "deleted item");
        }
        removed
    }

    /// Iterate items in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PrimaryKey, &Item)> {
        self.items.iter()
    }

    /// Iterate items in key order, starting strictly after the given key.
    pub fn iter_after<'a>(
        &'a self,
        key: &PrimaryKey,
    ) -> impl Iterator<Item = (&'a PrimaryKey, &'a Item)> {
        self.items
            .range((Bound::Excluded(key.clone()), Bound::Unbounded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeyValue;
    use crate::value::{AttributeValue, parse_number};
    use std::collections::HashMap;

    fn key(partition: &str, sort: &str) -> PrimaryKey {
        PrimaryKey {
            partition: KeyValue::S(partition.to_owned()),
            sort: Some(KeyValue::N {
                number: parse_number(sort).unwrap(),
                text: sort.to_owned(),
            }),
        }
    }

    fn item(id: &str) -> Item {
        let mut m = HashMap::new();
        m.insert("id".to_owned(), AttributeValue::S(id.to_owned()));
        m
    }

    #[test]
    fn test_should_return_previous_item_on_replace() {
        let mut storage = TableStorage::new();
        assert!(storage.upsert(key("a", "1"), item("first")).is_none());

        let previous = storage.upsert(key("a", "1"), item("second")).unwrap();
        assert_eq!(
            previous.get("id"),
            Some(&AttributeValue::S("first".to_owned()))
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_should_delete_and_return_item() {
        let mut storage = TableStorage::new();
        storage.upsert(key("a", "1"), item("only"));

        let removed = storage.delete(&key("a", "1")).unwrap();
        assert_eq!(
            removed.get("id"),
            Some(&AttributeValue::S("only".to_owned()))
        );
        assert!(storage.is_empty());
        assert!(storage.delete(&key("a", "1")).is_none());
    }

    #[test]
    fn test_should_iterate_in_numeric_sort_key_order() {
        let mut storage = TableStorage::new();
        storage.upsert(key("a", "10"), item("ten"));
        storage.upsert(key("a", "2"), item("two"));
        storage.upsert(key("a", "-1"), item("minus"));

        let ids: Vec<_> = storage
            .iter()
            .map(|(_, item)| item.get("id").unwrap().clone())
            .collect();
        assert_eq!(
            ids,
            vec![
                AttributeValue::S("minus".to_owned()),
                AttributeValue::S("two".to_owned()),
                AttributeValue::S("ten".to_owned()),
            ]
        );
    }

    #[test]
    fn test_should_resume_iteration_after_key() {
        let mut storage = TableStorage::new();
        storage.upsert(key("a", "1"), item("one"));
        storage.upsert(key("a", "2"), item("two"));
        storage.upsert(key("b", "1"), item("other"));

        let rest: Vec<_> = storage.iter_after(&key("a", "1")).collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(
            rest[0].1.get("id"),
            Some(&AttributeValue::S("two".to_owned()))
        );
    }
}
