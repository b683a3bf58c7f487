//! Table key schemas and comparable key values.
//!
//! A table's schema names its partition key and optional sort key along with
//! their declared scalar types. Keys extracted from items are converted into
//! [`KeyValue`]s, which order the way the declared type demands: strings and
//! binary byte-wise, numbers by numeric value rather than text.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use bytes::Bytes;
use rust_decimal::Decimal;

use crate::error::ValidationErrors;
use crate::types::ScalarAttributeType;
use crate::value::{AttributeValue, Item, parse_number};

/// A single key attribute: its name and declared scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    /// Attribute name.
    pub name: String,
    /// Declared scalar type (S, N, or B).
    pub attribute_type: ScalarAttributeType,
}

/// The key layout of a table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// The partition (hash) key attribute.
    pub partition_key: KeyAttribute,
    /// The sort (range) key attribute, if the table has one.
    pub sort_key: Option<KeyAttribute>,
    /// Declared type of every attribute named in the table definition,
    /// key attributes included.
    pub attribute_types: BTreeMap<String, ScalarAttributeType>,
}

impl TableSchema {
    /// Create a schema from its key attributes and the full map of declared
    /// attribute types.
    #[must_use]
    pub fn new(
        partition_key: KeyAttribute,
        sort_key: Option<KeyAttribute>,
        attribute_types: BTreeMap<String, ScalarAttributeType>,
    ) -> Self {
        Self {
            partition_key,
            sort_key,
            attribute_types,
        }
    }

    /// Number of key attributes (1 or 2).
    #[must_use]
    pub fn key_count(&self) -> usize {
        if self.sort_key.is_some() { 2 } else { 1 }
    }

    /// Extract the primary key from an attribute map.
    ///
    /// `desc` names the map in error messages ("item" for writes, "key" for
    /// point lookups). Every problem is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if a key attribute is absent, has the wrong
    /// type, is an empty string or binary, or is not interpretable as a number.
    pub fn extract_key(&self, attrs: &Item, desc: &str) -> Result<PrimaryKey, ValidationErrors> {
        let mut errs = ValidationErrors::new();

        let partition = extract_key_value(attrs, &self.partition_key, desc, &mut errs);
        let sort = self
            .sort_key
            .as_ref()
            .map(|key| extract_key_value(attrs, key, desc, &mut errs));

        // Every `None` branch above records an error, so a clean collector
        // guarantees both lookups produced values.
        match partition {
            Some(partition) if errs.is_empty() => Ok(PrimaryKey {
                partition,
                sort: sort.flatten(),
            }),
            _ => Err(errs),
        }
    }

    /// Type-check every item attribute that carries a declared type.
    ///
    /// Key attributes are covered by [`TableSchema::extract_key`] and skipped
    /// here; attributes without a declared type are accepted as-is.
    pub fn check_declared_types(&self, attrs: &Item, errs: &mut ValidationErrors) {
        for (name, declared) in &self.attribute_types {
            if *name == self.partition_key.name
                || self.sort_key.as_ref().is_some_and(|key| key.name == *name)
            {
                continue;
            }
            if let Some(value) = attrs.get(name) {
                check_attribute_type(name, declared, value, errs);
            }
        }
    }
}

/// Check one attribute value against its declared scalar type, recording
/// every problem in `errs`. Returns `true` when the value is usable.
fn check_attribute_type(
    name: &str,
    declared: &ScalarAttributeType,
    value: &AttributeValue,
    errs: &mut ValidationErrors,
) -> bool {
    match (declared, value) {
        (ScalarAttributeType::S, AttributeValue::S(s)) => {
            if s.is_empty() {
                errs.add(format!("{name}: cannot be empty string"));
                false
            } else {
                true
            }
        }
        (ScalarAttributeType::B, AttributeValue::B(b)) => {
            if b.is_empty() {
                errs.add(format!("{name}: cannot be empty binary string"));
                false
            } else {
                true
            }
        }
        (ScalarAttributeType::N, AttributeValue::N(n)) => {
            if parse_number(n).is_err() {
                errs.add(format!("{name}: must be interpretable as a number"));
                false
            } else {
                true
            }
        }
        _ => {
            errs.add(format!(
                "{name}: type mismatch, defined to have type {declared}"
            ));
            false
        }
    }
}

/// Pull one key attribute out of `attrs`, recording every problem in `errs`.
fn extract_key_value(
    attrs: &Item,
    key: &KeyAttribute,
    desc: &str,
    errs: &mut ValidationErrors,
) -> Option<KeyValue> {
    let Some(value) = attrs.get(&key.name) else {
        errs.add(format!("{desc} does not define required key {}", key.name));
        return None;
    };

    if !check_attribute_type(&key.name, &key.attribute_type, value, errs) {
        return None;
    }
    // The check above guarantees the variant matches the declared type and
    // that a number parses.
    match value {
        AttributeValue::S(s) => Some(KeyValue::S(s.clone())),
        AttributeValue::B(b) => Some(KeyValue::B(b.clone())),
        AttributeValue::N(n) => parse_number(n).ok().map(|number| KeyValue::N {
            number,
            text: n.clone(),
        }),
        _ => None,
    }
}

/// A key attribute value with schema-aware ordering.
///
/// Numbers keep both the parsed decimal (for ordering and equality) and the
/// original text (so reads return the value exactly as written).
#[derive(Debug, Clone)]
pub enum KeyValue {
    /// String key, ordered byte-wise.
    S(String),
    /// Number key, ordered by numeric value.
    N {
        /// Parsed numeric value.
        number: Decimal,
        /// Original textual representation.
        text: String,
    },
    /// Binary key, ordered byte-wise.
    B(Bytes),
}

impl KeyValue {
    fn rank(&self) -> u8 {
        match self {
            Self::S(_) => 0,
            Self::N { .. } => 1,
            Self::B(_) => 2,
        }
    }

    /// Convert back into the wire-level attribute value.
    #[must_use]
    pub fn to_attribute_value(&self) -> AttributeValue {
        match self {
            Self::S(s) => AttributeValue::S(s.clone()),
            Self::N { text, .. } => AttributeValue::N(text.clone()),
            Self::B(b) => AttributeValue::B(b.clone()),
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::S(a), Self::S(b)) => a.cmp(b),
            (Self::N { number: a, .. }, Self::N { number: b, .. }) => a.cmp(b),
            (Self::B(a), Self::B(b)) => a.cmp(b),
            // A table's key attribute has a single declared type, so mixed
            // variants only meet across tables; rank keeps the order total.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// The full primary key of an item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrimaryKey {
    /// Partition key value.
    pub partition: KeyValue,
    /// Sort key value, present iff the table schema has a sort key.
    pub sort: Option<KeyValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn schema_with_sort() -> TableSchema {
        let mut types = BTreeMap::new();
        types.insert("pk".to_owned(), ScalarAttributeType::S);
        types.insert("sk".to_owned(), ScalarAttributeType::N);
        types.insert("email".to_owned(), ScalarAttributeType::S);
        TableSchema::new(
            KeyAttribute {
                name: "pk".to_owned(),
                attribute_type: ScalarAttributeType::S,
            },
            Some(KeyAttribute {
                name: "sk".to_owned(),
                attribute_type: ScalarAttributeType::N,
            }),
            types,
        )
    }

    fn num_key(text: &str) -> KeyValue {
        KeyValue::N {
            number: parse_number(text).unwrap(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_should_order_number_keys_numerically() {
        assert!(num_key("2") < num_key("10"));
        assert!(num_key("-1.5") < num_key("0"));
        assert_eq!(num_key("1"), num_key("1.0"));
    }

    #[test]
    fn test_should_order_string_keys_bytewise() {
        assert!(KeyValue::S("apple".to_owned()) < KeyValue::S("banana".to_owned()));
        assert!(KeyValue::S("Z".to_owned()) < KeyValue::S("a".to_owned()));
    }

    #[test]
    fn test_should_extract_composite_key() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("pk".to_owned(), AttributeValue::S("user-1".to_owned()));
        item.insert("sk".to_owned(), AttributeValue::N("42".to_owned()));
        item.insert("extra".to_owned(), AttributeValue::Bool(true));

        let key = schema.extract_key(&item, "item").unwrap();
        assert_eq!(key.partition, KeyValue::S("user-1".to_owned()));
        assert_eq!(key.sort, Some(num_key("42")));
    }

    #[test]
    fn test_should_report_every_key_problem_at_once() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("pk".to_owned(), AttributeValue::S(String::new()));
        item.insert("sk".to_owned(), AttributeValue::S("wrong type".to_owned()));

        let errs = schema.extract_key(&item, "item").unwrap_err();
        assert_eq!(errs.messages().len(), 2);
        assert!(errs.messages()[0].contains("cannot be empty string"));
        assert!(errs.messages()[1].contains("type mismatch"));
    }

    #[test]
    fn test_should_reject_missing_key_attribute() {
        let schema = schema_with_sort();
        let item = HashMap::new();

        let errs = schema.extract_key(&item, "key").unwrap_err();
        assert_eq!(errs.messages().len(), 2);
        assert!(errs.messages()[0].contains("key does not define required key pk"));
    }

    #[test]
    fn test_should_reject_declared_attribute_with_wrong_type() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("email".to_owned(), AttributeValue::N("5".to_owned()));

        let mut errs = ValidationErrors::new();
        schema.check_declared_types(&item, &mut errs);
        assert_eq!(errs.messages().len(), 1);
        assert!(errs.messages()[0].contains("email: type mismatch, defined to have type S"));
    }

    #[test]
    fn test_should_reject_empty_declared_string_attribute() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("email".to_owned(), AttributeValue::S(String::new()));

        let mut errs = ValidationErrors::new();
        schema.check_declared_types(&item, &mut errs);
        assert!(errs.messages()[0].contains("email: cannot be empty string"));
    }

    #[test]
    fn test_should_skip_undeclared_and_absent_attributes() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("note".to_owned(), AttributeValue::Bool(true));
        item.insert("pk".to_owned(), AttributeValue::N("9".to_owned()));

        // Key attributes belong to extract_key; undeclared and absent
        // attributes pass untouched.
        let mut errs = ValidationErrors::new();
        schema.check_declared_types(&item, &mut errs);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_should_reject_unparseable_number_key() {
        let schema = schema_with_sort();
        let mut item = HashMap::new();
        item.insert("pk".to_owned(), AttributeValue::S("user-1".to_owned()));
        item.insert("sk".to_owned(), AttributeValue::N("not-a-number".to_owned()));

        let errs = schema.extract_key(&item, "item").unwrap_err();
        assert!(errs.messages()[0].contains("must be interpretable as a number"));
    }
}
