//! The database façade: table registry and the public operations.
//!
//! Tables live in a single [`BTreeMap`] behind one [`RwLock`], keeping table
//! names ordered for `ListTables` pagination and serializing writes. Requests
//! are validated up front with every problem collected into one report; only
//! then is the lock taken and the operation applied.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{DynamoError, ValidationErrors};
use crate::expression::{EvalContext, Expr, parse_condition};
use crate::input::{
    CreateTableInput, DeleteItemInput, DeleteTableInput, DescribeTableInput, GetItemInput,
    ListTablesInput, PutItemInput,
};
use crate::output::{
    CreateTableOutput, DeleteItemOutput, DeleteTableOutput, DescribeTableOutput, GetItemOutput,
    ListTablesOutput, PutItemOutput,
};
use crate::schema::{KeyAttribute, TableSchema};
use crate::storage::TableStorage;
use crate::types::{KeyType, ReturnValue, TableDescription, TableStatus};
use crate::value::{AttributeValue, Item};

/// Maximum `ListTables` page size, and the default when no limit is given.
const MAX_LIST_TABLES_LIMIT: i32 = 100;

/// Attribute names must be shorter than this many characters.
const MAX_ATTRIBUTE_NAME_LEN: usize = 65536;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A single table: its schema, declaration metadata, and item storage.
#[derive(Debug)]
struct Table {
    name: String,
    schema: TableSchema,
    key_schema: Vec<crate::types::KeySchemaElement>,
    attribute_definitions: Vec<crate::types::AttributeDefinition>,
    created_at: DateTime<Utc>,
    storage: TableStorage,
}

impl Table {
    fn description(&self, status: TableStatus) -> TableDescription {
        TableDescription {
            table_name: Some(self.name.clone()),
            table_status: Some(status),
            key_schema: self.key_schema.clone(),
            attribute_definitions: self.attribute_definitions.clone(),
            creation_date_time: Some(self.created_at.timestamp_millis() as f64 / 1000.0),
            item_count: Some(self.storage.len() as i64),
        }
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// An in-memory, single-process database speaking DynamoDB semantics.
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<BTreeMap<String, Table>>,
}

impl Database {
    /// Create an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Table management ---------------------------------------------------

    /// Create a table.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` if the table name, key schema, or
    /// attribute definitions are malformed, and `DynamoError::ResourceInUse`
    /// if a table with the same name exists.
    pub fn create_table(&self, input: CreateTableInput) -> Result<CreateTableOutput, DynamoError> {
        let mut errs = ValidationErrors::new();

        if input.table_name.len() < 3 || input.table_name.len() > 255 {
            errs.add("TableName must be between 3 and 255 characters");
        }

        if input.key_schema.is_empty() || input.key_schema.len() > 2 {
            errs.add("KeySchema must contain 1 or 2 items");
        }
        for (i, elem) in input.key_schema.iter().enumerate().take(2) {
            let expected = if i == 0 { KeyType::Hash } else { KeyType::Range };
            if elem.attribute_name.is_empty() {
                errs.add(format!("KeySchema[{i}] has no AttributeName"));
            }
            if elem.key_type != expected {
                errs.add(format!("KeySchema[{i}] must have type {expected}"));
            }
        }

        if input.attribute_definitions.is_empty() {
            errs.add("AttributeDefinitions is a required field");
        }
        for (i, def) in input.attribute_definitions.iter().enumerate() {
            if def.attribute_name.is_empty() || def.attribute_name.len() > 255 {
                errs.add(format!(
                    "AttributeDefinitions[{i}].AttributeName must be between 1 and 255 characters"
                ));
            }
            if !def.attribute_type.is_valid_key_type() {
                errs.add(format!(
                    "AttributeDefinitions[{i}].AttributeType must be one of [B, N, S]"
                ));
            }
        }

        let mut key_attributes = Vec::new();
        for elem in input.key_schema.iter().take(2) {
            match input
                .attribute_definitions
                .iter()
                .find(|def| def.attribute_name == elem.attribute_name)
            {
                Some(def) => key_attributes.push(KeyAttribute {
                    name: def.attribute_name.clone(),
                    attribute_type: def.attribute_type.clone(),
                }),
                None => errs.add(format!(
                    "{} is missing from AttributeDefinitions",
                    elem.attribute_name
                )),
            }
        }

        errs.into_result()?;

        let mut partition_and_sort = key_attributes.into_iter();
        let Some(partition_key) = partition_and_sort.next() else {
            // Unreachable after validation, but avoid panicking on a bug.
            return Err(DynamoError::validation("KeySchema must contain 1 or 2 items"));
        };
        let attribute_types = input
            .attribute_definitions
            .iter()
            .map(|def| (def.attribute_name.clone(), def.attribute_type.clone()))
            .collect();
        let schema = TableSchema::new(partition_key, partition_and_sort.next(), attribute_types);

        let mut tables = self.tables.write();
        if tables.contains_key(&input.table_name) {
            return Err(DynamoError::ResourceInUse {
                name: input.table_name,
            });
        }

        let table = Table {
            name: input.table_name.clone(),
            schema,
            key_schema: input.key_schema,
            attribute_definitions: input.attribute_definitions,
            created_at: Utc::now(),
            storage: TableStorage::new(),
        };
        let description = table.description(TableStatus::Active);
        debug!(table = %input.table_name, "created table");
        tables.insert(input.table_name, table);

        Ok(CreateTableOutput {
            table_description: description,
        })
    }

    /// Describe a table.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::ResourceNotFound` if the table does not exist.
    pub fn describe_table(
        &self,
        input: DescribeTableInput,
    ) -> Result<DescribeTableOutput, DynamoError> {
        let tables = self.tables.read();
        let table = require_table(&tables, &input.table_name)?;
        Ok(DescribeTableOutput {
            table: table.description(TableStatus::Active),
        })
    }

    /// Delete a table and all of its items.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::ResourceNotFound` if the table does not exist.
    pub fn delete_table(&self, input: DeleteTableInput) -> Result<DeleteTableOutput, DynamoError> {
        let mut tables = self.tables.write();
        let table = tables
            .remove(&input.table_name)
            .ok_or(DynamoError::ResourceNotFound {
                name: input.table_name,
            })?;
        debug!(table = %table.name, "deleted table");
        Ok(DeleteTableOutput {
            table_description: table.description(TableStatus::Deleting),
        })
    }

    /// List table names in lexicographic order, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` if the limit is outside 1-100.
    pub fn list_tables(&self, input: ListTablesInput) -> Result<ListTablesOutput, DynamoError> {
        let limit = match input.limit {
            None => MAX_LIST_TABLES_LIMIT,
            Some(l) if (1..=MAX_LIST_TABLES_LIMIT).contains(&l) => l,
            Some(_) => {
                return Err(DynamoError::validation("Limit must be between 1 and 100"));
            }
        };
        let limit = limit as usize;

        let tables = self.tables.read();
        let start = match &input.exclusive_start_table_name {
            Some(name) => Bound::Excluded(name.clone()),
            None => Bound::Unbounded,
        };

        // Take one extra name to learn whether another page follows.
        let mut table_names: Vec<String> = tables
            .range((start, Bound::Unbounded))
            .map(|(name, _)| name.clone())
            .take(limit + 1)
            .collect();

        let last_evaluated_table_name = if table_names.len() > limit {
            table_names.truncate(limit);
            table_names.last().cloned()
        } else {
            None
        };

        Ok(ListTablesOutput {
            table_names,
            last_evaluated_table_name,
        })
    }

    // -- Item operations ----------------------------------------------------

    /// Insert or replace an item.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` for malformed input,
    /// `DynamoError::ResourceNotFound` for a missing table,
    /// `DynamoError::ConditionalCheckFailed` when the condition does not hold,
    /// and `DynamoError::ConditionEvaluation` when it cannot be evaluated.
    pub fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, DynamoError> {
        let mut errs = ValidationErrors::new();

        let return_values = input.return_values.unwrap_or_default();
        if !matches!(return_values, ReturnValue::None | ReturnValue::AllOld) {
            errs.add("ReturnValues must be NONE or ALL_OLD for PutItem");
        }
        let on_failure = input
            .return_values_on_condition_check_failure
            .unwrap_or_default();
        if !matches!(on_failure, ReturnValue::None | ReturnValue::AllOld) {
            errs.add("ReturnValuesOnConditionCheckFailure must be NONE or ALL_OLD for PutItem");
        }

        validate_attribute_names(&input.item, "", &mut errs);

        let condition = parse_condition_expression(input.condition_expression.as_deref(), &mut errs);
        errs.into_result()?;

        let mut tables = self.tables.write();
        let table = require_table_mut(&mut tables, &input.table_name)?;

        let key = table.schema.extract_key(&input.item, "item");
        let mut type_errs = ValidationErrors::new();
        table.schema.check_declared_types(&input.item, &mut type_errs);
        let key = match key {
            Ok(key) if type_errs.is_empty() => key,
            Ok(_) => return Err(DynamoError::Validation(type_errs)),
            Err(mut key_errs) => {
                key_errs.merge(type_errs);
                return Err(DynamoError::Validation(key_errs));
            }
        };

        let existing = table.storage.get(&key);
        if let Some(condition) = &condition {
            check_condition(
                condition,
                &input.expression_attribute_names,
                &input.expression_attribute_values,
                existing,
                on_failure,
            )?;
        }

        let previous = table.storage.upsert(key, input.item);
        let attributes = match return_values {
            ReturnValue::AllOld => previous,
            _ => None,
        };
        Ok(PutItemOutput { attributes })
    }

    /// Read an item by its full primary key.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` for a malformed key and
    /// `DynamoError::ResourceNotFound` for a missing table.
    pub fn get_item(&self, input: GetItemInput) -> Result<GetItemOutput, DynamoError> {
        let tables = self.tables.read();
        let table = require_table(&tables, &input.table_name)?;

        validate_key_shape(&table.schema, &input.key)?;
        let key = table
            .schema
            .extract_key(&input.key, "key")
            .map_err(DynamoError::Validation)?;

        Ok(GetItemOutput {
            item: table.storage.get(&key).cloned(),
        })
    }

    /// Delete an item by its full primary key. Deleting an absent item is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` for malformed input,
    /// `DynamoError::ResourceNotFound` for a missing table,
    /// `DynamoError::ConditionalCheckFailed` when the condition does not hold,
    /// and `DynamoError::ConditionEvaluation` when it cannot be evaluated.
    pub fn delete_item(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, DynamoError> {
        let mut errs = ValidationErrors::new();

        let return_values = input.return_values.unwrap_or_default();
        if !matches!(return_values, ReturnValue::None | ReturnValue::AllOld) {
            errs.add("ReturnValues must be NONE or ALL_OLD for DeleteItem");
        }
        let on_failure = input
            .return_values_on_condition_check_failure
            .unwrap_or_default();
        if !matches!(on_failure, ReturnValue::None | ReturnValue::AllOld) {
            errs.add("ReturnValuesOnConditionCheckFailure must be NONE or ALL_OLD for DeleteItem");
        }

        let condition = parse_condition_expression(input.condition_expression.as_deref(), &mut errs);
        errs.into_result()?;

        let mut tables = self.tables.write();
        let table = require_table_mut(&mut tables, &input.table_name)?;

        validate_key_shape(&table.schema, &input.key)?;
        let key = table
            .schema
            .extract_key(&input.key, "key")
            .map_err(DynamoError::Validation)?;

        let existing = table.storage.get(&key);
        if let Some(condition) = &condition {
            check_condition(
                condition,
                &input.expression_attribute_names,
                &input.expression_attribute_values,
                existing,
                on_failure,
            )?;
        }

        let removed = table.storage.delete(&key);
        let attributes = match return_values {
            ReturnValue::AllOld => removed,
            _ => None,
        };
        Ok(DeleteItemOutput { attributes })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_table<'a>(
    tables: &'a BTreeMap<String, Table>,
    name: &str,
) -> Result<&'a Table, DynamoError> {
    tables.get(name).ok_or_else(|| DynamoError::ResourceNotFound {
        name: name.to_owned(),
    })
}

fn require_table_mut<'a>(
    tables: &'a mut BTreeMap<String, Table>,
    name: &str,
) -> Result<&'a mut Table, DynamoError> {
    tables
        .get_mut(name)
        .ok_or_else(|| DynamoError::ResourceNotFound {
            name: name.to_owned(),
        })
}

/// Parse a condition expression, recording a parse failure as a validation
/// error alongside any others.
fn parse_condition_expression(
    condition: Option<&str>,
    errs: &mut ValidationErrors,
) -> Option<Expr> {
    let condition = condition?;
    match parse_condition(condition) {
        Ok(expr) => Some(expr),
        Err(e) => {
            errs.add(format!("failed to parse ConditionExpression: {e}"));
            None
        }
    }
}

/// Check attribute name lengths, recursing through nested maps and lists.
/// `path` locates the map in the item, so messages point at the bad key; the
/// offending name itself is truncated to its first 100 characters.
fn validate_attribute_names(
    attrs: &HashMap<String, AttributeValue>,
    path: &str,
    errs: &mut ValidationErrors,
) {
    for (name, value) in attrs {
        if name.len() >= MAX_ATTRIBUTE_NAME_LEN {
            let prefix: String = name.chars().take(100).collect();
            errs.add(format!(
                "Item{path}.{prefix}(...) attribute name too large, must be less than 65536 characters"
            ));
        }
        validate_nested_attribute_names(value, &format!("{path}.{name}"), errs);
    }
}

fn validate_nested_attribute_names(value: &AttributeValue, path: &str, errs: &mut ValidationErrors) {
    match value {
        AttributeValue::M(m) => validate_attribute_names(m, path, errs),
        AttributeValue::L(list) => {
            for (i, element) in list.iter().enumerate() {
                validate_nested_attribute_names(element, &format!("{path}[{i}]"), errs);
            }
        }
        _ => {}
    }
}

/// A point lookup's key map must hold exactly the table's key attributes.
fn validate_key_shape(schema: &TableSchema, key: &Item) -> Result<(), DynamoError> {
    if key.len() == schema.key_count() {
        return Ok(());
    }
    let message = if schema.sort_key.is_some() {
        "must provide partition and sort keys only"
    } else {
        "must provide partition key only"
    };
    Err(DynamoError::validation(message))
}

/// Evaluate a condition against the existing item (an absent item evaluates
/// as an empty map). On a false condition, the current item is carried in the
/// error iff the caller asked for `ALL_OLD` on failure.
fn check_condition(
    condition: &Expr,
    names: &HashMap<String, String>,
    values: &HashMap<String, AttributeValue>,
    existing: Option<&Item>,
    on_failure: ReturnValue,
) -> Result<(), DynamoError> {
    let empty = Item::new();
    let ctx = EvalContext {
        item: existing.unwrap_or(&empty),
        names,
        values,
    };
    if ctx.evaluate(condition)? {
        Ok(())
    } else {
        let item = match on_failure {
            ReturnValue::AllOld => existing.cloned(),
            _ => None,
        };
        Err(DynamoError::ConditionalCheckFailed { item })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttributeDefinition, KeySchemaElement, ScalarAttributeType};

    fn users_table_input() -> CreateTableInput {
        CreateTableInput {
            table_name: "users".to_owned(),
            key_schema: vec![KeySchemaElement {
                attribute_name: "id".to_owned(),
                key_type: KeyType::Hash,
            }],
            attribute_definitions: vec![AttributeDefinition {
                attribute_name: "id".to_owned(),
                attribute_type: ScalarAttributeType::S,
            }],
        }
    }

    fn user_item(id: &str) -> Item {
        let mut item = Item::new();
        item.insert("id".to_owned(), AttributeValue::S(id.to_owned()));
        item
    }

    #[test]
    fn test_should_reject_duplicate_table() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let err = db.create_table(users_table_input()).unwrap_err();
        assert!(matches!(err, DynamoError::ResourceInUse { name } if name == "users"));
    }

    #[test]
    fn test_should_collect_all_create_table_problems() {
        let db = Database::new();
        let input = CreateTableInput {
            table_name: "x".to_owned(),
            key_schema: vec![KeySchemaElement {
                attribute_name: "id".to_owned(),
                key_type: KeyType::Range,
            }],
            attribute_definitions: vec![],
        };

        let err = db.create_table(input).unwrap_err();
        let DynamoError::Validation(errs) = err else {
            panic!("expected validation error");
        };
        let joined = errs.to_string();
        assert!(joined.contains("TableName must be between 3 and 255 characters"));
        assert!(joined.contains("KeySchema[0] must have type HASH"));
        assert!(joined.contains("AttributeDefinitions is a required field"));
        assert!(joined.contains("id is missing from AttributeDefinitions"));
    }

    #[test]
    fn test_should_round_trip_item() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        db.put_item(PutItemInput {
            table_name: "users".to_owned(),
            item: user_item("u1"),
            ..Default::default()
        })
        .unwrap();

        let output = db
            .get_item(GetItemInput {
                table_name: "users".to_owned(),
                key: user_item("u1"),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(output.item, Some(user_item("u1")));
    }

    #[test]
    fn test_should_return_none_for_missing_item() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let output = db
            .get_item(GetItemInput {
                table_name: "users".to_owned(),
                key: user_item("nobody"),
                ..Default::default()
            })
            .unwrap();
        assert!(output.item.is_none());
    }

    #[test]
    fn test_should_fail_put_on_unknown_table() {
        let db = Database::new();
        let err = db
            .put_item(PutItemInput {
                table_name: "nope".to_owned(),
                item: user_item("u1"),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DynamoError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_should_return_replaced_item_with_all_old() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let mut original = user_item("u1");
        original.insert("version".to_owned(), AttributeValue::N("1".to_owned()));
        db.put_item(PutItemInput {
            table_name: "users".to_owned(),
            item: original.clone(),
            ..Default::default()
        })
        .unwrap();

        let output = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item: user_item("u1"),
                return_values: Some(ReturnValue::AllOld),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(output.attributes, Some(original));
    }

    #[test]
    fn test_should_reject_unsupported_return_values() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item: user_item("u1"),
                return_values: Some(ReturnValue::AllNew),
                ..Default::default()
            })
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("ReturnValues must be NONE or ALL_OLD for PutItem")
        );
    }

    #[test]
    fn test_should_reject_declared_attribute_type_mismatch_on_put() {
        let db = Database::new();
        let mut input = users_table_input();
        input.attribute_definitions.push(AttributeDefinition {
            attribute_name: "email".to_owned(),
            attribute_type: ScalarAttributeType::S,
        });
        db.create_table(input).unwrap();

        let mut item = user_item("u1");
        item.insert("email".to_owned(), AttributeValue::N("5".to_owned()));
        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item,
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code(), "ValidationException");
        assert!(
            err.to_string()
                .contains("email: type mismatch, defined to have type S")
        );
    }

    #[test]
    fn test_should_reject_empty_declared_string_on_put() {
        let db = Database::new();
        let mut input = users_table_input();
        input.attribute_definitions.push(AttributeDefinition {
            attribute_name: "email".to_owned(),
            attribute_type: ScalarAttributeType::S,
        });
        db.create_table(input).unwrap();

        let mut item = user_item("u1");
        item.insert("email".to_owned(), AttributeValue::S(String::new()));
        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item,
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("email: cannot be empty string"));
    }

    #[test]
    fn test_should_point_at_oversized_attribute_name() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let mut profile = Item::new();
        profile.insert("a".repeat(70_000), AttributeValue::Bool(true));
        let mut item = user_item("u1");
        item.insert("profile".to_owned(), AttributeValue::M(profile));

        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item,
                ..Default::default()
            })
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Item.profile."));
        assert!(msg.contains("(...) attribute name too large, must be less than 65536 characters"));
    }

    #[test]
    fn test_should_fail_conditional_put_and_carry_item_when_asked() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();
        db.put_item(PutItemInput {
            table_name: "users".to_owned(),
            item: user_item("u1"),
            ..Default::default()
        })
        .unwrap();

        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item: user_item("u1"),
                condition_expression: Some("attribute_not_exists(id)".to_owned()),
                return_values_on_condition_check_failure: Some(ReturnValue::AllOld),
                ..Default::default()
            })
            .unwrap_err();
        let DynamoError::ConditionalCheckFailed { item } = err else {
            panic!("expected conditional check failure");
        };
        assert_eq!(item, Some(user_item("u1")));
    }

    #[test]
    fn test_should_omit_item_from_conditional_failure_by_default() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();
        db.put_item(PutItemInput {
            table_name: "users".to_owned(),
            item: user_item("u1"),
            ..Default::default()
        })
        .unwrap();

        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item: user_item("u1"),
                condition_expression: Some("attribute_not_exists(id)".to_owned()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            DynamoError::ConditionalCheckFailed { item: None }
        ));
    }

    #[test]
    fn test_should_report_condition_parse_failure_as_validation() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let err = db
            .put_item(PutItemInput {
                table_name: "users".to_owned(),
                item: user_item("u1"),
                condition_expression: Some("size = :v".to_owned()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("failed to parse ConditionExpression")
        );
    }

    #[test]
    fn test_should_delete_item_and_return_old_attributes() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();
        db.put_item(PutItemInput {
            table_name: "users".to_owned(),
            item: user_item("u1"),
            ..Default::default()
        })
        .unwrap();

        let output = db
            .delete_item(DeleteItemInput {
                table_name: "users".to_owned(),
                key: user_item("u1"),
                return_values: Some(ReturnValue::AllOld),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(output.attributes, Some(user_item("u1")));

        // Deleting again is a no-op with nothing to return.
        let output = db
            .delete_item(DeleteItemInput {
                table_name: "users".to_owned(),
                key: user_item("u1"),
                return_values: Some(ReturnValue::AllOld),
                ..Default::default()
            })
            .unwrap();
        assert!(output.attributes.is_none());
    }

    #[test]
    fn test_should_reject_key_map_with_extra_attributes() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let mut key = user_item("u1");
        key.insert("extra".to_owned(), AttributeValue::Bool(true));
        let err = db
            .get_item(GetItemInput {
                table_name: "users".to_owned(),
                key,
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("must provide partition key only"));
    }

    #[test]
    fn test_should_describe_active_table() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let output = db
            .describe_table(DescribeTableInput {
                table_name: "users".to_owned(),
            })
            .unwrap();
        assert_eq!(output.table.table_status, Some(TableStatus::Active));
        assert_eq!(output.table.item_count, Some(0));
    }

    #[test]
    fn test_should_report_deleting_status_on_table_delete() {
        let db = Database::new();
        db.create_table(users_table_input()).unwrap();

        let output = db
            .delete_table(DeleteTableInput {
                table_name: "users".to_owned(),
            })
            .unwrap();
        assert_eq!(
            output.table_description.table_status,
            Some(TableStatus::Deleting)
        );

        let err = db
            .describe_table(DescribeTableInput {
                table_name: "users".to_owned(),
            })
            .unwrap_err();
        assert!(matches!(err, DynamoError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_should_list_tables_in_order() {
        let db = Database::new();
        for name in ["beta", "alpha", "gamma"] {
            let mut input = users_table_input();
            input.table_name = name.to_owned();
            db.create_table(input).unwrap();
        }

        let output = db.list_tables(ListTablesInput::default()).unwrap();
        assert_eq!(output.table_names, vec!["alpha", "beta", "gamma"]);
        assert!(output.last_evaluated_table_name.is_none());
    }

    #[test]
    fn test_should_reject_out_of_range_list_limit() {
        let db = Database::new();
        let err = db
            .list_tables(ListTablesInput {
                limit: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("Limit must be between 1 and 100"));
    }
}
