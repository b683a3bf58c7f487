//! Operation output types.
//!
//! Output structs mirror the DynamoDB wire protocol's `PascalCase` JSON field
//! naming. Absent optional fields are omitted from serialized responses.

use serde::{Deserialize, Serialize};

use crate::types::TableDescription;
use crate::value::Item;

/// Output of the `CreateTable` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableOutput {
    /// Description of the newly created table.
    pub table_description: TableDescription,
}

/// Output of the `DeleteTable` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTableOutput {
    /// Description of the deleted table, with status `DELETING`.
    pub table_description: TableDescription,
}

/// Output of the `DescribeTable` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableOutput {
    /// Description of the table.
    pub table: TableDescription,
}

/// Output of the `ListTables` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesOutput {
    /// Table names in lexicographic order, at most the requested limit.
    pub table_names: Vec<String>,

    /// Set when more tables remain; pass it back as the exclusive start name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_table_name: Option<String>,
}

/// Output of the `PutItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    /// The replaced item, when `ReturnValues` is `ALL_OLD` and one existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

/// Output of the `GetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// The item, absent when no item has the requested key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

/// Output of the `DeleteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    /// The removed item, when `ReturnValues` is `ALL_OLD` and one existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}
