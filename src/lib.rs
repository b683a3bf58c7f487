//! An in-memory, single-process fake of DynamoDB for tests.
//!
//! [`Database`] holds tables in process memory and speaks DynamoDB semantics:
//! schema-validated keys with proper ordering, condition expressions on writes,
//! and the table management operations. Items use the DynamoDB wire format
//! ([`AttributeValue`]), so fixtures serialize to and from the same JSON an
//! AWS SDK produces.
//!
//! Semantics are deliberately stricter than the real service in one respect:
//! a condition expression that references a missing attribute or an unbound
//! placeholder is an error rather than silently false, so a typo in a test
//! fixture fails loudly instead of passing vacuously.

pub mod db;
pub mod error;
pub mod expression;
pub mod input;
pub mod output;
pub mod schema;
pub mod storage;
pub mod types;
pub mod value;

pub use db::Database;
pub use error::{DynamoError, ValidationErrors};
pub use value::{AttributeValue, Item};
