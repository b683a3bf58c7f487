//! Database error types.
//!
//! Input validation aggregates every problem it finds into a single
//! [`ValidationErrors`] report rather than stopping at the first one, so a
//! caller can fix an entire malformed request in one pass.

use std::fmt;

use crate::expression::ExpressionError;
use crate::value::Item;

/// Errors returned by database operations.
#[derive(Debug, thiserror::Error)]
pub enum DynamoError {
    /// One or more request fields failed validation.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// The named table does not exist.
    #[error("Requested resource not found: Table: {name} not found")]
    ResourceNotFound {
        /// The missing table name.
        name: String,
    },
    /// The named table already exists.
    #[error("Table already exists: {name}")]
    ResourceInUse {
        /// The conflicting table name.
        name: String,
    },
    /// A condition expression evaluated to false.
    #[error("The conditional request failed")]
    ConditionalCheckFailed {
        /// The current item, when the caller asked for it on failure.
        item: Option<Item>,
    },
    /// A condition expression could not be evaluated.
    #[error("error evaluating condition expression: {0}")]
    ConditionEvaluation(#[from] ExpressionError),
}

impl DynamoError {
    /// Returns the short error code string for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationException",
            Self::ResourceNotFound { .. } => "ResourceNotFoundException",
            Self::ResourceInUse { .. } => "ResourceInUseException",
            Self::ConditionalCheckFailed { .. } => "ConditionalCheckFailedException",
            Self::ConditionEvaluation(_) => "ValidationException",
        }
    }

    /// Validation error with a single message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        let mut errs = ValidationErrors::new();
        errs.add(message);
        Self::Validation(errs)
    }
}

/// An accumulation of validation failures for one request.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validation failure.
    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Absorb every failure recorded by another collector.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.messages.extend(other.messages);
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The recorded failure messages, in the order they were added.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Convert the collector into a result: `Ok` when empty, otherwise a
    /// [`DynamoError::Validation`] carrying every recorded message.
    ///
    /// # Errors
    ///
    /// Returns `DynamoError::Validation` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), DynamoError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DynamoError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}
