//! Condition expression evaluator.
//!
//! The evaluator resolves expression attribute names and values against an
//! item, then reduces the condition to a boolean. Resolution is strict: a
//! document path that names a missing attribute, an out-of-range index, or a
//! placeholder with no binding is an evaluation error, not a silent `false`.
//! Only `attribute_exists` and `attribute_not_exists` absorb missing-path
//! errors, since probing for absence is their purpose.
//!
//! Logical operators do not short-circuit: both sides of AND and OR are
//! evaluated so that an unresolvable operand is reported even when the other
//! side already decides the outcome.

use std::collections::HashMap;

use crate::value::{AttributeValue, Item, compare_values, contains_value, size_of};

use super::ast::{AttributePath, CompareOp, Expr, FunctionName, LogicalOp, Operand, PathElement};
use super::parser::ExpressionError;

// ---------------------------------------------------------------------------
// Evaluation context
// ---------------------------------------------------------------------------

/// Evaluation context binding an item to its expression attribute name/value
/// mappings.
#[derive(Debug)]
pub struct EvalContext<'a> {
    /// The item being evaluated. An absent item evaluates as an empty map.
    pub item: &'a Item,
    /// Expression attribute name substitutions (`#name` -> actual attribute name).
    pub names: &'a HashMap<String, String>,
    /// Expression attribute value substitutions (`:val` -> `AttributeValue`).
    pub values: &'a HashMap<String, AttributeValue>,
}

impl EvalContext<'_> {
    /// Evaluate a condition expression against the item.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionError` if attribute references cannot be resolved or
    /// operand types are incompatible with the operation.
    pub fn evaluate(&self, expr: &Expr) -> Result<bool, ExpressionError> {
        match expr {
            Expr::Compare { left, op, right } => self.eval_compare(left, *op, right),
            Expr::Between { value, low, high } => self.eval_between(value, low, high),
            Expr::In { value, list } => self.eval_in(value, list),
            Expr::Logical { op, left, right } => self.eval_logical(*op, left, right),
            Expr::Not(inner) => self.evaluate(inner).map(|v| !v),
            Expr::Function { name, args } => self.eval_function(*name, args),
        }
    }

    fn eval_compare(
        &self,
        left: &Operand,
        op: CompareOp,
        right: &Operand,
    ) -> Result<bool, ExpressionError> {
        let lval = self.resolve_operand(left)?;
        let rval = self.resolve_operand(right)?;
        compare_values(&lval, op, &rval)
    }

    fn eval_between(
        &self,
        value: &Operand,
        low: &Operand,
        high: &Operand,
    ) -> Result<bool, ExpressionError> {
        let v = self.resolve_operand(value)?;
        let lo = self.resolve_operand(low)?;
        let hi = self.resolve_operand(high)?;

        let scalar = matches!(
            v,
            AttributeValue::S(_) | AttributeValue::N(_) | AttributeValue::B(_)
        );
        if !scalar
            || v.type_descriptor() != lo.type_descriptor()
            || v.type_descriptor() != hi.type_descriptor()
        {
            return Err(ExpressionError::TypeMismatch {
                message: format!(
                    "incompatible types in BETWEEN operation: {}, {} and {}",
                    v.type_descriptor(),
                    lo.type_descriptor(),
                    hi.type_descriptor()
                ),
            });
        }

        let ge_low = compare_values(&v, CompareOp::Ge, &lo)?;
        let le_high = compare_values(&v, CompareOp::Le, &hi)?;
        Ok(ge_low && le_high)
    }

    /// IN resolves every candidate before comparing, so unresolvable operands
    /// surface even when an earlier candidate already matched.
    fn eval_in(&self, value: &Operand, list: &[Operand]) -> Result<bool, ExpressionError> {
        let v = self.resolve_operand(value)?;
        let candidates = list
            .iter()
            .map(|operand| self.resolve_operand(operand))
            .collect::<Result<Vec<_>, _>>()?;

        for candidate in &candidates {
            if compare_values(&v, CompareOp::Eq, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn eval_logical(
        &self,
        op: LogicalOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<bool, ExpressionError> {
        // Evaluate both sides before propagating either result.
        let lres = self.evaluate(left);
        let rres = self.evaluate(right);
        let l = lres?;
        let r = rres?;
        Ok(match op {
            LogicalOp::And => l && r,
            LogicalOp::Or => l || r,
        })
    }

    fn eval_function(&self, name: FunctionName, args: &[Operand]) -> Result<bool, ExpressionError> {
        match name {
            FunctionName::AttributeExists => {
                expect_args(name, args, 1)?;
                let path = operand_as_path(&args[0], name)?;
                match self.resolve_path(path) {
                    Ok(_) => Ok(true),
                    Err(
                        ExpressionError::NoSuchAttribute { .. } | ExpressionError::NoSuchIndex { .. },
                    ) => Ok(false),
                    Err(e) => Err(e),
                }
            }
            FunctionName::AttributeNotExists => {
                expect_args(name, args, 1)?;
                let path = operand_as_path(&args[0], name)?;
                match self.resolve_path(path) {
                    Ok(_) => Ok(false),
                    Err(
                        ExpressionError::NoSuchAttribute { .. } | ExpressionError::NoSuchIndex { .. },
                    ) => Ok(true),
                    Err(e) => Err(e),
                }
            }
            FunctionName::AttributeType => {
                expect_args(name, args, 2)?;
                let path = operand_as_path(&args[0], name)?;
                let type_val = self.resolve_operand(&args[1])?;
                let AttributeValue::S(expected_type) = type_val else {
                    return Err(ExpressionError::TypeMismatch {
                        message: format!(
                            "attribute_type argument must be a string, got {}",
                            type_val.type_descriptor()
                        ),
                    });
                };
                let val = self.resolve_path(path)?;
                Ok(val.type_descriptor() == expected_type)
            }
            FunctionName::BeginsWith => {
                expect_args(name, args, 2)?;
                let subject = self.resolve_operand(&args[0])?;
                let prefix = self.resolve_operand(&args[1])?;
                match (&subject, &prefix) {
                    (AttributeValue::S(s), AttributeValue::S(p)) => Ok(s.starts_with(p.as_str())),
                    _ => Err(ExpressionError::TypeMismatch {
                        message: format!(
                            "begins_with arguments must be strings (got {}, {})",
                            subject.type_descriptor(),
                            prefix.type_descriptor()
                        ),
                    }),
                }
            }
            FunctionName::Contains => {
                expect_args(name, args, 2)?;
                let haystack = self.resolve_operand(&args[0])?;
                let needle = self.resolve_operand(&args[1])?;
                contains_value(&haystack, &needle)
            }
            FunctionName::Size => Err(ExpressionError::TypeMismatch {
                message: "size() must be used within a comparison".to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Operand resolution
// ---------------------------------------------------------------------------

impl EvalContext<'_> {
    /// Resolve an operand to its concrete `AttributeValue`.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionError` if a new attribute path does not resolve or a
    /// value reference (`:name`) has no binding.
    pub fn resolve_operand(&self, operand: &Operand) -> Result<AttributeValue, ExpressionError> {
        match operand {
            Operand::Path(path) => self.resolve_path(path).cloned(),
            Operand::Value(name) => {
                let key = format!(":{name}");
                self.values
                    .get(&key)
                    .cloned()
                    .ok_or(ExpressionError::NoSuchValue { name: key })
            }
            Operand::Size(path) => {
                let val = self.resolve_path(path)?;
                let size = size_of(val)?;
                Ok(AttributeValue::N(size.to_string()))
            }
        }
    }

    /// Walk an attribute path against the item, resolving `#name` placeholders
    /// through the names map.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionError` if a placeholder has no binding, an attribute
    /// or index is absent, or an intermediate value has the wrong shape.
    pub fn resolve_path(&self, path: &AttributePath) -> Result<&AttributeValue, ExpressionError> {
        let mut current: Option<&AttributeValue> = None;
        let mut walked = String::new();

        for (i, element) in path.elements.iter().enumerate() {
            match element {
                PathElement::Attribute(name) => {
                    let resolved_name = if name.starts_with('#') {
                        self.names
                            .get(name.as_str())
                            .ok_or_else(|| ExpressionError::NoSuchName { name: name.clone() })?
                    } else {
                        name
                    };
                    let container = if i == 0 {
                        self.item
                    } else {
                        let val = current.ok_or(ExpressionError::UnexpectedEof)?;
                        val.as_m().ok_or_else(|| ExpressionError::NotAMap {
                            path: walked.clone(),
                        })?
                    };
                    current = Some(container.get(resolved_name).ok_or_else(|| {
                        ExpressionError::NoSuchAttribute {
                            name: resolved_name.clone(),
                        }
                    })?);
                    if !walked.is_empty() {
                        walked.push('.');
                    }
                    walked.push_str(resolved_name);
                }
                PathElement::Index(idx) => {
                    let val = current.ok_or(ExpressionError::UnexpectedEof)?;
                    let list = val.as_l().ok_or_else(|| ExpressionError::NotAList {
                        path: walked.clone(),
                    })?;
                    current = Some(
                        list.get(*idx)
                            .ok_or(ExpressionError::NoSuchIndex { index: *idx })?,
                    );
                    walked.push_str(&format!("[{idx}]"));
                }
            }
        }

        current.ok_or(ExpressionError::UnexpectedEof)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Require a function operand to be a document path.
fn operand_as_path(
    operand: &Operand,
    func: FunctionName,
) -> Result<&AttributePath, ExpressionError> {
    match operand {
        Operand::Path(path) => Ok(path),
        _ => Err(ExpressionError::TypeMismatch {
            message: format!("{func} requires a document path argument"),
        }),
    }
}

/// Require an exact argument count for a function.
fn expect_args(
    func: FunctionName,
    args: &[Operand],
    expected: usize,
) -> Result<(), ExpressionError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ExpressionError::UnexpectedToken {
            expected: format!("{expected} argument(s) to {func}"),
            found: format!("{}", args.len()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::parser::parse_condition;

    fn item() -> Item {
        let mut inner = HashMap::new();
        inner.insert("rating".to_owned(), AttributeValue::N("4.5".to_owned()));
        let mut m = HashMap::new();
        m.insert("id".to_owned(), AttributeValue::S("item-1".to_owned()));
        m.insert("count".to_owned(), AttributeValue::N("42".to_owned()));
        m.insert("active".to_owned(), AttributeValue::Bool(true));
        m.insert("info".to_owned(), AttributeValue::M(inner));
        m.insert(
            "tags".to_owned(),
            AttributeValue::Ss(vec!["red".to_owned(), "blue".to_owned()]),
        );
        m.insert(
            "history".to_owned(),
            AttributeValue::L(vec![
                AttributeValue::S("first".to_owned()),
                AttributeValue::S("second".to_owned()),
            ]),
        );
        m
    }

    fn eval(condition: &str, item: &Item, values: &[(&str, AttributeValue)]) -> Result<bool, ExpressionError> {
        let expr = parse_condition(condition).unwrap();
        let names = HashMap::new();
        let values: HashMap<String, AttributeValue> = values
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect();
        let ctx = EvalContext {
            item,
            names: &names,
            values: &values,
        };
        ctx.evaluate(&expr)
    }

    #[test]
    fn test_should_evaluate_equality() {
        let item = item();
        let result = eval(
            "id = :v",
            &item,
            &[(":v", AttributeValue::S("item-1".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_compare_numbers_numerically() {
        let item = item();
        let result = eval(
            "#c > :v",
            &item,
            &[(":v", AttributeValue::N("9".to_owned()))],
        );
        // "#c" has no binding in this helper, so rebuild with names
        assert!(result.is_err());

        let expr = parse_condition("#c > :v").unwrap();
        let names = HashMap::from([("#c".to_owned(), "count".to_owned())]);
        let values = HashMap::from([(":v".to_owned(), AttributeValue::N("9".to_owned()))]);
        let ctx = EvalContext {
            item: &item,
            names: &names,
            values: &values,
        };
        assert!(ctx.evaluate(&expr).unwrap());
    }

    #[test]
    fn test_should_error_on_type_mismatch() {
        let item = item();
        let result = eval(
            "id = :v",
            &item,
            &[(":v", AttributeValue::N("1".to_owned()))],
        );
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_error_on_missing_attribute() {
        let item = item();
        let result = eval(
            "missing = :v",
            &item,
            &[(":v", AttributeValue::S("x".to_owned()))],
        );
        assert!(matches!(
            result,
            Err(ExpressionError::NoSuchAttribute { name }) if name == "missing"
        ));
    }

    #[test]
    fn test_should_error_on_unbound_value() {
        let item = item();
        let result = eval("id = :nope", &item, &[]);
        assert!(matches!(
            result,
            Err(ExpressionError::NoSuchValue { name }) if name == ":nope"
        ));
    }

    #[test]
    fn test_should_treat_missing_attribute_as_not_existing() {
        let item = item();
        assert!(!eval("attribute_exists(missing)", &item, &[]).unwrap());
        assert!(eval("attribute_not_exists(missing)", &item, &[]).unwrap());
        assert!(eval("attribute_exists(id)", &item, &[]).unwrap());
    }

    #[test]
    fn test_should_not_short_circuit_and() {
        let item = item();
        // Left side is false, right side is an error. A short-circuiting AND
        // would return false; this one must report the error.
        let result = eval(
            "id = :other AND missing = :other",
            &item,
            &[(":other", AttributeValue::S("nope".to_owned()))],
        );
        assert!(matches!(
            result,
            Err(ExpressionError::NoSuchAttribute { .. })
        ));
    }

    #[test]
    fn test_should_not_short_circuit_or() {
        let item = item();
        let result = eval(
            "id = :v OR missing = :v",
            &item,
            &[(":v", AttributeValue::S("item-1".to_owned()))],
        );
        assert!(matches!(
            result,
            Err(ExpressionError::NoSuchAttribute { .. })
        ));
    }

    #[test]
    fn test_should_evaluate_between() {
        let item = item();
        let result = eval(
            "#c BETWEEN :lo AND :hi",
            &item,
            &[],
        );
        assert!(result.is_err());

        let expr = parse_condition("#c BETWEEN :lo AND :hi").unwrap();
        let names = HashMap::from([("#c".to_owned(), "count".to_owned())]);
        let values = HashMap::from([
            (":lo".to_owned(), AttributeValue::N("40".to_owned())),
            (":hi".to_owned(), AttributeValue::N("50".to_owned())),
        ]);
        let ctx = EvalContext {
            item: &item,
            names: &names,
            values: &values,
        };
        assert!(ctx.evaluate(&expr).unwrap());
    }

    #[test]
    fn test_should_reject_mixed_types_in_between() {
        let item = item();
        let result = eval(
            "id BETWEEN :lo AND :hi",
            &item,
            &[
                (":lo", AttributeValue::S("a".to_owned())),
                (":hi", AttributeValue::N("5".to_owned())),
            ],
        );
        assert!(matches!(result, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_should_evaluate_in_membership() {
        let item = item();
        let result = eval(
            "id IN (:a, :b)",
            &item,
            &[
                (":a", AttributeValue::S("other".to_owned())),
                (":b", AttributeValue::S("item-1".to_owned())),
            ],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_resolve_all_in_candidates_before_matching() {
        let item = item();
        // First candidate matches, second is unbound. Must still error.
        let result = eval(
            "id IN (:a, :missing)",
            &item,
            &[(":a", AttributeValue::S("item-1".to_owned()))],
        );
        assert!(matches!(result, Err(ExpressionError::NoSuchValue { .. })));
    }

    #[test]
    fn test_should_evaluate_begins_with() {
        let item = item();
        let result = eval(
            "begins_with(id, :p)",
            &item,
            &[(":p", AttributeValue::S("item".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_reject_begins_with_on_non_string() {
        let item = item();
        let result = eval(
            "begins_with(#c, :p)",
            &item,
            &[(":p", AttributeValue::S("4".to_owned()))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_should_evaluate_contains_on_string_set() {
        let item = item();
        let result = eval(
            "contains(tags, :v)",
            &item,
            &[(":v", AttributeValue::S("red".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_evaluate_size_comparison() {
        let item = item();
        let result = eval(
            "size(id) > :n",
            &item,
            &[(":n", AttributeValue::N("3".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_walk_nested_paths() {
        let item = item();
        let result = eval(
            "info.rating >= :r",
            &item,
            &[(":r", AttributeValue::N("4".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_index_into_lists() {
        let item = item();
        let result = eval(
            "history[1] = :v",
            &item,
            &[(":v", AttributeValue::S("second".to_owned()))],
        );
        assert!(result.unwrap());
    }

    #[test]
    fn test_should_error_on_out_of_range_index() {
        let item = item();
        let result = eval(
            "history[9] = :v",
            &item,
            &[(":v", AttributeValue::S("x".to_owned()))],
        );
        assert!(matches!(
            result,
            Err(ExpressionError::NoSuchIndex { index: 9 })
        ));
    }

    #[test]
    fn test_should_error_when_traversing_non_map() {
        let item = item();
        let result = eval(
            "id.sub = :v",
            &item,
            &[(":v", AttributeValue::S("x".to_owned()))],
        );
        assert!(matches!(
            result,
            Err(ExpressionError::NotAMap { path }) if path == "id"
        ));
    }

    #[test]
    fn test_should_evaluate_attribute_type() {
        let item = item();
        let result = eval(
            "attribute_type(#c, :t)",
            &item,
            &[],
        );
        assert!(result.is_err());

        let expr = parse_condition("attribute_type(#c, :t)").unwrap();
        let names = HashMap::from([("#c".to_owned(), "count".to_owned())]);
        let values = HashMap::from([(":t".to_owned(), AttributeValue::S("N".to_owned()))]);
        let ctx = EvalContext {
            item: &item,
            names: &names,
            values: &values,
        };
        assert!(ctx.evaluate(&expr).unwrap());
    }

    #[test]
    fn test_should_negate_with_not() {
        let item = item();
        let result = eval(
            "NOT id = :v",
            &item,
            &[(":v", AttributeValue::S("other".to_owned()))],
        );
        assert!(result.unwrap());
    }
}
