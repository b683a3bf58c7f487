//! Condition expression support: lexer, parser, AST, and evaluator.
//!
//! Expressions are parsed once into an [`ast::Expr`] and evaluated against an
//! item through an [`EvalContext`] carrying the expression attribute name and
//! value bindings.

pub mod ast;
pub mod eval;
pub mod parser;

pub use ast::{AttributePath, CompareOp, Expr, FunctionName, LogicalOp, Operand, PathElement};
pub use eval::EvalContext;
pub use parser::{ExpressionError, parse_condition};
