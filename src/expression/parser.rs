//! Lexer and recursive-descent parser for condition expressions.
//!
//! Keywords and function names are matched case-insensitively. Raw attribute
//! names that collide with DynamoDB reserved words are rejected at parse time;
//! `#name` placeholders bypass the check.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::ast::{AttributePath, CompareOp, Expr, FunctionName, LogicalOp, Operand, PathElement};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced during condition expression parsing or evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    /// An unexpected token was encountered.
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What was expected.
        expected: String,
        /// What was found.
        found: String,
    },
    /// The expression ended prematurely.
    #[error("unexpected end of expression")]
    UnexpectedEof,
    /// An IN expression listed more than 100 candidate values.
    #[error("too many arguments to IN expression (max 100)")]
    TooManyInArguments,
    /// An IN expression listed fewer than two candidate values.
    #[error("too few arguments to IN expression (min 2)")]
    NotEnoughInArguments,
    /// A raw attribute name collides with a reserved word.
    #[error("attribute name is a reserved word: {word}")]
    ReservedWord {
        /// The offending name.
        word: String,
    },
    /// Operand types are incompatible with the requested operation.
    #[error("{message}")]
    TypeMismatch {
        /// Explanation.
        message: String,
    },
    /// A number-typed value could not be parsed as a decimal.
    #[error("failed to parse number: {text}")]
    MalformedNumber {
        /// The unparseable text.
        text: String,
    },
    /// A document path named an attribute the item does not have.
    #[error("no such attribute '{name}'")]
    NoSuchAttribute {
        /// The missing attribute name.
        name: String,
    },
    /// A document path indexed past the end of a list.
    #[error("no such index '{index}'")]
    NoSuchIndex {
        /// The out-of-range index.
        index: usize,
    },
    /// An expression attribute name placeholder has no binding.
    #[error("no such name '{name}'")]
    NoSuchName {
        /// The unresolved `#name` reference.
        name: String,
    },
    /// An expression attribute value placeholder has no binding.
    #[error("no such value '{name}'")]
    NoSuchValue {
        /// The unresolved `:value` reference.
        name: String,
    },
    /// A document path dereferenced a non-map value with an attribute name.
    #[error("{path} is not a map")]
    NotAMap {
        /// The path of the non-map value.
        path: String,
    },
    /// A document path dereferenced a non-list value with an index.
    #[error("{path} is not a list")]
    NotAList {
        /// The path of the non-list value.
        path: String,
    },
}

// ---------------------------------------------------------------------------
// Token type
// ---------------------------------------------------------------------------

/// Lexer token for condition expressions.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// A plain identifier (attribute name).
    Identifier(String),
    /// An expression attribute name reference (`#name`).
    ExprAttrName(String),
    /// An expression attribute value reference (`:value`).
    ExprAttrValue(String),
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    // Keywords
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT`
    Not,
    /// `BETWEEN`
    Between,
    /// `IN`
    In,
    // Function names
    /// `attribute_exists`
    AttributeExists,
    /// `attribute_not_exists`
    AttributeNotExists,
    /// `attribute_type`
    AttributeType,
    /// `begins_with`
    BeginsWith,
    /// `contains`
    Contains,
    /// `size`
    Size,
    /// A non-negative integer (used for list indices).
    Number(usize),
    /// End of input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(s) => write!(f, "identifier '{s}'"),
            Self::ExprAttrName(s) => write!(f, "#{s}"),
            Self::ExprAttrValue(s) => write!(f, ":{s}"),
            Self::Eq => write!(f, "'='"),
            Self::Ne => write!(f, "'<>'"),
            Self::Lt => write!(f, "'<'"),
            Self::Le => write!(f, "'<='"),
            Self::Gt => write!(f, "'>'"),
            Self::Ge => write!(f, "'>='"),
            Self::Dot => write!(f, "'.'"),
            Self::Comma => write!(f, "','"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::Between => write!(f, "BETWEEN"),
            Self::In => write!(f, "IN"),
            Self::AttributeExists => write!(f, "attribute_exists"),
            Self::AttributeNotExists => write!(f, "attribute_not_exists"),
            Self::AttributeType => write!(f, "attribute_type"),
            Self::BeginsWith => write!(f, "begins_with"),
            Self::Contains => write!(f, "contains"),
            Self::Size => write!(f, "size"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// Tokenizer for condition expression strings.
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenize the entire input into a vector of tokens.
    fn tokenize(&mut self) -> Result<Vec<Token>, ExpressionError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            if tok == Token::Eof {
                tokens.push(Token::Eof);
                break;
            }
            tokens.push(tok);
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(char::is_ascii_whitespace) {
            self.chars.next();
        }
    }

    fn next_token(&mut self) -> Result<Token, ExpressionError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            '#' => self.read_expr_attr_name(),
            ':' => self.read_expr_attr_value(),
            '=' => {
                self.chars.next();
                Ok(Token::Eq)
            }
            '<' => Ok(self.read_lt_family()),
            '>' => Ok(self.read_gt_family()),
            '.' => {
                self.chars.next();
                Ok(Token::Dot)
            }
            ',' => {
                self.chars.next();
                Ok(Token::Comma)
            }
            '(' => {
                self.chars.next();
                Ok(Token::LParen)
            }
            ')' => {
                self.chars.next();
                Ok(Token::RParen)
            }
            '[' => {
                self.chars.next();
                Ok(Token::LBracket)
            }
            ']' => {
                self.chars.next();
                Ok(Token::RBracket)
            }
            c if c.is_ascii_digit() => self.read_number(),
            c if is_ident_start(c) => Ok(self.read_identifier_or_keyword()),
            _ => Err(ExpressionError::UnexpectedToken {
                expected: "valid token".to_owned(),
                found: format!("'{ch}'"),
            }),
        }
    }

    fn read_expr_attr_name(&mut self) -> Result<Token, ExpressionError> {
        self.chars.next(); // consume '#'
        let name = self.read_ident_chars();
        if name.is_empty() {
            return Err(ExpressionError::UnexpectedToken {
                expected: "attribute name after '#'".to_owned(),
                found: "empty".to_owned(),
            });
        }
        Ok(Token::ExprAttrName(name))
    }

    fn read_expr_attr_value(&mut self) -> Result<Token, ExpressionError> {
        self.chars.next(); // consume ':'
        let name = self.read_ident_chars();
        if name.is_empty() {
            return Err(ExpressionError::UnexpectedToken {
                expected: "value name after ':'".to_owned(),
                found: "empty".to_owned(),
            });
        }
        Ok(Token::ExprAttrValue(name))
    }

    fn read_lt_family(&mut self) -> Token {
        self.chars.next(); // consume '<'
        if self.chars.peek() == Some(&'=') {
            self.chars.next();
            Token::Le
        } else if self.chars.peek() == Some(&'>') {
            self.chars.next();
            Token::Ne
        } else {
            Token::Lt
        }
    }

    fn read_gt_family(&mut self) -> Token {
        self.chars.next(); // consume '>'
        if self.chars.peek() == Some(&'=') {
            self.chars.next();
            Token::Ge
        } else {
            Token::Gt
        }
    }

    fn read_number(&mut self) -> Result<Token, ExpressionError> {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        let n: usize = s.parse().map_err(|_| ExpressionError::UnexpectedToken {
            expected: "list index".to_owned(),
            found: format!("'{s}'"),
        })?;
        Ok(Token::Number(n))
    }

    fn read_ident_chars(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_ident_continue(c) {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        s
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let ident = self.read_ident_chars();
        let lower = ident.to_ascii_lowercase();
        match lower.as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "between" => Token::Between,
            "in" => Token::In,
            "attribute_exists" => Token::AttributeExists,
            "attribute_not_exists" => Token::AttributeNotExists,
            "attribute_type" => Token::AttributeType,
            "begins_with" => Token::BeginsWith,
            "contains" => Token::Contains,
            "size" => Token::Size,
            _ => Token::Identifier(ident),
        }
    }
}

/// Returns `true` if `c` can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns `true` if `c` can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Minimum number of candidate values in an IN expression.
const MIN_IN_ARGUMENTS: usize = 2;

/// Maximum number of candidate values in an IN expression.
const MAX_IN_ARGUMENTS: usize = 100;

/// Recursive-descent parser for condition expressions.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<Token, ExpressionError> {
        let tok = self.advance();
        if std::mem::discriminant(&tok) == std::mem::discriminant(expected) {
            Ok(tok)
        } else {
            Err(ExpressionError::UnexpectedToken {
                expected: expected.to_string(),
                found: tok.to_string(),
            })
        }
    }

    fn at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }
}

// ---------------------------------------------------------------------------
// Condition expression parsing (precedence climbing)
// ---------------------------------------------------------------------------

impl Parser {
    /// Parse a full condition expression (OR is lowest precedence).
    fn parse_or_expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut left = self.parse_and_expr()?;
        while matches!(self.peek(), Token::Or) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse AND expressions.
    fn parse_and_expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut left = self.parse_not_expr()?;
        while matches!(self.peek(), Token::And) {
            self.advance();
            let right = self.parse_not_expr()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse NOT expressions.
    fn parse_not_expr(&mut self) -> Result<Expr, ExpressionError> {
        if matches!(self.peek(), Token::Not) {
            self.advance();
            let expr = self.parse_not_expr()?;
            return Ok(Expr::Not(Box::new(expr)));
        }
        self.parse_primary_expr()
    }

    /// Parse primary expressions: comparisons, BETWEEN, IN, functions, and parenthesized groups.
    fn parse_primary_expr(&mut self) -> Result<Expr, ExpressionError> {
        // Parenthesized group
        if matches!(self.peek(), Token::LParen) {
            self.advance();
            let expr = self.parse_or_expr()?;
            self.expect(&Token::RParen)?;
            return Ok(expr);
        }

        // Function call as expression (attribute_exists, attribute_not_exists, etc.)
        if let Some(func_name) = self.peek_function_name() {
            return self.parse_function_expr(func_name);
        }

        // Operand-initiated expressions (comparison, BETWEEN, IN)
        let operand = self.parse_operand()?;
        self.parse_postfix_expr(operand)
    }

    /// Check if current token is a condition function name, return the `FunctionName` if so.
    fn peek_function_name(&self) -> Option<FunctionName> {
        match self.peek() {
            Token::AttributeExists => Some(FunctionName::AttributeExists),
            Token::AttributeNotExists => Some(FunctionName::AttributeNotExists),
            Token::AttributeType => Some(FunctionName::AttributeType),
            Token::BeginsWith => Some(FunctionName::BeginsWith),
            Token::Contains => Some(FunctionName::Contains),
            _ => None,
        }
    }

    /// Parse a function expression like `attribute_exists(#name)`.
    fn parse_function_expr(&mut self, name: FunctionName) -> Result<Expr, ExpressionError> {
        self.advance(); // consume function name
        self.expect(&Token::LParen)?;
        let mut args = vec![self.parse_operand()?];
        while matches!(self.peek(), Token::Comma) {
            self.advance();
            args.push(self.parse_operand()?);
        }
        self.expect(&Token::RParen)?;
        Ok(Expr::Function { name, args })
    }

    /// After parsing a left operand, parse comparison, BETWEEN, or IN.
    fn parse_postfix_expr(&mut self, left: Operand) -> Result<Expr, ExpressionError> {
        match self.peek() {
            Token::Eq | Token::Ne | Token::Lt | Token::Le | Token::Gt | Token::Ge => {
                let op = self.parse_compare_op()?;
                let right = self.parse_operand()?;
                Ok(Expr::Compare {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                })
            }
            Token::Between => {
                self.advance();
                let low = self.parse_operand()?;
                self.expect(&Token::And)?;
                let high = self.parse_operand()?;
                Ok(Expr::Between {
                    value: Box::new(left),
                    low: Box::new(low),
                    high: Box::new(high),
                })
            }
            Token::In => {
                self.advance();
                self.expect(&Token::LParen)?;
                let mut list = vec![self.parse_operand()?];
                while matches!(self.peek(), Token::Comma) {
                    self.advance();
                    list.push(self.parse_operand()?);
                }
                self.expect(&Token::RParen)?;
                if list.len() < MIN_IN_ARGUMENTS {
                    return Err(ExpressionError::NotEnoughInArguments);
                }
                if list.len() > MAX_IN_ARGUMENTS {
                    return Err(ExpressionError::TooManyInArguments);
                }
                Ok(Expr::In {
                    value: Box::new(left),
                    list,
                })
            }
            _ => Err(ExpressionError::UnexpectedToken {
                expected: "comparison operator, BETWEEN, or IN".to_owned(),
                found: self.peek().to_string(),
            }),
        }
    }

    fn parse_compare_op(&mut self) -> Result<CompareOp, ExpressionError> {
        let tok = self.advance();
        match tok {
            Token::Eq => Ok(CompareOp::Eq),
            Token::Ne => Ok(CompareOp::Ne),
            Token::Lt => Ok(CompareOp::Lt),
            Token::Le => Ok(CompareOp::Le),
            Token::Gt => Ok(CompareOp::Gt),
            Token::Ge => Ok(CompareOp::Ge),
            _ => Err(ExpressionError::UnexpectedToken {
                expected: "comparison operator".to_owned(),
                found: tok.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Operand & path parsing
// ---------------------------------------------------------------------------

impl Parser {
    /// Parse an operand: a value reference, a `size(path)` call, or an attribute path.
    fn parse_operand(&mut self) -> Result<Operand, ExpressionError> {
        match self.peek() {
            Token::ExprAttrValue(_) => {
                let Token::ExprAttrValue(name) = self.advance() else {
                    return Err(ExpressionError::UnexpectedEof);
                };
                Ok(Operand::Value(name))
            }
            Token::Size => {
                self.advance();
                self.expect(&Token::LParen)?;
                let path = self.parse_attribute_path()?;
                self.expect(&Token::RParen)?;
                Ok(Operand::Size(path))
            }
            _ => {
                let path = self.parse_attribute_path()?;
                Ok(Operand::Path(path))
            }
        }
    }

    /// Parse an attribute path like `info.rating`, `#name`, `myList[0].value`.
    fn parse_attribute_path(&mut self) -> Result<AttributePath, ExpressionError> {
        let first = self.parse_path_head()?;
        let mut elements = vec![first];

        loop {
            match self.peek() {
                Token::Dot => {
                    self.advance();
                    let elem = self.parse_path_head()?;
                    elements.push(elem);
                }
                Token::LBracket => {
                    self.advance();
                    let Token::Number(idx) = self.advance() else {
                        return Err(ExpressionError::UnexpectedToken {
                            expected: "number".to_owned(),
                            found: "non-number".to_owned(),
                        });
                    };
                    self.expect(&Token::RBracket)?;
                    elements.push(PathElement::Index(idx));
                }
                _ => break,
            }
        }

        Ok(AttributePath { elements })
    }

    /// Parse the first element of a path segment (identifier or `#name`).
    ///
    /// Raw identifiers are checked against the reserved word list; `#name`
    /// placeholders carry the `#` prefix into the path for later resolution.
    fn parse_path_head(&mut self) -> Result<PathElement, ExpressionError> {
        match self.peek() {
            Token::Identifier(_) => {
                let Token::Identifier(name) = self.advance() else {
                    return Err(ExpressionError::UnexpectedEof);
                };
                if is_reserved_word(&name) {
                    return Err(ExpressionError::ReservedWord { word: name });
                }
                Ok(PathElement::Attribute(name))
            }
            Token::ExprAttrName(_) => {
                let Token::ExprAttrName(name) = self.advance() else {
                    return Err(ExpressionError::UnexpectedEof);
                };
                Ok(PathElement::Attribute(format!("#{name}")))
            }
            _ => Err(ExpressionError::UnexpectedToken {
                expected: "attribute name or #name".to_owned(),
                found: self.peek().to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Reserved words
// ---------------------------------------------------------------------------

/// Returns `true` if `name` matches a DynamoDB reserved word (case-insensitive).
fn is_reserved_word(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    RESERVED_WORDS.contains(&upper.as_str())
}

/// DynamoDB reserved words. Raw attribute names matching any of these must be
/// aliased through an expression attribute name placeholder.
static RESERVED_WORDS: &[&str] = &[
    "ABORT", "ABSOLUTE", "ACTION", "ADD", "AFTER", "AGENT", "AGGREGATE", "ALL", "ALLOCATE",
    "ALTER", "ANALYZE", "AND", "ANY", "ARCHIVE", "ARE", "ARRAY", "AS", "ASC", "ASCII",
    "ASENSITIVE", "ASSERTION", "ASYMMETRIC", "AT", "ATOMIC", "ATTACH", "ATTRIBUTE", "AUTH",
    "AUTHORIZATION", "AUTHORIZE", "AUTO", "AVG", "BACK", "BACKUP", "BASE", "BATCH", "BEFORE",
    "BEGIN", "BETWEEN", "BIGINT", "BINARY", "BIT", "BLOB", "BLOCK", "BOOLEAN", "BOTH", "BREADTH",
    "BUCKET", "BULK", "BY", "BYTE", "CALL", "CALLED", "CALLING", "CAPACITY", "CASCADE",
    "CASCADED", "CASE", "CAST", "CATALOG", "CHAR", "CHARACTER", "CHECK", "CLASS", "CLOB",
    "CLOSE", "CLUSTER", "CLUSTERED", "CLUSTERING", "CLUSTERS", "COLLATE", "COLLATION",
    "COLLECTION", "COLUMN", "COLUMNS", "COMBINE", "COMMENT", "COMMIT", "COMPACT", "COMPILE",
    "COMPRESS", "CONDITION", "CONFLICT", "CONNECT", "CONNECTION", "CONSISTENCY", "CONSISTENT",
    "CONSTRAINT", "CONSTRAINTS", "CONSTRUCTOR", "CONSUMED", "CONTINUE", "CONVERT", "COPY",
    "CORRESPONDING", "COUNT", "COUNTER", "CREATE", "CROSS", "CUBE", "CURRENT", "CURSOR",
    "CYCLE", "DATA", "DATABASE", "DATE", "DATETIME", "DAY", "DEALLOCATE", "DEC", "DECIMAL",
    "DECLARE", "DEFAULT", "DEFERRABLE", "DEFERRED", "DEFINE", "DEFINED", "DEFINITION", "DELETE",
    "DELIMITED", "DEPTH", "DEREF", "DESC", "DESCRIBE", "DESCRIPTOR", "DETACH", "DETERMINISTIC",
    "DIAGNOSTICS", "DIRECTORIES", "DISABLE", "DISCONNECT", "DISTINCT", "DISTRIBUTE", "DO",
    "DOMAIN", "DOUBLE", "DROP", "DUMP", "DURATION", "DYNAMIC", "EACH", "ELEMENT", "ELSE",
    "ELSEIF", "EMPTY", "ENABLE", "END", "EQUAL", "EQUALS", "ERROR", "ESCAPE", "ESCAPED", "EVAL",
    "EVALUATE", "EXCEEDED", "EXCEPT", "EXCEPTION", "EXCEPTIONS", "EXCLUSIVE", "EXEC", "EXECUTE",
    "EXISTS", "EXIT", "EXPLAIN", "EXPLODE", "EXPORT", "EXPRESSION", "EXTENDED", "EXTERNAL",
    "EXTRACT", "FAIL", "FALSE", "FAMILY", "FETCH", "FIELDS", "FILE", "FILTER", "FILTERING",
    "FINAL", "FINISH", "FIRST", "FIXED", "FLATTERN", "FLOAT", "FOR", "FORCE", "FOREIGN",
    "FORMAT", "FORWARD", "FOUND", "FREE", "FROM", "FULL", "FUNCTION", "FUNCTIONS", "GENERAL",
    "GENERATE", "GET", "GLOB", "GLOBAL", "GO", "GOTO", "GRANT", "GREATER", "GROUP", "GROUPING",
    "HANDLER", "HASH", "HAVE", "HAVING", "HEAP", "HIDDEN", "HOLD", "HOUR", "IDENTIFIED",
    "IDENTITY", "IF", "IGNORE", "IMMEDIATE", "IMPORT", "IN", "INCLUDING", "INCLUSIVE",
    "INCREMENT", "INCREMENTAL", "INDEX", "INDEXED", "INDEXES", "INDICATOR", "INFINITE",
    "INITIALLY", "INLINE", "INNER", "INNTER", "INOUT", "INPUT", "INSENSITIVE", "INSERT",
    "INSTEAD", "INT", "INTEGER", "INTERSECT", "INTERVAL", "INTO", "INVALIDATE", "IS",
    "ISOLATION", "ITEM", "ITEMS", "ITERATE", "JOIN", "KEY", "KEYS", "LAG", "LANGUAGE", "LARGE",
    "LAST", "LATERAL", "LEAD", "LEADING", "LEAVE", "LEFT", "LENGTH", "LESS", "LEVEL", "LIKE",
    "LIMIT", "LIMITED", "LINES", "LIST", "LOAD", "LOCAL", "LOCALTIME", "LOCALTIMESTAMP",
    "LOCATION", "LOCATOR", "LOCK", "LOCKS", "LOG", "LOGED", "LONG", "LOOP", "LOWER", "MAP",
    "MATCH", "MATERIALIZED", "MAX", "MAXLEN", "MEMBER", "MERGE", "METHOD", "METRICS", "MIN",
    "MINUS", "MINUTE", "MISSING", "MOD", "MODE", "MODIFIES", "MODIFY", "MODULE", "MONTH",
    "MULTI", "MULTISET", "NAME", "NAMES", "NATIONAL", "NATURAL", "NCHAR", "NCLOB", "NEW",
    "NEXT", "NO", "NONE", "NOT", "NULL", "NULLIF", "NUMBER", "NUMERIC", "OBJECT", "OF",
    "OFFLINE", "OFFSET", "OLD", "ON", "ONLINE", "ONLY", "OPAQUE", "OPEN", "OPERATOR", "OPTION",
    "OR", "ORDER", "ORDINALITY", "OTHER", "OTHERS", "OUT", "OUTER", "OUTPUT", "OVER",
    "OVERLAPS", "OVERRIDE", "OWNER", "PAD", "PARALLEL", "PARAMETER", "PARAMETERS", "PARTIAL",
    "PARTITION", "PARTITIONED", "PARTITIONS", "PATH", "PERCENT", "PERCENTILE", "PERMISSION",
    "PERMISSIONS", "PIPE", "PIPELINED", "PLAN", "POOL", "POSITION", "PRECISION", "PREPARE",
    "PRESERVE", "PRIMARY", "PRIOR", "PRIVATE", "PRIVILEGES", "PROCEDURE", "PROCESSED",
    "PROJECT", "PROJECTION", "PROPERTY", "PROVISIONING", "PUBLIC", "PUT", "QUERY", "QUIT",
    "QUORUM", "RAISE", "RANDOM", "RANGE", "RANK", "RAW", "READ", "READS", "REAL", "REBUILD",
    "RECORD", "RECURSIVE", "REDUCE", "REF", "REFERENCE", "REFERENCES", "REFERENCING", "REGEXP",
    "REGION", "REINDEX", "RELATIVE", "RELEASE", "REMAINDER", "RENAME", "REPEAT", "REPLACE",
    "REQUEST", "RESET", "RESIGNAL", "RESOURCE", "RESPONSE", "RESTORE", "RESTRICT", "RESULT",
    "RETURN", "RETURNING", "RETURNS", "REVERSE", "REVOKE", "RIGHT", "ROLE", "ROLES", "ROLLBACK",
    "ROLLUP", "ROUTINE", "ROW", "ROWS", "RULE", "RULES", "SAMPLE", "SATISFIES", "SAVE",
    "SAVEPOINT", "SCAN", "SCHEMA", "SCOPE", "SCROLL", "SEARCH", "SECOND", "SECTION", "SEGMENT",
    "SEGMENTS", "SELECT", "SELF", "SEMI", "SENSITIVE", "SEPARATE", "SEQUENCE", "SERIALIZABLE",
    "SESSION", "SET", "SETS", "SHARD", "SHARE", "SHARED", "SHORT", "SHOW", "SIGNAL", "SIMILAR",
    "SIZE", "SKEWED", "SMALLINT", "SNAPSHOT", "SOME", "SOURCE", "SPACE", "SPACES", "SPARSE",
    "SPECIFIC", "SPECIFICTYPE", "SPLIT", "SQL", "SQLCODE", "SQLERROR", "SQLEXCEPTION",
    "SQLSTATE", "SQLWARNING", "START", "STATE", "STATIC", "STATUS", "STORAGE", "STORE",
    "STORED", "STREAM", "STRING", "STRUCT", "STYLE", "SUB", "SUBMULTISET", "SUBPARTITION",
    "SUBSTRING", "SUBTYPE", "SUM", "SUPER", "SYMMETRIC", "SYNONYM", "SYSTEM", "TABLE",
    "TABLESAMPLE", "TEMP", "TEMPORARY", "TERMINATED", "TEXT", "THAN", "THEN", "THROUGHPUT",
    "TIME", "TIMESTAMP", "TIMEZONE", "TINYINT", "TO", "TOKEN", "TOTAL", "TOUCH", "TRAILING",
    "TRANSACTION", "TRANSFORM", "TRANSLATE", "TRANSLATION", "TREAT", "TRIGGER", "TRIM", "TRUE",
    "TRUNCATE", "TTL", "TUPLE", "TYPE", "UNDER", "UNDO", "UNION", "UNIQUE", "UNIT", "UNKNOWN",
    "UNLOGGED", "UNNEST", "UNPROCESSED", "UNSIGNED", "UNTIL", "UPDATE", "UPPER", "URL", "USAGE",
    "USE", "USER", "USERS", "USING", "UUID", "VACUUM", "VALUE", "VALUED", "VALUES", "VARCHAR",
    "VARIABLE", "VARIANCE", "VARINT", "VARYING", "VIEW", "VIEWS", "VIRTUAL", "VOID", "WAIT",
    "WHEN", "WHENEVER", "WHERE", "WHILE", "WINDOW", "WITH", "WITHIN", "WITHOUT", "WORK",
    "WRAPPED", "WRITE", "YEAR", "ZONE",
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a condition expression.
///
/// # Errors
///
/// Returns `ExpressionError` if the expression is syntactically invalid, names
/// a reserved word without a placeholder, or lists more than 100 IN candidates.
pub fn parse_condition(input: &str) -> Result<Expr, ExpressionError> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_or_expr()?;
    if !parser.at_end() {
        return Err(ExpressionError::UnexpectedToken {
            expected: "end of expression".to_owned(),
            found: parser.peek().to_string(),
        });
    }
    Ok(expr)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
