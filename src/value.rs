//! DynamoDB `AttributeValue` type with custom serialization and the typed
//! value operations (comparison, containment, size) used by condition
//! expressions.
//!
//! `AttributeValue` is a tagged union where exactly one variant is present.
//! The JSON wire format uses single-key objects like `{"S": "hello"}`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::expression::ast::CompareOp;
use crate::expression::parser::ExpressionError;

/// A map of attribute names to values: the representation of a stored item
/// and of the `Item`/`Key` request fields.
pub type Item = HashMap<String, AttributeValue>;

/// DynamoDB attribute value.
///
/// Represented as a tagged union where exactly one variant is present.
/// Numbers are always string-encoded to preserve arbitrary precision.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (string-encoded for arbitrary precision).
    N(String),
    /// Binary value (base64-encoded in JSON).
    B(bytes::Bytes),
    /// String Set.
    Ss(Vec<String>),
    /// Number Set (string-encoded).
    Ns(Vec<String>),
    /// Binary Set (base64-encoded in JSON).
    Bs(Vec<bytes::Bytes>),
    /// Boolean value.
    Bool(bool),
    /// Null value.
    Null(bool),
    /// List of attribute values.
    L(Vec<AttributeValue>),
    /// Map of attribute values.
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns the string value if this is an `S` variant.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number string if this is an `N` variant.
    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the map if this is an `M` variant.
    #[must_use]
    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            Self::M(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the list if this is an `L` variant.
    #[must_use]
    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::L(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the DynamoDB type descriptor string (e.g., "S", "N", "BOOL").
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl Eq for AttributeValue {}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::B(b) => write!(f, "{{B: {} bytes}}", b.len()),
            Self::Ss(v) => write!(f, "{{SS: {v:?}}}"),
            Self::Ns(v) => write!(f, "{{NS: {v:?}}}"),
            Self::Bs(v) => write!(f, "{{BS: {} items}}", v.len()),
            Self::Bool(b) => write!(f, "{{BOOL: {b}}}"),
            Self::Null(b) => write!(f, "{{NULL: {b}}}"),
            Self::L(v) => write!(f, "{{L: {} items}}", v.len()),
            Self::M(m) => write!(f, "{{M: {} keys}}", m.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed operations
// ---------------------------------------------------------------------------

/// Parse a DynamoDB number string as an arbitrary-precision decimal.
///
/// Accepts plain decimal notation and scientific notation (`1.5E+3`).
pub(crate) fn parse_number(s: &str) -> Result<Decimal, ExpressionError> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ExpressionError::MalformedNumber {
            text: s.to_owned(),
        })
}

/// Compare two attribute values under a comparison operator.
///
/// Both operands must have the same type. Strings and binary values compare
/// byte-wise; numbers compare by decimal value; booleans support only `=` and
/// `<>`. Sets, lists, maps, and nulls are not comparable.
pub fn compare_values(
    left: &AttributeValue,
    op: CompareOp,
    right: &AttributeValue,
) -> Result<bool, ExpressionError> {
    let lt = left.type_descriptor();
    let rt = right.type_descriptor();
    if lt != rt {
        return Err(ExpressionError::TypeMismatch {
            message: format!("type mismatch: {lt} {op} {rt}"),
        });
    }

    match (left, right) {
        (AttributeValue::S(a), AttributeValue::S(b)) => Ok(op.test(a.as_bytes().cmp(b.as_bytes()))),
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            let da = parse_number(a)?;
            let db = parse_number(b)?;
            Ok(op.test(da.cmp(&db)))
        }
        (AttributeValue::B(a), AttributeValue::B(b)) => Ok(op.test(a.as_ref().cmp(b.as_ref()))),
        (AttributeValue::Bool(a), AttributeValue::Bool(b)) => match op {
            CompareOp::Eq => Ok(a == b),
            CompareOp::Ne => Ok(a != b),
            _ => Err(ExpressionError::TypeMismatch {
                message: format!("invalid comparison of booleans: {op}"),
            }),
        },
        (AttributeValue::Null(_), AttributeValue::Null(_)) => Err(ExpressionError::TypeMismatch {
            message: "comparing NULL values is not supported".to_owned(),
        }),
        _ => Err(ExpressionError::TypeMismatch {
            message: format!("cannot compare values of type {lt}"),
        }),
    }
}

/// Test whether `haystack` contains `needle`.
///
/// Legal combinations: substring search on strings, membership on the three
/// set types, and element search in lists for scalar needles. Number-set
/// membership compares the textual representation, so `"1"` and `"1.0"` are
/// distinct.
pub fn contains_value(
    haystack: &AttributeValue,
    needle: &AttributeValue,
) -> Result<bool, ExpressionError> {
    match (haystack, needle) {
        (AttributeValue::S(s), AttributeValue::S(sub)) => Ok(s.contains(sub.as_str())),
        (AttributeValue::Ss(set), AttributeValue::S(v))
        | (AttributeValue::Ns(set), AttributeValue::N(v)) => Ok(set.iter().any(|e| e == v)),
        (AttributeValue::Bs(set), AttributeValue::B(v)) => Ok(set.iter().any(|e| e == v)),
        (AttributeValue::L(list), AttributeValue::S(v)) => Ok(list
            .iter()
            .any(|e| matches!(e, AttributeValue::S(s) if s == v))),
        (AttributeValue::L(list), AttributeValue::N(v)) => Ok(list
            .iter()
            .any(|e| matches!(e, AttributeValue::N(n) if n == v))),
        (AttributeValue::L(list), AttributeValue::B(v)) => Ok(list
            .iter()
            .any(|e| matches!(e, AttributeValue::B(b) if b == v))),
        (AttributeValue::L(list), AttributeValue::Bool(v)) => Ok(list
            .iter()
            .any(|e| matches!(e, AttributeValue::Bool(b) if b == v))),
        // A NULL needle matches any NULL element, regardless of its flag.
        (AttributeValue::L(list), AttributeValue::Null(_)) => {
            Ok(list.iter().any(|e| matches!(e, AttributeValue::Null(_))))
        }
        _ => Err(ExpressionError::TypeMismatch {
            message: format!(
                "invalid types for contains ({}, {})",
                haystack.type_descriptor(),
                needle.type_descriptor()
            ),
        }),
    }
}

/// Compute the size of an attribute value: byte length for strings and
/// binary, element count for sets, lists, and maps.
pub fn size_of(value: &AttributeValue) -> Result<usize, ExpressionError> {
    match value {
        AttributeValue::S(s) => Ok(s.len()),
        AttributeValue::B(b) => Ok(b.len()),
        AttributeValue::Ss(v) | AttributeValue::Ns(v) => Ok(v.len()),
        AttributeValue::Bs(v) => Ok(v.len()),
        AttributeValue::L(v) => Ok(v.len()),
        AttributeValue::M(m) => Ok(m.len()),
        other => Err(ExpressionError::TypeMismatch {
            message: format!("invalid type for size operator: {}", other.type_descriptor()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::B(b) => {
                use base64::Engine;
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                map.serialize_entry("B", &encoded)?;
            }
            Self::Ss(v) => map.serialize_entry("SS", v)?,
            Self::Ns(v) => map.serialize_entry("NS", v)?,
            Self::Bs(v) => {
                use base64::Engine;
                let encoded: Vec<String> = v
                    .iter()
                    .map(|b| base64::engine::general_purpose::STANDARD.encode(b))
                    .collect();
                map.serialize_entry("BS", &encoded)?;
            }
            Self::Bool(b) => map.serialize_entry("BOOL", b)?,
            Self::Null(b) => map.serialize_entry("NULL", b)?,
            Self::L(list) => map.serialize_entry("L", list)?,
            Self::M(m) => map.serialize_entry("M", m)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a DynamoDB AttributeValue object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom(
                "AttributeValue must have exactly one key",
            ));
        };

        let value = match key.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "B" => {
                use base64::Engine;
                let encoded: String = map.next_value()?;
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(&encoded)
                    .map_err(de::Error::custom)?;
                AttributeValue::B(bytes::Bytes::from(decoded))
            }
            "SS" => AttributeValue::Ss(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "BS" => {
                use base64::Engine;
                let encoded: Vec<String> = map.next_value()?;
                let decoded: Result<Vec<bytes::Bytes>, _> = encoded
                    .iter()
                    .map(|e| {
                        base64::engine::general_purpose::STANDARD
                            .decode(e)
                            .map(bytes::Bytes::from)
                    })
                    .collect();
                AttributeValue::Bs(decoded.map_err(de::Error::custom)?)
            }
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            other => {
                return Err(de::Error::unknown_field(
                    other,
                    &["S", "N", "B", "SS", "NS", "BS", "BOOL", "NULL", "L", "M"],
                ));
            }
        };

        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "AttributeValue must have exactly one key",
            ));
        }

        Ok(value)
    }
}
