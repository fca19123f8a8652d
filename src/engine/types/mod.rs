mod value_codec;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use value_codec::{append_payload, read_payload};


/// Physical type of a column. The discriminant doubles as the wire tag of a
/// marshalled [`Value`]; tag 0 is reserved for null.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int64 = 1,
    Uint64 = 2,
    Float64 = 3,
    Bool = 4,
    ByteArray = 5,
}

impl ValueType {
    pub const NULL_TAG: u8 = 0;

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Int64 => "int64",
            ValueType::Uint64 => "uint64",
            ValueType::Float64 => "float64",
            ValueType::Bool => "bool",
            ValueType::ByteArray => "byte_array",
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(ValueType::Int64),
            2 => Some(ValueType::Uint64),
            3 => Some(ValueType::Float64),
            4 => Some(ValueType::Bool),
            5 => Some(ValueType::ByteArray),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ValueType::Int64 | ValueType::Uint64)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int64" | "int" | "integer" => Ok(ValueType::Int64),
            "uint64" | "uint" => Ok(ValueType::Uint64),
            "float64" | "float" => Ok(ValueType::Float64),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "byte_array" | "bytes" | "string" => Ok(ValueType::ByteArray),
            other => Err(format!("unknown value type: {other}")),
        }
    }
}

/// A single nullable cell of a column.
///
/// `Null` marks a row that received no data. A non-null value whose payload is
/// the zero of its type (see [`Value::is_zero_payload`]) is kept distinct from
/// `Null`: both are left out of statistics, but they decode differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    ByteArray(Vec<u8>),
}

impl Value {
    /// The zero value of `ty`, which is what a zero row decodes to.
    pub fn zero(ty: ValueType) -> Self {
        match ty {
            ValueType::Int64 => Value::Int64(0),
            ValueType::Uint64 => Value::Uint64(0),
            ValueType::Float64 => Value::Float64(0.0),
            ValueType::Bool => Value::Bool(false),
            ValueType::ByteArray => Value::ByteArray(Vec::new()),
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Int64(_) => Some(ValueType::Int64),
            Value::Uint64(_) => Some(ValueType::Uint64),
            Value::Float64(_) => Some(ValueType::Float64),
            Value::Bool(_) => Some(ValueType::Bool),
            Value::ByteArray(_) => Some(ValueType::ByteArray),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for an explicitly written zero payload. Always false for `Null`.
    pub fn is_zero_payload(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int64(v) => *v == 0,
            Value::Uint64(v) => *v == 0,
            // Only +0.0; -0.0 keeps its sign bit as a present value.
            Value::Float64(v) => v.to_bits() == 0,
            Value::Bool(v) => !*v,
            Value::ByteArray(b) => b.is_empty(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteArray(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Size used by page size estimation: the raw payload width, not the encoded
    /// width.
    pub fn payload_size(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Int64(_) | Value::Uint64(_) | Value::Float64(_) => 8,
            Value::Bool(_) => 1,
            Value::ByteArray(b) => b.len(),
        }
    }

    /// Natural ordering within one type. Returns `None` when the types differ or
    /// either side is null.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Uint64(a), Value::Uint64(b)) => Some(a.cmp(b)),
            (Value::Float64(a), Value::Float64(b)) => Some(a.total_cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::ByteArray(a), Value::ByteArray(b)) => Some(a.as_slice().cmp(b.as_slice())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::ByteArray(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::ByteArray(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::ByteArray(v.to_vec())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::ByteArray(v.as_bytes().to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
