//! Scalar values used as statement parameters and row cells.
//!
//! [`Value`] is engine-agnostic. The Postgres engine binds it through
//! [`ToSql`] and decodes result cells through [`FromSql`]; the conversion picks
//! the wire encoding from the column type the server reports, so an
//! `Int(i64)` can be bound to an `int2`, `int4` or `int8` parameter.

use crate::error::{BeeError, BeeResult};
use bytes::BytesMut;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};

/// A scalar SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ==================== Postgres binding ====================

/// Encode `value` as `ty`, refusing types the inner Rust type cannot represent.
fn encode<T: ToSql>(
    value: T,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if !T::accepts(ty) {
        return Err(format!("cannot bind {} to a {} parameter", std::any::type_name::<T>(), ty).into());
    }
    value.to_sql(ty, out)
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => encode(*b, ty, out),
            Value::Int(i) => match *ty {
                Type::INT2 => encode(i16::try_from(*i)?, ty, out),
                Type::INT4 => encode(i32::try_from(*i)?, ty, out),
                Type::FLOAT4 => encode(*i as f32, ty, out),
                Type::FLOAT8 => encode(*i as f64, ty, out),
                _ => encode(*i, ty, out),
            },
            Value::Float(x) => match *ty {
                Type::FLOAT4 => encode(*x as f32, ty, out),
                _ => encode(*x, ty, out),
            },
            Value::Text(s) => encode(s.as_str(), ty, out),
            Value::Bytes(b) => encode(b.as_slice(), ty, out),
        }
    }

    // Type compatibility is checked per variant in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

impl<'a> FromSql<'a> for Value {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        match *ty {
            Type::BOOL => Ok(Value::Bool(bool::from_sql(ty, raw)?)),
            Type::INT2 => Ok(Value::Int(i64::from(i16::from_sql(ty, raw)?))),
            Type::INT4 => Ok(Value::Int(i64::from(i32::from_sql(ty, raw)?))),
            Type::INT8 => Ok(Value::Int(i64::from_sql(ty, raw)?)),
            Type::OID => Ok(Value::Int(i64::from(u32::from_sql(ty, raw)?))),
            Type::FLOAT4 => Ok(Value::Float(f64::from(f32::from_sql(ty, raw)?))),
            Type::FLOAT8 => Ok(Value::Float(f64::from_sql(ty, raw)?)),
            Type::BYTEA => Ok(Value::Bytes(Vec::<u8>::from_sql(ty, raw)?)),
            _ if <&str as FromSql>::accepts(ty) => Ok(Value::Text(String::from_sql(ty, raw)?)),
            _ => Err(format!("unsupported column type: {ty}").into()),
        }
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(Value::Null)
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::OID
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::BYTEA
        ) || <&str as FromSql>::accepts(ty)
    }
}

// ==================== Typed extraction ====================

/// Conversion from a decoded [`Value`] into a Rust type.
pub trait FromValue: Sized {
    /// `column` is only used for error reporting.
    fn from_value(column: &str, value: &Value) -> BeeResult<Self>;
}

fn mismatch(column: &str, expected: &str, value: &Value) -> BeeError {
    BeeError::decode(column, format!("expected {expected}, got {}", value.type_name()))
}

impl FromValue for Value {
    fn from_value(_column: &str, value: &Value) -> BeeResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        value.as_i64().ok_or_else(|| mismatch(column, "int", value))
    }
}

impl FromValue for i32 {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        let v = i64::from_value(column, value)?;
        i32::try_from(v).map_err(|e| BeeError::decode(column, e.to_string()))
    }
}

impl FromValue for f64 {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        value.as_f64().ok_or_else(|| mismatch(column, "float", value))
    }
}

impl FromValue for bool {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        value.as_bool().ok_or_else(|| mismatch(column, "bool", value))
    }
}

impl FromValue for String {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(column, "text", value))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch(column, "bytes", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: &Value) -> BeeResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(column, value).map(Some)
        }
    }
}
