use nix::unistd::{Gid, Uid};

use crate::transform::{self, TransformError};

// ============================================================================
// Kind: slot type and its transformer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The argument text, unchanged.
    Text,
    /// Signed 64-bit with `k`/`M`/`G`/`T` suffixes.
    Int64,
    /// Unsigned 64-bit with `k`/`M`/`G`/`T` suffixes.
    Uint64,
    /// Decimal `int`.
    Int,
    Uid,
    Gid,
}

impl Kind {
    /// Convert argument text into a value of this kind.
    pub fn transform(self, input: &str) -> Result<Value, TransformError> {
        Ok(match self {
            Kind::Text => Value::Text(input.to_string()),
            Kind::Int64 => Value::Int64(transform::int64(input)?),
            Kind::Uint64 => Value::Uint64(transform::uint64(input)?),
            Kind::Int => Value::Int(transform::int(input)?),
            Kind::Uid => Value::Uid(transform::uid(input)?),
            Kind::Gid => Value::Gid(transform::gid(input)?),
        })
    }
}

// ============================================================================
// Value
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int64(i64),
    Uint64(u64),
    Int(i32),
    Uid(Uid),
    Gid(Gid),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Int64(_) => Kind::Int64,
            Value::Uint64(_) => Kind::Uint64,
            Value::Int(_) => Kind::Int,
            Value::Uid(_) => Kind::Uid,
            Value::Gid(_) => Kind::Gid,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<Uid> for Value {
    fn from(id: Uid) -> Self {
        Value::Uid(id)
    }
}

impl From<Gid> for Value {
    fn from(id: Gid) -> Self {
        Value::Gid(id)
    }
}

// ============================================================================
// Typed retrieval
// ============================================================================

/// Conversion out of a stored [`Value`]; `None` on a kind mismatch.
pub trait FromValue: Sized {
    fn from_value(v: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(v: &Value) -> Option<Self> {
        v.as_text().map(str::to_string)
    }
}

impl FromValue for i64 {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Int64(n) => Some(*n),
            Value::Int(n) => Some(i64::from(*n)),
            _ => None,
        }
    }
}

impl FromValue for u64 {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Uint64(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for Uid {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Uid(id) => Some(*id),
            _ => None,
        }
    }
}

impl FromValue for Gid {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Gid(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_selects_transformer() {
        assert_eq!(Kind::Text.transform("4k"), Ok(Value::Text("4k".to_string())));
        assert_eq!(Kind::Int64.transform("4k"), Ok(Value::Int64(4096)));
        assert_eq!(Kind::Uint64.transform("4k"), Ok(Value::Uint64(4096)));
        assert_eq!(Kind::Uid.transform("0"), Ok(Value::Uid(Uid::from_raw(0))));
        assert!(Kind::Int.transform("4k").is_err());
    }

    #[test]
    fn text_kind_keeps_empty_string() {
        assert_eq!(Kind::Text.transform(""), Ok(Value::Text(String::new())));
    }

    #[test]
    fn value_reports_its_kind() {
        for kind in [Kind::Text, Kind::Int64, Kind::Uint64, Kind::Int, Kind::Uid, Kind::Gid] {
            let v = kind.transform("7").unwrap();
            assert_eq!(v.kind(), kind);
        }
    }

    #[test]
    fn typed_retrieval_checks_kind() {
        assert_eq!(u64::from_value(&Value::Uint64(3)), Some(3));
        assert_eq!(u64::from_value(&Value::Int64(3)), None);
        assert_eq!(i64::from_value(&Value::Int(-2)), Some(-2));
        assert_eq!(String::from_value(&Value::from("x")), Some("x".to_string()));
        assert_eq!(String::from_value(&Value::Int(1)), None);
        assert_eq!(Gid::from_value(&Value::Gid(Gid::from_raw(5))), Some(Gid::from_raw(5)));
    }
}
