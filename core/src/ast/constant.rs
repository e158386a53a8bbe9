//! Literal payload of a `Constant` node.
//!
//! JSON scalars map onto the obvious variants; byte strings arrive as
//! `{"bytes": [..]}`, tuples as arrays and complex numbers as
//! `{"class": "complex", "real": .., "imag": ..}`.
//!
//! Integers are unbounded in the source language, so they are kept as
//! their decimal digits rather than narrowed to a machine integer. The
//! payload goes through `serde_json::Value` because numbers outside the
//! 64-bit range only survive buffering (flattened and tagged nodes) in
//! that form.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    None,
    Bool(bool),
    /// Decimal digits, with a leading `-` when negative.
    Int(String),
    Float(f64),
    Str(String),
    Bytes { bytes: Vec<u8> },
    Complex { real: f64, imag: f64 },
    Tuple(Vec<Constant>),
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl Constant {
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Constant::None),
            Value::Bool(b) => Ok(Constant::Bool(b)),
            Value::Number(n) => {
                let text = n.to_string();
                if is_integer_text(&text) {
                    Ok(Constant::Int(text))
                } else {
                    n.as_f64()
                        .map(Constant::Float)
                        .ok_or_else(|| format!("number {text} is out of range"))
                }
            }
            Value::String(s) => Ok(Constant::Str(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Constant::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Constant::Tuple),
            Value::Object(map) => Self::from_object(map),
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, String> {
        if let Some(bytes) = map.get("bytes") {
            let bytes = bytes
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                        .collect::<Option<Vec<u8>>>()
                })
                .ok_or("`bytes` must be an array of byte values")?;
            return Ok(Constant::Bytes { bytes });
        }
        if map.get("class").and_then(Value::as_str) == Some("complex") {
            let part = |key: &str| {
                map.get(key)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| format!("complex constant without a numeric `{key}`"))
            };
            return Ok(Constant::Complex {
                real: part("real")?,
                imag: part("imag")?,
            });
        }
        Err("unrecognized constant object".to_string())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Constant::None => Value::Null,
            Constant::Bool(b) => Value::Bool(*b),
            Constant::Int(digits) => digits
                .parse::<Number>()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(digits.clone())),
            Constant::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Constant::Str(s) => Value::String(s.clone()),
            Constant::Bytes { bytes } => {
                let bytes = bytes.iter().map(|b| Value::from(*b)).collect();
                let mut map = Map::new();
                map.insert("bytes".into(), Value::Array(bytes));
                Value::Object(map)
            }
            Constant::Complex { real, imag } => {
                let mut map = Map::new();
                map.insert("class".into(), Value::from("complex"));
                map.insert("real".into(), Value::from(*real));
                map.insert("imag".into(), Value::from(*imag));
                Value::Object(map)
            }
            Constant::Tuple(items) => Value::Array(items.iter().map(Constant::to_value).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for Constant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Constant::from_value(value).map_err(D::Error::custom)
    }
}

impl Serialize for Constant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
