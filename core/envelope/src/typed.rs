//! Typed value classification and byte encoding.
//!
//! A value's semantic type is decided exactly once, at the API boundary,
//! by constructing a [`TypedValue`]. Everything deeper in the pipeline
//! matches on the closed enum instead of re-inferring types.

use serde_json::Value;
use std::fmt;

use sealpack_common::{Error, Result};

/// The closed set of semantic types an envelope can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Bool,
    Integer,
    Float,
    String,
    Bytes,
    Message,
}

impl SemanticType {
    /// The wire tag carried inside serialized envelopes.
    pub const fn tag(self) -> &'static str {
        match self {
            SemanticType::Bool => "bool",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Bytes => "bytes",
            SemanticType::Message => "message",
        }
    }

    /// Resolve a wire tag back to its type; `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bool" => Some(SemanticType::Bool),
            "integer" => Some(SemanticType::Integer),
            "float" => Some(SemanticType::Float),
            "string" => Some(SemanticType::String),
            "bytes" => Some(SemanticType::Bytes),
            "message" => Some(SemanticType::Message),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A value paired with its semantic type.
///
/// Decryption reconstructs the exact variant that was encrypted, including
/// the float/integer distinction and JSON structure for messages.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Message(Value),
}

impl TypedValue {
    /// The semantic type of this value.
    pub fn kind(&self) -> SemanticType {
        match self {
            TypedValue::Bool(_) => SemanticType::Bool,
            TypedValue::Integer(_) => SemanticType::Integer,
            TypedValue::Float(_) => SemanticType::Float,
            TypedValue::String(_) => SemanticType::String,
            TypedValue::Bytes(_) => SemanticType::Bytes,
            TypedValue::Message(_) => SemanticType::Message,
        }
    }

    /// Classify a JSON value.
    ///
    /// Numbers with no fractional part that fit in an `i64` classify as
    /// integers regardless of how the parser stored them (`4.0` parses to
    /// a float-backed number but classifies as integer 4); everything else
    /// numeric is a float. Arrays and objects become messages. Binary data
    /// has no JSON shape and enters through [`TypedValue::Bytes`] directly.
    ///
    /// # Errors
    /// - [`Error::NullValue`] for JSON null: there is nothing to encrypt
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::NullValue),
            Value::Bool(b) => Ok(TypedValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(TypedValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    // i64::MAX as f64 rounds up to 2^63, which overflows,
                    // so the upper bound is exclusive.
                    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                        Ok(TypedValue::Integer(f as i64))
                    } else {
                        Ok(TypedValue::Float(f))
                    }
                } else {
                    Err(Error::InvalidInput(format!(
                        "number {} is not representable",
                        n
                    )))
                }
            }
            Value::String(s) => Ok(TypedValue::String(s)),
            value @ (Value::Array(_) | Value::Object(_)) => Ok(TypedValue::Message(value)),
        }
    }

    /// Canonical byte encoding for this value's type.
    ///
    /// Booleans render as the literal text `true`/`false`, numbers as
    /// decimal text (shortest round-tripping form for floats), strings as
    /// UTF-8, bytes as themselves, and messages as JSON text.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(match self {
            TypedValue::Bool(true) => b"true".to_vec(),
            TypedValue::Bool(false) => b"false".to_vec(),
            TypedValue::Integer(i) => i.to_string().into_bytes(),
            TypedValue::Float(f) => f.to_string().into_bytes(),
            TypedValue::String(s) => s.as_bytes().to_vec(),
            TypedValue::Bytes(b) => b.clone(),
            TypedValue::Message(v) => serde_json::to_vec(v)
                .map_err(|e| Error::MalformedMessage(e.to_string()))?,
        })
    }

    /// Decode canonical bytes back into a value of the given type.
    ///
    /// # Errors
    /// - [`Error::MalformedMessage`] for invalid JSON in a message payload
    /// - [`Error::EnvelopeDecode`] for text payloads that fail exact
    ///   parsing for their type
    pub fn decode(kind: SemanticType, data: &[u8]) -> Result<Self> {
        match kind {
            SemanticType::Bool => {
                let text = utf8(data)?;
                if text.eq_ignore_ascii_case("true") {
                    Ok(TypedValue::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(TypedValue::Bool(false))
                } else {
                    Err(Error::EnvelopeDecode(format!(
                        "`{}` is not a boolean rendering",
                        text
                    )))
                }
            }
            SemanticType::Integer => {
                let text = utf8(data)?;
                text.parse::<i64>().map(TypedValue::Integer).map_err(|e| {
                    Error::EnvelopeDecode(format!("`{}` is not an integer: {}", text, e))
                })
            }
            SemanticType::Float => {
                let text = utf8(data)?;
                text.parse::<f64>().map(TypedValue::Float).map_err(|e| {
                    Error::EnvelopeDecode(format!("`{}` is not a float: {}", text, e))
                })
            }
            SemanticType::String => Ok(TypedValue::String(utf8(data)?.to_string())),
            SemanticType::Bytes => Ok(TypedValue::Bytes(data.to_vec())),
            SemanticType::Message => serde_json::from_slice(data)
                .map(TypedValue::Message)
                .map_err(|e| Error::MalformedMessage(e.to_string())),
        }
    }
}

fn utf8(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data)
        .map_err(|e| Error::EnvelopeDecode(format!("payload is not valid UTF-8: {}", e)))
}

impl From<bool> for TypedValue {
    fn from(v: bool) -> Self {
        TypedValue::Bool(v)
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Integer(v)
    }
}

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Float(v)
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::String(v.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::String(v)
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(v: Vec<u8>) -> Self {
        TypedValue::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_rules() {
        assert_eq!(
            TypedValue::from_json(json!(true)).unwrap().kind(),
            SemanticType::Bool
        );
        assert_eq!(
            TypedValue::from_json(json!(4)).unwrap().kind(),
            SemanticType::Integer
        );
        assert_eq!(
            TypedValue::from_json(json!(4.00000002)).unwrap().kind(),
            SemanticType::Float
        );
        assert_eq!(
            TypedValue::from_json(json!("text")).unwrap().kind(),
            SemanticType::String
        );
        assert_eq!(
            TypedValue::from_json(json!({ "foo": "bar" })).unwrap().kind(),
            SemanticType::Message
        );
        assert_eq!(
            TypedValue::from_json(json!([1, 2, 3])).unwrap().kind(),
            SemanticType::Message
        );
    }

    #[test]
    fn test_integral_float_classifies_as_integer() {
        // Parsed "4.0" is stored float-backed; classification must look at
        // the value, not the storage.
        let parsed: Value = serde_json::from_str("4.0").unwrap();
        assert_eq!(
            TypedValue::from_json(parsed).unwrap(),
            TypedValue::Integer(4)
        );

        let negative: Value = serde_json::from_str("-12.0").unwrap();
        assert_eq!(
            TypedValue::from_json(negative).unwrap(),
            TypedValue::Integer(-12)
        );

        // Integral but far outside i64 stays a float.
        let huge: Value = serde_json::from_str("1e300").unwrap();
        assert_eq!(
            TypedValue::from_json(huge).unwrap().kind(),
            SemanticType::Float
        );
    }

    #[test]
    fn test_null_is_rejected() {
        assert!(matches!(
            TypedValue::from_json(Value::Null),
            Err(Error::NullValue)
        ));
    }

    #[test]
    fn test_bool_encoding_is_literal_text() {
        assert_eq!(TypedValue::Bool(true).encode().unwrap(), b"true");
        assert_eq!(TypedValue::Bool(false).encode().unwrap(), b"false");
    }

    #[test]
    fn test_numeric_encoding_roundtrip() {
        for value in [0i64, 4, -17, i64::MAX, i64::MIN] {
            let encoded = TypedValue::Integer(value).encode().unwrap();
            let decoded = TypedValue::decode(SemanticType::Integer, &encoded).unwrap();
            assert_eq!(decoded, TypedValue::Integer(value));
        }

        for value in [4.00000002f64, -0.5, 1e300, f64::MIN_POSITIVE] {
            let encoded = TypedValue::Float(value).encode().unwrap();
            let decoded = TypedValue::decode(SemanticType::Float, &encoded).unwrap();
            // Bit-exact float recovery.
            match decoded {
                TypedValue::Float(f) => assert_eq!(f.to_bits(), value.to_bits()),
                other => panic!("decoded {:?}", other),
            }
        }
    }

    #[test]
    fn test_bytes_encoding_is_identity() {
        let data = vec![0u8, 255, 124, 1, b'|'];
        let value = TypedValue::Bytes(data.clone());
        assert_eq!(value.encode().unwrap(), data);
    }

    #[test]
    fn test_message_roundtrip_preserves_structure() {
        let message = json!({ "foo": "bar ", "nested": [1, 2.5, null] });
        let value = TypedValue::Message(message.clone());

        let encoded = value.encode().unwrap();
        let decoded = TypedValue::decode(SemanticType::Message, &encoded).unwrap();
        assert_eq!(decoded, TypedValue::Message(message));
    }

    #[test]
    fn test_malformed_message_json() {
        let result = TypedValue::decode(SemanticType::Message, b"{ not json");
        assert!(matches!(result, Err(Error::MalformedMessage(_))));
    }

    #[test]
    fn test_bad_numeric_text() {
        assert!(matches!(
            TypedValue::decode(SemanticType::Integer, b"4.5"),
            Err(Error::EnvelopeDecode(_))
        ));
        assert!(matches!(
            TypedValue::decode(SemanticType::Bool, b"yes"),
            Err(Error::EnvelopeDecode(_))
        ));
    }
}
