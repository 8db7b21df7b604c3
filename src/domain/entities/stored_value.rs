//! Stored value entity and the byte-level decoders used on read.

use std::fmt;

/// A value accepted by the object cache.
///
/// Values are written to the store in their natural byte encoding: UTF-8 for
/// text, raw bytes for blobs, and decimal ASCII for numbers. Reading a key
/// back always yields bytes; callers choose a decoder to recover the type.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl StoredValue {
    /// Returns the bytes written to the store for this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Int(n) => n.to_string().into_bytes(),
            Self::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }

    /// Returns the literal form used when recording call arguments.
    ///
    /// Text is quoted with escapes, bytes are rendered as `b"..."` with ASCII
    /// escapes, numbers are written in decimal.
    pub fn repr(&self) -> String {
        match self {
            Self::Text(text) => format!("{:?}", text),
            Self::Bytes(bytes) => format!("b\"{}\"", bytes.escape_ascii()),
            Self::Int(n) => n.to_string(),
            Self::Float(x) => format!("{:?}", x),
        }
    }

    /// Short type label for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Errors raised when retrieved bytes cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Value is not valid UTF-8: {0}")]
    Utf8(String),

    #[error("Value is not an integer: {0:?}")]
    Int(String),

    #[error("Value is not a float: {0:?}")]
    Float(String),
}

/// Decodes raw bytes as UTF-8 text.
///
/// # Errors
///
/// Returns [`DecodeError::Utf8`] if the bytes are not valid UTF-8.
pub fn decode_str(bytes: Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(bytes).map_err(|e| DecodeError::Utf8(e.utf8_error().to_string()))
}

/// Parses raw bytes as a decimal integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`DecodeError::Int`] if the bytes are not a valid `i64`.
pub fn decode_int(bytes: Vec<u8>) -> Result<i64, DecodeError> {
    let text = String::from_utf8_lossy(&bytes);
    text.trim()
        .parse::<i64>()
        .map_err(|_| DecodeError::Int(text.into_owned()))
}

/// Parses raw bytes as a floating-point number, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`DecodeError::Float`] if the bytes are not a valid `f64`.
pub fn decode_float(bytes: Vec<u8>) -> Result<f64, DecodeError> {
    let text = String::from_utf8_lossy(&bytes);
    text.trim()
        .parse::<f64>()
        .map_err(|_| DecodeError::Float(text.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_uses_natural_encoding() {
        assert_eq!(StoredValue::from("hello").to_bytes(), b"hello");
        assert_eq!(StoredValue::from(vec![0u8, 255]).to_bytes(), vec![0u8, 255]);
        assert_eq!(StoredValue::from(-42i64).to_bytes(), b"-42");
        assert_eq!(StoredValue::from(1.0f64).to_bytes(), b"1.0");
    }

    #[test]
    fn test_repr() {
        assert_eq!(StoredValue::from("first").repr(), "\"first\"");
        assert_eq!(StoredValue::from("say \"hi\"").repr(), "\"say \\\"hi\\\"\"");
        assert_eq!(StoredValue::from(b"a\x00".as_slice()).repr(), "b\"a\\x00\"");
        assert_eq!(StoredValue::from(7i64).repr(), "7");
        assert_eq!(StoredValue::from(2.5f64).repr(), "2.5");
    }

    #[test]
    fn test_decode_str() {
        assert_eq!(decode_str(b"caf\xc3\xa9".to_vec()).unwrap(), "café");
        assert!(matches!(
            decode_str(vec![0xff, 0xfe]),
            Err(DecodeError::Utf8(_))
        ));
    }

    #[test]
    fn test_decode_int() {
        assert_eq!(decode_int(b"123".to_vec()).unwrap(), 123);
        assert_eq!(decode_int(b" -5\n".to_vec()).unwrap(), -5);
        assert_eq!(
            decode_int(b"abc".to_vec()),
            Err(DecodeError::Int("abc".to_string()))
        );
        assert!(decode_int(b"1.5".to_vec()).is_err());
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(decode_float(b"1.5".to_vec()).unwrap(), 1.5);
        assert_eq!(decode_float(b"3".to_vec()).unwrap(), 3.0);
        assert!(matches!(
            decode_float(b"pi".to_vec()),
            Err(DecodeError::Float(_))
        ));
    }

    #[test]
    fn test_float_bytes_decode_back() {
        for x in [0.1f64, -3.25, 1e-7, 12345.0] {
            let bytes = StoredValue::from(x).to_bytes();
            assert_eq!(decode_float(bytes).unwrap(), x);
        }
    }
}
