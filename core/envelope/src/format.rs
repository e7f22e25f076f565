//! Self-describing binary envelope encoding.
//!
//! An envelope pairs a type tag with the canonical byte encoding of a
//! value. The layout is `[tag_len: u8][tag][data_len: u32 LE][data]`:
//! both fields are length-delimited, so arbitrary binary payloads,
//! including ones containing any delimiter-looking bytes, round-trip
//! exactly.

use crate::typed::{SemanticType, TypedValue};
use sealpack_common::{Error, Result};

/// A value's type tag and canonical bytes, ready for encryption.
///
/// Constructed just before encryption and discarded right after
/// serialization; decryption reconstructs it and discards it again once
/// the native value is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Semantic type of the payload.
    pub kind: SemanticType,
    /// Canonical byte encoding of the original value.
    pub data: Vec<u8>,
}

impl Envelope {
    /// Wrap a typed value into an envelope.
    pub fn from_value(value: &TypedValue) -> Result<Self> {
        Ok(Self {
            kind: value.kind(),
            data: value.encode()?,
        })
    }

    /// Decode the envelope back into its native value.
    pub fn into_value(self) -> Result<TypedValue> {
        TypedValue::decode(self.kind, &self.data)
    }

    /// Serialize to the binary wire layout.
    ///
    /// # Errors
    /// - Returns error if the payload exceeds the u32 length field
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let tag = self.kind.tag().as_bytes();
        let data_len = u32::try_from(self.data.len()).map_err(|_| {
            Error::InvalidInput("envelope payload exceeds 4 GiB".to_string())
        })?;

        let mut out = Vec::with_capacity(1 + tag.len() + 4 + self.data.len());
        out.push(tag.len() as u8);
        out.extend_from_slice(tag);
        out.extend_from_slice(&data_len.to_le_bytes());
        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Parse the binary wire layout.
    ///
    /// # Errors
    /// - [`Error::EnvelopeDecode`] on truncated input, a length field that
    ///   disagrees with the payload, or trailing bytes
    /// - [`Error::UnknownType`] when the tag is outside the known set;
    ///   carries the tag and raw payload for diagnostics
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (&tag_len, rest) = bytes
            .split_first()
            .ok_or_else(|| Error::EnvelopeDecode("empty envelope".to_string()))?;
        let tag_len = tag_len as usize;
        if tag_len == 0 {
            return Err(Error::EnvelopeDecode("zero-length type tag".to_string()));
        }
        if rest.len() < tag_len + 4 {
            return Err(Error::EnvelopeDecode(format!(
                "truncated envelope: {} bytes left, need at least {}",
                rest.len(),
                tag_len + 4
            )));
        }

        let (tag_bytes, rest) = rest.split_at(tag_len);
        let tag = std::str::from_utf8(tag_bytes)
            .map_err(|_| Error::EnvelopeDecode("type tag is not valid UTF-8".to_string()))?;

        let (len_bytes, data) = rest.split_at(4);
        let mut len_arr = [0u8; 4];
        len_arr.copy_from_slice(len_bytes);
        let data_len = u32::from_le_bytes(len_arr) as usize;

        if data.len() != data_len {
            return Err(Error::EnvelopeDecode(format!(
                "data length mismatch: header says {} bytes, found {}",
                data_len,
                data.len()
            )));
        }

        let kind = SemanticType::from_tag(tag).ok_or_else(|| Error::UnknownType {
            tag: tag.to_string(),
            data: data.to_vec(),
        })?;

        Ok(Self {
            kind,
            data: data.to_vec(),
        })
    }
}
