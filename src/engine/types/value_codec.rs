//! Binary codec for [`Value`].
//!
//! A marshalled value is its type tag followed by the payload. The payload
//! codec is shared with the plain page encoding, so statistics bounds and page
//! contents are byte-compatible:
//!
//! | type      | payload                         |
//! |-----------|---------------------------------|
//! | null      | (none, tag 0)                   |
//! | int64     | zig-zag varint                  |
//! | uint64    | varint                          |
//! | float64   | 8 bytes little endian           |
//! | bool      | 1 byte                          |
//! | byte array| varint length, then the bytes   |

use super::{Value, ValueType};
use crate::engine::errors::ValueError;
use crate::shared::slice_reader::{SliceReader, put_uvarint, put_varint};

/// Appends the payload of a non-null value. Nulls carry no payload.
pub fn append_payload(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Null => {}
        Value::Int64(v) => put_varint(buf, *v),
        Value::Uint64(v) => put_uvarint(buf, *v),
        Value::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        Value::Bool(v) => buf.push(u8::from(*v)),
        Value::ByteArray(b) => {
            put_uvarint(buf, b.len() as u64);
            buf.extend_from_slice(b);
        }
    }
}

pub fn read_payload(ty: ValueType, r: &mut SliceReader<'_>) -> Result<Value, ValueError> {
    let truncated = || ValueError::Truncated(ty);
    let value = match ty {
        ValueType::Int64 => Value::Int64(r.read_varint().ok_or_else(truncated)?),
        ValueType::Uint64 => Value::Uint64(r.read_uvarint().ok_or_else(truncated)?),
        ValueType::Float64 => Value::Float64(f64::from_bits(
            r.read_u64_le().ok_or_else(truncated)?,
        )),
        ValueType::Bool => Value::Bool(r.read_u8().ok_or_else(truncated)? != 0),
        ValueType::ByteArray => {
            let len = r.read_uvarint().ok_or_else(truncated)?;
            let len = usize::try_from(len).map_err(|_| truncated())?;
            Value::ByteArray(r.read_bytes(len).ok_or_else(truncated)?.to_vec())
        }
    };
    Ok(value)
}

impl Value {
    pub fn marshal_binary(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.payload_size() + 1);
        self.append_binary(&mut buf);
        buf
    }

    pub fn append_binary(&self, buf: &mut Vec<u8>) {
        match self.value_type() {
            None => buf.push(ValueType::NULL_TAG),
            Some(ty) => {
                buf.push(ty.tag());
                append_payload(self, buf);
            }
        }
    }

    /// Decodes exactly one value; trailing bytes are an error.
    pub fn unmarshal_binary(data: &[u8]) -> Result<Value, ValueError> {
        let mut r = SliceReader::new(data);
        let tag = r.read_u8().ok_or(ValueError::Empty)?;
        let value = if tag == ValueType::NULL_TAG {
            Value::Null
        } else {
            let ty = ValueType::from_tag(tag).ok_or(ValueError::UnknownType(tag))?;
            read_payload(ty, &mut r)?
        };
        if r.remaining() != 0 {
            return Err(ValueError::TrailingBytes(r.remaining()));
        }
        Ok(value)
    }
}
