use super::ValueEncoding;
use crate::engine::errors::ValueError;
use crate::engine::types::{Value, ValueType, append_payload, read_payload};
use crate::shared::slice_reader::{SliceReader, put_varint};

/// Integers are stored as zig-zag varint differences from the previous value,
/// starting from zero. Arithmetic wraps, so any sequence round-trips.
pub struct DeltaEncoding;

impl ValueEncoding for DeltaEncoding {
    fn encode(&self, values: &[Value], out: &mut Vec<u8>) {
        let mut prev = 0i64;
        for v in values {
            let cur = match v {
                Value::Int64(n) => *n,
                Value::Uint64(n) => *n as i64,
                other => {
                    append_payload(other, out);
                    continue;
                }
            };
            put_varint(out, cur.wrapping_sub(prev));
            prev = cur;
        }
    }

    fn decode(
        &self,
        ty: ValueType,
        r: &mut SliceReader<'_>,
        count: usize,
    ) -> Result<Vec<Value>, ValueError> {
        if !ty.is_integer() {
            return (0..count).map(|_| read_payload(ty, r)).collect();
        }
        let mut out = Vec::with_capacity(count.min(r.remaining()));
        let mut prev = 0i64;
        for _ in 0..count {
            let delta = r.read_varint().ok_or(ValueError::Truncated(ty))?;
            prev = prev.wrapping_add(delta);
            out.push(match ty {
                ValueType::Uint64 => Value::Uint64(prev as u64),
                _ => Value::Int64(prev),
            });
        }
        Ok(out)
    }
}
