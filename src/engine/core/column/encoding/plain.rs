use super::ValueEncoding;
use crate::engine::errors::ValueError;
use crate::engine::types::{Value, ValueType, append_payload, read_payload};
use crate::shared::slice_reader::SliceReader;

/// Each value written with the shared payload codec, back to back.
pub struct PlainEncoding;

impl ValueEncoding for PlainEncoding {
    fn encode(&self, values: &[Value], out: &mut Vec<u8>) {
        for v in values {
            append_payload(v, out);
        }
    }

    fn decode(
        &self,
        ty: ValueType,
        r: &mut SliceReader<'_>,
        count: usize,
    ) -> Result<Vec<Value>, ValueError> {
        let mut out = Vec::with_capacity(count.min(r.remaining()));
        for _ in 0..count {
            out.push(read_payload(ty, r)?);
        }
        Ok(out)
    }
}
