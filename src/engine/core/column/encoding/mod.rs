pub mod bitmap;
pub mod delta;
pub mod plain;

use crate::engine::core::column::options::EncodingKind;
use crate::engine::errors::ValueError;
use crate::engine::types::{Value, ValueType};
use crate::shared::slice_reader::SliceReader;

pub use bitmap::{BitmapBuilder, BitmapView, bitmap_len};
pub use delta::DeltaEncoding;
pub use plain::PlainEncoding;

/// Layout of the present values of a page. Nulls and zeros never reach the
/// encoding; they live in the page bitmaps.
pub trait ValueEncoding: Sync {
    fn encode(&self, values: &[Value], out: &mut Vec<u8>);

    fn decode(
        &self,
        ty: ValueType,
        r: &mut SliceReader<'_>,
        count: usize,
    ) -> Result<Vec<Value>, ValueError>;
}

static PLAIN: PlainEncoding = PlainEncoding;
static DELTA: DeltaEncoding = DeltaEncoding;

pub fn encoding_for(kind: EncodingKind) -> &'static dyn ValueEncoding {
    match kind {
        EncodingKind::Plain => &PLAIN,
        EncodingKind::Delta => &DELTA,
    }
}
