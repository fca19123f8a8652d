use super::view::PageView;
use crate::engine::core::column::column::Page;
use crate::engine::core::column::compression::decompressor_for;
use crate::engine::core::column::encoding::encoding_for;
use crate::engine::core::column::options::{CompressionKind, EncodingKind};
use crate::engine::errors::ColumnError;
use crate::engine::types::{Value, ValueType};
use crate::shared::slice_reader::SliceReader;

/// Verifies, decompresses and decodes one page into one value per row.
/// Nothing is returned unless the whole page checks out.
pub fn decode_page(
    index: usize,
    page: &Page,
    value_type: ValueType,
    compression: CompressionKind,
) -> Result<Vec<Value>, ColumnError> {
    let corrupt = |reason: String| ColumnError::corrupt(index, reason);
    let info = &page.info;

    let crc = crc32fast::hash(&page.data);
    if crc != info.crc32 {
        return Err(corrupt(format!(
            "checksum mismatch: stored {:#010x}, computed {crc:#010x}",
            info.crc32
        )));
    }
    if page.data.len() as u64 != info.compressed_size {
        return Err(corrupt(format!(
            "compressed size {} does not match recorded {}",
            page.data.len(),
            info.compressed_size
        )));
    }

    let raw = decompressor_for(compression)
        .decompress(&page.data, info.uncompressed_size as usize)
        .map_err(|e| corrupt(e.to_string()))?;
    if raw.len() as u64 != info.uncompressed_size {
        return Err(corrupt(format!(
            "decompressed {} bytes, expected {}",
            raw.len(),
            info.uncompressed_size
        )));
    }

    let view = PageView::parse(&raw).map_err(corrupt)?;
    if view.header.value_type != value_type.tag() {
        return Err(corrupt(format!(
            "page holds type tag {}, column is {value_type}",
            view.header.value_type
        )));
    }
    let encoding = EncodingKind::from_tag(view.header.encoding)
        .ok_or_else(|| corrupt(format!("unknown encoding tag {}", view.header.encoding)))?;
    if encoding != info.encoding {
        return Err(corrupt(format!(
            "page encoded as {encoding}, metadata says {}",
            info.encoding
        )));
    }
    let rows = view.rows();
    if rows as u64 != info.rows_count {
        return Err(corrupt(format!(
            "header has {rows} rows, metadata says {}",
            info.rows_count
        )));
    }

    // Null and zero rows are disjoint, and every present value takes at least
    // one payload byte.
    let present = rows
        .checked_sub(view.nulls.count_set())
        .and_then(|n| n.checked_sub(view.zeros.count_set()))
        .filter(|&n| n <= view.payload.len())
        .ok_or_else(|| corrupt(format!("bitmaps and payload cannot hold {rows} rows")))?;
    if present as u64 != info.values_count {
        return Err(corrupt(format!(
            "{present} present rows, metadata says {} values",
            info.values_count
        )));
    }

    let mut r = SliceReader::new(view.payload);
    let decoded = encoding_for(encoding)
        .decode(value_type, &mut r, present)
        .map_err(|e| corrupt(e.to_string()))?;
    if r.remaining() != 0 {
        return Err(corrupt(format!("{} trailing payload bytes", r.remaining())));
    }

    let mut decoded = decoded.into_iter();
    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let v = if view.nulls.is_set(i) {
            Value::Null
        } else if view.zeros.is_set(i) {
            Value::zero(value_type)
        } else {
            decoded
                .next()
                .ok_or_else(|| corrupt("payload ran out of values".into()))?
        };
        out.push(v);
    }
    Ok(out)
}
