use crate::engine::core::column::encoding::{BitmapView, bitmap_len};
use crate::engine::core::column::format::PageHeader;

/// Borrowed sections of a decompressed page.
pub struct PageView<'a> {
    pub header: PageHeader,
    pub nulls: BitmapView<'a>,
    pub zeros: BitmapView<'a>,
    pub payload: &'a [u8],
}

impl<'a> PageView<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, String> {
        let header = PageHeader::read_from(bytes)
            .ok_or_else(|| "decompressed page too small for header".to_string())?;
        let aux_start = PageHeader::LEN;
        let aux_end = aux_start + header.aux_len as usize;
        if aux_end > bytes.len() {
            return Err("aux section out of bounds".into());
        }

        let rows = header.row_count as usize;
        let bm_len = bitmap_len(rows);
        let expected_aux = bm_len * (header.has_nulls() as usize + header.has_zeros() as usize);
        if expected_aux != header.aux_len as usize {
            return Err(format!(
                "aux section is {} bytes, {rows} rows need {expected_aux}",
                header.aux_len
            ));
        }

        let mut cursor = aux_start;
        let mut nulls = BitmapView::new(None);
        if header.has_nulls() {
            nulls = BitmapView::new(Some(&bytes[cursor..cursor + bm_len]));
            cursor += bm_len;
        }
        let zeros = if header.has_zeros() {
            BitmapView::new(Some(&bytes[cursor..cursor + bm_len]))
        } else {
            BitmapView::new(None)
        };

        Ok(Self {
            header,
            nulls,
            zeros,
            payload: &bytes[aux_end..],
        })
    }

    pub fn rows(&self) -> usize {
        self.header.row_count as usize
    }
}
