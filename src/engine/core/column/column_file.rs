//! Single-column container:
//!
//! ```text
//! BinaryHeader (20 bytes) | page data ... | metadata (bincode) | meta_len u64 | meta_crc32 u32
//! ```
//!
//! Page payloads are written verbatim, each still carrying its own CRC in the
//! metadata. The trailer locates and checksums the metadata record.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::column::{Column, ColumnInfo, Page, PageInfo};
use crate::engine::errors::ColumnFileError;
use crate::shared::storage_header::{BinaryHeader, FileKind, MagicFile};

const TRAILER_LEN: usize = 8 + 4;

pub struct ColumnFile;

impl MagicFile for ColumnFile {
    const MAGIC: [u8; 8] = FileKind::Column.magic();
}

#[derive(Debug, Serialize, Deserialize)]
struct PageEntry {
    offset: u64,
    len: u64,
    info: PageInfo,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColumnMeta {
    info: ColumnInfo,
    pages: Vec<PageEntry>,
}

pub fn write_column<W: Write>(mut w: W, column: &Column) -> Result<(), ColumnFileError> {
    ColumnFile::header().write_to(&mut w)?;

    let mut offset = BinaryHeader::TOTAL_LEN as u64;
    let mut entries = Vec::with_capacity(column.pages.len());
    for page in &column.pages {
        w.write_all(&page.data)?;
        entries.push(PageEntry {
            offset,
            len: page.data.len() as u64,
            info: page.info.clone(),
        });
        offset += page.data.len() as u64;
    }

    let meta = bincode::serialize(&ColumnMeta {
        info: column.info.clone(),
        pages: entries,
    })?;
    w.write_all(&meta)?;
    w.write_all(&(meta.len() as u64).to_le_bytes())?;
    w.write_all(&crc32fast::hash(&meta).to_le_bytes())?;
    w.flush()?;
    Ok(())
}

pub fn read_column<R: Read>(mut r: R) -> Result<Column, ColumnFileError> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    decode_column(&bytes)
}

pub fn decode_column(bytes: &[u8]) -> Result<Column, ColumnFileError> {
    ColumnFile::validate_header(bytes)?;
    let header_len = BinaryHeader::TOTAL_LEN;
    if bytes.len() < header_len + TRAILER_LEN {
        return Err(ColumnFileError::Truncated("missing trailer".into()));
    }

    let trailer = &bytes[bytes.len() - TRAILER_LEN..];
    let mut len_buf = [0u8; 8];
    len_buf.copy_from_slice(&trailer[..8]);
    let meta_len = u64::from_le_bytes(len_buf);
    let mut crc_buf = [0u8; 4];
    crc_buf.copy_from_slice(&trailer[8..]);
    let meta_crc = u32::from_le_bytes(crc_buf);

    let meta_end = bytes.len() - TRAILER_LEN;
    let meta_start = usize::try_from(meta_len)
        .ok()
        .and_then(|len| meta_end.checked_sub(len))
        .filter(|start| *start >= header_len)
        .ok_or_else(|| {
            ColumnFileError::Truncated(format!("metadata length {meta_len} exceeds file"))
        })?;
    let meta_bytes = &bytes[meta_start..meta_end];
    if crc32fast::hash(meta_bytes) != meta_crc {
        error!(target: "logcol::file", "Column metadata checksum mismatch");
        return Err(ColumnFileError::ChecksumMismatch);
    }

    let meta: ColumnMeta = bincode::deserialize(meta_bytes)?;
    check_totals(&meta)?;
    let mut pages = Vec::with_capacity(meta.pages.len());
    for (i, entry) in meta.pages.into_iter().enumerate() {
        let start = entry.offset as usize;
        let end = start.saturating_add(entry.len as usize);
        if start < header_len || end > meta_start {
            return Err(ColumnFileError::Truncated(format!(
                "page {i} spans {start}..{end} outside data section"
            )));
        }
        pages.push(Page {
            data: bytes[start..end].to_vec(),
            info: entry.info,
        });
    }

    debug!(
        target: "logcol::file",
        column = %meta.info.name,
        pages = pages.len(),
        "Decoded column file"
    );
    Ok(Column {
        info: meta.info,
        pages,
    })
}

/// Column totals must equal the sums over its pages.
fn check_totals(meta: &ColumnMeta) -> Result<(), ColumnFileError> {
    let mut sums = [0u64; 4];
    for (i, entry) in meta.pages.iter().enumerate() {
        let page = &entry.info;
        if entry.len != page.compressed_size || page.values_count > page.rows_count {
            return Err(ColumnFileError::Inconsistent(format!(
                "page {i} records {} bytes and {} of {} rows",
                entry.len, page.values_count, page.rows_count
            )));
        }
        let counts = [
            page.rows_count,
            page.values_count,
            page.uncompressed_size,
            page.compressed_size,
        ];
        for (sum, n) in sums.iter_mut().zip(counts) {
            *sum = sum.checked_add(n).ok_or_else(|| {
                ColumnFileError::Inconsistent(format!("page {i} overflows column totals"))
            })?;
        }
    }

    let info = &meta.info;
    let recorded = [
        info.rows_count,
        info.values_count,
        info.uncompressed_size,
        info.compressed_size,
    ];
    let names = ["rows", "values", "uncompressed bytes", "compressed bytes"];
    for ((name, sum), want) in names.iter().zip(sums).zip(recorded) {
        if sum != want {
            error!(target: "logcol::file", column = %info.name, field = *name, "Column totals disagree with pages");
            return Err(ColumnFileError::Inconsistent(format!(
                "{name}: column says {want}, pages sum to {sum}"
            )));
        }
    }
    Ok(())
}

pub fn write_column_to_path<P: AsRef<Path>>(path: P, column: &Column) -> Result<(), ColumnFileError> {
    let file = File::create(&path).map_err(|e| {
        error!(target: "logcol::file", error = %e, path = %path.as_ref().display(), "Failed to create column file");
        ColumnFileError::Io(e)
    })?;
    write_column(BufWriter::new(file), column)?;
    debug!(target: "logcol::file", path = %path.as_ref().display(), "Wrote column file");
    Ok(())
}

pub fn read_column_from_path<P: AsRef<Path>>(path: P) -> Result<Column, ColumnFileError> {
    let file = File::open(&path).map_err(|e| {
        error!(target: "logcol::file", error = %e, path = %path.as_ref().display(), "Failed to open column file");
        ColumnFileError::Io(e)
    })?;
    read_column(file)
}
