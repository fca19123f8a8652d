use crate::engine::errors::SketchError;
use crate::engine::sketch::compressed_list::CompressedList;
use crate::shared::slice_reader::SliceReader;

#[test]
fn iterates_pushed_entries_in_order() {
    let entries = [0u32, 3, 3, 200, 70_000, u32::MAX];
    let list: CompressedList = entries.iter().copied().collect();
    assert_eq!(list.len(), entries.len());
    assert_eq!(list.iter().collect::<Vec<_>>(), entries.to_vec());
}

#[test]
fn small_deltas_take_one_byte() {
    let list: CompressedList = (10u32..20).collect();
    let mut buf = Vec::new();
    list.append_binary(&mut buf);
    // count + last + len headers, first delta 10, then nine deltas of 1
    assert_eq!(buf.len(), 12 + 10);
    assert_eq!(&buf[..4], &10u32.to_be_bytes());
    assert_eq!(&buf[4..8], &19u32.to_be_bytes());
}

#[test]
fn binary_roundtrip() {
    let list: CompressedList = [5u32, 90, 1_000_000].into_iter().collect();
    let mut buf = Vec::new();
    list.append_binary(&mut buf);
    let mut r = SliceReader::new(&buf);
    let decoded = CompressedList::decode(&mut r).expect("decode");
    assert_eq!(decoded, list);
    assert_eq!(r.remaining(), 0);
}

#[test]
fn decode_rejects_truncated_and_inconsistent_lists() {
    let list: CompressedList = [1u32, 2, 3].into_iter().collect();
    let mut buf = Vec::new();
    list.append_binary(&mut buf);

    let mut r = SliceReader::new(&buf[..buf.len() - 1]);
    assert_eq!(CompressedList::decode(&mut r), Err(SketchError::ErrorTooShort));

    let mut r = SliceReader::new(&buf[..8]);
    assert_eq!(CompressedList::decode(&mut r), Err(SketchError::ErrorTooShort));

    // Header claims four entries but only three are encoded.
    let mut bad = buf.clone();
    bad[..4].copy_from_slice(&4u32.to_be_bytes());
    let mut r = SliceReader::new(&bad);
    assert!(matches!(
        CompressedList::decode(&mut r),
        Err(SketchError::Corrupt(_))
    ));
}
