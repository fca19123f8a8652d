pub mod config;
pub mod hash;
pub mod slice_reader;
pub mod storage_header;
