pub mod core;
pub mod errors;
pub mod sketch;
pub mod types;

pub use errors::*;
