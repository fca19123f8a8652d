pub mod column;
pub mod stats;
