mod compressed_list;
mod estimator;
pub mod hyperloglog;
mod sparse;
mod wire;

pub use hyperloglog::{DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION, Sketch};
pub use wire::SKETCH_VERSION;

#[cfg(test)]
mod compressed_list_test;
#[cfg(test)]
mod hyperloglog_test;
