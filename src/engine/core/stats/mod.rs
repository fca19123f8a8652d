pub mod statistics;
pub mod stats_collector;

pub use statistics::Statistics;
pub use stats_collector::StatsCollector;

#[cfg(test)]
mod stats_collector_test;
