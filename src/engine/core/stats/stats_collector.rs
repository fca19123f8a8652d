use std::cmp::Ordering;

use tracing::trace;

use super::statistics::Statistics;
use crate::engine::core::column::options::StatisticsOptions;
use crate::engine::errors::SketchError;
use crate::engine::sketch::Sketch;
use crate::engine::types::Value;

/// Accumulates min/max and a cardinality sketch over observed values.
///
/// Callers only feed present values; nulls are ignored here and zeros are the
/// builder's concern.
#[derive(Debug, Clone)]
pub struct StatsCollector {
    range: bool,
    min: Option<Value>,
    max: Option<Value>,
    sketch: Option<Sketch>,
}

impl StatsCollector {
    pub fn new(options: &StatisticsOptions) -> Result<Self, SketchError> {
        let sketch = if options.store_cardinality_stats {
            Some(Sketch::new(options.sketch_precision)?)
        } else {
            None
        };
        Ok(Self {
            range: options.store_range_stats,
            min: None,
            max: None,
            sketch,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.range || self.sketch.is_some()
    }

    pub fn observe(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        if self.range {
            self.observe_range(value);
        }
        if let Some(sketch) = self.sketch.as_mut() {
            sketch.insert(&value.marshal_binary());
        }
    }

    fn observe_range(&mut self, value: &Value) {
        match &self.min {
            Some(min) if value.compare(min) != Some(Ordering::Less) => {}
            _ => self.min = Some(value.clone()),
        }
        match &self.max {
            Some(max) if value.compare(max) != Some(Ordering::Greater) => {}
            _ => self.max = Some(value.clone()),
        }
    }

    /// Folds a finished page collector into this one.
    pub fn absorb(&mut self, other: &StatsCollector) -> Result<(), SketchError> {
        if self.range {
            if let Some(min) = &other.min {
                self.observe_range(min);
            }
            if let Some(max) = &other.max {
                self.observe_range(max);
            }
        }
        if let (Some(mine), Some(theirs)) = (self.sketch.as_mut(), other.sketch.as_ref()) {
            mine.merge(theirs)?;
        }
        Ok(())
    }

    /// `None` when neither range nor cardinality tracking is enabled.
    pub fn statistics(&mut self) -> Option<Statistics> {
        if !self.is_enabled() {
            return None;
        }
        let cardinality_count = self.sketch.as_mut().map_or(0, Sketch::estimate);
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "logcol::builder",
                cardinality = cardinality_count,
                has_range = self.min.is_some(),
                "Collected statistics"
            );
        }
        Some(Statistics {
            min_value: self.min.as_ref().map(Value::marshal_binary),
            max_value: self.max.as_ref().map(Value::marshal_binary),
            cardinality_count,
        })
    }
}
