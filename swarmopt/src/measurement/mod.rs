//! The measurement module provides a pipeline of observers which record per iteration statistics
//! without coupling the optimizer to any output format.

#[cfg(test)]
#[path = "../../tests/unit/measurement/pipeline_test.rs"]
mod pipeline_test;

use crate::optimizer::OptimizationState;
use crate::utils::{Float, GenericError, GenericResult, InfoLogger};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod statistics;
pub use self::statistics::*;

/// An observer which computes a single named statistic from the state snapshot.
pub trait Measurement: Send + Sync {
    /// Returns statistic name.
    fn name(&self) -> &str;

    /// Computes the statistic. An error is recorded as a missing value.
    fn measure(&self, state: &OptimizationState) -> GenericResult<Float>;
}

/// A measurement function type.
pub type MeasurementFn = Arc<dyn Fn(&OptimizationState) -> GenericResult<Float> + Send + Sync>;

/// A measurement defined by a closure.
pub struct FnMeasurement {
    name: String,
    measure_fn: MeasurementFn,
}

impl FnMeasurement {
    /// Creates a new instance of `FnMeasurement`.
    pub fn new(name: &str, measure_fn: MeasurementFn) -> Self {
        Self { name: name.to_string(), measure_fn }
    }
}

impl Measurement for FnMeasurement {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn measure(&self, state: &OptimizationState) -> GenericResult<Float> {
        (self.measure_fn)(state)
    }
}

/// A named statistic value, `None` means the value could not be computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValue {
    /// Statistic name.
    pub name: String,
    /// Statistic value.
    pub value: Option<Float>,
}

/// An immutable per iteration snapshot of statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Iteration index, starting from 1.
    pub iteration: usize,
    /// Values in registration order of measurements.
    pub values: Vec<MeasurementValue>,
}

impl MeasurementRecord {
    /// Returns value of the statistic with given name, if it is present and was computed.
    pub fn get(&self, name: &str) -> Option<Float> {
        self.values.iter().find(|value| value.name == name).and_then(|value| value.value)
    }
}

/// Describes a failure of a single observer on a single iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementError {
    /// Iteration index.
    pub iteration: usize,
    /// Statistic name.
    pub name: String,
    /// A cause of failure.
    pub cause: GenericError,
}

impl std::fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "measurement '{}' failed at iteration {}: {}", self.name, self.iteration, self.cause)
    }
}

impl std::error::Error for MeasurementError {}

/// An ordered, append only log of measurement records.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MeasurementLog {
    records: Vec<MeasurementRecord>,
    #[serde(skip)]
    errors: Vec<MeasurementError>,
}

impl MeasurementLog {
    /// Returns records in iteration order.
    pub fn records(&self) -> &[MeasurementRecord] {
        self.records.as_slice()
    }

    /// Returns failures happened during measurements.
    pub fn errors(&self) -> &[MeasurementError] {
        self.errors.as_slice()
    }

    /// Returns amount of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the last record.
    pub fn last(&self) -> Option<&MeasurementRecord> {
        self.records.last()
    }

    /// Returns values of the statistic with given name across all iterations.
    pub fn series(&self, name: &str) -> Vec<Option<Float>> {
        self.records.iter().map(|record| record.get(name)).collect()
    }

    fn append(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }
}

/// Runs registered measurements once per completed iteration and accumulates the log.
#[derive(Default)]
pub struct MeasurementPipeline {
    measurements: Vec<Box<dyn Measurement>>,
    log: MeasurementLog,
}

impl MeasurementPipeline {
    /// Creates a new instance of `MeasurementPipeline`.
    pub fn new(measurements: Vec<Box<dyn Measurement>>) -> Self {
        Self { measurements, log: MeasurementLog::default() }
    }

    /// Registers a measurement after already registered ones.
    pub fn add(&mut self, measurement: Box<dyn Measurement>) {
        self.measurements.push(measurement);
    }

    /// Returns names of registered measurements in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.measurements.iter().map(|measurement| measurement.name()).collect()
    }

    /// Observes the state: each failed or NaN measurement is recorded as a missing value.
    pub fn observe(&mut self, state: &OptimizationState, logger: Option<&InfoLogger>) {
        let iteration = state.iteration;

        let values = self
            .measurements
            .iter()
            .map(|measurement| {
                let name = measurement.name().to_string();
                let value = measurement.measure(state).and_then(|value| {
                    if value.is_nan() { Err(GenericError::from("value is NaN")) } else { Ok(value) }
                });

                match value {
                    Ok(value) => MeasurementValue { name, value: Some(value) },
                    Err(cause) => {
                        let error = MeasurementError { iteration, name: name.clone(), cause };
                        if let Some(logger) = logger {
                            (logger)(error.to_string().as_str());
                        }
                        self.log.errors.push(error);

                        MeasurementValue { name, value: None }
                    }
                }
            })
            .collect::<Vec<_>>();

        self.log.append(MeasurementRecord { iteration, values });
    }

    /// Returns accumulated log.
    pub fn log(&self) -> &MeasurementLog {
        &self.log
    }

    /// Takes accumulated log leaving an empty one in place.
    pub fn take_log(&mut self) -> MeasurementLog {
        std::mem::take(&mut self.log)
    }
}
