//! A module which provides the logic to write information about optimizer progress into log.

#[cfg(test)]
#[path = "../../tests/unit/optimizer/telemetry_test.rs"]
mod telemetry_test;

use super::{OptimizationState, RunOutcome};
use crate::utils::{Float, InfoLogger, Timer};
use serde::{Deserialize, Serialize};

/// Specifies a telemetry mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TelemetryMode {
    /// No telemetry at all.
    #[default]
    None,
    /// Writes progress using environment logger.
    #[serde(rename_all = "camelCase")]
    Logging {
        /// Specifies how often (in iterations) best particle is logged.
        log_best: usize,
    },
}

/// Provides way to write information about the run into log.
pub struct Telemetry {
    mode: TelemetryMode,
    logger: InfoLogger,
    time: Timer,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode, logger: InfoLogger) -> Self {
        Self { mode, logger, time: Timer::start() }
    }

    /// Returns the logger if logging is enabled.
    pub fn logger(&self) -> Option<&InfoLogger> {
        match self.mode {
            TelemetryMode::Logging { .. } => Some(&self.logger),
            TelemetryMode::None => None,
        }
    }

    /// Reports initial swarm statistics.
    pub fn on_initial(&self, state: &OptimizationState, init_time: Timer) {
        self.log(
            format!(
                "[{}s] created initial swarm of {} particles in {}ms, best fitness: {}",
                self.time.elapsed_secs(),
                state.swarm.size(),
                init_time.elapsed_millis(),
                format_fitness(state.best_fitness)
            )
            .as_str(),
        );
    }

    /// Reports iteration statistics.
    pub fn on_iteration(&self, state: &OptimizationState, termination_estimate: Float, iteration_time: Timer) {
        let log_best = match self.mode {
            TelemetryMode::Logging { log_best } => log_best.max(1),
            TelemetryMode::None => return,
        };

        if state.iteration % log_best == 0 {
            self.log(
                format!(
                    "[{}s] iteration {} took {}ms, best fitness: {}, termination estimate: {:.2}",
                    self.time.elapsed_secs(),
                    state.iteration,
                    iteration_time.elapsed_millis(),
                    format_fitness(state.best_fitness),
                    termination_estimate
                )
                .as_str(),
            );
        }
    }

    /// Reports final statistics.
    pub fn on_result(&self, state: &OptimizationState, outcome: RunOutcome) {
        let elapsed = self.time.elapsed_secs_as_float();
        let speed = if elapsed > 0. { state.iteration as Float / elapsed } else { 0. };

        self.log(
            format!(
                "[{}s] total iterations: {}, evaluations: {}, speed: {:.2} iter/sec, outcome: {:?}",
                self.time.elapsed_secs(),
                state.iteration,
                state.evaluations,
                speed,
                outcome
            )
            .as_str(),
        );
        self.log(format!("\tbest fitness: {}", format_fitness(state.best_fitness)).as_str());
    }

    /// Writes log message.
    pub fn log(&self, message: &str) {
        if let Some(logger) = self.logger() {
            (logger)(message)
        }
    }
}

fn format_fitness(fitness: Float) -> String {
    format!("{fitness:.6}")
}
