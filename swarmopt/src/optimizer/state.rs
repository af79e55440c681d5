use crate::objective::Direction;
use crate::population::Swarm;
use crate::utils::{Float, Timer};
use std::collections::VecDeque;

/// A snapshot of the optimization run. It is replaced as a whole once per iteration, so
/// observers never see a partially updated swarm.
#[derive(Clone, Debug)]
pub struct OptimizationState {
    /// Amount of completed iterations, zero for the initial swarm.
    pub iteration: usize,
    /// Amount of objective function evaluations done so far.
    pub evaluations: usize,
    /// Particles.
    pub swarm: Swarm,
    /// Id of the particle which personal best is the global best.
    pub best_id: usize,
    /// Best position seen during the run.
    pub best_position: Vec<Float>,
    /// Fitness of the best position.
    pub best_fitness: Float,
    /// Optimization direction.
    pub direction: Direction,
    /// Known optimum of the objective, if any.
    pub known_optimum: Option<Float>,
    /// Global best fitness after each iteration, starting from the initial swarm. Only the
    /// latest values are kept when the history is limited.
    pub best_history: VecDeque<Float>,
    /// Maximum amount of values kept in the history.
    history_limit: Option<usize>,
    /// A timer started with the run.
    pub timer: Timer,
}

impl OptimizationState {
    /// Creates an initial state from the evaluated swarm. Returns `None` if the swarm is empty.
    pub fn new(swarm: Swarm, direction: Direction, known_optimum: Option<Float>, timer: Timer) -> Option<Self> {
        let (best_id, best_position, best_fitness) =
            swarm.best(direction).map(|best| (best.id, best.best_position.clone(), best.best_fitness))?;
        let evaluations = swarm.size();

        Some(Self {
            iteration: 0,
            evaluations,
            swarm,
            best_id,
            best_position,
            best_fitness,
            direction,
            known_optimum,
            best_history: VecDeque::from([best_fitness]),
            history_limit: None,
            timer,
        })
    }

    /// Limits global best history to values of the latest `depth` iterations and the current one.
    pub fn with_history_depth(mut self, depth: Option<usize>) -> Self {
        self.history_limit = depth.map(|depth| depth.max(1) + 1);
        self.trim_history();
        self
    }

    /// Turns the state into the next one using the updated swarm: the global best is replaced
    /// only on strict improvement.
    pub fn into_next(mut self, swarm: Swarm, evaluations: usize) -> Self {
        if let Some(best) = swarm.best(self.direction) {
            if self.direction.is_better(best.best_fitness, self.best_fitness) {
                self.best_id = best.id;
                self.best_position = best.best_position.clone();
                self.best_fitness = best.best_fitness;
            }
        }

        self.best_history.push_back(self.best_fitness);
        self.trim_history();
        self.iteration += 1;
        self.evaluations += evaluations;
        self.swarm = swarm;

        self
    }

    /// Returns true if the global best was improved on the last iteration.
    pub fn is_improved(&self) -> bool {
        match self.best_history.len() {
            len if len >= 2 => self.direction.is_better(self.best_history[len - 1], self.best_history[len - 2]),
            _ => false,
        }
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.history_limit {
            while self.best_history.len() > limit {
                self.best_history.pop_front();
            }
        }
    }

    /// Returns absolute difference between the global best and the known optimum.
    pub fn error_to_optimum(&self) -> Option<Float> {
        self.known_optimum.map(|optimum| (self.best_fitness - optimum).abs())
    }
}
