#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Float, Parallelism, Random, Timer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A logger type which is called with various information regarding the work done by the optimizer.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies a computational quota for the optimization run. It is checked only between
/// iterations, so an iteration in progress is never interrupted.
pub trait Quota: Send + Sync {
    /// Returns true when computation should be stopped.
    fn is_reached(&self) -> bool;
}

/// A time quota.
pub struct TimeQuota {
    start: Timer,
    limit_in_secs: Float,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota`.
    pub fn new(limit_in_secs: Float) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed_secs_as_float() > self.limit_in_secs
    }
}

/// A quota which is reached once an external signal is raised via [`CancellationQuota::cancel`].
#[derive(Clone, Default)]
pub struct CancellationQuota {
    inner: Option<Arc<dyn Quota>>,
    should_interrupt: Arc<AtomicBool>,
}

impl CancellationQuota {
    /// Creates a new instance of `CancellationQuota` optionally combined with another quota.
    pub fn new(inner: Option<Arc<dyn Quota>>) -> Self {
        Self { inner, should_interrupt: Arc::new(AtomicBool::new(false)) }
    }

    /// Requests cancellation: the run stops at the next iteration boundary.
    pub fn cancel(&self) {
        self.should_interrupt.store(true, Ordering::Relaxed);
    }
}

impl Quota for CancellationQuota {
    fn is_reached(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is_reached()) || self.should_interrupt.load(Ordering::Relaxed)
    }
}

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random>,

    /// A global execution quota.
    pub quota: Option<Arc<dyn Quota>>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(
        random: Arc<dyn Random>,
        quota: Option<Arc<dyn Quota>>,
        parallelism: Parallelism,
        logger: InfoLogger,
    ) -> Self {
        Self { random, quota, parallelism, logger }
    }

    /// Returns true if the quota, if any, is reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(
            Arc::new(DefaultRandom::default()),
            None,
            Parallelism::default(),
            Arc::new(|msg| println!("{msg}")),
        )
    }
}
