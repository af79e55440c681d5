#[cfg(test)]
#[path = "../../tests/unit/utils/parallel_test.rs"]
mod parallel_test;

use rayon::prelude::*;
use rayon::{ThreadPool as RayonThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Represents a thread pool wrapper.
pub struct ThreadPool {
    inner: RayonThreadPool,
}

impl ThreadPool {
    /// Creates a new instance of `ThreadPool`. Returns `None` if the pool cannot be built.
    pub fn new(num_threads: usize) -> Option<Self> {
        ThreadPoolBuilder::new().num_threads(num_threads).build().ok().map(|inner| Self { inner })
    }

    /// Executes given operation on thread pool.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }
}

/// Specifies how per-iteration work is distributed across threads.
#[derive(Clone)]
pub struct Parallelism {
    available_cpus: usize,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Parallelism {
    /// Creates an instance which runs work on a dedicated pool with given amount of threads.
    /// Falls back to the global rayon pool when a dedicated one cannot be created.
    pub fn new_with_cpus(available_cpus: usize) -> Self {
        let available_cpus = available_cpus.max(1);
        let thread_pool = if available_cpus > 1 { ThreadPool::new(available_cpus).map(Arc::new) } else { None };

        Self { available_cpus, thread_pool }
    }

    /// Creates an instance which runs all the work on the calling thread.
    pub fn sequential() -> Self {
        Self { available_cpus: 1, thread_pool: None }
    }

    /// Returns amount of cpus used.
    pub fn available_cpus(&self) -> usize {
        self.available_cpus
    }

    /// Maps collection and collects results into vector preserving source order.
    pub fn collect<T, F, R>(&self, source: &[T], map_op: F) -> Vec<R>
    where
        T: Send + Sync,
        F: Fn(&T) -> R + Sync + Send,
        R: Send,
    {
        if self.available_cpus <= 1 {
            return source.iter().map(map_op).collect();
        }

        match self.thread_pool.as_ref() {
            Some(pool) => pool.execute(|| parallel_collect(source, map_op)),
            None => parallel_collect(source, map_op),
        }
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new_with_cpus(num_cpus::get())
    }
}

/// Maps collection and collects results into vector in parallel.
pub fn parallel_collect<T, F, R>(source: &[T], map_op: F) -> Vec<R>
where
    T: Send + Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    source.par_iter().map(map_op).collect()
}
