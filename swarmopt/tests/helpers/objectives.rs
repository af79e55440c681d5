use crate::objective::{FunctionObjective, Objective};
use crate::utils::{Float, GenericResult};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn sphere(position: &[Float]) -> Float {
    position.iter().map(|x| x * x).sum()
}

pub fn rastrigin(position: &[Float]) -> Float {
    10. * position.len() as Float + position.iter().map(|x| x * x - 10. * (2. * PI * x).cos()).sum::<Float>()
}

pub fn create_sphere_objective() -> FunctionObjective {
    FunctionObjective::from_fn(sphere).with_known_optimum(0.)
}

pub fn create_rastrigin_objective() -> FunctionObjective {
    FunctionObjective::from_fn(rastrigin).with_known_optimum(0.)
}

/// Evaluates sphere function, but fails once given amount of evaluations is exceeded.
pub struct FailingObjective {
    evaluations: AtomicUsize,
    fail_after: usize,
}

impl FailingObjective {
    pub fn new(fail_after: usize) -> Self {
        Self { evaluations: AtomicUsize::new(0), fail_after }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Objective for FailingObjective {
    fn fitness(&self, position: &[Float]) -> GenericResult<Float> {
        let evaluation = self.evaluations.fetch_add(1, Ordering::SeqCst);

        if evaluation >= self.fail_after { Err("objective is out of service".into()) } else { Ok(sphere(position)) }
    }
}
