use super::*;
use crate::helpers::optimizer::create_state_with_history;
use crate::objective::Direction;

struct FixedTermination {
    is_termination: bool,
    estimate: Float,
}

impl Termination for FixedTermination {
    fn is_termination(&self, _: &OptimizationState) -> bool {
        self.is_termination
    }

    fn estimate(&self, _: &OptimizationState) -> Float {
        self.estimate
    }
}

fn create_terminations(values: &[(bool, Float)]) -> Vec<Box<dyn Termination>> {
    values
        .iter()
        .map(|&(is_termination, estimate)| Box::new(FixedTermination { is_termination, estimate }) as Box<dyn Termination>)
        .collect()
}

parameterized_test! {can_combine_criteria, (values, is_any, expected, expected_estimate), {
    can_combine_criteria_impl(values, is_any, expected, expected_estimate);
}}

can_combine_criteria! {
    case_01_any_one: (vec![(false, 0.2), (true, 1.)], true, true, 1.),
    case_02_any_none: (vec![(false, 0.2), (false, 0.4)], true, false, 0.4),
    case_03_all_one: (vec![(false, 0.2), (true, 1.)], false, false, 0.2),
    case_04_all_both: (vec![(true, 1.), (true, 1.)], false, true, 1.),
    case_05_any_empty: (vec![], true, false, 0.),
    case_06_all_empty: (vec![], false, false, 0.),
}

fn can_combine_criteria_impl(values: Vec<(bool, Float)>, is_any: bool, expected: bool, expected_estimate: Float) {
    let state = create_state_with_history(vec![1.], Direction::Minimize);
    let terminations = create_terminations(values.as_slice());
    let termination =
        if is_any { CompositeTermination::any(terminations) } else { CompositeTermination::all(terminations) };

    assert_eq!(termination.is_termination(&state), expected);
    assert_eq!(termination.estimate(&state), expected_estimate);
}

#[test]
fn can_combine_built_in_criteria() {
    let state = create_state_with_history(vec![3., 2., 1.], Direction::Minimize);

    let termination = CompositeTermination::any(vec![Box::new(MaxIteration::new(5)), Box::new(TargetError::new(0.1))]);
    assert!(!termination.is_termination(&state));

    let termination = CompositeTermination::any(vec![Box::new(MaxIteration::new(2)), Box::new(TargetError::new(0.1))]);
    assert!(termination.is_termination(&state));
}

#[test]
fn can_detect_time_limit() {
    let state = create_state_with_history(vec![1.], Direction::Minimize);

    assert!(!MaxTime::new(3600.).is_termination(&state));
    assert!(MaxTime::new(-1.).is_termination(&state));
    assert_eq!(MaxTime::new(0.).estimate(&state), 1.);
}

#[test]
fn can_combine_history_depth() {
    let bounded = CompositeTermination::any(vec![
        Box::new(MaxIteration::new(10)),
        Box::new(Stagnation::new(7, 0.)),
        Box::new(Stagnation::new(3, 0.)),
    ]);
    let unbounded = CompositeTermination::all(vec![
        Box::new(Stagnation::new(3, 0.)),
        Box::new(FixedTermination { is_termination: false, estimate: 0. }),
    ]);

    assert_eq!(bounded.history_depth(), Some(7));
    assert_eq!(unbounded.history_depth(), None);
    assert_eq!(MaxIteration::new(10).history_depth(), Some(0));
}
