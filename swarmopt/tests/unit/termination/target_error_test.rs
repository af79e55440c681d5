use super::*;
use crate::helpers::optimizer::create_state;
use crate::objective::Direction;

parameterized_test! {can_detect_termination, (best_fitness, known_optimum, termination, expected), {
    can_detect_termination_impl(best_fitness, known_optimum, termination, expected);
}}

can_detect_termination! {
    case_01_reached: (0.05, Some(0.), TargetError::new(0.1), true),
    case_02_not_reached: (0.5, Some(0.), TargetError::new(0.1), false),
    case_03_unknown_optimum: (0., None, TargetError::new(0.1), false),
    case_04_explicit_optimum: (1.05, None, TargetError::with_optimum(0.1, 1.), true),
    case_05_explicit_overrides: (0., Some(0.), TargetError::with_optimum(0.1, 1.), false),
    case_06_below_optimum: (-0.05, Some(0.), TargetError::new(0.1), true),
}

fn can_detect_termination_impl(
    best_fitness: Float,
    known_optimum: Option<Float>,
    termination: TargetError,
    expected: bool,
) {
    let mut state = create_state(vec![(vec![0.], best_fitness)], Direction::Minimize);
    state.known_optimum = known_optimum;

    assert_eq!(termination.is_termination(&state), expected);
    assert_eq!(termination.estimate(&state), if expected { 1. } else { 0. });
}
