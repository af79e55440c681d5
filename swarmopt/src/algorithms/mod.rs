//! This module contains generic algorithms used by the optimizer.

pub mod math;
