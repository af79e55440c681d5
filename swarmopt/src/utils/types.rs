/// A floating point type used across the crate.
pub type Float = f64;
