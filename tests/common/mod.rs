#![allow(dead_code)]

pub use taskplan_test_utils::builders;
pub use taskplan_test_utils::scripted;
pub use taskplan_test_utils::{fast_clock, init_tracing, with_timeout};

/// Float comparison for minute and percentage values.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
