//! Custom test assertions

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-12_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left;
        let right: f64 = $right;
        assert!(
            (left - right).abs() < $epsilon,
            "assertion failed: `{} ≈ {}` (epsilon: {})",
            left,
            right,
            $epsilon
        );
    }};
}
