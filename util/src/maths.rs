//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where 
    T: Float 
{
    target_range.0 
        + ((value - source_range.0) 
        * (target_range.1 - target_range.0) 
        / (source_range.1 - source_range.0))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 1f64), (0f64, 0.2f64), 0f64), 0f64);
        assert_eq!(lin_map((0f64, 10f64), (-1f64, 1f64), 5f64), 0f64);
        assert_eq!(lin_map((0f64, 10f64), (-1f64, 1f64), 10f64), 1f64);
        assert!((lin_map((0f64, 1f64), (0.05f64, 0.12f64), 0.5f64) - 0.085).abs() < 1e-12);

        // Reversed target ranges map in the opposite direction
        assert_eq!(lin_map((0f32, 1f32), (1f32, 0f32), 0.25f32), 0.75f32);
    }
}
