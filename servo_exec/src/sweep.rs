//! # Sweep
//!
//! Generates positions which sweep a servo from 0.0 to 1.0 in fixed steps, returning to 0.0
//! once the next step would go past 1.0.

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Infinite iterator over sweep positions.
#[derive(Debug, Clone)]
pub struct Sweep {
    position: f64,
    step: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Sweep {
    /// Create a new sweep starting at position 0.0.
    ///
    /// Returns `None` unless `0.0 < step <= 1.0`.
    pub fn new(step: f64) -> Option<Self> {
        if step > 0.0 && step <= 1.0 {
            Some(Self { position: 0.0, step })
        }
        else {
            None
        }
    }
}

impl Iterator for Sweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let position = self.position;

        self.position += self.step;
        if self.position > 1.0 {
            self.position = 0.0;
        }

        Some(position)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sweep() {
        let positions: Vec<f64> = Sweep::new(0.1).unwrap().take(13).collect();

        // Eleven steps up to the top of the range, then back to the start
        for (i, p) in positions[..11].iter().enumerate() {
            assert!((p - i as f64 / 10.0).abs() < 1e-9, "step {} was {}", i, p);
        }
        assert_eq!(positions[11], 0.0);
        assert!((positions[12] - 0.1).abs() < 1e-9);

        assert!(positions.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_sweep_coarse() {
        let positions: Vec<f64> = Sweep::new(0.4).unwrap().take(4).collect();
        assert_eq!(positions, vec![0.0, 0.4, 0.8, 0.0]);

        let positions: Vec<f64> = Sweep::new(1.0).unwrap().take(3).collect();
        assert_eq!(positions, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_invalid_step() {
        assert!(Sweep::new(0.0).is_none());
        assert!(Sweep::new(-0.1).is_none());
        assert!(Sweep::new(1.5).is_none());
        assert!(Sweep::new(std::f64::NAN).is_none());
    }
}
