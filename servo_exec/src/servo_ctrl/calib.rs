//! Per-channel calibration storage

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::lin_map;

use super::{ServoError, NUM_CHANNELS};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The duty cycle range of a single servo channel.
///
/// A calibration always satisfies `low < high`, use [`Calibration::new`] to build one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Duty cycle for position 0.0
    pub low: f64,

    /// Duty cycle for position 1.0
    pub high: f64,
}

/// Calibrations of all channels, populated as channels are configured.
#[derive(Debug, Default, Clone)]
pub struct CalibrationTable {
    entries: [Option<Calibration>; NUM_CHANNELS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Calibration {
    /// Create a new calibration.
    ///
    /// Returns [`ServoError::BoundsOrder`] if `low` is not strictly less than `high`. NaN bounds
    /// also fail this check.
    pub fn new<E>(low: f64, high: f64) -> Result<Self, ServoError<E>> {
        if !(low < high) {
            return Err(ServoError::BoundsOrder { low, high })
        }

        Ok(Self { low, high })
    }

    /// Map a normalised position onto this calibration's duty cycle range.
    pub fn duty_cycle(&self, position: f64) -> f64 {
        lin_map((0.0, 1.0), (self.low, self.high), position)
    }

    /// The calibration as a `(low, high)` pair.
    pub fn as_pair(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl CalibrationTable {
    /// Get the calibration of a channel, or `None` if it has not been configured.
    pub fn get(&self, channel: usize) -> Option<&Calibration> {
        self.entries.get(channel).and_then(|c| c.as_ref())
    }

    /// Store the calibration of a channel, replacing any previous one.
    ///
    /// Returns `false` without storing anything if the channel doesn't exist.
    pub fn insert(&mut self, channel: usize, calib: Calibration) -> bool {
        match self.entries.get_mut(channel) {
            Some(entry) => {
                *entry = Some(calib);
                true
            },
            None => false
        }
    }

    /// Iterate over all configured channels and their calibrations.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Calibration)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i, c)))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_calibration_order() {
        assert!(Calibration::new::<()>(0.05, 0.12).is_ok());
        assert!(Calibration::new::<()>(0.0, 0.2).is_ok());

        assert!(matches!(
            Calibration::new::<()>(0.3, 0.1),
            Err(ServoError::BoundsOrder { .. })
        ));
        assert!(matches!(
            Calibration::new::<()>(0.1, 0.1),
            Err(ServoError::BoundsOrder { .. })
        ));
        assert!(Calibration::new::<()>(std::f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_duty_cycle() {
        let calib = Calibration { low: 0.05, high: 0.12 };

        assert!((calib.duty_cycle(0.0) - 0.05).abs() < 1e-12);
        assert!((calib.duty_cycle(1.0) - 0.12).abs() < 1e-12);
        assert!((calib.duty_cycle(0.5) - 0.085).abs() < 1e-12);
    }

    #[test]
    fn test_table() {
        let mut table = CalibrationTable::default();

        assert!(table.get(0).is_none());
        assert_eq!(table.iter().count(), 0);

        assert!(table.insert(2, Calibration { low: 0.1, high: 0.2 }));
        assert!(table.insert(2, Calibration { low: 0.0, high: 0.3 }));
        assert!(!table.insert(NUM_CHANNELS, Calibration { low: 0.1, high: 0.2 }));

        assert_eq!(table.get(2).map(Calibration::as_pair), Some((0.0, 0.3)));
        assert!(table.get(NUM_CHANNELS).is_none());
        assert_eq!(table.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![2]);
    }
}
