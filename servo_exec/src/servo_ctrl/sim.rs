//! Simulated [`PwmDriver`], used when no driver board is attached.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use std::convert::Infallible;

use super::{PwmDriver, PwmPin};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A driver which keeps every command it receives in memory instead of driving any hardware.
#[derive(Debug, Default, Clone)]
pub struct SimDriver {
    frequency_hz: Option<f64>,

    duty_history: Vec<(PwmPin, f64)>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frequency set on the driver.
    pub fn frequency_hz(&self) -> Option<f64> {
        self.frequency_hz
    }

    /// Every duty cycle command received, oldest first.
    pub fn duty_history(&self) -> &[(PwmPin, f64)] {
        &self.duty_history
    }

    /// The current duty cycle of a pin, or `None` if it has never been set.
    pub fn duty_cycle(&self, pin: PwmPin) -> Option<f64> {
        self.duty_history
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, d)| *d)
    }
}

impl PwmDriver for SimDriver {
    type Error = Infallible;

    fn set_frequency(&mut self, freq_hz: f64) -> Result<(), Self::Error> {
        debug!("[sim] frequency = {} Hz", freq_hz);
        self.frequency_hz = Some(freq_hz);
        Ok(())
    }

    fn set_duty_cycle(&mut self, pin: PwmPin, duty_cycle: f64) -> Result<(), Self::Error> {
        debug!("[sim] {:?}/{} duty cycle = {:.4}", pin.port, pin.pin, duty_cycle);
        self.duty_history.push((pin, duty_cycle));
        Ok(())
    }
}
