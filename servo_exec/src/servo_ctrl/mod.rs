//! # Servo Controller Module
//!
//! This module provides a servo control interface which maps a normalised servo position
//! (0.0 to 1.0) onto a PWM duty cycle, abstracting over different types of PWM driver boards.
//!
//! Each of the four servo channels has its own calibration, a `low` and `high` duty cycle which
//! correspond to positions 0.0 and 1.0 respectively. Channels which have not been explicitly
//! configured use the controller's default calibration the first time they are moved.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Per-channel calibration storage.
mod calib;

/// Completion callbacks for controller results.
mod notify;

/// One-shot readiness signal resolved by [`ServoCtrl::init`].
mod ready;

/// The controller itself.
mod state;

/// [`PwmDriver`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

/// Simulated [`PwmDriver`] which records all commands it receives.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use calib::*;
pub use notify::*;
pub use ready::*;
pub use state::*;

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of servo channels managed by a controller.
pub const NUM_CHANNELS: usize = 4;

/// PWM frequency set on initialisation, the standard hobby servo refresh rate.
///
/// Units: Hertz
pub const SERVO_FREQUENCY_HZ: f64 = 50.0;

/// Default duty cycle for position 0.0 of an unconfigured channel.
pub const DEFAULT_LOW: f64 = 0.05;

/// Default duty cycle for position 1.0 of an unconfigured channel.
pub const DEFAULT_HIGH: f64 = 0.12;

/// The physical pin driven by each channel index.
pub const CHANNEL_PINS: [PwmPin; NUM_CHANNELS] = [
    PwmPin { port: Port::A, pin: 0 },
    PwmPin { port: Port::A, pin: 1 },
    PwmPin { port: Port::B, pin: 0 },
    PwmPin { port: Port::B, pin: 1 },
];

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing PWM driver boards.
pub trait PwmDriver {

    /// The error returned by the underlying hardware.
    type Error;

    /// Set the PWM frequency of the board.
    ///
    /// ## Arguments
    /// - `freq_hz` - The frequency to set in Hertz. No validation is performed by the controller
    ///   before calling this function.
    fn set_frequency(&mut self, freq_hz: f64) -> Result<(), Self::Error>;

    /// Set the duty cycle of a pin.
    ///
    /// ## Arguments
    /// - `pin` - The pin to set the duty cycle for
    /// - `duty_cycle` - The duty cycle to set. The controller guarantees this is a value between
    ///   0.0 and 1.0.
    fn set_duty_cycle(&mut self, pin: PwmPin, duty_cycle: f64) -> Result<(), Self::Error>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A PWM capable pin on one of the board's ports.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PwmPin {
    pub port: Port,
    pub pin: u8,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Physical port a PWM pin belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
}

/// Errors which can occur in the [`ServoCtrl`].
///
/// `E` is the error type of the underlying [`PwmDriver`].
#[derive(thiserror::Error, Debug)]
pub enum ServoError<E> {
    #[error("Minimum PWM must be smaller than maximum PWM (low = {low}, high = {high})")]
    BoundsOrder { low: f64, high: f64 },

    #[error("Servo channel {0} has not been configured")]
    NotConfigured(usize),

    #[error("Servo channel must be between 0 and 3, found {0}")]
    InvalidChannel(usize),

    #[error("Invalid position {0}, value must be between 0 and 1")]
    InvalidPosition(f64),

    #[error("Invalid duty cycle {0}, value must be between 0 and 1")]
    InvalidDutyCycle(f64),

    #[error("PWM hardware error: {0}")]
    Hardware(E),
}

/// Broad categories of [`ServoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A calibration with `low >= high` was given.
    Config,

    /// A channel was queried before being configured.
    Unconfigured,

    /// A channel, position or duty cycle was outside of its valid range.
    Range,

    /// The PWM hardware reported an error.
    Hardware,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PwmPin {
    /// Get the pin for the given channel index, or `None` if the channel doesn't exist.
    pub fn from_channel(channel: usize) -> Option<Self> {
        CHANNEL_PINS.get(channel).copied()
    }
}

impl<E> ServoError<E> {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServoError::BoundsOrder { .. } => ErrorKind::Config,
            ServoError::NotConfigured(_) => ErrorKind::Unconfigured,
            ServoError::InvalidChannel(_)
            | ServoError::InvalidPosition(_)
            | ServoError::InvalidDutyCycle(_) => ErrorKind::Range,
            ServoError::Hardware(_) => ErrorKind::Hardware,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_channel_pins() {
        assert_eq!(PwmPin::from_channel(0), Some(PwmPin { port: Port::A, pin: 0 }));
        assert_eq!(PwmPin::from_channel(1), Some(PwmPin { port: Port::A, pin: 1 }));
        assert_eq!(PwmPin::from_channel(2), Some(PwmPin { port: Port::B, pin: 0 }));
        assert_eq!(PwmPin::from_channel(3), Some(PwmPin { port: Port::B, pin: 1 }));
        assert_eq!(PwmPin::from_channel(4), None);
    }

    #[test]
    fn test_error_kinds() {
        let errs: [(ServoError<()>, ErrorKind); 6] = [
            (ServoError::BoundsOrder { low: 0.3, high: 0.1 }, ErrorKind::Config),
            (ServoError::NotConfigured(1), ErrorKind::Unconfigured),
            (ServoError::InvalidChannel(4), ErrorKind::Range),
            (ServoError::InvalidPosition(1.5), ErrorKind::Range),
            (ServoError::InvalidDutyCycle(-0.1), ErrorKind::Range),
            (ServoError::Hardware(()), ErrorKind::Hardware),
        ];

        for (err, kind) in errs.iter() {
            assert_eq!(err.kind(), *kind);
        }
    }
}
