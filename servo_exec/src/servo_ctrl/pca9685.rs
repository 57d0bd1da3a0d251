//! [`PwmDriver`] implementation for the PCA9685 driver
//!
//! Board channels C0 and C1 form port A, C2 and C3 form port B.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use pwm_pca9685::{Channel, Pca9685};
use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::{Port, PwmDriver, PwmPin};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const MAX_PWM: u16 = 4096;

/// Frequency of the PCA9685's internal oscillator.
///
/// Units: Hertz
const OSC_CLOCK_HZ: f64 = 25_000_000.0;

/// Smallest prescale value accepted by the chip.
const MIN_PRESCALE: f64 = 3.0;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Pca9685Error {
    #[error("An I2C error occured")]
    I2c,

    #[error("The PCA9685 rejected the input data")]
    InvalidInputData,

    #[error("Frequency {0} Hz cannot be produced by the PCA9685 (24 Hz to 1526 Hz)")]
    InvalidFrequency(f64),

    #[error("Pin {0:?} is not connected to the PCA9685")]
    InvalidPin(PwmPin),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<I2C, E> PwmDriver for Pca9685<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>
{
    type Error = Pca9685Error;

    fn set_frequency(&mut self, freq_hz: f64) -> Result<(), Self::Error> {
        let prescale = prescale(freq_hz)?;

        self.set_prescale(prescale).map_err(map_err)?;
        self.enable().map_err(map_err)
    }

    fn set_duty_cycle(
        &mut self,
        pin: PwmPin,
        duty_cycle: f64
    ) -> Result<(), Self::Error> {

        // If the duty cycle is out of range return an error
        if duty_cycle < 0.0 || duty_cycle > 1.0 {
            return Err(Pca9685Error::InvalidInputData)
        }

        self.set_channel_on_off(pin_channel(pin)?, 0, off_count(duty_cycle))
            .map_err(map_err)
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Calculate the prescale register value for the given frequency.
fn prescale(freq_hz: f64) -> Result<u8, Pca9685Error> {
    let prescale = (OSC_CLOCK_HZ / (MAX_PWM as f64 * freq_hz)).round() - 1.0;

    // Also rejects NaN and non-positive frequencies
    if !(MIN_PRESCALE..=(u8::MAX as f64)).contains(&prescale) {
        return Err(Pca9685Error::InvalidFrequency(freq_hz))
    }

    Ok(prescale as u8)
}

/// Number of counts the output is held high for at the given duty cycle, saturating at the
/// largest count the chip accepts.
fn off_count(duty_cycle: f64) -> u16 {
    ((duty_cycle * (MAX_PWM as f64)) as u16).min(MAX_PWM - 1)
}

fn pin_channel(pin: PwmPin) -> Result<Channel, Pca9685Error> {
    match (pin.port, pin.pin) {
        (Port::A, 0) => Ok(Channel::C0),
        (Port::A, 1) => Ok(Channel::C1),
        (Port::B, 0) => Ok(Channel::C2),
        (Port::B, 1) => Ok(Channel::C3),
        _ => Err(Pca9685Error::InvalidPin(pin))
    }
}

fn map_err<E>(e: pwm_pca9685::Error<E>) -> Pca9685Error {
    match e {
        pwm_pca9685::Error::I2C(_) => Pca9685Error::I2c,
        pwm_pca9685::Error::InvalidInputData => Pca9685Error::InvalidInputData
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_prescale() {
        assert_eq!(prescale(50.0).unwrap(), 121);
        assert_eq!(prescale(60.0).unwrap(), 101);
        assert_eq!(prescale(1526.0).unwrap(), 3);
        assert_eq!(prescale(24.0).unwrap(), 253);

        assert!(matches!(prescale(10.0), Err(Pca9685Error::InvalidFrequency(_))));
        assert!(matches!(prescale(2000.0), Err(Pca9685Error::InvalidFrequency(_))));
        assert!(matches!(prescale(0.0), Err(Pca9685Error::InvalidFrequency(_))));
        assert!(matches!(prescale(std::f64::NAN), Err(Pca9685Error::InvalidFrequency(_))));
    }

    #[test]
    fn test_off_count() {
        assert_eq!(off_count(0.0), 0);
        assert_eq!(off_count(0.05), 204);
        assert_eq!(off_count(0.5), 2048);
        assert_eq!(off_count(1.0), 4095);
    }

    #[test]
    fn test_pin_channel() {
        let pins = super::super::CHANNEL_PINS;
        assert!(matches!(pin_channel(pins[0]), Ok(Channel::C0)));
        assert!(matches!(pin_channel(pins[1]), Ok(Channel::C1)));
        assert!(matches!(pin_channel(pins[2]), Ok(Channel::C2)));
        assert!(matches!(pin_channel(pins[3]), Ok(Channel::C3)));

        assert!(pin_channel(PwmPin { port: Port::B, pin: 2 }).is_err());
    }
}
