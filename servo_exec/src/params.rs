//! # Servo Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct ServoExecParams {

    /// PWM driver board to use
    pub backend: Backend,

    /// I2C address of the PCA9685 board
    pub i2c_address: u8,

    /// Default duty cycle for position 0.0, the controller's built in default is used if not set
    pub default_low: Option<f64>,

    /// Default duty cycle for position 1.0, the controller's built in default is used if not set
    pub default_high: Option<f64>,

    /// Calibrations applied to individual channels on startup
    #[serde(default)]
    pub calibrations: Vec<ChannelCalib>,

    /// Channel to sweep
    pub sweep_channel: usize,

    /// Position increment between sweep steps
    pub sweep_step: f64,

    /// Time between sweep steps
    ///
    /// Units: milliseconds
    pub sweep_interval_ms: u64,
}

#[derive(Deserialize, Debug)]
pub struct ChannelCalib {
    pub channel: usize,
    pub low: f64,
    pub high: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Adafruit PCA9685 board on the Raspberry Pi's I2C bus
    Pca9685,

    /// Simulated board, commands are only logged
    Sim,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Backend {
    fn default() -> Self {
        Backend::Sim
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params: ServoExecParams = toml::from_str(include_str!("../../params/servo_exec.toml"))
            .unwrap();

        assert_eq!(params.backend, Backend::Pca9685);
        assert_eq!(params.i2c_address, 0x40);
        assert_eq!(params.default_low, Some(0.05));
        assert_eq!(params.calibrations.len(), 1);
        assert_eq!(params.calibrations[0].channel, 0);
        assert_eq!(params.sweep_interval_ms, 500);
    }

    #[test]
    fn test_parse_minimal() {
        let params: ServoExecParams = toml::from_str(
            "backend = \"sim\"\n\
             i2c_address = 64\n\
             sweep_channel = 2\n\
             sweep_step = 0.25\n\
             sweep_interval_ms = 100\n"
        ).unwrap();

        assert_eq!(params.backend, Backend::Sim);
        assert!(params.default_low.is_none());
        assert!(params.calibrations.is_empty());
    }
}
