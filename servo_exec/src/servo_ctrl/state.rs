//! Implementations for the ServoCtrl state structure

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use std::fmt::Display;

// Internal
use super::{
    Calibration, CalibrationTable, PwmDriver, PwmPin, ReadySignal, ServoError,
    DEFAULT_HIGH, DEFAULT_LOW, SERVO_FREQUENCY_HZ,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Servo controller driving up to four servos from a single [`PwmDriver`].
pub struct ServoCtrl<D>
where
    D: PwmDriver
{
    driver: D,

    /// Calibration used by channels which are moved before being configured
    defaults: Calibration,

    calibs: CalibrationTable,

    /// Last frequency successfully set through this controller
    frequency_hz: Option<f64>,

    ready: ReadySignal<D::Error>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D> ServoCtrl<D>
where
    D: PwmDriver,
    D::Error: Display
{
    /// Create a new servo controller without touching the hardware.
    ///
    /// ## Arguments
    /// - `driver` - The PWM driver board to use
    /// - `low` - Default duty cycle for position 0.0, [`DEFAULT_LOW`] if `None`. A low of `0.0`
    ///   is a valid bound.
    /// - `high` - Default duty cycle for position 1.0, [`DEFAULT_HIGH`] if `None`.
    ///
    /// Returns [`ServoError::BoundsOrder`] if the defaults don't satisfy `low < high`.
    pub fn new(
        driver: D,
        low: Option<f64>,
        high: Option<f64>
    ) -> Result<Self, ServoError<D::Error>> {
        let defaults = Calibration::new(
            low.unwrap_or(DEFAULT_LOW),
            high.unwrap_or(DEFAULT_HIGH)
        )?;

        Ok(Self {
            driver,
            defaults,
            calibs: CalibrationTable::default(),
            frequency_hz: None,
            ready: ReadySignal::new(),
        })
    }

    /// Create a new servo controller and set the PWM frequency to [`SERVO_FREQUENCY_HZ`].
    ///
    /// `callback` is invoked with the outcome of setting the frequency, after which the
    /// controller's [`ReadySignal`] resolves to the same outcome. The controller is returned
    /// whether or not the frequency could be set, check the signal before moving servos.
    ///
    /// Only invalid defaults (see [`ServoCtrl::new`]) cause an `Err` to be returned.
    pub fn init<F>(
        driver: D,
        low: Option<f64>,
        high: Option<f64>,
        callback: F
    ) -> Result<Self, ServoError<D::Error>>
    where
        F: FnOnce(Result<(), &D::Error>)
    {
        let mut ctrl = Self::new(driver, low, high)?;

        info!(
            "Initialising servo controller (defaults: low = {}, high = {})",
            ctrl.defaults.low, ctrl.defaults.high
        );

        let outcome = match ctrl.driver.set_frequency(SERVO_FREQUENCY_HZ) {
            Ok(()) => {
                ctrl.frequency_hz = Some(SERVO_FREQUENCY_HZ);
                Ok(())
            },
            Err(e) => {
                warn!("Could not set the PWM frequency: {}", e);
                Err(e)
            }
        };

        callback(outcome.as_ref().map(|_| ()));

        if outcome.is_ok() {
            info!("Servo controller ready");
        }
        ctrl.ready.resolve(outcome);

        Ok(ctrl)
    }

    /// Set the duty cycle range of a channel.
    ///
    /// ## Arguments
    /// - `channel` - The channel to configure, between 0 and 3
    /// - `low` - Duty cycle for position 0.0
    /// - `high` - Duty cycle for position 1.0, must be greater than `low`
    ///
    /// On error the channel's existing calibration, if any, is kept.
    pub fn configure(
        &mut self,
        channel: usize,
        low: f64,
        high: f64
    ) -> Result<(), ServoError<D::Error>> {
        if PwmPin::from_channel(channel).is_none() {
            return Err(ServoError::InvalidChannel(channel))
        }

        let calib = Calibration::new(low, high)?;
        self.calibs.insert(channel, calib);

        debug!("Channel {} configured: low = {}, high = {}", channel, low, high);

        Ok(())
    }

    /// Get the `(low, high)` duty cycle range of a channel.
    ///
    /// Returns [`ServoError::NotConfigured`] if the channel has neither been configured nor
    /// moved.
    pub fn get_configuration(&self, channel: usize) -> Result<(f64, f64), ServoError<D::Error>> {
        self.calibs
            .get(channel)
            .map(Calibration::as_pair)
            .ok_or(ServoError::NotConfigured(channel))
    }

    /// Move a servo to the given position.
    ///
    /// ## Arguments
    /// - `channel` - The channel to move, between 0 and 3
    /// - `position` - Normalised position between 0.0 and 1.0
    ///
    /// Unconfigured channels are configured with the controller's defaults.
    pub fn move_to(&mut self, channel: usize, position: f64) -> Result<(), ServoError<D::Error>> {
        if PwmPin::from_channel(channel).is_none() {
            return Err(ServoError::InvalidChannel(channel))
        }

        if !(0.0..=1.0).contains(&position) {
            return Err(ServoError::InvalidPosition(position))
        }

        let calib = match self.calibs.get(channel) {
            Some(c) => *c,
            None => {
                debug!("Channel {} not configured, using defaults", channel);
                self.calibs.insert(channel, self.defaults);
                self.defaults
            }
        };

        self.set_duty_cycle(channel, calib.duty_cycle(position))
    }

    /// Set the duty cycle of a channel directly, bypassing its calibration.
    ///
    /// ## Arguments
    /// - `channel` - The channel to set, between 0 and 3
    /// - `duty_cycle` - The duty cycle between 0.0 and 1.0
    pub fn set_duty_cycle(
        &mut self,
        channel: usize,
        duty_cycle: f64
    ) -> Result<(), ServoError<D::Error>> {
        let pin = PwmPin::from_channel(channel)
            .ok_or(ServoError::InvalidChannel(channel))?;

        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(ServoError::InvalidDutyCycle(duty_cycle))
        }

        trace!("Channel {} ({:?}) duty cycle = {}", channel, pin, duty_cycle);

        self.driver.set_duty_cycle(pin, duty_cycle).map_err(|e| {
            warn!("Could not set the duty cycle of channel {}: {}", channel, e);
            ServoError::Hardware(e)
        })
    }

    /// Set the PWM frequency of the driver board.
    ///
    /// The frequency is passed to the driver without validation.
    pub fn set_frequency(&mut self, freq_hz: f64) -> Result<(), ServoError<D::Error>> {
        self.driver
            .set_frequency(freq_hz)
            .map_err(ServoError::Hardware)?;

        debug!("PWM frequency set to {} Hz", freq_hz);
        self.frequency_hz = Some(freq_hz);

        Ok(())
    }

    /// The last frequency set through this controller, `None` until one has been set.
    pub fn frequency(&self) -> Option<f64> {
        self.frequency_hz
    }

    /// The controller's default `(low, high)` duty cycle range.
    pub fn defaults(&self) -> (f64, f64) {
        self.defaults.as_pair()
    }

    /// A handle on the controller's readiness signal.
    pub fn ready_signal(&self) -> ReadySignal<D::Error> {
        self.ready.clone()
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Consume the controller, returning the underlying driver.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
