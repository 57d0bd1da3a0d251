//! # Servo Control Executable
//!
//! This executable drives up to four hobby servos from a PWM driver board:
//! - Initialises the servo controller and sets the PWM frequency
//! - Applies the per-channel calibrations from the parameter file
//! - Sweeps the configured channel across its full range

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Parameters for the servo executable.
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{Result, eyre::{eyre, WrapErr}};
use log::{error, info};
use std::{thread, time::Duration};

// Internal
use params::{Backend, ServoExecParams};
use servo_lib::{
    servo_ctrl::{sim::SimDriver, PwmDriver, ServoCtrl},
    sweep::Sweep,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "servo_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Servo Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: ServoExecParams = util::params::load("servo_exec.toml")
        .wrap_err("Could not load servo_exec params")?;

    info!("Parameters loaded, using the {:?} backend", params.backend);

    // ---- RUN ----

    match params.backend {
        Backend::Sim => run(SimDriver::new(), &params),
        Backend::Pca9685 => run_pca9685(&params),
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the PCA9685 on the Raspberry Pi's I2C bus and run the sweep on it.
#[cfg(all(target_arch = "arm", target_os = "linux", target_env = "gnu"))]
fn run_pca9685(params: &ServoExecParams) -> Result<()> {
    use pwm_pca9685::{Address, Pca9685};
    use rppal::i2c::I2c;

    let i2c = I2c::new().wrap_err("Failed to open the I2C bus")?;

    let pca = Pca9685::new(i2c, Address::from(params.i2c_address))
        .map_err(|e| eyre!("Failed to initialise the PCA9685: {:?}", e))?;

    run(pca, params)
}

#[cfg(not(all(target_arch = "arm", target_os = "linux", target_env = "gnu")))]
fn run_pca9685(_params: &ServoExecParams) -> Result<()> {
    Err(eyre!(
        "The PCA9685 backend is only available on Raspberry Pi targets, use the sim backend"
    ))
}

/// Initialise the controller on the given driver, then sweep the configured channel forever.
fn run<D>(driver: D, params: &ServoExecParams) -> Result<()>
where
    D: PwmDriver,
    D::Error: std::error::Error + Send + Sync + 'static
{
    // ---- CONTROLLER INITIALISATION ----

    let mut servos = ServoCtrl::init(
        driver,
        params.default_low,
        params.default_high,
        |r| if let Err(e) = r {
            error!("Could not set the servo PWM frequency: {}", e)
        }
    ).wrap_err("Failed to initialise the servo controller")?;

    let ready = servos.ready_signal();
    if let Some(e) = ready.error() {
        return Err(eyre!("Servo controller failed to become ready: {}", e))
    }

    info!("Servo controller initialised");

    for calib in params.calibrations.iter() {
        servos.configure(calib.channel, calib.low, calib.high)
            .wrap_err_with(|| format!("Invalid calibration for channel {}", calib.channel))?;

        info!(
            "Channel {} calibrated: low = {}, high = {}",
            calib.channel, calib.low, calib.high
        );
    }

    // ---- MAIN LOOP ----

    let sweep = Sweep::new(params.sweep_step)
        .ok_or_else(|| eyre!("Sweep step must be in (0, 1], found {}", params.sweep_step))?;
    let interval = Duration::from_millis(params.sweep_interval_ms);

    info!("Initialisation complete, sweeping channel {}", params.sweep_channel);

    for position in sweep {
        info!("Position (in range 0-1): {:.2}", position);

        servos.move_to(params.sweep_channel, position)
            .wrap_err("Failed to move the servo")?;

        thread::sleep(interval);
    }

    Ok(())
}
