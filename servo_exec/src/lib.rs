//! # Servo library.
//!
//! This library allows the servo executable, benchmarks and other crates in the workspace to
//! access the servo controller and its supporting items.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Servo controller - maps normalised servo positions onto PWM duty cycles
pub mod servo_ctrl;

/// Sweep - generates positions sweeping a servo across its full range
pub mod sweep;
