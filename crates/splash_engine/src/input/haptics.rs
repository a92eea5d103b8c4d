//! Controller rumble

use std::time::Duration;

use thiserror::Error;

/// Peripheral errors; none of these stop the application
#[derive(Error, Debug)]
pub enum PeripheralError {
    /// No joystick is connected
    #[error("No joysticks connected")]
    NoJoystick,

    /// The joystick exists but could not be opened
    #[error("Unable to open game controller: {0}")]
    OpenFailed(String),

    /// The controller has no haptic interface
    #[error("Controller does not support haptics: {0}")]
    HapticUnavailable(String),

    /// Rumble could not be played
    #[error("Unable to play rumble: {0}")]
    RumbleFailed(String),
}

/// A device that can play a timed rumble
pub trait RumbleDevice {
    /// Rumble at `strength` (0..=1) for `duration`
    fn play_rumble(&mut self, strength: f32, duration: Duration) -> Result<(), PeripheralError>;

    /// Human-readable device name for logs
    fn name(&self) -> String {
        "controller".to_string()
    }
}

/// Convert a 0..=1 strength to a 16-bit motor intensity
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn motor_intensity(strength: f32) -> u16 {
    (strength.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16
}

/// Saturating conversion of a duration to whole milliseconds
pub fn duration_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
