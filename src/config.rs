//! Driver configuration
//!
//! [`Bmi270Config`] selects the ranges applied after the configuration file
//! is loaded and how strictly the load is verified.
//!
//! # Example
//!
//! ```ignore
//! # use bmi270::{Bmi270Config, Bmi270Driver, I2cInterface, InitCheck, AccelRange, GyroRange};
//! let config = Bmi270Config {
//!     accel_range: AccelRange::G8,
//!     gyro_range: GyroRange::Dps1000,
//!     init_check: InitCheck::Permissive,
//! };
//! let imu = Bmi270Driver::new_with_config(
//!     I2cInterface::default(i2c),
//!     &mut delay,
//!     CONFIG_FILE,
//!     config,
//! )?;
//! ```

use crate::sensors::{AccelRange, GyroRange};

/// How the driver treats `INTERNAL_STATUS` after a configuration load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitCheck {
    /// Fail construction with
    /// [`Error::InitializationFailed`](crate::Error::InitializationFailed)
    #[default]
    Strict,
    /// Log the status and carry on. Callers must check
    /// [`Bmi270Driver::internal_status`](crate::Bmi270Driver::internal_status)
    /// themselves.
    Permissive,
}

/// Settings applied while constructing the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bmi270Config {
    /// Accelerometer range set after initialization
    pub accel_range: AccelRange,
    /// Gyroscope range set after initialization
    pub gyro_range: GyroRange,
    /// Configuration load verification policy
    pub init_check: InitCheck,
}

impl Default for Bmi270Config {
    fn default() -> Self {
        Self {
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps250,
            init_check: InitCheck::Strict,
        }
    }
}
