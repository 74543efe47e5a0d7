//! Power control
//!
//! The BMI270 powers each sensor separately through `PWR_CTRL` (0x7D):
//! - bit 0: auxiliary interface
//! - bit 1: gyroscope
//! - bit 2: accelerometer
//! - bit 3: temperature sensor
//!
//! `PWR_CONF` (0x7C) selects advanced power save, which must be off while the
//! configuration file is loaded and while registers are written quickly.
//!
//! # Example
//!
//! ```ignore
//! # use bmi270::{Bmi270Driver, PowerCtrl, AccelPowerMode};
//! # let mut imu: Bmi270Driver<_> = todo!();
//! // Gyro only
//! imu.set_power_ctrl(PowerCtrl { gyro: true, ..Default::default() })?;
//!
//! // Turn the accelerometer back on without touching the other bits
//! imu.set_accel_power_mode(AccelPowerMode::Enabled)?;
//! # Ok::<(), bmi270::Error<()>>(())
//! ```

use core::fmt;

/// `PWR_CONF` value with advanced power save, FIFO self wake-up and fast
/// power-up all disabled
pub const PWR_CONF_PERFORMANCE: u8 = 0x00;

/// Delay after changing `PWR_CTRL` or `PWR_CONF` during start-up (ms)
pub const POWER_SETTLE_DELAY_MS: u32 = 100;

/// Delay after a soft reset before the device accepts commands (ms)
pub const SOFT_RESET_DELAY_MS: u32 = 15;

/// Accelerometer power mode (`PWR_CTRL.acc_en`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelPowerMode {
    /// Accelerometer off
    Disabled = 0b0,
    /// Accelerometer on
    Enabled = 0b1,
}

impl AccelPowerMode {
    /// Register code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a mode by register code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b0 => Some(Self::Disabled),
            0b1 => Some(Self::Enabled),
            _ => None,
        }
    }

    /// Human-readable name of the setting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disabled => "ACCELERATOR_DISABLED",
            Self::Enabled => "ACCELERATOR_ENABLED",
        }
    }
}

impl fmt::Display for AccelPowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sensor enable bits of `PWR_CTRL`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct PowerCtrl {
    /// Auxiliary sensor interface enabled
    pub aux: bool,
    /// Gyroscope enabled
    pub gyro: bool,
    /// Accelerometer enabled
    pub accel: bool,
    /// Temperature sensor enabled
    pub temperature: bool,
}

impl PowerCtrl {
    /// Accelerometer, gyroscope and temperature sensor on (0x0E)
    pub const ACCEL_GYRO_TEMP: Self = Self {
        aux: false,
        gyro: true,
        accel: true,
        temperature: true,
    };

    /// Decode from a `PWR_CTRL` value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            aux: bits & 0x01 != 0,
            gyro: bits & 0x02 != 0,
            accel: bits & 0x04 != 0,
            temperature: bits & 0x08 != 0,
        }
    }

    /// Encode as a `PWR_CTRL` value
    #[must_use]
    pub const fn bits(self) -> u8 {
        let mut bits = 0;
        if self.aux {
            bits |= 0x01;
        }
        if self.gyro {
            bits |= 0x02;
        }
        if self.accel {
            bits |= 0x04;
        }
        if self.temperature {
            bits |= 0x08;
        }
        bits
    }
}
