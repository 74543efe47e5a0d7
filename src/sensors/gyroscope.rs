//! Gyroscope sensor types
//!
//! Provides the range selection and unit conversion for the BMI270's 3-axis
//! gyroscope.

use core::fmt;

/// Gyroscope angular rate range (`GYR_RANGE.gyr_range`)
///
/// Narrower ranges trade span for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±2000°/s range
    Dps2000 = 0b000,
    /// ±1000°/s range
    Dps1000 = 0b001,
    /// ±500°/s range
    Dps500 = 0b010,
    /// ±250°/s range
    Dps250 = 0b011,
    /// ±125°/s range
    Dps125 = 0b100,
}

impl GyroRange {
    /// All ranges in register code order
    pub const ALL: [Self; 5] = [
        Self::Dps2000,
        Self::Dps1000,
        Self::Dps500,
        Self::Dps250,
        Self::Dps125,
    ];

    /// Register code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a range by register code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b000 => Some(Self::Dps2000),
            0b001 => Some(Self::Dps1000),
            0b010 => Some(Self::Dps500),
            0b011 => Some(Self::Dps250),
            0b100 => Some(Self::Dps125),
            _ => None,
        }
    }

    /// Get the sensitivity in LSB/(°/s)
    ///
    /// This is the divisor used to convert raw samples to °/s.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps2000 => 16.4,
            Self::Dps1000 => 32.8,
            Self::Dps500 => 65.6,
            Self::Dps250 => 131.2,
            Self::Dps125 => 262.4,
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps2000 => 2000,
            Self::Dps1000 => 1000,
            Self::Dps500 => 500,
            Self::Dps250 => 250,
            Self::Dps125 => 125,
        }
    }

    /// Human-readable name of the setting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dps2000 => "GYRO_RANGE_2000",
            Self::Dps1000 => "GYRO_RANGE_1000",
            Self::Dps500 => "GYRO_RANGE_500",
            Self::Dps250 => "GYRO_RANGE_250",
            Self::Dps125 => "GYRO_RANGE_125",
        }
    }
}

impl fmt::Display for GyroRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis angular rate in °/s
    pub x: f32,
    /// Y-axis angular rate in °/s
    pub y: f32,
    /// Z-axis angular rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// `sensitivity` is in LSB/(°/s), from [`GyroRange::sensitivity()`].
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity,
            y: f32::from(raw_y) / sensitivity,
            z: f32::from(raw_z) / sensitivity,
        }
    }

    /// Components as an `(x, y, z)` tuple
    #[must_use]
    pub const fn as_tuple(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}
