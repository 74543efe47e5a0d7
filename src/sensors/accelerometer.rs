//! Accelerometer sensor types
//!
//! Provides the range selection and unit conversion for the BMI270's 3-axis
//! accelerometer.

use core::fmt;

use crate::STANDARD_GRAVITY;

/// Accelerometer measurement range (`ACC_RANGE.acc_range`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g range (most sensitive, least range)
    G2 = 0b00,
    /// ±4g range
    G4 = 0b01,
    /// ±8g range
    G8 = 0b10,
    /// ±16g range (least sensitive, most range)
    G16 = 0b11,
}

impl AccelRange {
    /// All ranges in register code order
    pub const ALL: [Self; 4] = [Self::G2, Self::G4, Self::G8, Self::G16];

    /// Register code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a range by register code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b00 => Some(Self::G2),
            0b01 => Some(Self::G4),
            0b10 => Some(Self::G8),
            0b11 => Some(Self::G16),
            _ => None,
        }
    }

    /// Get the sensitivity in LSB/g
    ///
    /// This is the divisor used to convert raw samples to g.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Human-readable name of the setting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::G2 => "ACCEL_RANGE_2G",
            Self::G4 => "ACCEL_RANGE_4G",
            Self::G8 => "ACCEL_RANGE_8G",
            Self::G16 => "ACCEL_RANGE_16G",
        }
    }
}

impl fmt::Display for AccelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accelerometer data in m/s²
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataMps2 {
    /// X-axis acceleration in m/s²
    pub x: f32,
    /// Y-axis acceleration in m/s²
    pub y: f32,
    /// Z-axis acceleration in m/s²
    pub z: f32,
}

impl AccelDataMps2 {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/g (from [`AccelRange::sensitivity()`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity * STANDARD_GRAVITY,
            y: f32::from(raw_y) / sensitivity * STANDARD_GRAVITY,
            z: f32::from(raw_z) / sensitivity * STANDARD_GRAVITY,
        }
    }

    /// Components as an `(x, y, z)` tuple
    #[must_use]
    pub const fn as_tuple(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}
