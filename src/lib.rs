#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod config_file;
pub mod device;
pub mod error_code;
pub mod interface;
pub mod power;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use config::{Bmi270Config, InitCheck};
pub use config_file::ConfigFile;
pub use device::{AccelData, Bmi270Driver, DriverState, GyroData};
pub use error_code::ErrorCode;
pub use interface::{I2cInterface, SpiInterface};
pub use power::{AccelPowerMode, PowerCtrl};
pub use sensors::{AccelDataMps2, AccelRange, GyroDataDps, GyroRange};

/// BMI270 I2C address when the SDO pin is low (default: 0x68)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_SDO_LOW: u8 = 0x68;

/// BMI270 I2C address when the SDO pin is high (alternative: 0x69)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_SDO_HIGH: u8 = 0x69;

/// Expected value of the `CHIP_ID` register
pub const CHIP_ID_VALUE: u8 = 0x24;

/// `INTERNAL_STATUS` value reported once the configuration file is loaded
pub const INTERNAL_STATUS_INIT_OK: u8 = 0x01;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `CHIP_ID` register value (contains the actual value read)
    DeviceNotFound(u8),
    /// Configuration value outside the set of codes accepted by a setter
    InvalidArgument,
    /// Configuration file length is not a non-zero multiple of 32 bytes
    /// up to 8192 bytes (contains the actual length)
    InvalidConfigFile(usize),
    /// `INTERNAL_STATUS` did not report a successful configuration load
    /// (contains the status read back)
    InitializationFailed(u8),
    /// A register field held a code with no defined meaning
    InvalidRegisterValue(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
