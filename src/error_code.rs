//! Error register decoding
//!
//! `ERR_REG` (0x02) is a debug aid rather than a completion check:
//! - bit 7 `aux_err`: I2C master error, cleared on read
//! - bit 6 `fifo_err`: FIFO overfilled in streaming mode, cleared on read
//! - bits 1..4 `internal_err`: internal sensor error code
//! - bit 0 `fatal_err`: error during boot-up; stays set until power-on reset

use crate::registers::BitField;
use crate::registers::addr;

const I2C_MASTER_ERR: BitField = BitField::new(addr::ERR_REG, 1, 7);
const FIFO_ERR: BitField = BitField::new(addr::ERR_REG, 1, 6);
const INTERNAL_ERR: BitField = BitField::new(addr::ERR_REG, 4, 1);
const FATAL_ERR: BitField = BitField::new(addr::ERR_REG, 1, 0);

/// Message for [`ErrorCode::i2c_master`]
pub const I2C_MASTER_ERROR_MESSAGE: &str =
    "Error in I2C-Master detected. This flag will be reset when read.";

/// Message for [`ErrorCode::fifo`]
pub const FIFO_ERROR_MESSAGE: &str = "Error when a frame is read in streaming mode (so skipping is not possible) and fifo is overfilled (with virtual and/or regular frames). This flag will be reset when read.";

/// Message for a non-zero [`ErrorCode::internal`]
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Sensor Error";

/// Message for [`ErrorCode::fatal`]
pub const FATAL_ERROR_MESSAGE: &str =
    "Fatal Error. Error during bootup, only cleared by a power-on reset.";

/// Decoded `ERR_REG` contents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorCode {
    /// I2C master error
    pub i2c_master: bool,
    /// FIFO overflow in streaming mode
    pub fifo: bool,
    /// Internal error code (0 = none)
    pub internal: u8,
    /// Fatal boot-up error
    pub fatal: bool,
}

impl ErrorCode {
    /// Decode a raw `ERR_REG` value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            i2c_master: I2C_MASTER_ERR.extract(bits) != 0,
            fifo: FIFO_ERR.extract(bits) != 0,
            internal: INTERNAL_ERR.extract(bits),
            fatal: FATAL_ERR.extract(bits) != 0,
        }
    }

    /// No error condition is flagged
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        !self.i2c_master && !self.fifo && self.internal == 0 && !self.fatal
    }

    /// Human-readable messages for every active condition
    pub fn messages(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.i2c_master, I2C_MASTER_ERROR_MESSAGE),
            (self.fifo, FIFO_ERROR_MESSAGE),
            (self.internal != 0, INTERNAL_ERROR_MESSAGE),
            (self.fatal, FATAL_ERROR_MESSAGE),
        ]
        .into_iter()
        .filter_map(|(active, message)| active.then_some(message))
    }
}
