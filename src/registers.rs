//! Register map and register descriptors for the BMI270
//!
//! Registers are described by plain constants rather than generated
//! accessors:
//! - [`BitField`] describes an N-bit field inside a single byte register and
//!   provides the masking arithmetic for read-modify-write access.
//! - [`Register`] describes a register (or register run) with a fixed binary
//!   layout given by a [`RegisterValue`] type.
//!
//! The bus I/O for both lives on [`Bmi270Driver`](crate::Bmi270Driver).

use core::marker::PhantomData;

/// Register addresses
pub mod addr {
    /// `CHIP_ID` - Device ID (expected 0x24)
    pub const CHIP_ID: u8 = 0x00;
    /// `ERR_REG` - Sensor error flags
    pub const ERR_REG: u8 = 0x02;
    /// `ACC_X_LSB` - Start of the 6-byte accelerometer sample
    pub const ACC_X_LSB: u8 = 0x0C;
    /// `GYR_X_LSB` - Start of the 6-byte gyroscope sample
    pub const GYR_X_LSB: u8 = 0x12;
    /// `INTERNAL_STATUS` - Initialization status
    pub const INTERNAL_STATUS: u8 = 0x21;
    /// `ACC_RANGE` - Accelerometer g-range
    pub const ACC_RANGE: u8 = 0x41;
    /// `GYR_RANGE` - Gyroscope angular rate range
    pub const GYR_RANGE: u8 = 0x43;
    /// `INIT_CTRL` - Start/end of the configuration load
    pub const INIT_CTRL: u8 = 0x59;
    /// `INIT_ADDR_0` - Configuration load word offset, bits 0..3
    pub const INIT_ADDR_0: u8 = 0x5B;
    /// `INIT_ADDR_1` - Configuration load word offset, bits 4..11
    pub const INIT_ADDR_1: u8 = 0x5C;
    /// `INIT_DATA` - Configuration load data port (streaming)
    pub const INIT_DATA: u8 = 0x5E;
    /// `PWR_CONF` - Power mode configuration
    pub const PWR_CONF: u8 = 0x7C;
    /// `PWR_CTRL` - Sensor enable bits
    pub const PWR_CTRL: u8 = 0x7D;
    /// `CMD` - Command register
    pub const CMD: u8 = 0x7E;
}

/// Soft reset command written to `CMD`
pub const CMD_SOFT_RESET: u8 = 0xB6;

/// An N-bit field at a bit offset within a byte register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Register address holding the field
    pub address: u8,
    /// Field width in bits (1..=8)
    pub width: u8,
    /// Position of the field's least significant bit
    pub shift: u8,
}

impl BitField {
    /// Describe a field of `width` bits starting at bit `shift`
    #[must_use]
    pub const fn new(address: u8, width: u8, shift: u8) -> Self {
        debug_assert!(
            width != 0 && width <= 8 && shift <= 8 - width,
            "bit field must fit in one byte"
        );
        Self {
            address,
            width,
            shift,
        }
    }

    /// Mask covering the field, in register position
    #[must_use]
    pub const fn mask(self) -> u8 {
        // width 8 would overflow a u8 shift
        #[allow(clippy::cast_possible_truncation)]
        let ones = ((1u16 << self.width) - 1) as u8;
        ones << self.shift
    }

    /// Extract the field value from a register byte
    #[must_use]
    pub const fn extract(self, register: u8) -> u8 {
        (register & self.mask()) >> self.shift
    }

    /// Replace the field inside `register` with `value`
    ///
    /// Bits of `value` beyond the field width are dropped.
    #[must_use]
    pub const fn insert(self, register: u8, value: u8) -> u8 {
        let mask = self.mask();
        (register & !mask) | ((value << self.shift) & mask)
    }
}

/// Binary layout of a typed register
pub trait RegisterValue: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Decode from exactly [`Self::SIZE`] bytes
    fn decode(bytes: &[u8]) -> Self;

    /// Encode into exactly [`Self::SIZE`] bytes
    fn encode(&self, bytes: &mut [u8]);
}

impl RegisterValue for u8 {
    const SIZE: usize = 1;

    fn decode(bytes: &[u8]) -> Self {
        bytes[0]
    }

    fn encode(&self, bytes: &mut [u8]) {
        bytes[0] = *self;
    }
}

impl RegisterValue for i16 {
    const SIZE: usize = 2;

    // Sample registers are LSB first
    fn decode(bytes: &[u8]) -> Self {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }

    fn encode(&self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.to_le_bytes());
    }
}

/// X/Y/Z sample, three little-endian words
impl RegisterValue for [i16; 3] {
    const SIZE: usize = 6;

    fn decode(bytes: &[u8]) -> Self {
        let mut axes = [0i16; 3];
        for (axis, pair) in axes.iter_mut().zip(bytes.chunks_exact(2)) {
            *axis = i16::decode(pair);
        }
        axes
    }

    fn encode(&self, bytes: &mut [u8]) {
        for (axis, pair) in self.iter().zip(bytes.chunks_exact_mut(2)) {
            axis.encode(pair);
        }
    }
}

impl RegisterValue for [u16; 16] {
    const SIZE: usize = 32;

    fn decode(bytes: &[u8]) -> Self {
        let mut words = [0u16; 16];
        for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
            *word = u16::from_be_bytes([pair[0], pair[1]]);
        }
        words
    }

    fn encode(&self, bytes: &mut [u8]) {
        for (word, pair) in self.iter().zip(bytes.chunks_exact_mut(2)) {
            pair.copy_from_slice(&word.to_be_bytes());
        }
    }
}

/// Largest encoded [`RegisterValue`] handled by the driver
pub const MAX_REGISTER_SIZE: usize = 32;

/// A register with a fixed binary layout
#[derive(Debug, PartialEq, Eq)]
pub struct Register<T> {
    /// Address of the first byte
    pub address: u8,
    _value: PhantomData<T>,
}

impl<T> Clone for Register<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Register<T> {}

impl<T: RegisterValue> Register<T> {
    /// Describe a register at `address`
    #[must_use]
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            _value: PhantomData,
        }
    }

    /// Encoded size in bytes
    #[must_use]
    pub const fn size(self) -> usize {
        T::SIZE
    }

    /// Encoded size in bits, as passed to the register interface
    #[must_use]
    pub const fn size_bits(self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let bits = (T::SIZE * 8) as u32;
        bits
    }
}

// ==================== BIT FIELDS ====================

/// `ACC_RANGE.acc_range` - bits 0..1
pub const ACC_RANGE: BitField = BitField::new(addr::ACC_RANGE, 2, 0);

/// `GYR_RANGE.gyr_range` - bits 0..2
pub const GYR_RANGE: BitField = BitField::new(addr::GYR_RANGE, 3, 0);

/// `PWR_CTRL.acc_en` - bit 2
pub const ACC_EN: BitField = BitField::new(addr::PWR_CTRL, 1, 2);

// ==================== TYPED REGISTERS ====================

/// `CHIP_ID`
pub const CHIP_ID: Register<u8> = Register::new(addr::CHIP_ID);
/// `ERR_REG`
pub const ERR_REG: Register<u8> = Register::new(addr::ERR_REG);
/// `CMD`
pub const CMD: Register<u8> = Register::new(addr::CMD);
/// `PWR_CTRL`
pub const PWR_CTRL: Register<u8> = Register::new(addr::PWR_CTRL);
/// `PWR_CONF`
pub const PWR_CONF: Register<u8> = Register::new(addr::PWR_CONF);
/// `INTERNAL_STATUS`
pub const INTERNAL_STATUS: Register<u8> = Register::new(addr::INTERNAL_STATUS);

/// Accelerometer X/Y/Z sample, read as one burst
pub const ACC_DATA: Register<[i16; 3]> = Register::new(addr::ACC_X_LSB);
/// Gyroscope X/Y/Z sample, read as one burst
pub const GYR_DATA: Register<[i16; 3]> = Register::new(addr::GYR_X_LSB);

/// `INIT_CTRL`
pub const INIT_CTRL: Register<u8> = Register::new(addr::INIT_CTRL);
/// `INIT_ADDR_0`
pub const INIT_ADDR_0: Register<u8> = Register::new(addr::INIT_ADDR_0);
/// `INIT_ADDR_1`
pub const INIT_ADDR_1: Register<u8> = Register::new(addr::INIT_ADDR_1);
/// `INIT_DATA` - one 32-byte configuration chunk
pub const INIT_DATA: Register<[u16; 16]> = Register::new(addr::INIT_DATA);
