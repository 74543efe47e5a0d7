//! BMI270 configuration file handling
//!
//! The BMI270 ships without its feature engine configured: on every power-up
//! the host must stream a vendor-supplied configuration file (8 KiB for the
//! stock Bosch image) into the device before the sensors are usable.
//!
//! ## Loading Process
//!
//! The file is written through three registers:
//! - `INIT_ADDR_0` (0x5B): word offset bits 0..3
//! - `INIT_ADDR_1` (0x5C): word offset bits 4..11
//! - `INIT_DATA` (0x5E): streaming data port
//!
//! The file is sent in 32-byte chunks. Before each chunk the word offset of
//! that chunk is programmed into `INIT_ADDR_0`/`INIT_ADDR_1`; for 32-byte
//! chunks the low nibble is always zero and the high byte equals the chunk
//! number.
//!
//! The file itself is opaque. Bosch distributes it with the BMI270 Sensor
//! API; embed it with `include_bytes!` and pass it to
//! [`Bmi270Driver::new`](crate::Bmi270Driver::new).

use crate::Error;

/// Bytes written to `INIT_DATA` per transaction
pub const CONFIG_CHUNK_SIZE: usize = 32;

/// Largest file addressable through `INIT_ADDR_1` (256 chunks)
pub const MAX_CONFIG_FILE_SIZE: usize = 8192;

/// Delay after disabling advanced power save, before the load starts (µs)
pub const POWER_SAVE_DISABLE_DELAY_US: u32 = 450;

/// Delay after programming the chunk offset (ms)
pub const CHUNK_ADDRESS_DELAY_MS: u32 = 30;

/// Delay after each `INIT_DATA` write (µs)
pub const CHUNK_WRITE_DELAY_US: u32 = 20;

/// Delay after `INIT_CTRL` = 1 before the status can be checked (ms)
pub const INIT_COMPLETE_DELAY_MS: u32 = 20;

/// `INIT_CTRL` value that halts the feature engine for loading
pub const INIT_CTRL_LOAD_START: u8 = 0x00;

/// `INIT_CTRL` value that ends the load
pub const INIT_CTRL_LOAD_END: u8 = 0x01;

/// Word offset of a chunk, split over `INIT_ADDR_0`/`INIT_ADDR_1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChunkAddress {
    /// `INIT_ADDR_0` value (word offset bits 0..3)
    pub low: u8,
    /// `INIT_ADDR_1` value (word offset bits 4..11)
    pub high: u8,
}

impl ChunkAddress {
    /// Address of the chunk starting at `byte_offset` in the file
    #[must_use]
    pub const fn for_byte_offset(byte_offset: usize) -> Self {
        let word = byte_offset / 2;
        #[allow(clippy::cast_possible_truncation)]
        let low = (word & 0x0F) as u8;
        #[allow(clippy::cast_possible_truncation)]
        let high = (word >> 4) as u8;
        Self { low, high }
    }
}

/// A validated configuration file
#[derive(Debug, Clone, Copy)]
pub struct ConfigFile<'a> {
    data: &'a [u8],
}

impl<'a> ConfigFile<'a> {
    /// Wrap a configuration image
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigFile`] if the length is zero, not a
    /// multiple of [`CONFIG_CHUNK_SIZE`], or above [`MAX_CONFIG_FILE_SIZE`].
    pub fn new<E>(data: &'a [u8]) -> Result<Self, Error<E>> {
        let len = data.len();
        if len == 0 || len % CONFIG_CHUNK_SIZE != 0 || len > MAX_CONFIG_FILE_SIZE {
            return Err(Error::InvalidConfigFile(len));
        }
        Ok(Self { data })
    }

    /// File contents
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of 32-byte chunks
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.data.len() / CONFIG_CHUNK_SIZE
    }

    /// Iterate over `(address, chunk)` pairs in upload order
    pub fn chunks(self) -> impl Iterator<Item = (ChunkAddress, &'a [u8])> + 'a {
        self.data
            .chunks_exact(CONFIG_CHUNK_SIZE)
            .enumerate()
            .map(|(i, chunk)| (ChunkAddress::for_byte_offset(i * CONFIG_CHUNK_SIZE), chunk))
    }
}
