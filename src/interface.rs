//! Bus interface implementations for the BMI270
//!
//! This module provides implementations of the `device-driver` register
//! interface traits for I2C and SPI communication with the BMI270.

use crate::I2C_ADDRESS_SDO_LOW;

use crate::Error;
use device_driver::RegisterInterface;

/// I2C interface for the BMI270
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x68, SDO pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Bmi270Driver::new(interface, &mut delay, CONFIG_FILE)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SDO_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, SDO pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_SDO_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// For standard BMI270 wiring, prefer [`default()`](Self::default)
    /// or [`alternative()`](Self::alternative).
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address used on the bus
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Adjacent writes go out back to back without a repeated start
        let register = [address];
        let mut operations = [
            embedded_hal::i2c::Operation::Write(&register),
            embedded_hal::i2c::Operation::Write(write_data),
        ];

        self.i2c.transaction(self.address, &mut operations)
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let register = [address];
        let mut operations = [
            embedded_hal_async::i2c::Operation::Write(&register),
            embedded_hal_async::i2c::Operation::Write(write_data),
        ];

        self.i2c.transaction(self.address, &mut operations).await
    }
}

/// SPI interface for the BMI270
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically.
///
/// The BMI270 starts in I2C mode and switches to SPI on the first rising edge
/// of CSB, so the first read after power-up or soft reset returns garbage;
/// [`Bmi270Driver`](crate::Bmi270Driver) issues a throwaway `CHIP_ID` read
/// before it trusts the bus. Every SPI read also returns one dummy byte
/// before the register data; this interface discards it.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;
        let mut dummy = [0u8; 1];

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(&mut dummy),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations).map_err(Error::Bus)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB should be 0
        let register = [address & 0x7F];
        let mut operations = [
            embedded_hal::spi::Operation::Write(&register),
            embedded_hal::spi::Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations).map_err(Error::Bus)
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;
        let mut dummy = [0u8; 1];

        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&[read_address]),
            embedded_hal_async::spi::Operation::Read(&mut dummy),
            embedded_hal_async::spi::Operation::Read(read_data),
        ];

        self.spi
            .transaction(&mut operations)
            .await
            .map_err(Error::Bus)
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB should be 0
        let register = [address & 0x7F];
        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&register),
            embedded_hal_async::spi::Operation::Write(write_data),
        ];

        self.spi
            .transaction(&mut operations)
            .await
            .map_err(Error::Bus)
    }
}
