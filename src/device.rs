//! High-level driver API for the BMI270
//!
//! This module provides the device handle: construction (identity check,
//! configuration file upload and start-up defaults), typed configuration
//! accessors, and sample reads in physical units.
//!
//! The handle owns the bus interface and caches the scale factors of the
//! configured ranges so sample conversion needs no extra bus traffic.

use crate::config::{Bmi270Config, InitCheck};
use crate::config_file::{
    CHUNK_ADDRESS_DELAY_MS, CHUNK_WRITE_DELAY_US, ConfigFile, INIT_COMPLETE_DELAY_MS,
    INIT_CTRL_LOAD_END, INIT_CTRL_LOAD_START, POWER_SAVE_DISABLE_DELAY_US,
};
use crate::error_code::ErrorCode;
use crate::power::{
    AccelPowerMode, POWER_SETTLE_DELAY_MS, PWR_CONF_PERFORMANCE, PowerCtrl, SOFT_RESET_DELAY_MS,
};
use crate::registers::{
    self, BitField, CMD_SOFT_RESET, MAX_REGISTER_SIZE, Register, RegisterValue,
};
use crate::sensors::{AccelDataMps2, AccelRange, GyroDataDps, GyroRange};
use crate::{CHIP_ID_VALUE, Error, INTERNAL_STATUS_INIT_OK};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

/// Lifecycle of the device handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Device not configured (before start-up, or after a soft reset)
    Uninitialized,
    /// Configuration file upload and start-up defaults in progress
    Initializing,
    /// Configured; samples and cached scales are valid
    Ready,
}

/// Main driver for the BMI270
pub struct Bmi270Driver<I> {
    interface: I,
    state: DriverState,
    config: Bmi270Config,
    // LSB/g of the configured accelerometer range
    accel_scale: f32,
    // LSB/(°/s) of the configured gyroscope range
    gyro_scale: f32,
}

impl<I> Bmi270Driver<I> {
    fn uninitialized(interface: I, config: Bmi270Config) -> Self {
        Self {
            interface,
            state: DriverState::Uninitialized,
            config,
            accel_scale: config.accel_range.sensitivity(),
            gyro_scale: config.gyro_range.sensitivity(),
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Configuration the driver was constructed with
    pub const fn config(&self) -> &Bmi270Config {
        &self.config
    }

    /// Cached accelerometer scale factor in LSB/g
    pub const fn accel_scale(&self) -> f32 {
        self.accel_scale
    }

    /// Cached gyroscope scale factor in LSB/(°/s)
    pub const fn gyro_scale(&self) -> f32 {
        self.gyro_scale
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Bmi270Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create and initialize a BMI270 driver with the default configuration
    ///
    /// See [`new_with_config`](Self::new_with_config).
    ///
    /// # Errors
    ///
    /// Same as [`new_with_config`](Self::new_with_config).
    pub fn new<D>(
        interface: I,
        delay: &mut D,
        config_file: &[u8],
    ) -> Result<Self, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        Self::new_with_config(interface, delay, config_file, Bmi270Config::default())
    }

    /// Create and initialize a BMI270 driver
    ///
    /// Performs a dummy read to select the bus, verifies `CHIP_ID`, uploads
    /// `config_file` unless the device reports it is already loaded, powers
    /// up the accelerometer, gyroscope and temperature sensor, and applies
    /// the ranges from `config`.
    ///
    /// The upload takes several seconds: every 32-byte chunk is followed by
    /// the settle time the device requires.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `config_file` has an invalid length ([`Error::InvalidConfigFile`])
    /// - The `CHIP_ID` register is not 0x24 ([`Error::DeviceNotFound`])
    /// - `config.init_check` is [`InitCheck::Strict`] and `INTERNAL_STATUS`
    ///   is not 0x01 after the upload ([`Error::InitializationFailed`])
    /// - Communication with the device fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// static CONFIG_FILE: &[u8] = include_bytes!("bmi270_config.bin");
    ///
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Bmi270Driver::new(interface, &mut delay, CONFIG_FILE)?;
    /// let accel = imu.read_acceleration()?;
    /// ```
    pub fn new_with_config<D>(
        interface: I,
        delay: &mut D,
        config_file: &[u8],
        config: Bmi270Config,
    ) -> Result<Self, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let config_file = ConfigFile::new::<I::Error>(config_file)?;
        let mut driver = Self::uninitialized(interface, config);

        driver.select_bus()?;
        let chip_id = driver.read_chip_id()?;
        if chip_id != CHIP_ID_VALUE {
            return Err(Error::DeviceNotFound(chip_id));
        }

        driver.initialize(delay, config_file)?;

        Ok(driver)
    }

    fn initialize<D>(
        &mut self,
        delay: &mut D,
        config_file: ConfigFile<'_>,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.state = DriverState::Initializing;
        self.load_config_file(delay, config_file)?;
        self.apply_startup_defaults(delay)?;
        self.state = DriverState::Ready;
        Ok(())
    }

    /// Stream the configuration file into the device
    fn load_config_file<D>(
        &mut self,
        delay: &mut D,
        config_file: ConfigFile<'_>,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if self.internal_status()? == INTERNAL_STATUS_INIT_OK {
            #[cfg(feature = "defmt")]
            defmt::info!("BMI270 configuration already loaded, skipping upload");
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Loading BMI270 configuration ({} bytes)",
            config_file.as_bytes().len()
        );

        // Advanced power save must be off while the file is streamed
        self.write_register(registers::PWR_CONF, PWR_CONF_PERFORMANCE)?;
        delay.delay_us(POWER_SAVE_DISABLE_DELAY_US);

        self.write_register(registers::INIT_CTRL, INIT_CTRL_LOAD_START)?;

        for (address, chunk) in config_file.chunks() {
            self.write_register(registers::INIT_ADDR_0, address.low)?;
            self.write_register(registers::INIT_ADDR_1, address.high)?;
            delay.delay_ms(CHUNK_ADDRESS_DELAY_MS);

            #[cfg(feature = "defmt")]
            defmt::trace!("Config chunk {}", address.high);

            self.write_register(registers::INIT_DATA, <[u16; 16]>::decode(chunk))?;
            delay.delay_us(CHUNK_WRITE_DELAY_US);
        }

        self.write_register(registers::INIT_CTRL, INIT_CTRL_LOAD_END)?;
        delay.delay_ms(INIT_COMPLETE_DELAY_MS);

        let status = self.internal_status()?;
        self.check_init_status(status)
    }

    fn apply_startup_defaults<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.set_power_ctrl(PowerCtrl::ACCEL_GYRO_TEMP)?;
        delay.delay_ms(POWER_SETTLE_DELAY_MS);
        self.set_power_conf(PWR_CONF_PERFORMANCE)?;
        delay.delay_ms(POWER_SETTLE_DELAY_MS);

        self.set_accel_range(self.config.accel_range)?;
        self.set_gyro_range(self.config.gyro_range)?;
        Ok(())
    }

    /// Soft-reset the device and initialize it again
    ///
    /// The reset clears every register including the loaded configuration,
    /// so the configuration file is uploaded again and the ranges from the
    /// driver's [`Bmi270Config`] are restored before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigFile`] before touching the device if
    /// `config_file` is invalid, otherwise the errors of
    /// [`new_with_config`](Self::new_with_config) after the reset.
    pub fn soft_reset<D>(
        &mut self,
        delay: &mut D,
        config_file: &[u8],
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let config_file = ConfigFile::new::<I::Error>(config_file)?;

        self.write_register(registers::CMD, CMD_SOFT_RESET)?;
        self.state = DriverState::Uninitialized;
        delay.delay_ms(SOFT_RESET_DELAY_MS);
        self.select_bus()?;

        self.initialize(delay, config_file)
    }

    /// Dummy `CHIP_ID` read that switches the device to SPI
    ///
    /// The BMI270 starts in I2C mode after power-up or soft reset and latches
    /// SPI on the first rising edge of CSB; the byte returned by that first
    /// access is not valid. Harmless on I2C.
    fn select_bus(&mut self) -> Result<(), Error<I::Error>> {
        self.read_chip_id()?;
        Ok(())
    }

    // ==================== REGISTER ACCESS ====================

    /// Read a register and decode it with its fixed layout
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register<T>(&mut self, register: Register<T>) -> Result<T, Error<I::Error>>
    where
        T: RegisterValue,
    {
        let mut buffer = [0u8; MAX_REGISTER_SIZE];
        let bytes = &mut buffer[..T::SIZE];
        self.interface
            .read_register(register.address, register.size_bits(), bytes)?;
        Ok(T::decode(bytes))
    }

    /// Encode a value with the register's fixed layout and write it in one
    /// transaction
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register<T>(
        &mut self,
        register: Register<T>,
        value: T,
    ) -> Result<(), Error<I::Error>>
    where
        T: RegisterValue,
    {
        let mut buffer = [0u8; MAX_REGISTER_SIZE];
        let bytes = &mut buffer[..T::SIZE];
        value.encode(bytes);
        self.interface
            .write_register(register.address, register.size_bits(), bytes)?;
        Ok(())
    }

    /// Read a bit field
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_field(&mut self, field: BitField) -> Result<u8, Error<I::Error>> {
        let register = self.read_register(Register::<u8>::new(field.address))?;
        Ok(field.extract(register))
    }

    /// Read-modify-write a bit field, leaving the other bits untouched
    ///
    /// `value` is masked to the field width.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_field(&mut self, field: BitField, value: u8) -> Result<(), Error<I::Error>> {
        let register = Register::<u8>::new(field.address);
        let current = self.read_register(register)?;
        self.write_register(register, field.insert(current, value))
    }

    // ==================== IDENTITY & STATUS ====================

    /// Read the `CHIP_ID` register
    ///
    /// Should return 0x24 for a valid BMI270
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::CHIP_ID)
    }

    /// Read `INTERNAL_STATUS`
    ///
    /// 0x01 means the configuration file was loaded successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn internal_status(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::INTERNAL_STATUS)
    }

    /// Read and decode `ERR_REG`, logging every active condition
    ///
    /// Reading clears the I2C master and FIFO flags.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn error_code(&mut self) -> Result<ErrorCode, Error<I::Error>> {
        let code = ErrorCode::from_bits(self.read_register(registers::ERR_REG)?);

        #[cfg(feature = "defmt")]
        for message in code.messages() {
            defmt::warn!("BMI270: {}", message);
        }

        Ok(code)
    }

    // ==================== POWER ====================

    /// Read the sensor enable bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn power_ctrl(&mut self) -> Result<PowerCtrl, Error<I::Error>> {
        Ok(PowerCtrl::from_bits(self.read_register(registers::PWR_CTRL)?))
    }

    /// Write the sensor enable bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_power_ctrl(&mut self, ctrl: PowerCtrl) -> Result<(), Error<I::Error>> {
        self.write_register(registers::PWR_CTRL, ctrl.bits())
    }

    /// Read `PWR_CONF`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn power_conf(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::PWR_CONF)
    }

    /// Write `PWR_CONF`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_power_conf(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.write_register(registers::PWR_CONF, value)
    }

    /// Read the accelerometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_power_mode(&mut self) -> Result<AccelPowerMode, Error<I::Error>> {
        let code = self.read_field(registers::ACC_EN)?;
        AccelPowerMode::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Enable or disable the accelerometer
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_power_mode(&mut self, mode: AccelPowerMode) -> Result<(), Error<I::Error>> {
        self.write_field(registers::ACC_EN, mode.code())
    }

    /// Set the accelerometer power mode from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not 0 or 1, or an error if communication fails.
    pub fn set_accel_power_mode_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let mode = AccelPowerMode::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_accel_power_mode(mode)
    }

    // ==================== RANGES ====================

    /// Read the accelerometer range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_range(&mut self) -> Result<AccelRange, Error<I::Error>> {
        let code = self.read_field(registers::ACC_RANGE)?;
        AccelRange::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Set the accelerometer range and update the cached scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the cached
    /// scale is left unchanged in that case.
    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        self.write_field(registers::ACC_RANGE, range.code())?;
        self.accel_scale = range.sensitivity();
        Ok(())
    }

    /// Set the accelerometer range from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not a defined range, or an error if communication fails.
    pub fn set_accel_range_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let range = AccelRange::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_accel_range(range)
    }

    /// Read the gyroscope range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegisterValue`] if the field holds a reserved
    /// code, or an error if communication with the device fails.
    pub fn gyro_range(&mut self) -> Result<GyroRange, Error<I::Error>> {
        let code = self.read_field(registers::GYR_RANGE)?;
        GyroRange::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Set the gyroscope range and update the cached scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the cached
    /// scale is left unchanged in that case.
    pub fn set_gyro_range(&mut self, range: GyroRange) -> Result<(), Error<I::Error>> {
        self.write_field(registers::GYR_RANGE, range.code())?;
        self.gyro_scale = range.sensitivity();
        Ok(())
    }

    /// Set the gyroscope range from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not a defined range, or an error if communication fails.
    pub fn set_gyro_range_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let range = GyroRange::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_gyro_range(range)
    }

    // ==================== SAMPLES ====================

    /// Read accelerometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_raw(&mut self) -> Result<AccelData, Error<I::Error>> {
        // Read all 6 bytes at once to prevent torn reads
        let [x, y, z] = self.read_register(registers::ACC_DATA)?;
        Ok(AccelData { x, y, z })
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        let [x, y, z] = self.read_register(registers::GYR_DATA)?;
        Ok(GyroData { x, y, z })
    }

    /// Read acceleration in m/s²
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<AccelDataMps2, Error<I::Error>> {
        let raw = self.read_accel_raw()?;
        Ok(AccelDataMps2::from_raw(raw.x, raw.y, raw.z, self.accel_scale))
    }

    /// Read angular rate in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_angular_rate(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let raw = self.read_gyro_raw()?;
        Ok(GyroDataDps::from_raw(raw.x, raw.y, raw.z, self.gyro_scale))
    }
}

#[cfg(feature = "async")]
impl<I> Bmi270Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Create and initialize a BMI270 driver with the default configuration
    ///
    /// # Errors
    ///
    /// Same as [`new_with_config`](Self::new_with_config).
    pub async fn new<D>(
        interface: I,
        delay: &mut D,
        config_file: &[u8],
    ) -> Result<Self, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        Self::new_with_config(interface, delay, config_file, Bmi270Config::default()).await
    }

    /// Create and initialize a BMI270 driver
    ///
    /// Verifies `CHIP_ID`, uploads `config_file` unless the device reports it
    /// is already loaded, powers up the sensors and applies the ranges from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `config_file` has an invalid length ([`Error::InvalidConfigFile`])
    /// - The `CHIP_ID` register is not 0x24 ([`Error::DeviceNotFound`])
    /// - `config.init_check` is [`InitCheck::Strict`] and `INTERNAL_STATUS`
    ///   is not 0x01 after the upload ([`Error::InitializationFailed`])
    /// - Communication with the device fails
    pub async fn new_with_config<D>(
        interface: I,
        delay: &mut D,
        config_file: &[u8],
        config: Bmi270Config,
    ) -> Result<Self, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let config_file = ConfigFile::new::<I::Error>(config_file)?;
        let mut driver = Self::uninitialized(interface, config);

        driver.select_bus().await?;
        let chip_id = driver.read_chip_id().await?;
        if chip_id != CHIP_ID_VALUE {
            return Err(Error::DeviceNotFound(chip_id));
        }

        driver.initialize(delay, config_file).await?;

        Ok(driver)
    }

    async fn initialize<D>(
        &mut self,
        delay: &mut D,
        config_file: ConfigFile<'_>,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.state = DriverState::Initializing;
        self.load_config_file(delay, config_file).await?;
        self.apply_startup_defaults(delay).await?;
        self.state = DriverState::Ready;
        Ok(())
    }

    async fn load_config_file<D>(
        &mut self,
        delay: &mut D,
        config_file: ConfigFile<'_>,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        if self.internal_status().await? == INTERNAL_STATUS_INIT_OK {
            #[cfg(feature = "defmt")]
            defmt::info!("BMI270 configuration already loaded, skipping upload");
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Loading BMI270 configuration ({} bytes)",
            config_file.as_bytes().len()
        );

        self.write_register(registers::PWR_CONF, PWR_CONF_PERFORMANCE)
            .await?;
        delay.delay_us(POWER_SAVE_DISABLE_DELAY_US).await;

        self.write_register(registers::INIT_CTRL, INIT_CTRL_LOAD_START)
            .await?;

        for (address, chunk) in config_file.chunks() {
            self.write_register(registers::INIT_ADDR_0, address.low)
                .await?;
            self.write_register(registers::INIT_ADDR_1, address.high)
                .await?;
            delay.delay_ms(CHUNK_ADDRESS_DELAY_MS).await;

            #[cfg(feature = "defmt")]
            defmt::trace!("Config chunk {}", address.high);

            self.write_register(registers::INIT_DATA, <[u16; 16]>::decode(chunk))
                .await?;
            delay.delay_us(CHUNK_WRITE_DELAY_US).await;
        }

        self.write_register(registers::INIT_CTRL, INIT_CTRL_LOAD_END)
            .await?;
        delay.delay_ms(INIT_COMPLETE_DELAY_MS).await;

        let status = self.internal_status().await?;
        self.check_init_status(status)
    }

    async fn apply_startup_defaults<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.set_power_ctrl(PowerCtrl::ACCEL_GYRO_TEMP).await?;
        delay.delay_ms(POWER_SETTLE_DELAY_MS).await;
        self.set_power_conf(PWR_CONF_PERFORMANCE).await?;
        delay.delay_ms(POWER_SETTLE_DELAY_MS).await;

        self.set_accel_range(self.config.accel_range).await?;
        self.set_gyro_range(self.config.gyro_range).await?;
        Ok(())
    }

    /// Soft-reset the device and initialize it again
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfigFile`] before touching the device if
    /// `config_file` is invalid, otherwise the errors of
    /// [`new_with_config`](Self::new_with_config) after the reset.
    pub async fn soft_reset<D>(
        &mut self,
        delay: &mut D,
        config_file: &[u8],
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let config_file = ConfigFile::new::<I::Error>(config_file)?;

        self.write_register(registers::CMD, CMD_SOFT_RESET).await?;
        self.state = DriverState::Uninitialized;
        delay.delay_ms(SOFT_RESET_DELAY_MS).await;
        self.select_bus().await?;

        self.initialize(delay, config_file).await
    }

    async fn select_bus(&mut self) -> Result<(), Error<I::Error>> {
        self.read_chip_id().await?;
        Ok(())
    }

    /// Read a register and decode it with its fixed layout
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_register<T>(&mut self, register: Register<T>) -> Result<T, Error<I::Error>>
    where
        T: RegisterValue,
    {
        let mut buffer = [0u8; MAX_REGISTER_SIZE];
        let bytes = &mut buffer[..T::SIZE];
        self.interface
            .read_register(register.address, register.size_bits(), bytes)
            .await?;
        Ok(T::decode(bytes))
    }

    /// Encode a value with the register's fixed layout and write it in one
    /// transaction
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn write_register<T>(
        &mut self,
        register: Register<T>,
        value: T,
    ) -> Result<(), Error<I::Error>>
    where
        T: RegisterValue,
    {
        let mut buffer = [0u8; MAX_REGISTER_SIZE];
        let bytes = &mut buffer[..T::SIZE];
        value.encode(bytes);
        self.interface
            .write_register(register.address, register.size_bits(), bytes)
            .await?;
        Ok(())
    }

    /// Read a bit field
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_field(&mut self, field: BitField) -> Result<u8, Error<I::Error>> {
        let register = self.read_register(Register::<u8>::new(field.address)).await?;
        Ok(field.extract(register))
    }

    /// Read-modify-write a bit field, leaving the other bits untouched
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn write_field(&mut self, field: BitField, value: u8) -> Result<(), Error<I::Error>> {
        let register = Register::<u8>::new(field.address);
        let current = self.read_register(register).await?;
        self.write_register(register, field.insert(current, value))
            .await
    }

    /// Read the `CHIP_ID` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::CHIP_ID).await
    }

    /// Read `INTERNAL_STATUS`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn internal_status(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::INTERNAL_STATUS).await
    }

    /// Read and decode `ERR_REG`, logging every active condition
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn error_code(&mut self) -> Result<ErrorCode, Error<I::Error>> {
        let code = ErrorCode::from_bits(self.read_register(registers::ERR_REG).await?);

        #[cfg(feature = "defmt")]
        for message in code.messages() {
            defmt::warn!("BMI270: {}", message);
        }

        Ok(code)
    }

    /// Read the sensor enable bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn power_ctrl(&mut self) -> Result<PowerCtrl, Error<I::Error>> {
        Ok(PowerCtrl::from_bits(
            self.read_register(registers::PWR_CTRL).await?,
        ))
    }

    /// Write the sensor enable bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_power_ctrl(&mut self, ctrl: PowerCtrl) -> Result<(), Error<I::Error>> {
        self.write_register(registers::PWR_CTRL, ctrl.bits()).await
    }

    /// Read `PWR_CONF`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn power_conf(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(registers::PWR_CONF).await
    }

    /// Write `PWR_CONF`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_power_conf(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.write_register(registers::PWR_CONF, value).await
    }

    /// Read the accelerometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn accel_power_mode(&mut self) -> Result<AccelPowerMode, Error<I::Error>> {
        let code = self.read_field(registers::ACC_EN).await?;
        AccelPowerMode::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Enable or disable the accelerometer
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_accel_power_mode(
        &mut self,
        mode: AccelPowerMode,
    ) -> Result<(), Error<I::Error>> {
        self.write_field(registers::ACC_EN, mode.code()).await
    }

    /// Set the accelerometer power mode from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not 0 or 1, or an error if communication fails.
    pub async fn set_accel_power_mode_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let mode = AccelPowerMode::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_accel_power_mode(mode).await
    }

    /// Read the accelerometer range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn accel_range(&mut self) -> Result<AccelRange, Error<I::Error>> {
        let code = self.read_field(registers::ACC_RANGE).await?;
        AccelRange::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Set the accelerometer range and update the cached scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_accel_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        self.write_field(registers::ACC_RANGE, range.code()).await?;
        self.accel_scale = range.sensitivity();
        Ok(())
    }

    /// Set the accelerometer range from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not a defined range, or an error if communication fails.
    pub async fn set_accel_range_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let range = AccelRange::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_accel_range(range).await
    }

    /// Read the gyroscope range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegisterValue`] if the field holds a reserved
    /// code, or an error if communication with the device fails.
    pub async fn gyro_range(&mut self) -> Result<GyroRange, Error<I::Error>> {
        let code = self.read_field(registers::GYR_RANGE).await?;
        GyroRange::from_code(code).ok_or(Error::InvalidRegisterValue(code))
    }

    /// Set the gyroscope range and update the cached scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_gyro_range(&mut self, range: GyroRange) -> Result<(), Error<I::Error>> {
        self.write_field(registers::GYR_RANGE, range.code()).await?;
        self.gyro_scale = range.sensitivity();
        Ok(())
    }

    /// Set the gyroscope range from its register code
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the device if
    /// `code` is not a defined range, or an error if communication fails.
    pub async fn set_gyro_range_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        let range = GyroRange::from_code(code).ok_or(Error::<I::Error>::InvalidArgument)?;
        self.set_gyro_range(range).await
    }

    /// Read accelerometer data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_raw(&mut self) -> Result<AccelData, Error<I::Error>> {
        let [x, y, z] = self.read_register(registers::ACC_DATA).await?;
        Ok(AccelData { x, y, z })
    }

    /// Read gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyro_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        let [x, y, z] = self.read_register(registers::GYR_DATA).await?;
        Ok(GyroData { x, y, z })
    }

    /// Read acceleration in m/s²
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_acceleration(&mut self) -> Result<AccelDataMps2, Error<I::Error>> {
        let raw = self.read_accel_raw().await?;
        Ok(AccelDataMps2::from_raw(raw.x, raw.y, raw.z, self.accel_scale))
    }

    /// Read angular rate in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_angular_rate(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let raw = self.read_gyro_raw().await?;
        Ok(GyroDataDps::from_raw(raw.x, raw.y, raw.z, self.gyro_scale))
    }
}

impl<I> Bmi270Driver<I> {
    /// Apply the configured verification policy to `INTERNAL_STATUS`
    fn check_init_status<E>(&self, status: u8) -> Result<(), Error<E>> {
        if status == INTERNAL_STATUS_INIT_OK {
            #[cfg(feature = "defmt")]
            defmt::info!("BMI270 configuration loaded");
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "BMI270 configuration load status {=u8:#x} (expected 0x01)",
            status
        );

        match self.config.init_check {
            InitCheck::Strict => Err(Error::InitializationFailed(status)),
            InitCheck::Permissive => Ok(()),
        }
    }
}
