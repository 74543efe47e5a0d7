//! Integration tests for basic workflow scenarios

use crate::common::{MockDelay, MockInterface, assert_float_eq, config_file};
use bmi270::{
    AccelPowerMode, AccelRange, Bmi270Config, Bmi270Driver, DriverState, GyroRange, InitCheck,
};

#[test]
fn test_complete_initialization_workflow() {
    let interface = MockInterface::new();
    let handle = interface.clone();

    let mut driver = Bmi270Driver::new(interface, &mut MockDelay, &config_file()).unwrap();
    assert_eq!(driver.state(), DriverState::Ready);
    assert_eq!(driver.accel_range().unwrap(), AccelRange::G2);
    assert_eq!(driver.gyro_range().unwrap(), GyroRange::Dps250);
    assert_eq!(driver.accel_power_mode().unwrap(), AccelPowerMode::Enabled);

    // Lying flat, rotating slowly about Z
    handle.set_accel_data(0, 0, 16384);
    handle.set_gyro_data(0, 0, 1312);

    let accel = driver.read_acceleration().unwrap();
    assert_float_eq(accel.z, 9.806_65, 1e-4);

    let gyro = driver.read_angular_rate().unwrap();
    assert_float_eq(gyro.z, 10.0, 1e-4);

    assert!(driver.error_code().unwrap().is_clear());
}

#[test]
fn test_custom_config_workflow() {
    let config = Bmi270Config {
        accel_range: AccelRange::G16,
        gyro_range: GyroRange::Dps2000,
        init_check: InitCheck::Strict,
    };
    let interface = MockInterface::new();
    let handle = interface.clone();

    let mut driver =
        Bmi270Driver::new_with_config(interface, &mut MockDelay, &config_file(), config).unwrap();
    assert_eq!(driver.config(), &config);

    handle.set_accel_data(2048, -2048, 0);
    handle.set_gyro_data(164, 0, -164);

    let (x, y, _) = driver.read_acceleration().unwrap().as_tuple();
    assert_float_eq(x, 9.806_65, 1e-4);
    assert_float_eq(y, -9.806_65, 1e-4);

    let (x, _, z) = driver.read_angular_rate().unwrap().as_tuple();
    assert_float_eq(x, 10.0, 1e-4);
    assert_float_eq(z, -10.0, 1e-4);
}

#[test]
fn test_warm_restart_skips_upload() {
    let interface = MockInterface::new();
    let handle = interface.clone();

    let driver = Bmi270Driver::new(interface, &mut MockDelay, &config_file()).unwrap();
    let interface = driver.release();
    handle.clear_operations();

    // Configuration survives while the device stays powered
    let mut driver = Bmi270Driver::new(interface, &mut MockDelay, &config_file()).unwrap();
    assert!(handle.init_data().is_empty());

    driver.set_accel_power_mode(AccelPowerMode::Disabled).unwrap();
    assert_eq!(driver.power_ctrl().unwrap().bits(), 0x0A);
}
