//! Sample read and unit conversion tests

use crate::common::{Operation, assert_float_eq, create_mock_driver};
use bmi270::{AccelData, AccelRange, GyroData, GyroRange, STANDARD_GRAVITY};

#[test]
fn test_raw_reads_are_single_burst() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(100, -200, 16384);
    interface.set_gyro_data(-1, 2, -32768);

    assert_eq!(
        driver.read_accel_raw().unwrap(),
        AccelData {
            x: 100,
            y: -200,
            z: 16384
        }
    );
    assert_eq!(
        driver.read_gyro_raw().unwrap(),
        GyroData {
            x: -1,
            y: 2,
            z: -32768
        }
    );

    let ops = interface.operations();
    assert_eq!(ops.len(), 2);
    assert!(matches!(&ops[0], Operation::Read { address: 0x0C, data } if data.len() == 6));
    assert!(matches!(&ops[1], Operation::Read { address: 0x12, data } if data.len() == 6));
}

#[test]
fn test_one_g_at_2g_range() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(0, 0, 16384);

    let accel = driver.read_acceleration().unwrap();
    assert_float_eq(accel.x, 0.0, 1e-6);
    assert_float_eq(accel.y, 0.0, 1e-6);
    assert_float_eq(accel.z, 9.806_65, 1e-4);
}

#[test]
fn test_acceleration_follows_range() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(-8192, 4096, 2048);

    driver.set_accel_range(AccelRange::G4).unwrap();
    let accel = driver.read_acceleration().unwrap();
    assert_float_eq(accel.x, -STANDARD_GRAVITY, 1e-4);
    assert_float_eq(accel.y, STANDARD_GRAVITY / 2.0, 1e-4);

    driver.set_accel_range(AccelRange::G16).unwrap();
    let (_, _, z) = driver.read_acceleration().unwrap().as_tuple();
    assert_float_eq(z, STANDARD_GRAVITY, 1e-4);
}

#[test]
fn test_angular_rate_follows_range() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_data(131, 164, -262);

    let gyro = driver.read_angular_rate().unwrap();
    assert_float_eq(gyro.x, 131.0 / 131.2, 1e-4);

    driver.set_gyro_range(GyroRange::Dps2000).unwrap();
    let gyro = driver.read_angular_rate().unwrap();
    assert_float_eq(gyro.y, 10.0, 1e-4);

    driver.set_gyro_range(GyroRange::Dps125).unwrap();
    let gyro = driver.read_angular_rate().unwrap();
    assert_float_eq(gyro.z, -262.0 / 262.4, 1e-4);
}

#[test]
fn test_full_scale_extremes() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(i16::MAX, i16::MIN, 0);

    let accel = driver.read_acceleration().unwrap();
    assert_float_eq(accel.x, 2.0 * STANDARD_GRAVITY, 1e-2);
    assert_float_eq(accel.y, -2.0 * STANDARD_GRAVITY, 1e-4);
}

#[test]
fn test_opposite_axes_at_2g() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(16384, 0, -16384);

    let (x, y, z) = driver.read_acceleration().unwrap().as_tuple();
    assert_float_eq(x, 9.806_65, 1e-4);
    assert_float_eq(y, 0.0, 1e-6);
    assert_float_eq(z, -9.806_65, 1e-4);
}

#[test]
fn test_hundred_dps_at_2000_range() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_gyro_range(GyroRange::Dps2000).unwrap();
    interface.set_gyro_data(1640, 0, 0);

    let gyro = driver.read_angular_rate().unwrap();
    assert_float_eq(gyro.x, 100.0, 1e-3);
}
