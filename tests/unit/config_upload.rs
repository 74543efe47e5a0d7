//! Configuration file upload tests

use crate::common::{MockDelay, MockError, MockInterface, Operation, config_file};
use bmi270::{Bmi270Config, Bmi270Driver, DriverState, Error, InitCheck};

const INIT_CTRL: u8 = 0x59;
const INIT_ADDR_0: u8 = 0x5B;
const INIT_ADDR_1: u8 = 0x5C;
const INIT_DATA: u8 = 0x5E;
const PWR_CONF: u8 = 0x7C;
const PWR_CTRL: u8 = 0x7D;

fn init(interface: &MockInterface, config: Bmi270Config) -> Result<DriverState, Error<MockError>> {
    Bmi270Driver::new_with_config(interface.clone(), &mut MockDelay, &config_file(), config)
        .map(|driver| driver.state())
}

#[test]
fn test_upload_streams_whole_file() {
    let interface = MockInterface::new();
    Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    let chunks = interface.writes_to(INIT_DATA);
    assert_eq!(chunks.len(), 256);
    assert!(chunks.iter().all(|chunk| chunk.len() == 32));
    assert_eq!(interface.init_data(), config_file());
}

#[test]
fn test_chunk_index_is_monotonic() {
    let interface = MockInterface::new();
    Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    let high: Vec<u8> = interface
        .writes_to(INIT_ADDR_1)
        .into_iter()
        .map(|data| data[0])
        .collect();
    let expected: Vec<u8> = (0..=255).collect();
    assert_eq!(high, expected);

    // Every write is a single byte and the low nibble is always zero
    let low = interface.writes_to(INIT_ADDR_0);
    assert_eq!(low.len(), 256);
    assert!(low.iter().all(|data| data.as_slice() == [0x00]));
}

#[test]
fn test_address_precedes_each_chunk() {
    let interface = MockInterface::new();
    Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    let writes: Vec<u8> = interface
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Write { address, .. }
                if matches!(address, INIT_ADDR_0 | INIT_ADDR_1 | INIT_DATA) =>
            {
                Some(address)
            }
            _ => None,
        })
        .collect();

    for triple in writes.chunks(3) {
        assert_eq!(triple, [INIT_ADDR_0, INIT_ADDR_1, INIT_DATA]);
    }
}

#[test]
fn test_upload_bracketed_by_init_ctrl() {
    let interface = MockInterface::new();
    Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    let writes: Vec<(u8, Vec<u8>)> = interface
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Write { address, data } => Some((address, data)),
            _ => None,
        })
        .collect();

    // Power save off, then INIT_CTRL = 0, before the first chunk address
    assert_eq!(writes[0], (PWR_CONF, vec![0x00]));
    assert_eq!(writes[1], (INIT_CTRL, vec![0x00]));
    assert_eq!(writes[2].0, INIT_ADDR_0);

    // INIT_CTRL = 1 right after the last chunk
    let last_chunk = writes
        .iter()
        .rposition(|(address, _)| *address == INIT_DATA)
        .unwrap();
    assert_eq!(writes[last_chunk + 1], (INIT_CTRL, vec![0x01]));
}

#[test]
fn test_startup_defaults_applied() {
    let interface = MockInterface::new();
    let driver = Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    assert_eq!(driver.state(), DriverState::Ready);
    assert_eq!(interface.get_register(PWR_CTRL), 0x0E);
    assert_eq!(interface.get_register(PWR_CONF), 0x00);
    // ACC_RANGE = 2g, GYR_RANGE = 250 dps
    assert_eq!(interface.get_register(0x41) & 0x03, 0x00);
    assert_eq!(interface.get_register(0x43) & 0x07, 0x03);
}

#[test]
fn test_skip_upload_when_already_loaded() {
    let interface = MockInterface::new();
    interface.set_already_initialized();

    let driver = Bmi270Driver::new(interface.clone(), &mut MockDelay, &config_file()).unwrap();

    assert_eq!(driver.state(), DriverState::Ready);
    assert!(interface.writes_to(INIT_DATA).is_empty());
    assert!(interface.writes_to(INIT_CTRL).is_empty());
    // Defaults are still applied
    assert_eq!(interface.get_register(PWR_CTRL), 0x0E);
}

#[test]
fn test_strict_check_rejects_failed_load() {
    let interface = MockInterface::new();
    interface.set_load_status(0x02);

    let result = init(&interface, Bmi270Config::default());
    assert_eq!(result, Err(Error::InitializationFailed(0x02)));
    // The whole file was still sent
    assert_eq!(interface.writes_to(INIT_DATA).len(), 256);
}

#[test]
fn test_permissive_check_continues() {
    let interface = MockInterface::new();
    interface.set_load_status(0x00);

    let config = Bmi270Config {
        init_check: InitCheck::Permissive,
        ..Default::default()
    };
    assert_eq!(init(&interface, config), Ok(DriverState::Ready));
    assert_eq!(interface.get_register(PWR_CTRL), 0x0E);
}

#[test]
fn test_wrong_chip_id() {
    let interface = MockInterface::new();
    interface.set_chip_id(0x00);

    let result = init(&interface, Bmi270Config::default());
    assert_eq!(result, Err(Error::DeviceNotFound(0x00)));
    assert_eq!(interface.write_count(), 0);
}

#[test]
fn test_invalid_config_file_touches_nothing() {
    let interface = MockInterface::new();
    let image = config_file();

    for len in [0, 31, 100, 8191] {
        let result = Bmi270Driver::new(interface.clone(), &mut MockDelay, &image[..len]);
        assert!(matches!(result, Err(Error::InvalidConfigFile(l)) if l == len));
    }

    let oversized = vec![0u8; 8192 + 32];
    let result = Bmi270Driver::new(interface.clone(), &mut MockDelay, &oversized);
    assert!(matches!(result, Err(Error::InvalidConfigFile(8224))));

    assert!(interface.operations().is_empty());
}

#[test]
fn test_short_config_file() {
    let interface = MockInterface::new();
    let image = config_file();

    Bmi270Driver::new(interface.clone(), &mut MockDelay, &image[..128]).unwrap();

    assert_eq!(interface.writes_to(INIT_DATA).len(), 4);
    assert_eq!(interface.init_data(), &image[..128]);
}
