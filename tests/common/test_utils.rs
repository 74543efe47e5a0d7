//! Test utilities and helper functions

use crate::common::mock_interface::{MockInterface, Operation};
#[cfg(not(feature = "async"))]
use bmi270::Bmi270Driver;

/// Size of the stock configuration image
pub const CONFIG_FILE_LEN: usize = 8192;

/// Mock delay implementation for testing
///
/// This is a no-op delay that implements the embedded-hal DelayNs trait
/// for use in tests where actual delays are not needed.
#[derive(Debug, Clone, Copy)]
pub struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, _ms: u32) {
        // No-op for testing
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    async fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    async fn delay_ms(&mut self, _ms: u32) {
        // No-op for testing
    }
}

/// Delay that logs every request into a [`MockInterface`] operations log
///
/// Delays and bus operations end up in one sequence, so tests can check
/// what the driver waited for after each write.
#[derive(Clone)]
pub struct RecordingDelay {
    interface: MockInterface,
}

impl RecordingDelay {
    /// Record into the log of `interface`
    pub fn new(interface: &MockInterface) -> Self {
        Self {
            interface: interface.clone(),
        }
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.interface.record_delay(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.interface.record_delay(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.interface.record_delay(u64::from(ms) * 1_000_000);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.interface.record_delay(u64::from(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.interface.record_delay(u64::from(us) * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.interface.record_delay(u64::from(ms) * 1_000_000);
    }
}

/// Every delay in `operations`, in nanoseconds
pub fn delays_ns(operations: &[Operation]) -> Vec<u64> {
    operations
        .iter()
        .filter_map(|op| match op {
            Operation::Delay { ns } => Some(*ns),
            _ => None,
        })
        .collect()
}

/// Delay logged right after the write of `data` to `address`, one entry per write
pub fn delays_after_write(operations: &[Operation], address: u8, data: &[u8]) -> Vec<Option<u64>> {
    operations
        .iter()
        .enumerate()
        .filter(|(_, op)| {
            matches!(op, Operation::Write { address: a, data: d } if *a == address && d.as_slice() == data)
        })
        .map(|(i, _)| match operations.get(i + 1) {
            Some(Operation::Delay { ns }) => Some(*ns),
            _ => None,
        })
        .collect()
}

/// Delays of a full start-up that uploads `chunks` configuration chunks
pub fn startup_delays_ns(chunks: usize) -> Vec<u64> {
    let mut expected = vec![450_000];
    for _ in 0..chunks {
        expected.push(30_000_000);
        expected.push(20_000);
    }
    expected.extend([20_000_000, 100_000_000, 100_000_000]);
    expected
}

/// Synthetic configuration image with a position-dependent pattern
///
/// The pattern lets tests check that chunks arrive in order.
pub fn config_file() -> Vec<u8> {
    (0..CONFIG_FILE_LEN)
        .map(|i| u8::try_from(i % 251).unwrap())
        .collect()
}

#[cfg(not(feature = "async"))]
/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver() -> (Bmi270Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Bmi270Driver::new(interface, &mut MockDelay, &config_file())
        .expect("Failed to create mock driver");
    interface_clone.clear_operations();
    (driver, interface_clone)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {a} vs {b} (diff: {diff}, epsilon: {epsilon})"
    );
}
