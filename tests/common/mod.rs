//! Common test utilities and mock implementations

#![allow(dead_code)]

pub mod test_utils;

pub use mock_interface::{MockError, MockInterface, Operation};
#[cfg(not(feature = "async"))]
pub use test_utils::create_mock_driver;
pub use test_utils::{
    MockDelay, RecordingDelay, assert_float_eq, config_file, delays_after_write, delays_ns,
    startup_delays_ns,
};
