//! Sensor modules for the BMI270
//!
//! This module provides range types and physical-unit conversions for each
//! sensor in the BMI270:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//!
//! All sensor operations are performed through methods on `Bmi270Driver`.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{AccelDataMps2, AccelRange};
pub use gyroscope::{GyroDataDps, GyroRange};
