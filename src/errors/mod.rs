use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod adapter;
use adapter::embedded_hal::{EmbeddedDigError, EmbeddedI2cError};
use adapter::embedded_io::EmbeddedIoError;

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompassError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),
    #[error("Embedded-IO error: {0}")]
    Io(#[from] EmbeddedIoError),
    #[error("Embedded-HAL digital error: {0}")]
    Dig(#[from] EmbeddedDigError),
}

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    #[error("The device is not responding after {millis} ms.")]
    Timeout { millis: u64 },
    #[error("The device was not identified correctly.")]
    IdentificationError,
    #[error("I2c error: {0}")]
    I2c(#[from] EmbeddedI2cError),
}

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    #[error("The magnetometer is not sending data.")]
    MagMaxDropped,
    #[error("No usable samples were collected.")]
    MagNoSamples,
}
