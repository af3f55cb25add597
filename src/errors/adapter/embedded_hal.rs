use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbeddedI2cError {
    #[error("An unspecific bus error occurred.")]
    Bus,
    #[error("The arbitration was lost.")]
    ArbitrationLoss,
    #[error("A bus operation was not acknowledged.")]
    NoAcknowledge,
    #[error("The peripheral receive buffer was overrun.")]
    Overrun,
    #[error("A different error occurred.")]
    Other,
}

impl From<embedded_hal::i2c::ErrorKind> for EmbeddedI2cError {
    fn from(value: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind as E;
        match value {
            E::Bus => Self::Bus,
            E::ArbitrationLoss => Self::ArbitrationLoss,
            E::NoAcknowledge(_) => Self::NoAcknowledge,
            E::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbeddedDigError {
    #[error("A different error occurred.")]
    Other,
}

impl From<embedded_hal::digital::ErrorKind> for EmbeddedDigError {
    fn from(value: embedded_hal::digital::ErrorKind) -> Self {
        match value {
            embedded_hal::digital::ErrorKind::Other => Self::Other,
            _ => Self::Other,
        }
    }
}
