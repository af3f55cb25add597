//! Serializable mirrors of the error kinds defined by the embedded-hal
//! and embedded-io traits, so they can travel through signals and logs.

pub mod embedded_hal;
pub mod embedded_io;
