use crate::errors::DeviceError;

/// Boundary to the vendor magnetometer driver. Implementations wrap the
/// driver's data-available poll so that `read_mag` resolves once a fresh
/// sample exists, and report a bounded [`DeviceError::Timeout`] instead
/// of waiting forever on a silent sensor.
#[allow(async_fn_in_trait)]
pub trait Magnetometer {
    /// Bring up the sensor. Called repeatedly until it succeeds.
    async fn init(&mut self) -> Result<(), DeviceError>;
    /// Read the next field sample along the [x, y, z] axes, in the
    /// driver's native units.
    async fn read_mag(&mut self) -> Result<[f32; 3], DeviceError>;
}
