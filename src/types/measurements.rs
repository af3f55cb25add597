use num_traits::Num;
use serde::{Deserialize, Serialize};

/// A single raw magnetometer sample in the driver's native units.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData<T: Num> {
    /// The device-local time of when the sample was read.
    pub timestamp_us: u64,
    /// Magnetic field strength along the [x, y, z] axes.
    pub mag: [T; 3],
}

/// Hard-iron bias center of the horizontal field components, removed
/// from the sample mean before the heading is computed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagOffset {
    pub x: f32,
    pub y: f32,
}

/// A computed compass heading.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heading {
    /// The device-local time of when the heading was computed.
    pub timestamp_us: u64,
    /// Compass bearing in degrees, in the range [0, 360).
    pub degrees: f32,
}
