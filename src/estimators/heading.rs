//! Heading estimation from averaged horizontal field components.

#[allow(unused)]
use num_traits::Float as _;

use crate::types::measurements::MagOffset;

/// Running mean of the horizontal field components over a measurement
/// pass. The Z component is carried in every sample but takes no part
/// in the heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanAccumulator {
    sum_x: f32,
    sum_y: f32,
    count: u32,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mag: [f32; 3]) {
        self.sum_x += mag[0];
        self.sum_y += mag[1];
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Arithmetic mean of the accumulated (x, y) components, or `None`
    /// if nothing was accumulated.
    pub fn mean(&self) -> Option<(f32, f32)> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f32;
        Some((self.sum_x / n, self.sum_y / n))
    }
}

/// Compass heading in degrees from the mean field components and the
/// hard-iron offset.
///
/// The +180 shift remaps atan2's (-180, 180] onto [0, 360); the final
/// fold keeps a boundary value from escaping the documented range.
pub fn heading_degrees(mean_x: f32, mean_y: f32, offset: MagOffset) -> f32 {
    let mut degrees = (mean_y - offset.y).atan2(mean_x - offset.x).to_degrees() + 180.0;
    if degrees >= 360.0 {
        degrees -= 360.0;
    } else if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}
