use serde::{Deserialize, Serialize};

use crate::calibration::MagCalib;
use crate::consts;
use crate::types::measurements::MagOffset;

/// Top-level configuration for the compass. Device crates construct one
/// of these at boot; there is no runtime configuration surface beyond it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompassConfig {
    /// Hard-iron offset from an earlier calibration run. When present
    /// the interactive calibration prompt is skipped entirely.
    pub mag_offset: Option<MagOffset>,
    /// Number of raw samples averaged into one heading report.
    pub sample_count: u16,
    pub reader: MagReaderConfig,
    pub calib: MagCalib,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            mag_offset: None,
            sample_count: consts::HEADING_SAMPLE_COUNT,
            reader: MagReaderConfig::default(),
            calib: MagCalib::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MagReaderConfig {
    /// Sampling rate of the magnetometer reader task [Hz]
    pub freq_hz: u16,
}

impl Default for MagReaderConfig {
    fn default() -> Self {
        Self {
            freq_hz: consts::MAG_SAMPLE_RATE_HZ,
        }
    }
}
