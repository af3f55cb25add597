use serde::{Deserialize, Serialize};

use crate::consts;

pub mod mag_routine;

/// When the hard-iron sampling loop ends. The two policies model the
/// two deployment variants: a fixed wall-clock window, or sampling
/// until an external trigger (normally the calibration button) raises
/// [`crate::signals::CMD_CALIBRATE_END`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalTermination {
    Window { window_ms: u32 },
    External,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagCalib {
    pub termination: CalTermination,
    /// How long to wait for a single sample before counting it as
    /// dropped [ms]
    pub sample_timeout_ms: u32,
    /// Consecutive dropped samples tolerated before the routine fails.
    pub max_dropped: u32,
}

impl Default for MagCalib {
    fn default() -> Self {
        Self {
            termination: CalTermination::Window {
                window_ms: consts::CALIBRATION_WINDOW_MS,
            },
            sample_timeout_ms: consts::SAMPLE_TIMEOUT_MS,
            max_dropped: 10,
        }
    }
}
