use serde::{Deserialize, Serialize};

/// Commanded state of the indicator pin. The pin is held high when the
/// compass is idle with a fresh report, low while samples are being
/// collected, and toggled every accepted sample during calibration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    On,
    Off,
}

impl From<bool> for IndicatorState {
    fn from(on: bool) -> Self {
        if on {
            IndicatorState::On
        } else {
            IndicatorState::Off
        }
    }
}
