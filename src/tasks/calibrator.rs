use serde::{Deserialize, Serialize};

use crate::calibration::mag_routine::calibrate_mag;
use crate::errors::CalibrationError;
use crate::signals::{self as s, register_error};
use crate::types::measurements::MagOffset;

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibratorState {
    Idle,
    Collecting { samples: u32 },
    Done(MagOffset),
    Failed(CalibrationError),
}

impl CalibratorState {
    /// Whether a commanded calibration has run to completion, in either
    /// direction.
    pub fn is_finished(&self) -> bool {
        matches!(self, CalibratorState::Done(_) | CalibratorState::Failed(_))
    }
}

/// Runs the hard-iron calibration routine whenever one is commanded,
/// and publishes the resulting offset.
#[embassy_executor::task]
pub async fn main() -> ! {
    const ID: &str = "calibrator";

    let mut rcv_calibrate = unwrap!(s::CMD_CALIBRATE.receiver());
    let mut rcv_raw_mag = unwrap!(s::RAW_MAG_DATA.receiver());
    let snd_state = s::CALIBRATOR_STATE.sender();
    let snd_offset = s::MAG_OFFSET.sender();

    snd_state.send(CalibratorState::Idle);
    loop {
        let config = rcv_calibrate.changed().await;
        snd_state.send(CalibratorState::Collecting { samples: 0 });

        match calibrate_mag(&config, &mut rcv_raw_mag, &s::CMD_CALIBRATE_END).await {
            Ok(offset) => {
                snd_offset.send(offset);
                snd_state.send(CalibratorState::Done(offset));
            }
            Err(error) => {
                warn!("{}: Magnetometer calibration failed: {:?}", ID, error);
                register_error(error);
                snd_state.send(CalibratorState::Failed(error));
            }
        }
    }
}
