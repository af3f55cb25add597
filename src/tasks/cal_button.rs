use embassy_time::Timer;
use embedded_hal_async::digital::Wait;

use crate::signals as s;
use crate::tasks::calibrator::CalibratorState;

/// Watches the calibration button and ends a running calibration on a
/// falling edge. Pressing the button at any other time does nothing.
pub async fn main(mut button: impl Wait) -> ! {
    const ID: &str = "cal_button";
    info!("{}: Task started", ID);

    loop {
        if button.wait_for_falling_edge().await.is_err() {
            warn!("{}: Failed to await button edge", ID);
            Timer::after_secs(1).await;
            continue;
        }

        if matches!(
            s::CALIBRATOR_STATE.try_get(),
            Some(CalibratorState::Collecting { .. })
        ) {
            info!("{}: Button press ends calibration", ID);
            s::CMD_CALIBRATE_END.signal(());
        }

        // Crude debounce
        Timer::after_millis(250).await;
    }
}
