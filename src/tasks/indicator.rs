use embedded_hal::digital::OutputPin;

use crate::signals as s;
use crate::types::status::IndicatorState;

/// Owns the indicator pin and applies whatever state the rest of the
/// system commands.
pub async fn main(mut pin: impl OutputPin) -> ! {
    const ID: &str = "indicator";
    info!("{}: Task started", ID);

    let mut rcv_state = unwrap!(s::INDICATOR_STATE.receiver());
    loop {
        let result = match rcv_state.changed().await {
            IndicatorState::On => pin.set_high(),
            IndicatorState::Off => pin.set_low(),
        };
        if result.is_err() {
            warn!("{}: Failed to drive indicator pin", ID);
        }
    }
}
