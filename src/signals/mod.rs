use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex as M;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_sync::watch::{Receiver, Watch};
use portable_atomic::AtomicBool;

use crate::calibration::MagCalib;
use crate::errors::CompassError;
use crate::tasks::calibrator::CalibratorState;
use crate::types::measurements::{Heading, MagData, MagOffset};
use crate::types::status::IndicatorState;

/// Channel for all system errors to be published to.
pub static ERR_CHANNEL: Channel<M, CompassError, 4> = Channel::new();

/// Immediately publish an error to the global error channel.
pub fn register_error(error: impl Into<CompassError>) {
    _ = ERR_CHANNEL.try_send(error.into());
}

/// Raw magnetometer samples. These are not calibrated in any way!
pub static RAW_MAG_DATA: Watch<M, MagData<f32>, 3> = Watch::new();

pub type RawMagReceiver = Receiver<'static, M, MagData<f32>, 3>;

/// The active hard-iron offset. Empty until a calibration has finished
/// or a preset offset is published from the configuration.
pub static MAG_OFFSET: Watch<M, MagOffset, 2> = Watch::new();

/// Most recent heading report.
pub static HEADING: Watch<M, Heading, 2> = Watch::new();

/// State of the calibrator task.
pub static CALIBRATOR_STATE: Watch<M, CalibratorState, 2> = Watch::new();

/// Commanded state of the indicator pin.
pub static INDICATOR_STATE: Watch<M, IndicatorState, 2> = Watch::new();

// Commander signals
pub static CMD_CALIBRATE: Watch<M, MagCalib, 1> = Watch::new();

/// Ends a running calibration early, typically raised by the button
/// task while the `External` termination policy is active.
pub static CMD_CALIBRATE_END: Signal<M, ()> = Signal::new();

/// Whether the magnetometer completed initialization.
pub static MAG_SENSOR_ONLINE: AtomicBool = AtomicBool::new(false);
