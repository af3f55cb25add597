use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_sync::watch::Receiver;
use embassy_time::{with_timeout, Duration, Instant};

use super::{CalTermination, MagCalib};
use crate::errors::CalibrationError;
use crate::signals as s;
use crate::tasks::calibrator::CalibratorState;
use crate::types::measurements::{MagData, MagOffset};

type M = CriticalSectionRawMutex;
type RawMagReceiver<'a> = Receiver<'a, M, MagData<f32>, 3>;

/// Routine to estimate the hard-iron offset of the magnetometer.
///
/// Samples the field for the duration of the configured termination
/// policy while the sensor is rotated through at least a full circle,
/// tracks the observed min/max on the X and Y axes, and returns the
/// midpoint of each axis range. The indicator is toggled on every
/// accepted sample so progress is visible on the board.
pub async fn calibrate_mag(
    config: &MagCalib,
    rcv_raw_mag: &mut RawMagReceiver<'_>,
    end: &Signal<M, ()>,
) -> Result<MagOffset, CalibrationError> {
    const ID: &str = "mag_calibration";

    let snd_state = s::CALIBRATOR_STATE.sender();
    let snd_indicator = s::INDICATOR_STATE.sender();

    // Clear any end-request left over from a previous run, and mark
    // stale sensor data as seen so only fresh samples are used.
    end.reset();
    _ = rcv_raw_mag.try_get();

    info!("{}: Starting hard-iron calibration", ID);

    let mut led_is_on = true;
    snd_indicator.send(led_is_on.into());

    let deadline = match config.termination {
        CalTermination::Window { window_ms } => {
            Some(Instant::now() + Duration::from_millis(window_ms as u64))
        }
        CalTermination::External => None,
    };

    let mut estimator = HardIronEstimator::new();
    let mut dropped = 0;

    'sampling: loop {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break 'sampling;
        }

        let data = match select(
            next_sample(config, rcv_raw_mag, &mut dropped),
            end.wait(),
        )
        .await
        {
            Either::First(sample) => sample?,
            Either::Second(()) => {
                info!("{}: Calibration ended by external trigger", ID);
                break 'sampling;
            }
        };

        estimator.insert(data.mag);
        led_is_on = !led_is_on;
        snd_indicator.send(led_is_on.into());
        snd_state.send(CalibratorState::Collecting {
            samples: estimator.samples(),
        });
    }

    let offset = estimator.offset().ok_or(CalibrationError::MagNoSamples)?;
    info!(
        "{}: Collected {} samples, offset x: {} y: {}",
        ID,
        estimator.samples(),
        offset.x,
        offset.y
    );
    Ok(offset)
}

/// Wait for the next raw sample, tolerating up to `max_dropped`
/// consecutive timeouts before giving up on the sensor.
async fn next_sample(
    config: &MagCalib,
    rcv_raw_mag: &mut RawMagReceiver<'_>,
    dropped: &mut u32,
) -> Result<MagData<f32>, CalibrationError> {
    let timeout = Duration::from_millis(config.sample_timeout_ms as u64);
    loop {
        match with_timeout(timeout, rcv_raw_mag.changed()).await {
            Ok(data) => {
                *dropped = 0;
                return Ok(data);
            }
            Err(_) => {
                *dropped += 1;
                warn!("mag_calibration: Dropped sample {} of {}", *dropped, config.max_dropped);
                if *dropped > config.max_dropped {
                    error!("mag_calibration: Dropped too many samples, aborting calibration");
                    return Err(CalibrationError::MagMaxDropped);
                }
            }
        }
    }
}

/// Tracks the observed extent of the horizontal field components and
/// derives the hard-iron offset as the midpoint of each axis range.
/// The extent is seeded from the first accepted sample, so a single
/// sample yields a zero-width extent on both axes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HardIronEstimator {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    samples: u32,
}

impl HardIronEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sample into the extent. Samples with a non-finite X or Y
    /// component are rejected.
    pub fn insert(&mut self, mag: [f32; 3]) {
        let [x, y, _z] = mag;
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        if self.samples == 0 {
            self.x_min = x;
            self.x_max = x;
            self.y_min = y;
            self.y_max = y;
        } else {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
        self.samples += 1;
    }

    /// Midpoint of the observed range per axis, or `None` if no sample
    /// was ever accepted.
    pub fn offset(&self) -> Option<MagOffset> {
        if self.samples == 0 {
            return None;
        }
        Some(MagOffset {
            x: (self.x_max + self.x_min) / 2.0,
            y: (self.y_max + self.y_min) / 2.0,
        })
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use embassy_futures::join::join;
    use embassy_sync::watch::Watch;
    use embassy_time::Timer;

    fn mag(x: f32, y: f32) -> [f32; 3] {
        [x, y, 0.3]
    }

    #[test]
    fn offset_is_extent_midpoint() {
        let mut estimator = HardIronEstimator::new();
        estimator.insert(mag(2.0, 5.0));
        estimator.insert(mag(-2.0, -5.0));

        let offset = estimator.offset().unwrap();
        assert_relative_eq!(offset.x, 0.0);
        assert_relative_eq!(offset.y, 0.0);
    }

    #[test]
    fn offset_with_bias() {
        let mut estimator = HardIronEstimator::new();
        for (x, y) in [(1.0, 7.0), (5.0, 3.0), (3.0, 5.0)] {
            estimator.insert(mag(x, y));
        }

        let offset = estimator.offset().unwrap();
        assert_relative_eq!(offset.x, 3.0);
        assert_relative_eq!(offset.y, 5.0);
    }

    #[test]
    fn single_sample_yields_zero_width_extent() {
        let mut estimator = HardIronEstimator::new();
        estimator.insert(mag(1.5, -2.5));

        let offset = estimator.offset().unwrap();
        assert_relative_eq!(offset.x, 1.5);
        assert_relative_eq!(offset.y, -2.5);
    }

    #[test]
    fn identical_streams_yield_identical_offsets() {
        let stream = [(0.2, -1.0), (-3.4, 2.2), (1.1, 0.0), (0.9, 4.3)];

        let mut first = HardIronEstimator::new();
        let mut second = HardIronEstimator::new();
        for (x, y) in stream {
            first.insert(mag(x, y));
            second.insert(mag(x, y));
        }

        assert_eq!(first.offset(), second.offset());
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let mut estimator = HardIronEstimator::new();
        estimator.insert(mag(1.0, 1.0));
        estimator.insert(mag(f32::NAN, 100.0));
        estimator.insert(mag(100.0, f32::INFINITY));

        assert_eq!(estimator.samples(), 1);
        let offset = estimator.offset().unwrap();
        assert_relative_eq!(offset.x, 1.0);
        assert_relative_eq!(offset.y, 1.0);
    }

    #[test]
    fn no_samples_means_no_offset() {
        assert_eq!(HardIronEstimator::new().offset(), None);
    }

    fn sample(x: f32, y: f32) -> MagData<f32> {
        MagData {
            timestamp_us: 0,
            mag: mag(x, y),
        }
    }

    #[test]
    fn window_termination_returns_midpoint() {
        let config = MagCalib {
            termination: CalTermination::Window { window_ms: 100 },
            sample_timeout_ms: 50,
            max_dropped: 3,
        };
        let raw_mag = Watch::<M, MagData<f32>, 3>::new();
        let end = Signal::new();
        let mut rcv = raw_mag.receiver().unwrap();

        let feeder = async {
            // Extremes first so the expected offset does not depend on
            // how many of the later samples beat the deadline.
            raw_mag.sender().send(sample(2.0, 5.0));
            for _ in 0..20 {
                Timer::after_millis(10).await;
                raw_mag.sender().send(sample(-2.0, -5.0));
            }
        };

        let (offset, ()) =
            futures_executor::block_on(join(calibrate_mag(&config, &mut rcv, &end), feeder));

        let offset = offset.unwrap();
        assert_relative_eq!(offset.x, 0.0);
        assert_relative_eq!(offset.y, 0.0);
    }

    #[test]
    fn external_termination_stops_on_signal() {
        let config = MagCalib {
            termination: CalTermination::External,
            sample_timeout_ms: 50,
            max_dropped: 3,
        };
        let raw_mag = Watch::<M, MagData<f32>, 3>::new();
        let end = Signal::new();
        let mut rcv = raw_mag.receiver().unwrap();

        let feeder = async {
            for (x, y) in [(1.0, 2.0), (3.0, 8.0), (2.0, 4.0)] {
                Timer::after_millis(5).await;
                raw_mag.sender().send(sample(x, y));
            }
            Timer::after_millis(5).await;
            end.signal(());
        };

        let (offset, ()) =
            futures_executor::block_on(join(calibrate_mag(&config, &mut rcv, &end), feeder));

        let offset = offset.unwrap();
        assert_relative_eq!(offset.x, 2.0);
        assert_relative_eq!(offset.y, 5.0);
    }

    #[test]
    fn silent_sensor_fails_instead_of_hanging() {
        let config = MagCalib {
            termination: CalTermination::Window { window_ms: 10_000 },
            sample_timeout_ms: 10,
            max_dropped: 2,
        };
        let raw_mag = Watch::<M, MagData<f32>, 3>::new();
        let end = Signal::new();
        let mut rcv = raw_mag.receiver().unwrap();

        let result = futures_executor::block_on(calibrate_mag(&config, &mut rcv, &end));
        assert_eq!(result, Err(CalibrationError::MagMaxDropped));
    }
}
