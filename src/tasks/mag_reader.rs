use portable_atomic::Ordering;

use embassy_time::{Duration, Instant, Ticker, Timer};

use crate::hw_abstraction::Magnetometer;
use crate::signals::{self as s, register_error};
use crate::types::config::MagReaderConfig;
use crate::types::measurements::MagData;

/// Owns the magnetometer driver: brings it up, samples it on a ticker
/// and publishes the raw timestamped data.
pub async fn main(mut sensor: impl Magnetometer, config: MagReaderConfig) -> ! {
    const ID: &str = "mag_reader";
    info!("{}: Task started", ID);

    // Initialization failure is retried rather than carried on past,
    // since every downstream consumer would just wait on data that can
    // never arrive.
    loop {
        match sensor.init().await {
            Ok(()) => break,
            Err(error) => {
                error!("{}: Failed to initialize magnetometer: {:?}", ID, error);
                register_error(error);
                Timer::after_secs(1).await;
            }
        }
    }

    s::MAG_SENSOR_ONLINE.store(true, Ordering::Relaxed);
    info!("{}: Magnetometer available and working", ID);

    let snd_raw_mag = s::RAW_MAG_DATA.sender();
    let mut ticker = Ticker::every(Duration::from_hz(config.freq_hz as u64));

    info!("{}: Entering main loop", ID);
    loop {
        ticker.next().await;

        match sensor.read_mag().await {
            Ok(mag) => snd_raw_mag.send(MagData {
                timestamp_us: Instant::now().as_micros(),
                mag,
            }),
            Err(error) => {
                error!("{}: Failed to read magnetometer: {:?}", ID, error);
                register_error(error);
            }
        }
    }
}
