/// Number of raw samples averaged into one heading measurement.
/// A higher count is more accurate but slows the measurement cycle.
pub const HEADING_SAMPLE_COUNT: u16 = 40;

/// Duration of the fixed hard-iron calibration window [ms]
pub const CALIBRATION_WINDOW_MS: u32 = 15_000;

/// How long to wait for a single magnetometer sample before counting
/// it as dropped [ms]
pub const SAMPLE_TIMEOUT_MS: u32 = 250;

/// Default magnetometer sampling rate [Hz]
pub const MAG_SAMPLE_RATE_HZ: u16 = 100;
