//! Logging macros that dispatch to either `defmt` (embedded targets) or
//! `log` (std hosts), depending on the enabled feature. With neither
//! backend enabled the macros compile to nothing, but still consume
//! their arguments so builds stay warning-free.

#[macro_export]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::trace!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { $( let _ = &$x; )* }
    }};
}

#[macro_export]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { $( let _ = &$x; )* }
    }};
}

#[macro_export]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { $( let _ = &$x; )* }
    }};
}

#[macro_export]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { $( let _ = &$x; )* }
    }};
}

#[macro_export]
macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::error!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        { $( let _ = &$x; )* }
    }};
}

/// Unwrap a `Result` or `Option`, panicking through the active logging
/// backend on failure.
#[macro_export]
macro_rules! unwrap {
    ($e:expr) => {{
        #[cfg(feature = "defmt")]
        let value = ::defmt::unwrap!($e);
        #[cfg(not(feature = "defmt"))]
        let value = $e.unwrap();
        value
    }};
}

/// Set up `env_logger` for host-side runs and tests.
#[cfg(feature = "arch-std")]
pub fn init_std() {
    _ = env_logger::builder()
        .format_timestamp_micros()
        .is_test(cfg!(test))
        .try_init();
}
