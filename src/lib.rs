#![no_std]

// Export the logging macros for either defmt or log
#[macro_use]
pub mod logging;

pub mod calibration;
pub mod console;
pub mod consts;
pub mod errors;
pub mod estimators;
pub mod hw_abstraction;
pub mod signals;
pub mod tasks;
pub mod types;

#[cfg(feature = "arch-std")]
extern crate std;

#[allow(unused)]
#[cfg(not(feature = "arch-std"))]
use num_traits::Float as _;

// Re-exported for implementors
pub use embassy_futures;
pub use embassy_sync;
pub use embassy_time;
pub use embedded_io;
pub use embedded_io_async;
pub use heapless;
