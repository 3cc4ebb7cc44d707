//! Rate sensor backends: a simulated gyro, a trace replayer, and (with the
//! `hardware` feature on Linux) an SPI driver for L3G-family parts.

pub mod error;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod l3g;
pub mod replay;
pub mod sim;
pub mod util;

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub use l3g::L3gGyro;
pub use replay::ReplayReader;
pub use sim::{SimParams, SimulatedGyro};
pub use util::IntervalTimer;
