//! Time subsystem.
//!
//! Monotonic frame timing for run loops. Game time is measured in whole
//! milliseconds since the clock was created, never wall-clock time.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
