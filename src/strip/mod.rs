//! Pixel output - double buffer, frame handoff and LED transmission
//!
//! The control task composes into one half of a [`PixelDoubleBuffer`] and
//! presents it through a [`FrameSink`]. An [`OutputWorker`] running in its
//! own task takes frames from the [`FrameHandoff`] and writes them to the
//! [`LedDriver`], so transmission never stalls the control loop.

mod buffer;
mod driver;
mod output;

pub use buffer::{PixelDoubleBuffer, Slot};
pub use driver::{LedDriver, SmartLedsDriver, StripError};
pub use output::{FrameHandoff, FrameJob, FrameSink, OutputWorker, PixelOutput};
