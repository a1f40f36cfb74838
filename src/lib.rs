#![no_std]

//! Audio reactive LED controller core
//!
//! Architecture layers:
//! - `events` - Signal based event bus the control task waits on
//! - `audio` - Capture ring, normalization and spectrum (`[SpectrumTransform]`)
//! - `animation` - Orbs, ambient glow and palettes turning a spectrum into pixels
//! - `strip` - Pixel double buffer, frame handoff and `[LedDriver]` backends
//! - `mode` - Normal, Inspection and `BrownOut` modes in a [`ModeSlot`]
//! - `controller` - The control task tying everything together
//! - `button` - Debounced button raising press and release events
//! - `state` - Shared state for external observation
//!
//! Hardware is reached only through traits: [`CaptureSource`] for the
//! sampler, [`LedDriver`] for the strip and `embedded-hal` pins for the
//! button.

pub mod animation;
pub mod audio;
pub mod button;
pub mod color;
pub mod config;
pub mod controller;
pub mod events;
pub mod mode;
pub mod state;
pub mod strip;
pub mod timing;

// Event exports
pub use events::{Emitter, Event, EventBus, EventSignals, Notifier, WaitResult};

// Audio exports
pub use audio::{AudioPipeline, CaptureError, CaptureSource, MicroFft, SampleRing, SpectrumTransform};

// Animation exports
pub use animation::AnimationState;

// Strip exports
pub use strip::{
    FrameHandoff, FrameSink, LedDriver, OutputWorker, PixelDoubleBuffer, PixelOutput,
    SmartLedsDriver, StripError,
};

// Mode exports
pub use mode::{ModeId, ModeSlot};

pub use button::ButtonMonitor;
pub use color::Rgb;
pub use controller::Controller;
pub use state::SharedState;
