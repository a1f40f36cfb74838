//! Audio pipeline - capture ring, normalization and spectrum
//!
//! The capture collaborator fills one window of the [`SampleRing`] while the
//! pipeline reads the other. A completion notification raises
//! [`Event::AudioSamplesAvailable`](crate::events::Event), after which the
//! controller commits the ring and the active mode may process it.

mod normalize;
mod ring;
mod spectrum;

pub use normalize::{WindowStats, normalize, normalize_with};
pub use ring::SampleRing;
pub use spectrum::{MicroFft, SpectrumTransform, spectrum};

use crate::config::WINDOW_SIZE;
use crate::events::Notifier;

#[derive(Debug)]
pub enum CaptureError {
    /// A capture is already running
    Busy,
    /// Converter is not configured yet
    NotReady,
    /// Driver specific failure code
    Hardware(i32),
}

/// Starts filling a sample window in the background
///
/// Implementations must call `on_complete.notify()` once the window holds a
/// full set of samples, typically from an interrupt handler.
pub trait CaptureSource<'a> {
    fn request_capture(
        &mut self,
        window: &mut [u16],
        on_complete: Notifier<'a>,
    ) -> Result<(), CaptureError>;
}

/// Sample ring plus the scratch buffers of one processing pass
pub struct AudioPipeline<const W: usize = WINDOW_SIZE> {
    ring: SampleRing<W>,
    normalized: [f32; W],
    spectrum: [f32; W],
    capture_armed: bool,
}

impl<const W: usize> AudioPipeline<W> {
    /// Magnitude bins per window
    pub const BINS: usize = W / 2;

    pub const fn new() -> Self {
        Self {
            ring: SampleRing::new(),
            normalized: [0.0; W],
            spectrum: [0.0; W],
            capture_armed: false,
        }
    }

    pub fn ring(&self) -> &SampleRing<W> {
        &self.ring
    }

    /// Whether a capture has been requested and not completed yet
    pub fn is_capture_armed(&self) -> bool {
        self.capture_armed
    }

    /// Request the next capture window unless one is already outstanding
    pub fn arm_capture<'a>(&mut self, source: &mut dyn CaptureSource<'a>, on_complete: Notifier<'a>) {
        if self.capture_armed {
            return;
        }
        match source.request_capture(self.ring.capture_window_mut(), on_complete) {
            Ok(()) => self.capture_armed = true,
            Err(e) => log::warn!("audio: couldn't start capture: {:?}", e),
        }
    }

    /// Promote the captured window. Ignored when no capture was armed.
    pub fn on_capture_complete(&mut self) {
        if !self.capture_armed {
            return;
        }
        self.capture_armed = false;
        self.ring.commit();
    }

    /// Normalize the committed window and compute its scaled spectrum
    pub fn process(&mut self, transform: &mut dyn SpectrumTransform) -> &[f32] {
        normalize(self.ring.read_window(), &mut self.normalized);
        let bins = &mut self.spectrum[..Self::BINS];
        spectrum(transform, &mut self.normalized, bins);
        bins
    }
}

impl<const W: usize> Default for AudioPipeline<W> {
    fn default() -> Self {
        Self::new()
    }
}
