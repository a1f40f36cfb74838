//! Frequency band helpers shared by orbs and the ambient glow

use core::ops::Range;

/// Highest smoothed intensity an orb or the ambient can reach
pub const INTENSITY_MAX: f32 = 255.0;

/// Window over the magnitude spectrum driving a light's intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumWindow {
    /// Center bin (fractional)
    pub center: f32,
    /// Half of the window width in bins
    pub half_width: f32,
    /// Multiplier applied to the band energy
    pub gain: f32,
}

impl SpectrumWindow {
    pub const fn new(center: f32, half_width: f32, gain: f32) -> Self {
        Self {
            center,
            half_width,
            gain,
        }
    }

    /// Bins `[ceil(center - half_width), floor(center + half_width))` clamped to `[0, bins)`
    pub fn bins(&self, bins: usize) -> Range<usize> {
        clamped_range(
            libm::ceilf(self.center - self.half_width),
            libm::floorf(self.center + self.half_width),
            bins,
        )
    }

    /// Average magnitude above `noise_floor` over the window.
    ///
    /// Divides by the configured width rather than the number of bins that
    /// survived clamping, so a band hanging off the spectrum reads weaker.
    pub fn band_energy(&self, spectrum: &[f32], noise_floor: f32) -> f32 {
        if self.half_width.is_nan() || self.half_width <= 0.0 {
            return 0.0;
        }
        let sum: f32 = spectrum[self.bins(spectrum.len())]
            .iter()
            .filter(|&&magnitude| magnitude > noise_floor)
            .sum();
        sum / (2.0 * self.half_width)
    }

    /// Instantaneous drive: band energy scaled by the gain
    pub fn drive(&self, spectrum: &[f32], noise_floor: f32) -> f32 {
        self.band_energy(spectrum, noise_floor) * self.gain
    }
}

/// Blend a new drive into a smoothed intensity.
///
/// The result follows `drive` upwards immediately (up to [`INTENSITY_MAX`])
/// but never drops below `floor`, the decayed previous value.
pub fn smooth_intensity(floor: f32, drive: f32) -> f32 {
    drive.min(INTENSITY_MAX).max(floor).clamp(0.0, INTENSITY_MAX)
}

/// Integer range `[start, end)` from float bounds, clamped to `[0, len)`
pub(crate) fn clamped_range(start: f32, end: f32, len: usize) -> Range<usize> {
    // Float to int casts saturate, NaN becomes 0
    let start = start.max(0.0) as usize;
    let end = (end.max(0.0) as usize).min(len);
    start.min(end)..end
}
