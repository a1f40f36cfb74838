use crate::color::{LightColor, Rgb, add_light, channel_sum};

use super::band::{SpectrumWindow, smooth_intensity};

/// Background glow filling the dark gaps between orbs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ambient {
    pub color: LightColor,
    /// Smoothed intensity (0-255)
    pub intensity: f32,
    pub window: SpectrumWindow,
}

impl Ambient {
    pub const fn new(color: LightColor, window: SpectrumWindow) -> Self {
        Self {
            color,
            intensity: 0.0,
            window,
        }
    }

    /// Feed one spectrum into the intensity, never decaying below `floor`
    pub fn update(&mut self, spectrum: &[f32], noise_floor: f32, decay: f32, floor: f32) {
        let drive = self.window.drive(spectrum, noise_floor);
        self.intensity = smooth_intensity((self.intensity * decay).max(floor), drive);
    }

    /// Add the glow to every pixel whose channel sum is below `threshold`
    pub fn fill(&self, frame: &mut [Rgb], threshold: u32, channel_max: u32) {
        for pixel in frame.iter_mut() {
            if channel_sum(*pixel) < threshold {
                add_light(pixel, self.color, self.intensity, channel_max);
            }
        }
    }
}
