use core::ops::Range;

use crate::color::{LightColor, Rgb, add_light};

use super::band::{SpectrumWindow, clamped_range, smooth_intensity};

/// Algorithm driving an orb's intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbController {
    /// Intensity only decays
    None,
    /// Intensity follows the energy in a spectrum window
    SpectrumWindow(SpectrumWindow),
}

/// Point light source on the strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    /// Center in pixels (sub-pixel)
    pub position: f32,
    /// Radius in pixels
    pub radius: f32,
    /// Smoothed intensity (0-255)
    pub intensity: f32,
    pub color: LightColor,
    pub controller: OrbController,
}

impl Default for Orb {
    fn default() -> Self {
        Self::new(0.0, 1.0, LightColor::BLACK, OrbController::None)
    }
}

impl Orb {
    pub const fn new(
        position: f32,
        radius: f32,
        color: LightColor,
        controller: OrbController,
    ) -> Self {
        Self {
            position,
            radius,
            intensity: 0.0,
            color,
            controller,
        }
    }

    /// Feed one spectrum into the intensity.
    ///
    /// `decay` bounds how far the intensity may fall in one frame.
    pub fn update(&mut self, spectrum: &[f32], noise_floor: f32, decay: f32) {
        match self.controller {
            OrbController::SpectrumWindow(window) => {
                let drive = window.drive(spectrum, noise_floor);
                self.intensity = smooth_intensity(self.intensity * decay, drive);
            }
            OrbController::None => {}
        }
    }

    /// Pixels `[ceil(P - R), floor(P + R))` clamped to a strip of `len` pixels
    pub fn pixels(&self, len: usize) -> Range<usize> {
        clamped_range(
            libm::ceilf(self.position - self.radius),
            libm::floorf(self.position + self.radius),
            len,
        )
    }

    /// Accumulate the orb into `frame` with a radial falloff
    pub fn paint(&self, frame: &mut [Rgb], channel_max: u32) {
        let radius_sq = self.radius * self.radius;
        let pixels = self.pixels(frame.len());
        let start = pixels.start;

        for (offset, pixel) in frame[pixels].iter_mut().enumerate() {
            let distance = (start + offset) as f32 - self.position;
            let rate = 1.0 - (distance * distance - radius_sq);
            add_light(pixel, self.color, rate * self.intensity, channel_max);
        }
    }
}
