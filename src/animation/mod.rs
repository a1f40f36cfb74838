//! Animation engine - turns a magnitude spectrum into a pixel frame
//!
//! Render order per frame:
//! 1. clear the frame
//! 2. update and paint every orb
//! 3. update the ambient glow and fill the dark pixels with it
//! 4. count down to the next re-randomization and palette rotation
//!
//! All state lives in [`AnimationState`]; nothing is allocated.

mod ambient;
mod band;
mod orb;
mod palette;

pub use ambient::Ambient;
pub use band::{INTENSITY_MAX, SpectrumWindow, smooth_intensity};
pub use orb::{Orb, OrbController};
pub use palette::{ACCENT_COUNT, Palette};

use crate::color::{LightColor, Rgb};
use crate::config::{ANIMATION, PALETTES};

/// Number of orbs on the strip
pub const MAX_ORBS: usize = 4;

/// Number of palettes in the rotation
pub const PALETTE_COUNT: usize = PALETTES.len();

/// Orbs, ambient and palettes of the running animation
pub struct AnimationState {
    orbs: [Orb; MAX_ORBS],
    ambient: Ambient,
    palettes: [Palette; PALETTE_COUNT],
    palette_index: usize,
    reset_countdown: u32,
    frames_rendered: u32,
    strip_len: usize,
    rng: fastrand::Rng,
}

impl AnimationState {
    /// Create the animation for a strip of `strip_len` pixels.
    ///
    /// `seed` should come from a hardware source; orbs are placed randomly.
    pub fn new(seed: u64, strip_len: usize) -> Self {
        let palettes = PALETTES.map(Palette::from_u32);
        let ambient = Ambient::new(
            LightColor::BLACK,
            SpectrumWindow::new(
                ANIMATION.ambient_center_bin,
                ANIMATION.ambient_half_width,
                ANIMATION.ambient_gain,
            ),
        );

        let mut state = Self {
            orbs: [Orb::default(); MAX_ORBS],
            ambient,
            palettes,
            palette_index: 0,
            reset_countdown: ANIMATION.reset_initial_frames,
            frames_rendered: 0,
            strip_len,
            rng: fastrand::Rng::with_seed(seed),
        };
        state.apply_palette();
        state.randomize_orbs();
        state
    }

    pub fn orbs(&self) -> &[Orb; MAX_ORBS] {
        &self.orbs
    }

    pub fn orbs_mut(&mut self) -> &mut [Orb; MAX_ORBS] {
        &mut self.orbs
    }

    pub fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    pub fn ambient_mut(&mut self) -> &mut Ambient {
        &mut self.ambient
    }

    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    pub fn palette(&self) -> &Palette {
        &self.palettes[self.palette_index]
    }

    /// Frames left until the next re-randomization
    pub fn reset_countdown(&self) -> u32 {
        self.reset_countdown
    }

    pub fn set_reset_countdown(&mut self, frames: u32) {
        self.reset_countdown = frames.max(1);
    }

    pub fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }

    pub fn strip_len(&self) -> usize {
        self.strip_len
    }

    /// Resize the animated area and place the orbs on it again
    pub fn set_strip_len(&mut self, strip_len: usize) {
        self.strip_len = strip_len;
        self.randomize_orbs();
    }

    /// Render one frame from `spectrum` into `frame`
    pub fn render(&mut self, spectrum: &[f32], frame: &mut [Rgb]) {
        frame.fill(Rgb::default());

        for orb in &mut self.orbs {
            orb.update(spectrum, ANIMATION.noise_floor, ANIMATION.orb_decay);
            orb.paint(frame, ANIMATION.channel_max);
        }

        self.ambient.update(
            spectrum,
            ANIMATION.noise_floor,
            ANIMATION.ambient_decay,
            ANIMATION.ambient_floor,
        );
        self.ambient.fill(
            frame,
            ANIMATION.ambient_fill_threshold,
            ANIMATION.channel_max,
        );

        self.frames_rendered = self.frames_rendered.wrapping_add(1);
        self.reset_countdown = self.reset_countdown.saturating_sub(1);
        if self.reset_countdown == 0 {
            self.reshuffle();
        }
    }

    /// Move the orbs, rotate to the next palette and reload the countdown
    pub fn reshuffle(&mut self) {
        self.randomize_orbs();
        self.palette_index = (self.palette_index + 1) % PALETTE_COUNT;
        self.apply_palette();
        self.reset_countdown =
            ANIMATION.reset_base_frames + (self.rng.u32(..) & ANIMATION.reset_jitter_mask);
        log::debug!(
            "lights: palette {} for the next {} frames",
            self.palette_index,
            self.reset_countdown
        );
    }

    fn randomize_orbs(&mut self) {
        let ranges = &ANIMATION.orbs;
        let strip_len = self.strip_len as f32;

        for orb in &mut self.orbs {
            orb.position = uniform(&mut self.rng, (0.0, strip_len));
            orb.radius = uniform(&mut self.rng, ranges.radius);
            orb.controller = OrbController::SpectrumWindow(SpectrumWindow::new(
                uniform(&mut self.rng, ranges.center_bin),
                uniform(&mut self.rng, ranges.half_width),
                uniform(&mut self.rng, ranges.gain),
            ));
            log::debug!(
                "lights: orb P {} R {} controller {:?}",
                orb.position,
                orb.radius,
                orb.controller
            );
        }
    }

    fn apply_palette(&mut self) {
        let palette = self.palettes[self.palette_index];
        self.ambient.color = palette.base;
        for (index, orb) in self.orbs.iter_mut().enumerate() {
            orb.color = palette.accent(index);
        }
    }
}

/// Uniform sample in `[min, max)`
fn uniform(rng: &mut fastrand::Rng, (min, max): (f32, f32)) -> f32 {
    min + (max - min) * rng.f32()
}
