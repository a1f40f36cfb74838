//! Shared controller state for external observation
//!
//! The control task publishes here after every event; other tasks (a status
//! LED, a debug console) read it without touching the controller.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::mode::ModeId;

/// Lock-free snapshot of the running controller
pub struct SharedState {
    mode: AtomicU8,
    frames: AtomicU32,
    palette: AtomicU8,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(ModeId::Normal as u8),
            frames: AtomicU32::new(0),
            palette: AtomicU8::new(0),
        }
    }

    /// Active mode
    pub fn mode(&self) -> ModeId {
        ModeId::from_raw(self.mode.load(Ordering::Relaxed)).unwrap_or(ModeId::Normal)
    }

    /// Frames rendered by the animation so far, wrapping
    pub fn frames(&self) -> u32 {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn palette(&self) -> u8 {
        self.palette.load(Ordering::Relaxed)
    }

    pub fn set_mode(&self, mode: ModeId) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    pub fn set_frames(&self, frames: u32) {
        self.frames.store(frames, Ordering::Relaxed);
    }

    pub fn set_palette(&self, palette: u8) {
        self.palette.store(palette, Ordering::Relaxed);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
