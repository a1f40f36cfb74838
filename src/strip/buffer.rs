use crate::color::Rgb;

/// Selector of one half of a [`PixelDoubleBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Two pixel frames: one being composed, one last presented
pub struct PixelDoubleBuffer<const N: usize> {
    frames: [[Rgb; N]; 2],
    composing: Slot,
}

impl<const N: usize> PixelDoubleBuffer<N> {
    pub const fn new() -> Self {
        Self {
            frames: [[Rgb { r: 0, g: 0, b: 0 }; N]; 2],
            composing: Slot::A,
        }
    }

    pub fn composing_slot(&self) -> Slot {
        self.composing
    }

    pub fn composing(&self) -> &[Rgb; N] {
        &self.frames[self.composing.index()]
    }

    pub fn composing_mut(&mut self) -> &mut [Rgb; N] {
        &mut self.frames[self.composing.index()]
    }

    /// The frame composed before the last swap
    pub fn live(&self) -> &[Rgb; N] {
        &self.frames[self.composing.other().index()]
    }

    /// Toggle the slots and return the newly composing frame
    pub fn swap(&mut self) -> &mut [Rgb; N] {
        self.composing = self.composing.other();
        self.composing_mut()
    }
}

impl<const N: usize> Default for PixelDoubleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
