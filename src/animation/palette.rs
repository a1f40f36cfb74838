use crate::color::LightColor;

pub const ACCENT_COUNT: usize = 3;

/// Base color for the ambient plus accents for the orbs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: LightColor,
    pub accents: [LightColor; ACCENT_COUNT],
}

impl Palette {
    /// Build from `[base, accent, accent, accent]` as `0xRRGGBB`
    pub fn from_u32(colors: [u32; 4]) -> Self {
        let [base, first, second, third] = colors;
        Self {
            base: LightColor::from_u32(base),
            accents: [
                LightColor::from_u32(first),
                LightColor::from_u32(second),
                LightColor::from_u32(third),
            ],
        }
    }

    /// Accent for the orb at `index`, cycling through the accents
    pub fn accent(&self, index: usize) -> LightColor {
        self.accents[index % ACCENT_COUNT]
    }
}
