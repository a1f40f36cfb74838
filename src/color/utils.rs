use crate::color::Rgb;

// Perceived weight of each channel on the strip
const MIX_R: f32 = 4.1 / 5.8;
const MIX_G: f32 = 0.7 / 5.8;
const MIX_B: f32 = 1.0 / 5.8;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Light color as per-channel factors, multiplied by an intensity (0-255)
/// to get channel values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LightColor {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from `0xRRGGBB`, balancing the channels for the strip
    pub fn from_u32(color: u32) -> Self {
        let rgb = rgb_from_u32(color);
        Self {
            r: f32::from(rgb.r) * MIX_R / 255.0,
            g: f32::from(rgb.g) * MIX_G / 255.0,
            b: f32::from(rgb.b) * MIX_B / 255.0,
        }
    }
}

/// Sum of the three channels, used as a cheap brightness estimate
pub fn channel_sum(pixel: Rgb) -> u32 {
    u32::from(pixel.r) + u32::from(pixel.g) + u32::from(pixel.b)
}

/// Add `color * intensity` to `pixel`, clamping every channel to `max`
pub fn add_light(pixel: &mut Rgb, color: LightColor, intensity: f32, max: u32) {
    pixel.r = add_channel(pixel.r, color.r * intensity, max);
    pixel.g = add_channel(pixel.g, color.g * intensity, max);
    pixel.b = add_channel(pixel.b, color.b * intensity, max);
}

#[inline]
fn add_channel(current: u8, amount: f32, max: u32) -> u8 {
    // Negative or NaN amounts saturate to zero
    let sum = u32::from(current).saturating_add(amount as u32);
    sum.min(max).min(u32::from(u8::MAX)) as u8
}
