mod utils;

use smart_leds::RGB8;

pub use utils::{LightColor, add_light, channel_sum, rgb_from_u32};

pub type Rgb = RGB8;

pub const BLACK: Rgb = rgb_from_u32(0x000000);
pub const WHITE: Rgb = rgb_from_u32(0xFFFFFF);
pub const RED: Rgb = rgb_from_u32(0xFF0000);
pub const GREEN: Rgb = rgb_from_u32(0x00FF00);
pub const BLUE: Rgb = rgb_from_u32(0x0000FF);
