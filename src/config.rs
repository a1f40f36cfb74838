#![allow(clippy::unreadable_literal)]

pub struct StripConfig {
    pub led_count: usize,
    pub skip_leds: usize,
}

pub struct AudioConfig {
    pub window_size: usize,
    pub range_min: f32,
    pub range_max: f32,
    pub spectrum_scale: f32,
}

pub struct ModeConfig {
    /// `0` waits forever
    pub normal_timeout_ms: u64,
    pub inspection_timeout_ms: u64,
    pub brown_out_timeout_ms: u64,
    pub brown_out_flash_ms: u64,
}

pub struct OrbRanges {
    pub radius: (f32, f32),
    pub center_bin: (f32, f32),
    pub half_width: (f32, f32),
    pub gain: (f32, f32),
}

pub struct AnimationConfig {
    pub noise_floor: f32,
    pub channel_max: u32,
    pub orb_decay: f32,
    pub ambient_decay: f32,
    pub ambient_floor: f32,
    pub ambient_fill_threshold: u32,
    pub ambient_center_bin: f32,
    pub ambient_half_width: f32,
    pub ambient_gain: f32,
    pub reset_initial_frames: u32,
    pub reset_base_frames: u32,
    pub reset_jitter_mask: u32,
    pub orbs: OrbRanges,
}

pub struct ButtonConfig {
    pub debounce_ms: u64,
    /// Pressed reads as a low level (pull-up wiring)
    pub active_low: bool,
}

pub const STRIP: StripConfig = StripConfig {
    led_count: 30,
    skip_leds: 0,
};

#[cfg(not(feature = "wide-window"))]
pub const AUDIO: AudioConfig = AudioConfig {
    window_size: 128,
    range_min: 800.0,
    range_max: 2048.0,
    spectrum_scale: 1.0 / 453.352,
};
#[cfg(feature = "wide-window")]
pub const AUDIO: AudioConfig = AudioConfig {
    window_size: 1024,
    range_min: 800.0,
    range_max: 2048.0,
    spectrum_scale: 1.0 / 453.352,
};

pub const MODES: ModeConfig = ModeConfig {
    normal_timeout_ms: 60,
    inspection_timeout_ms: 0,
    brown_out_timeout_ms: 2000,
    brown_out_flash_ms: 1000,
};

pub const ANIMATION: AnimationConfig = AnimationConfig {
    noise_floor: 0.002,
    channel_max: 250,
    orb_decay: 0.7,
    ambient_decay: 0.9,
    ambient_floor: 20.0,
    ambient_fill_threshold: 50,
    ambient_center_bin: 5.0,
    ambient_half_width: 4.0,
    ambient_gain: 90.0,
    reset_initial_frames: 100,
    reset_base_frames: 50,
    reset_jitter_mask: 0xFF,
    orbs: OrbRanges {
        radius: (5.0, 10.0),
        center_bin: (3.0, ORB_CENTER_MAX),
        half_width: (1.0, 4.0),
        gain: (100.0, 240.0),
    },
};

pub const BUTTON: ButtonConfig = ButtonConfig {
    debounce_ms: 5,
    active_low: true,
};

/// Samples per capture window
pub const WINDOW_SIZE: usize = AUDIO.window_size;

/// Magnitude bins produced per window
pub const SPECTRUM_BINS: usize = WINDOW_SIZE / 2;

/// Highest orb center bin; orbs never listen above the spectrum
const ORB_CENTER_MAX: f32 = if SPECTRUM_BINS - 1 < 199 {
    (SPECTRUM_BINS - 1) as f32
} else {
    199.0
};

/// Pixels driven on the strip
pub const LED_COUNT: usize = STRIP.led_count;

/// Palette colors as `0xRRGGBB`: base followed by three accents
pub const PALETTES: [[u32; 4]; 4] = [
    [0xFABEC0, 0xF85C70, 0xF37970, 0xE43D40],
    [0x32CD30, 0x2C5E1A, 0x1A4314, 0xB2D2A4],
    [0x6AABD2, 0xB7CFDC, 0x385E72, 0xD9E4EC],
    [0x5D59AF, 0x6AABD2, 0xBE81B6, 0xE390C8],
];
