use crate::config::AUDIO;

/// Statistics of a normalized window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f32,
    /// Divisor applied to every sample, after clamping
    pub range: f32,
}

/// Remove the DC bias of `raw` and scale it into `out`.
///
/// Uses the configured range band; see [`normalize_with`].
pub fn normalize(raw: &[u16], out: &mut [f32]) -> WindowStats {
    normalize_with(raw, out, AUDIO.range_min, AUDIO.range_max)
}

/// Remove the DC bias of `raw` and scale it into `out`.
///
/// The divisor is the larger distance from the mean to the minimum or the
/// maximum, clamped into `[range_min, range_max]` so quiet input is not
/// blown up and loud input is not squashed to nothing.
pub fn normalize_with(raw: &[u16], out: &mut [f32], range_min: f32, range_max: f32) -> WindowStats {
    if raw.is_empty() {
        return WindowStats {
            mean: 0.0,
            range: range_min,
        };
    }

    let (min, max, sum) = raw.iter().fold(
        (u16::MAX, u16::MIN, 0u64),
        |(min, max, sum), &sample| (min.min(sample), max.max(sample), sum + u64::from(sample)),
    );
    let mean = sum as f32 / raw.len() as f32;

    let mean_level = mean as u16;
    let spread = mean_level
        .saturating_sub(min)
        .max(max.saturating_sub(mean_level));
    let range = f32::from(spread).max(range_min).min(range_max);

    for (out, &sample) in out.iter_mut().zip(raw) {
        *out = (f32::from(sample) - mean) / range;
    }

    WindowStats { mean, range }
}
