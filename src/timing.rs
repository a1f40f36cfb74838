use embassy_time::Instant;

/// Frames averaged per timing report
pub const REPORT_FRAMES: u32 = 256;

/// Stage of one Normal mode iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Stage {
    /// Waiting for the capture to complete
    Samples = 0,
    /// Normalization and transform
    Spectrum = 1,
    Render = 2,
    /// Frame submission and buffer swap
    Handoff = 3,
}

impl Stage {
    pub const COUNT: usize = 4;
}

/// Accumulates per stage durations and logs their averages every
/// [`REPORT_FRAMES`] frames
pub struct FrameTimings {
    stage_start: Instant,
    totals_us: [u64; Stage::COUNT],
    frames: u32,
}

impl FrameTimings {
    pub fn new() -> Self {
        Self {
            stage_start: Instant::now(),
            totals_us: [0; Stage::COUNT],
            frames: 0,
        }
    }

    /// Start timing from now, keeping the accumulated totals
    pub fn restart(&mut self) {
        self.stage_start = Instant::now();
    }

    /// Close `stage` and start the next one
    pub fn mark(&mut self, stage: Stage) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.stage_start);
        self.totals_us[stage as usize] += elapsed.as_micros();
        self.stage_start = now;
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Total microseconds spent in `stage` since the last report
    pub fn total_us(&self, stage: Stage) -> u64 {
        self.totals_us[stage as usize]
    }

    /// Count a finished frame and report once enough are collected
    pub fn finish_frame(&mut self) {
        self.frames += 1;
        if self.frames < REPORT_FRAMES {
            return;
        }

        let frames = u64::from(self.frames);
        let [samples, spectrum, render, handoff] = self.totals_us.map(|total| total / frames);
        log::debug!(
            "timing: samples {}us, spectrum {}us, render {}us, handoff {}us",
            samples,
            spectrum,
            render,
            handoff
        );
        self.totals_us = [0; Stage::COUNT];
        self.frames = 0;
    }
}

impl Default for FrameTimings {
    fn default() -> Self {
        Self::new()
    }
}
