use embassy_time::Duration;

use super::{Mode, ModeContext, ModeId};
use crate::color::BLACK;
use crate::config::MODES;
use crate::events::{Event, wait_timeout};
use crate::timing::{FrameTimings, Stage};

/// Audio reactive animation
///
/// Every completed capture window is turned into one frame:
/// normalize, transform, render, present, then re-arm the capture.
#[derive(Default)]
pub struct NormalMode {
    timings: FrameTimings,
}

impl Mode for NormalMode {
    fn enter<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        cx.output.fill(BLACK);
        cx.output.present();
        cx.arm_capture();
        self.timings.restart();
    }

    fn handle<const W: usize, const N: usize>(
        &mut self,
        event: Event,
        cx: &mut ModeContext<'_, '_, W, N>,
    ) -> ModeId {
        match event {
            Event::AudioSamplesAvailable => {
                self.timings.mark(Stage::Samples);

                let spectrum = cx.pipeline.process(&mut *cx.transform);
                self.timings.mark(Stage::Spectrum);

                cx.animation.render(spectrum, cx.output.composing_mut());
                self.timings.mark(Stage::Render);

                cx.output.present();
                self.timings.mark(Stage::Handoff);
                self.timings.finish_frame();

                cx.arm_capture();
                self.timings.restart();
                ModeId::Normal
            }
            Event::ButtonReleased => ModeId::Inspection,
            Event::ButtonPressed | Event::PeriodicFrame => ModeId::Normal,
        }
    }

    fn timeout(&self) -> Option<Duration> {
        wait_timeout(MODES.normal_timeout_ms)
    }
}
