use embassy_time::Duration;

use super::{Mode, ModeContext, ModeId};
use crate::color::{BLUE, GREEN, RED, Rgb};
use crate::config::MODES;
use crate::events::{Event, wait_timeout};

/// Colors shown on consecutive releases after the initial red
const SEQUENCE: [Rgb; 2] = [GREEN, BLUE];

/// Solid color strip test: red, then green and blue on each release
#[derive(Debug, Default)]
pub struct InspectionMode {
    next_color: usize,
}

impl Mode for InspectionMode {
    fn enter<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        self.next_color = 0;
        cx.output.fill(RED);
        cx.output.present();
    }

    fn handle<const W: usize, const N: usize>(
        &mut self,
        event: Event,
        cx: &mut ModeContext<'_, '_, W, N>,
    ) -> ModeId {
        if event != Event::ButtonReleased {
            return ModeId::Inspection;
        }

        let Some(&color) = SEQUENCE.get(self.next_color) else {
            return ModeId::BrownOut;
        };
        self.next_color += 1;
        cx.output.fill(color);
        cx.output.present();
        ModeId::Inspection
    }

    fn timeout(&self) -> Option<Duration> {
        wait_timeout(MODES.inspection_timeout_ms)
    }
}
