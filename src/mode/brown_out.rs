use embassy_time::Duration;

use super::{Mode, ModeContext, ModeId};
use crate::color::{BLACK, WHITE};
use crate::config::MODES;
use crate::events::{Event, wait_timeout};

/// Flashes between full white and every other pixel white
///
/// Both frames are composed once on entry; each periodic tick presents the
/// composing frame, which the swap turns into the other pattern.
#[derive(Debug, Default)]
pub struct BrownOutMode;

impl Mode for BrownOutMode {
    fn enter<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        cx.output.fill(WHITE);
        cx.output.swap();

        for (index, pixel) in cx.output.composing_mut().iter_mut().enumerate() {
            *pixel = if index % 2 == 0 { WHITE } else { BLACK };
        }
        cx.output.swap();

        cx.output.present();
        cx.bus
            .start_periodic(Duration::from_millis(MODES.brown_out_flash_ms));
    }

    fn handle<const W: usize, const N: usize>(
        &mut self,
        event: Event,
        cx: &mut ModeContext<'_, '_, W, N>,
    ) -> ModeId {
        match event {
            Event::PeriodicFrame => {
                cx.output.present();
                ModeId::BrownOut
            }
            Event::ButtonReleased => ModeId::Normal,
            Event::AudioSamplesAvailable | Event::ButtonPressed => ModeId::BrownOut,
        }
    }

    fn leave<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        cx.bus.stop_periodic();
    }

    fn timeout(&self) -> Option<Duration> {
        wait_timeout(MODES.brown_out_timeout_ms)
    }
}
