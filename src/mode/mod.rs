//! Operating modes of the controller
//!
//! All modes are stored in an enum to avoid heap allocations.
//! Each mode implements the `Mode` trait and decides, per event, which mode
//! runs next.

mod brown_out;
mod inspection;
mod normal;

use embassy_time::Duration;

pub use brown_out::BrownOutMode;
pub use inspection::InspectionMode;
pub use normal::NormalMode;

use crate::animation::AnimationState;
use crate::audio::{AudioPipeline, CaptureSource, SpectrumTransform};
use crate::events::{Event, EventBus};
use crate::strip::PixelOutput;

const MODE_NAME_NORMAL: &str = "normal";
const MODE_NAME_INSPECTION: &str = "inspection";
const MODE_NAME_BROWN_OUT: &str = "brown_out";

const MODE_ID_NORMAL: u8 = 0;
const MODE_ID_INSPECTION: u8 = 1;
const MODE_ID_BROWN_OUT: u8 = 2;

/// Everything a mode may touch while handling an event
pub struct ModeContext<'c, 'a, const W: usize, const N: usize> {
    pub bus: &'c mut EventBus<'a>,
    pub output: &'c mut PixelOutput<'a, N>,
    pub pipeline: &'c mut AudioPipeline<W>,
    pub animation: &'c mut AnimationState,
    pub capture: &'c mut dyn CaptureSource<'a>,
    pub transform: &'c mut dyn SpectrumTransform,
}

impl<const W: usize, const N: usize> ModeContext<'_, '_, W, N> {
    /// Request the next capture window unless one is outstanding
    pub fn arm_capture(&mut self) {
        let on_complete = self.bus.notifier(Event::AudioSamplesAvailable);
        self.pipeline.arm_capture(&mut *self.capture, on_complete);
    }
}

pub trait Mode {
    /// Called once when the mode becomes active
    fn enter<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>);

    /// Handle one event and return the mode that should run next
    fn handle<const W: usize, const N: usize>(
        &mut self,
        event: Event,
        cx: &mut ModeContext<'_, '_, W, N>,
    ) -> ModeId;

    /// Called once before another mode takes over
    fn leave<const W: usize, const N: usize>(&mut self, _cx: &mut ModeContext<'_, '_, W, N>) {}

    /// How long the controller waits for an event, `None` is forever
    fn timeout(&self) -> Option<Duration>;
}

/// Mode slot - enum containing all possible modes
pub enum ModeSlot {
    /// Audio reactive animation
    Normal(NormalMode),
    /// Solid color strip test
    Inspection(InspectionMode),
    /// Low power flashing pattern
    BrownOut(BrownOutMode),
}

/// Known mode ids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    Normal = MODE_ID_NORMAL,
    Inspection = MODE_ID_INSPECTION,
    BrownOut = MODE_ID_BROWN_OUT,
}

impl Default for ModeSlot {
    fn default() -> Self {
        Self::Normal(NormalMode::default())
    }
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_NORMAL => Self::Normal,
            MODE_ID_INSPECTION => Self::Inspection,
            MODE_ID_BROWN_OUT => Self::BrownOut,
            _ => return None,
        })
    }

    pub fn to_mode_slot(self) -> ModeSlot {
        match self {
            Self::Normal => ModeSlot::Normal(NormalMode::default()),
            Self::Inspection => ModeSlot::Inspection(InspectionMode::default()),
            Self::BrownOut => ModeSlot::BrownOut(BrownOutMode),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => MODE_NAME_NORMAL,
            Self::Inspection => MODE_NAME_INSPECTION,
            Self::BrownOut => MODE_NAME_BROWN_OUT,
        }
    }
}

impl ModeSlot {
    pub fn enter<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        match self {
            Self::Normal(mode) => mode.enter(cx),
            Self::Inspection(mode) => mode.enter(cx),
            Self::BrownOut(mode) => mode.enter(cx),
        }
    }

    pub fn handle<const W: usize, const N: usize>(
        &mut self,
        event: Event,
        cx: &mut ModeContext<'_, '_, W, N>,
    ) -> ModeId {
        match self {
            Self::Normal(mode) => mode.handle(event, cx),
            Self::Inspection(mode) => mode.handle(event, cx),
            Self::BrownOut(mode) => mode.handle(event, cx),
        }
    }

    pub fn leave<const W: usize, const N: usize>(&mut self, cx: &mut ModeContext<'_, '_, W, N>) {
        match self {
            Self::Normal(mode) => mode.leave(cx),
            Self::Inspection(mode) => mode.leave(cx),
            Self::BrownOut(mode) => mode.leave(cx),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::Normal(mode) => mode.timeout(),
            Self::Inspection(mode) => mode.timeout(),
            Self::BrownOut(mode) => mode.timeout(),
        }
    }

    /// Get the mode ID for external observation
    pub fn mode_id(&self) -> ModeId {
        match self {
            Self::Normal(_) => ModeId::Normal,
            Self::Inspection(_) => ModeId::Inspection,
            Self::BrownOut(_) => ModeId::BrownOut,
        }
    }
}
