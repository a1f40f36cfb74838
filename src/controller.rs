//! Control task - waits on the event bus and drives the active mode
//!
//! One event is handled per wait. The sample ring is committed on every
//! completed capture before the mode sees the event, so a capture finishing
//! while another mode is active is consumed and never re-armed twice.

use crate::animation::AnimationState;
use crate::audio::{AudioPipeline, CaptureSource, SpectrumTransform};
use crate::config::{LED_COUNT, STRIP, WINDOW_SIZE};
use crate::events::{Event, EventBus, EventSignals, WaitResult};
use crate::mode::{ModeContext, ModeId, ModeSlot};
use crate::state::SharedState;
use crate::strip::{FrameSink, PixelOutput};

/// Control task state, sized by default for the configured window and strip
pub struct Controller<'a, C, T, const W: usize = WINDOW_SIZE, const N: usize = LED_COUNT>
where
    C: CaptureSource<'a>,
    T: SpectrumTransform,
{
    bus: EventBus<'a>,
    output: PixelOutput<'a, N>,
    pipeline: AudioPipeline<W>,
    animation: AnimationState,
    capture: C,
    transform: T,
    mode: ModeSlot,
    shared_state: Option<&'a SharedState>,
    started: bool,
}

impl<'a, C, T, const W: usize, const N: usize> Controller<'a, C, T, W, N>
where
    C: CaptureSource<'a>,
    T: SpectrumTransform,
{
    /// Create a controller in Normal mode.
    ///
    /// `seed` feeds the animation's random placement, ideally from a
    /// hardware RNG.
    pub fn new(
        signals: &'a EventSignals,
        sink: &'a dyn FrameSink<N>,
        capture: C,
        transform: T,
        seed: u64,
    ) -> Self {
        let pixel_count = STRIP.led_count.min(N);
        Self {
            bus: EventBus::new(signals),
            output: PixelOutput::new(sink, pixel_count),
            pipeline: AudioPipeline::new(),
            animation: AnimationState::new(seed, pixel_count),
            capture,
            transform,
            mode: ModeSlot::default(),
            shared_state: None,
            started: false,
        }
    }

    /// Publish mode and frame counters to `state`
    pub fn with_shared_state(mut self, state: &'a SharedState) -> Self {
        self.shared_state = Some(state);
        self
    }

    /// Drive `count` pixels instead of the configured strip length
    pub fn with_pixel_count(mut self, count: usize) -> Self {
        self.output.set_pixel_count(count);
        self.animation.set_strip_len(self.output.pixel_count());
        self
    }

    pub fn mode_id(&self) -> ModeId {
        self.mode.mode_id()
    }

    pub fn mode(&self) -> &ModeSlot {
        &self.mode
    }

    pub fn bus(&self) -> &EventBus<'a> {
        &self.bus
    }

    pub fn output(&self) -> &PixelOutput<'a, N> {
        &self.output
    }

    pub fn pipeline(&self) -> &AudioPipeline<W> {
        &self.pipeline
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    /// Enter the initial mode. Does nothing once started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let (mode, mut cx) = self.split();
        mode.enter(&mut cx);
        log::info!("lights: started in {} mode", self.mode.mode_id().as_str());
        self.publish();
    }

    /// Route `event` to the active mode and apply the transition it asks for
    pub fn dispatch(&mut self, event: Event) -> ModeId {
        if event == Event::AudioSamplesAvailable {
            self.pipeline.on_capture_complete();
        }

        let current = self.mode.mode_id();
        let (mode, mut cx) = self.split();
        let next = mode.handle(event, &mut cx);
        if next != current {
            self.transition(next);
        }
        self.publish();
        next
    }

    /// Wait for one event with the active mode's timeout and handle it.
    ///
    /// Returns `None` when the wait timed out.
    pub async fn step(&mut self) -> Option<ModeId> {
        self.start();
        let timeout = self.mode.timeout();
        match self.bus.wait(timeout).await {
            WaitResult::Event(event) => Some(self.dispatch(event)),
            WaitResult::Timeout => None,
        }
    }

    pub async fn run(&mut self) -> ! {
        self.start();
        loop {
            self.step().await;
        }
    }

    fn transition(&mut self, next: ModeId) {
        let previous = self.mode.mode_id();
        let (mode, mut cx) = self.split();
        mode.leave(&mut cx);
        *mode = next.to_mode_slot();
        mode.enter(&mut cx);
        log::info!(
            "lights: mode changed from {} to {}",
            previous.as_str(),
            next.as_str()
        );
    }

    fn publish(&self) {
        let Some(state) = self.shared_state else {
            return;
        };
        state.set_mode(self.mode.mode_id());
        state.set_frames(self.animation.frames_rendered());
        state.set_palette(self.animation.palette_index() as u8);
    }

    fn split(&mut self) -> (&mut ModeSlot, ModeContext<'_, 'a, W, N>) {
        let cx = ModeContext {
            bus: &mut self.bus,
            output: &mut self.output,
            pipeline: &mut self.pipeline,
            animation: &mut self.animation,
            capture: &mut self.capture,
            transform: &mut self.transform,
        };
        (&mut self.mode, cx)
    }
}
