//! Integration tests for the controller and its modes.

use std::cell::RefCell;

use embassy_futures::block_on;
use embassy_time::Duration;
use feelights::color::{BLACK, BLUE, GREEN, RED, WHITE};
use feelights::config::{LED_COUNT, WINDOW_SIZE};
use feelights::mode::{InspectionMode, ModeSlot, NormalMode};
use feelights::{
    CaptureError, CaptureSource, Controller, Event, EventSignals, FrameHandoff, FrameSink,
    MicroFft, ModeId, Notifier, Rgb, SharedState,
};

const W: usize = 128;
const N: usize = 32;

#[derive(Default)]
struct FakeCapture<'a> {
    requests: usize,
    fail: bool,
    pending: Option<Notifier<'a>>,
}

impl<'a> CaptureSource<'a> for FakeCapture<'a> {
    fn request_capture(
        &mut self,
        window: &mut [u16],
        on_complete: Notifier<'a>,
    ) -> Result<(), CaptureError> {
        if self.fail {
            return Err(CaptureError::Busy);
        }
        window.fill(2048);
        self.requests += 1;
        self.pending = Some(on_complete);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: RefCell<Vec<Vec<Rgb>>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.frames.borrow().len()
    }

    fn last(&self) -> Vec<Rgb> {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }
}

impl FrameSink<N> for RecordingSink {
    fn submit(&self, pixels: &[Rgb; N], count: usize) {
        self.frames.borrow_mut().push(pixels[..count].to_vec());
    }
}

type TestController<'a> = Controller<'a, FakeCapture<'a>, MicroFft, W, N>;

fn controller<'a>(signals: &'a EventSignals, sink: &'a RecordingSink) -> TestController<'a> {
    Controller::new(signals, sink, FakeCapture::default(), MicroFft, 42)
}

fn complete_capture(controller: &mut TestController<'_>) {
    let notifier = controller.capture_mut().pending.take().unwrap();
    notifier.notify();
}

fn alternating() -> Vec<Rgb> {
    (0..LED_COUNT)
        .map(|index| if index % 2 == 0 { WHITE } else { BLACK })
        .collect()
}

// -----------------------------------------------------------------------------
// Mode ids and timeouts
// -----------------------------------------------------------------------------

#[test]
fn mode_ids_round_trip_through_raw() {
    for id in [ModeId::Normal, ModeId::Inspection, ModeId::BrownOut] {
        assert_eq!(ModeId::from_raw(id as u8), Some(id));
        assert_eq!(id.to_mode_slot().mode_id(), id);
    }
    assert_eq!(ModeId::from_raw(7), None);
    assert_eq!(ModeId::BrownOut.as_str(), "brown_out");
}

#[test]
fn modes_wait_with_their_timeouts() {
    assert_eq!(
        ModeSlot::Normal(NormalMode::default()).timeout(),
        Some(Duration::from_millis(60))
    );
    assert_eq!(
        ModeSlot::Inspection(InspectionMode::default()).timeout(),
        None
    );
    assert_eq!(
        ModeId::BrownOut.to_mode_slot().timeout(),
        Some(Duration::from_millis(2000))
    );
}

// -----------------------------------------------------------------------------
// Normal mode
// -----------------------------------------------------------------------------

#[test]
fn normal_entry_clears_and_arms_capture() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);

    controller.start();
    controller.start();

    assert_eq!(controller.mode_id(), ModeId::Normal);
    assert_eq!(sink.count(), 1);
    assert_eq!(sink.last(), vec![BLACK; LED_COUNT]);
    assert_eq!(controller.capture().requests, 1);
    assert!(controller.pipeline().is_capture_armed());
}

#[test]
fn completed_capture_renders_a_frame() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);
    controller.start();

    complete_capture(&mut controller);
    let next = block_on(controller.step());

    assert_eq!(next, Some(ModeId::Normal));
    assert_eq!(sink.count(), 2);
    assert_eq!(controller.animation().frames_rendered(), 1);
    assert_eq!(controller.capture().requests, 2);
    // Silence leaves only the ambient floor lit
    assert!(sink.last().iter().all(|pixel| pixel.r > 0));
}

#[test]
fn normal_times_out_without_samples() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);

    assert_eq!(block_on(controller.step()), None);
    assert_eq!(controller.mode_id(), ModeId::Normal);
    assert_eq!(controller.capture().requests, 1);
}

#[test]
fn release_enters_inspection_with_audio_pending() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);
    controller.start();

    complete_capture(&mut controller);
    assert!(signals.is_pending(Event::AudioSamplesAvailable));

    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::Inspection);
    assert_eq!(sink.last(), vec![RED; LED_COUNT]);

    // The completion is consumed but capture isn't re-armed outside Normal
    assert_eq!(block_on(controller.step()), Some(ModeId::Inspection));
    assert!(!controller.pipeline().is_capture_armed());
    assert_eq!(controller.capture().requests, 1);
    assert_eq!(controller.animation().frames_rendered(), 0);
}

#[test]
fn failed_capture_is_retried_on_next_entry() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);
    controller.capture_mut().fail = true;
    controller.start();
    assert!(!controller.pipeline().is_capture_armed());

    controller.capture_mut().fail = false;
    for _ in 0..5 {
        controller.dispatch(Event::ButtonReleased);
    }

    assert_eq!(controller.mode_id(), ModeId::Normal);
    assert!(controller.pipeline().is_capture_armed());
    assert_eq!(controller.capture().requests, 1);
}

// -----------------------------------------------------------------------------
// Inspection and brown-out
// -----------------------------------------------------------------------------

#[test]
fn inspection_steps_through_colors() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);
    controller.start();

    controller.dispatch(Event::ButtonReleased);
    assert_eq!(sink.last(), vec![RED; LED_COUNT]);

    assert_eq!(controller.dispatch(Event::ButtonPressed), ModeId::Inspection);
    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::Inspection);
    assert_eq!(sink.last(), vec![GREEN; LED_COUNT]);

    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::Inspection);
    assert_eq!(sink.last(), vec![BLUE; LED_COUNT]);

    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::BrownOut);
}

#[test]
fn brown_out_flashes_without_touching_the_animation() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink);
    controller.start();
    for _ in 0..3 {
        controller.dispatch(Event::ButtonReleased);
    }

    let orbs = *controller.animation().orbs();
    let ambient = *controller.animation().ambient();

    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::BrownOut);
    assert!(controller.bus().is_periodic_running());
    assert_eq!(sink.last(), vec![WHITE; LED_COUNT]);

    assert_eq!(controller.dispatch(Event::PeriodicFrame), ModeId::BrownOut);
    assert_eq!(sink.last(), alternating());

    assert_eq!(controller.dispatch(Event::PeriodicFrame), ModeId::BrownOut);
    assert_eq!(sink.last(), vec![WHITE; LED_COUNT]);

    assert_eq!(controller.animation().orbs(), &orbs);
    assert_eq!(controller.animation().ambient(), &ambient);
}

#[test]
fn full_mode_cycle_returns_to_normal() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let state = SharedState::new();
    let mut controller = controller(&signals, &sink).with_shared_state(&state);
    controller.start();

    controller.dispatch(Event::ButtonReleased);
    assert_eq!(state.mode(), ModeId::Inspection);

    for _ in 0..3 {
        controller.dispatch(Event::ButtonReleased);
    }
    assert_eq!(state.mode(), ModeId::BrownOut);

    assert_eq!(controller.dispatch(Event::ButtonReleased), ModeId::Normal);
    assert_eq!(state.mode(), ModeId::Normal);
    assert!(!controller.bus().is_periodic_running());
    assert_eq!(sink.last(), vec![BLACK; LED_COUNT]);
    // The first capture is still outstanding, so it isn't requested twice
    assert_eq!(controller.capture().requests, 1);
}

#[test]
fn shared_state_tracks_frames() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let state = SharedState::new();
    let mut controller = controller(&signals, &sink).with_shared_state(&state);
    controller.start();

    for _ in 0..3 {
        complete_capture(&mut controller);
        controller.dispatch(Event::AudioSamplesAvailable);
    }

    assert_eq!(state.frames(), 3);
    assert_eq!(state.palette(), 0);
}

#[test]
fn pixel_count_limits_presented_frames() {
    let signals = EventSignals::new();
    let sink = RecordingSink::default();
    let mut controller = controller(&signals, &sink).with_pixel_count(10);
    controller.start();

    assert_eq!(controller.output().pixel_count(), 10);
    assert_eq!(sink.last().len(), 10);

    let mut controller = Controller::<_, _, W, N>::new(
        &signals,
        &sink,
        FakeCapture::default(),
        MicroFft,
        1,
    )
    .with_pixel_count(500);
    controller.start();
    assert_eq!(sink.last().len(), N);
}

// -----------------------------------------------------------------------------
// Configured sizes
// -----------------------------------------------------------------------------

#[test]
fn default_sizes_follow_the_configuration() {
    #[cfg(not(feature = "wide-window"))]
    assert_eq!(WINDOW_SIZE, 128);
    #[cfg(feature = "wide-window")]
    assert_eq!(WINDOW_SIZE, 1024);

    let signals = EventSignals::new();
    let handoff: FrameHandoff = FrameHandoff::new();
    let mut controller: Controller<'_, FakeCapture<'_>, MicroFft> =
        Controller::new(&signals, &handoff, FakeCapture::default(), MicroFft, 5);
    controller.start();

    assert_eq!(controller.pipeline().ring().capture_index(), WINDOW_SIZE);
    assert_eq!(controller.output().pixel_count(), LED_COUNT);
    assert_eq!(handoff.try_take().unwrap().pixels().len(), LED_COUNT);

    // A full default window runs through the transform
    let notifier = controller.capture_mut().pending.take().unwrap();
    notifier.notify();
    assert_eq!(controller.dispatch(Event::AudioSamplesAvailable), ModeId::Normal);
    assert_eq!(controller.animation().frames_rendered(), 1);
    assert!(handoff.is_pending());
}
