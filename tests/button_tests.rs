//! Integration tests for the debounced button monitor.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::{block_on, join::join};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;
use feelights::{ButtonMonitor, Event, EventSignals};

/// Simulated button line shared between the test and the pin
struct Line {
    high: AtomicBool,
    edge: Signal<CriticalSectionRawMutex, ()>,
}

impl Line {
    fn new(high: bool) -> Self {
        Self {
            high: AtomicBool::new(high),
            edge: Signal::new(),
        }
    }

    fn set(&self, high: bool) {
        self.high.store(high, Ordering::Relaxed);
        self.edge.signal(());
    }
}

struct FakePin<'a> {
    line: &'a Line,
}

impl ErrorType for FakePin<'_> {
    type Error = Infallible;
}

impl InputPin for FakePin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.line.high.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.line.high.load(Ordering::Relaxed))
    }
}

impl Wait for FakePin<'_> {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        while !self.line.high.load(Ordering::Relaxed) {
            self.line.edge.wait().await;
        }
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        while self.line.high.load(Ordering::Relaxed) {
            self.line.edge.wait().await;
        }
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_low().await?;
        self.wait_for_high().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_high().await?;
        self.wait_for_low().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.line.edge.wait().await;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Press and release
// -----------------------------------------------------------------------------

#[test]
fn falling_edge_emits_pressed() {
    let signals = EventSignals::new();
    let line = Line::new(true);
    let mut monitor = ButtonMonitor::new(FakePin { line: &line }, signals.emitter());

    let (result, ()) = block_on(join(monitor.step(), async {
        line.set(false);
    }));

    assert_eq!(result, Ok(Event::ButtonPressed));
    assert!(signals.is_pending(Event::ButtonPressed));
    assert!(!signals.is_pending(Event::ButtonReleased));
}

#[test]
fn rising_edge_emits_released() {
    let signals = EventSignals::new();
    let line = Line::new(false);
    let mut monitor = ButtonMonitor::new(FakePin { line: &line }, signals.emitter());
    assert_eq!(monitor.is_pressed(), Ok(true));

    let (result, ()) = block_on(join(monitor.step(), async {
        line.set(true);
    }));

    assert_eq!(result, Ok(Event::ButtonReleased));
    assert!(signals.is_pending(Event::ButtonReleased));
}

#[test]
fn active_high_wiring() {
    let signals = EventSignals::new();
    let line = Line::new(false);
    let mut monitor =
        ButtonMonitor::new(FakePin { line: &line }, signals.emitter()).with_active_low(false);

    let (result, ()) = block_on(join(monitor.step(), async {
        line.set(true);
    }));

    assert_eq!(result, Ok(Event::ButtonPressed));
}

// -----------------------------------------------------------------------------
// Debounce
// -----------------------------------------------------------------------------

#[test]
fn level_is_read_after_bouncing_settles() {
    let signals = EventSignals::new();
    let line = Line::new(true);
    let mut monitor = ButtonMonitor::new(FakePin { line: &line }, signals.emitter())
        .with_debounce(Duration::from_millis(10));

    let (result, ()) = block_on(join(monitor.step(), async {
        line.set(false);
        Timer::after_millis(2).await;
        line.set(true);
        Timer::after_millis(2).await;
        line.set(false);
    }));

    assert_eq!(result, Ok(Event::ButtonPressed));
    assert!(!signals.is_pending(Event::ButtonReleased));
}

#[test]
fn contact_bounce_back_to_idle_reports_release() {
    let signals = EventSignals::new();
    let line = Line::new(true);
    let mut monitor = ButtonMonitor::new(FakePin { line: &line }, signals.emitter());

    let (result, ()) = block_on(join(monitor.step(), async {
        line.set(false);
        Timer::after_millis(1).await;
        line.set(true);
    }));

    assert_eq!(result, Ok(Event::ButtonReleased));
    assert!(!signals.is_pending(Event::ButtonPressed));
}
