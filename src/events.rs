//! Event bus - named signals the control task waits on
//!
//! Every event is backed by its own [`Signal`], so raising one is a
//! non-blocking, allocation-free store that is safe from interrupt context.
//! The control task consumes exactly one pending event per [`EventBus::wait`],
//! checking signals in registration order so none is starved.

use embassy_futures::select::{Either, Either4, select, select4};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

/// Events the control task reacts to, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// A capture window has been filled
    AudioSamplesAvailable = 0,
    /// Button went down (after debounce)
    ButtonPressed = 1,
    /// Button went up (after debounce)
    ButtonReleased = 2,
    /// Periodic timer tick
    PeriodicFrame = 3,
}

impl Event {
    pub const COUNT: usize = 4;

    pub const ALL: [Event; Event::COUNT] = [
        Event::AudioSamplesAvailable,
        Event::ButtonPressed,
        Event::ButtonReleased,
        Event::PeriodicFrame,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AudioSamplesAvailable => "audio_samples_available",
            Self::ButtonPressed => "button_pressed",
            Self::ButtonReleased => "button_released",
            Self::PeriodicFrame => "periodic_frame",
        }
    }
}

/// Outcome of a bus wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    Event(Event),
    Timeout,
}

impl WaitResult {
    pub fn event(self) -> Option<Event> {
        match self {
            Self::Event(event) => Some(event),
            Self::Timeout => None,
        }
    }
}

/// Converts a millisecond timeout where `0` means "wait forever"
pub const fn wait_timeout(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

pub type EventSignal = Signal<CriticalSectionRawMutex, ()>;

/// Storage for one signal per [`Event`]
///
/// Usually placed in a `static` so interrupt handlers can reach it.
pub struct EventSignals {
    signals: [EventSignal; Event::COUNT],
}

impl EventSignals {
    pub const fn new() -> Self {
        Self {
            signals: [const { Signal::new() }; Event::COUNT],
        }
    }

    /// Raise `event`. Raising an already pending event is a no-op.
    pub fn emit(&self, event: Event) {
        self.signals[event.index()].signal(());
    }

    /// Check whether `event` is raised but not consumed yet
    pub fn is_pending(&self, event: Event) -> bool {
        self.signals[event.index()].signaled()
    }

    /// Drop a pending `event` without handling it
    pub fn clear(&self, event: Event) {
        self.signals[event.index()].reset();
    }

    pub fn emitter(&self) -> Emitter<'_> {
        Emitter { signals: self }
    }

    pub fn notifier(&self, event: Event) -> Notifier<'_> {
        Notifier {
            signals: self,
            event,
        }
    }

    /// Consume the first pending event in registration order
    fn take_pending(&self) -> Option<Event> {
        for event in Event::ALL {
            if self.signals[event.index()].try_take().is_some() {
                return Some(event);
            }
        }
        None
    }

    /// Wait until any signal fires and consume it
    async fn wait_any(&self) -> Event {
        let [audio, pressed, released, periodic] = &self.signals;
        match select4(audio.wait(), pressed.wait(), released.wait(), periodic.wait()).await {
            Either4::First(()) => Event::AudioSamplesAvailable,
            Either4::Second(()) => Event::ButtonPressed,
            Either4::Third(()) => Event::ButtonReleased,
            Either4::Fourth(()) => Event::PeriodicFrame,
        }
    }
}

impl Default for EventSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap handle for raising any event
#[derive(Clone, Copy)]
pub struct Emitter<'a> {
    signals: &'a EventSignals,
}

impl Emitter<'_> {
    pub fn emit(&self, event: Event) {
        self.signals.emit(event);
    }
}

/// Handle bound to a single event, handed to collaborators as their
/// completion signal
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    signals: &'a EventSignals,
    event: Event,
}

impl Notifier<'_> {
    pub fn notify(&self) {
        self.signals.emit(self.event);
    }

    pub fn event(&self) -> Event {
        self.event
    }
}

struct PeriodicTimer {
    period: Duration,
    next_tick: Instant,
}

/// Waiting side of the event signals, owned by the control task
pub struct EventBus<'a> {
    signals: &'a EventSignals,
    periodic: Option<PeriodicTimer>,
}

impl<'a> EventBus<'a> {
    pub fn new(signals: &'a EventSignals) -> Self {
        Self {
            signals,
            periodic: None,
        }
    }

    pub fn signals(&self) -> &'a EventSignals {
        self.signals
    }

    pub fn emit(&self, event: Event) {
        self.signals.emit(event);
    }

    pub fn emitter(&self) -> Emitter<'a> {
        Emitter {
            signals: self.signals,
        }
    }

    pub fn notifier(&self, event: Event) -> Notifier<'a> {
        Notifier {
            signals: self.signals,
            event,
        }
    }

    /// Start raising [`Event::PeriodicFrame`] every `period`.
    ///
    /// Restarts the timer when it is already running. The timer belongs to
    /// this bus: ticks are raised only while its owner calls [`Self::wait`]
    /// or [`Self::try_next`], so other tasks can't observe them on the
    /// signals alone.
    pub fn start_periodic(&mut self, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        self.periodic = Some(PeriodicTimer {
            period,
            next_tick: Instant::now() + period,
        });
    }

    /// Stop the periodic timer. No-op when it is not running.
    pub fn stop_periodic(&mut self) {
        self.periodic = None;
    }

    pub fn is_periodic_running(&self) -> bool {
        self.periodic.is_some()
    }

    /// Consume a pending event without waiting
    pub fn try_next(&mut self) -> Option<Event> {
        self.raise_due_ticks();
        self.signals.take_pending()
    }

    /// Wait for the next event.
    ///
    /// `None` waits forever. When several events are pending the first one in
    /// registration order is returned and the rest stay pending.
    pub async fn wait(&mut self, timeout: Option<Duration>) -> WaitResult {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);

        loop {
            if let Some(event) = self.try_next() {
                return WaitResult::Event(event);
            }

            let next_tick = self.periodic.as_ref().map(|timer| timer.next_tick);
            let wake_at = match (deadline, next_tick) {
                (Some(deadline), Some(tick)) => Some(deadline.min(tick)),
                (deadline, tick) => deadline.or(tick),
            };

            let Some(wake_at) = wake_at else {
                return WaitResult::Event(self.signals.wait_any().await);
            };

            match select(self.signals.wait_any(), Timer::at(wake_at)).await {
                Either::First(event) => return WaitResult::Event(event),
                Either::Second(()) => {
                    if let Some(event) = self.try_next() {
                        return WaitResult::Event(event);
                    }
                    if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                        log::trace!("events: wait timed out");
                        return WaitResult::Timeout;
                    }
                }
            }
        }
    }

    fn raise_due_ticks(&mut self) {
        let Some(timer) = self.periodic.as_mut() else {
            return;
        };
        let now = Instant::now();
        if now < timer.next_tick {
            return;
        }
        // Missed ticks collapse into the single pending signal
        self.signals.emit(Event::PeriodicFrame);
        while timer.next_tick <= now {
            timer.next_tick += timer.period;
        }
    }
}
