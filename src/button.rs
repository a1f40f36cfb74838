//! Debounced push button
//!
//! Waits for an edge, lets the contact settle, then reads the level and
//! raises [`Event::ButtonPressed`] or [`Event::ButtonReleased`].

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::config::BUTTON;
use crate::events::{Emitter, Event};

pub struct ButtonMonitor<'a, P>
where
    P: InputPin + Wait,
{
    pin: P,
    emitter: Emitter<'a>,
    debounce: Duration,
    active_low: bool,
}

impl<'a, P> ButtonMonitor<'a, P>
where
    P: InputPin + Wait,
{
    /// Monitor `pin` with the configured debounce and polarity
    pub fn new(pin: P, emitter: Emitter<'a>) -> Self {
        Self {
            pin,
            emitter,
            debounce: Duration::from_millis(BUTTON.debounce_ms),
            active_low: BUTTON.active_low,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high != self.active_low)
    }

    /// Wait for the next settled edge and emit its event
    pub async fn step(&mut self) -> Result<Event, P::Error> {
        self.pin.wait_for_any_edge().await?;

        // Every bounce restarts the debounce window
        loop {
            match select(Timer::after(self.debounce), self.pin.wait_for_any_edge()).await {
                Either::First(()) => break,
                Either::Second(result) => result?,
            }
        }

        let event = if self.is_pressed()? {
            Event::ButtonPressed
        } else {
            Event::ButtonReleased
        };
        self.emitter.emit(event);
        Ok(event)
    }

    pub async fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.step().await {
                log::error!("button: couldn't read pin: {:?}", e);
            }
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}
