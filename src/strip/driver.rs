use core::iter;

use smart_leds::SmartLedsWrite;

use crate::color::{BLACK, Rgb};
use crate::config::STRIP;

#[derive(Debug)]
pub enum StripError {
    /// Transmission peripheral is not ready
    NotReady,
    /// Writer rejected the frame
    Transmission,
}

/// LED strip transmitter
///
/// Implement this trait to support different LED hardware.
pub trait LedDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), StripError>;
}

/// [`LedDriver`] over any `smart-leds` writer
///
/// Strips with a few dead or hidden pixels at the start can be given
/// `skip_leds`; those are kept dark and the frame starts after them.
pub struct SmartLedsDriver<W> {
    writer: W,
    skip_leds: usize,
}

impl<W> SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub fn new(writer: W) -> Self {
        Self::new_with_skip(writer, 0)
    }

    pub fn new_with_skip(writer: W, skip_leds: usize) -> Self {
        Self { writer, skip_leds }
    }

    /// Driver skipping the configured number of leading LEDs
    pub fn from_config(writer: W) -> Self {
        Self::new_with_skip(writer, STRIP.skip_leds)
    }

    pub fn skip_leds(&self) -> usize {
        self.skip_leds
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LedDriver for SmartLedsDriver<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn write(&mut self, colors: &[Rgb]) -> Result<(), StripError> {
        let leading = iter::repeat_n(BLACK, self.skip_leds);
        self.writer
            .write(leading.chain(colors.iter().copied()))
            .map_err(|_| StripError::Transmission)
    }
}
