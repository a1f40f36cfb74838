use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

use super::{LedDriver, PixelDoubleBuffer};
use crate::color::Rgb;
use crate::config::LED_COUNT;

/// Frame handed from the control task to the output worker
#[derive(Clone, Copy)]
pub struct FrameJob<const N: usize> {
    pub pixels: [Rgb; N],
    /// Pixels to transmit from the start of `pixels`
    pub count: usize,
}

impl<const N: usize> FrameJob<N> {
    /// Pixels to transmit, clamped to the frame length
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.count.min(N)]
    }
}

/// Receives presented frames without blocking the caller
pub trait FrameSink<const N: usize> {
    fn submit(&self, pixels: &[Rgb; N], count: usize);
}

/// Latest-value handoff between the control task and the output worker.
///
/// A frame submitted before the previous one was taken replaces it.
pub struct FrameHandoff<const N: usize = LED_COUNT> {
    signal: Signal<CriticalSectionRawMutex, FrameJob<N>>,
}

impl<const N: usize> FrameHandoff<N> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    pub async fn wait(&self) -> FrameJob<N> {
        self.signal.wait().await
    }

    pub fn try_take(&self) -> Option<FrameJob<N>> {
        self.signal.try_take()
    }

    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl<const N: usize> Default for FrameHandoff<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameSink<N> for FrameHandoff<N> {
    fn submit(&self, pixels: &[Rgb; N], count: usize) {
        self.signal.signal(FrameJob {
            pixels: *pixels,
            count,
        });
    }
}

/// Owns the LED driver and transmits frames taken from a [`FrameHandoff`]
pub struct OutputWorker<'a, D, const N: usize = LED_COUNT>
where
    D: LedDriver,
{
    handoff: &'a FrameHandoff<N>,
    driver: D,
}

impl<'a, D, const N: usize> OutputWorker<'a, D, N>
where
    D: LedDriver,
{
    pub fn new(handoff: &'a FrameHandoff<N>, driver: D) -> Self {
        Self { handoff, driver }
    }

    /// Wait for the next frame and transmit it
    pub async fn step(&mut self) {
        let job = self.handoff.wait().await;
        self.transmit(&job);
    }

    /// Transmit `job`. Driver failures drop the frame.
    pub fn transmit(&mut self, job: &FrameJob<N>) {
        if let Err(e) = self.driver.write(job.pixels()) {
            log::error!("strip: couldn't update strip: {:?}", e);
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// Double buffer plus the sink it presents to
pub struct PixelOutput<'a, const N: usize> {
    buffers: PixelDoubleBuffer<N>,
    sink: &'a dyn FrameSink<N>,
    pixel_count: usize,
}

impl<'a, const N: usize> PixelOutput<'a, N> {
    pub fn new(sink: &'a dyn FrameSink<N>, pixel_count: usize) -> Self {
        Self {
            buffers: PixelDoubleBuffer::new(),
            sink,
            pixel_count: pixel_count.min(N),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn set_pixel_count(&mut self, count: usize) {
        self.pixel_count = count.min(N);
    }

    /// Fill the whole composing frame with `color`
    pub fn fill(&mut self, color: Rgb) {
        self.buffers.composing_mut().fill(color);
    }

    /// Driven part of the composing frame
    pub fn composing_mut(&mut self) -> &mut [Rgb] {
        let count = self.pixel_count;
        &mut self.buffers.composing_mut()[..count]
    }

    pub fn swap(&mut self) -> &mut [Rgb; N] {
        self.buffers.swap()
    }

    /// Hand the composing frame to the sink, then swap
    pub fn present(&mut self) {
        self.sink.submit(self.buffers.composing(), self.pixel_count);
        self.buffers.swap();
    }

    pub fn buffers(&self) -> &PixelDoubleBuffer<N> {
        &self.buffers
    }
}
