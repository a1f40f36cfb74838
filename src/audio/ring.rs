/// Two capture windows of raw samples with a lagging read index.
///
/// The capture collaborator writes into the window at
/// `(index + W) mod 2W` while the pipeline reads the committed window at
/// `index`. Both are only ever handed out as disjoint borrows.
pub struct SampleRing<const W: usize> {
    windows: [[u16; W]; 2],
    index: usize,
}

impl<const W: usize> SampleRing<W> {
    const NON_EMPTY: () = assert!(W > 0, "capture window must hold samples");

    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            windows: [[0; W]; 2],
            index: 0,
        }
    }

    /// Sample offset of the committed (read) window
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sample offset of the window the next capture fills
    pub fn capture_index(&self) -> usize {
        (self.index + W) % (2 * W)
    }

    pub fn read_window(&self) -> &[u16; W] {
        &self.windows[self.index / W]
    }

    pub fn capture_window_mut(&mut self) -> &mut [u16; W] {
        let slot = self.capture_index() / W;
        &mut self.windows[slot]
    }

    /// Borrow the read and capture windows at once
    pub fn split(&mut self) -> (&[u16; W], &mut [u16; W]) {
        let [first, second] = &mut self.windows;
        if self.index == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Promote the captured window to the read window
    pub fn commit(&mut self) {
        self.index = self.capture_index();
    }
}

impl<const W: usize> Default for SampleRing<W> {
    fn default() -> Self {
        Self::new()
    }
}
