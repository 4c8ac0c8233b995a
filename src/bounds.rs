use crate::Rgb;

/// Location of one physical strip inside the shared frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripBounds {
    pub start: u16,
    pub len: u16,
}

impl StripBounds {
    pub const fn new(start: u16, len: u16) -> Self {
        Self { start, len }
    }

    /// Index one past the last LED of the strip
    pub const fn end(self) -> usize {
        self.start as usize + self.len as usize
    }

    /// Bounds of the strip that directly follows this one
    pub const fn next(self, len: u16) -> Self {
        Self {
            start: self.start + self.len,
            len,
        }
    }

    /// Split the strip into `(head, middle, tail)` LED counts
    ///
    /// Head and tail each take a quarter, rounded down; the middle keeps the rest.
    pub const fn zones(self) -> (usize, usize, usize) {
        let len = self.len as usize;
        let edge = len / 4;
        (edge, len - 2 * edge, edge)
    }
}

/// Get the LEDs of a strip, or `None` when the strip does not fit the buffer
pub(crate) fn bounded(leds: &mut [Rgb], bounds: StripBounds) -> Option<&mut [Rgb]> {
    leds.get_mut(bounds.start as usize..bounds.end())
}
