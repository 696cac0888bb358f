//! The 64-slot recently-seen-pixel table shared by encoder and decoder.

use crate::pixel::Pixel;

/// Fixed-size table of the last 64 distinct pixel hash buckets.
///
/// Slots start at `(0, 0, 0, 0)`, deliberately different from
/// [`Pixel::initial`]. This asymmetry keeps the very first pixel of an
/// all-black opaque image from hitting an uninitialised slot as a spurious
/// `QOI_OP_INDEX`.
#[derive(Clone)]
pub struct SeenTable {
    slots: [Pixel; 64],
}

impl SeenTable {
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: [Pixel::new(0, 0, 0, 0); 64],
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Pixel {
        self.slots[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, pixel: Pixel) {
        self.slots[index] = pixel;
    }
}

impl Default for SeenTable {
    fn default() -> Self {
        Self::new()
    }
}
