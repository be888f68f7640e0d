//! LED animation patterns for the strip: colour wipes that paint the strip
//! one pixel at a time, and the live weight-rainbow frame.

use crate::drivers::neopixel::LedBuffer;
use crate::maths::{pixel_hue, weight_hue};
use crate::LED_STRING_SIZE;
use defmt::{write, Format, Formatter};
use smart_leds::hsv::{hsv2rgb, Hsv};
use smart_leds::RGB8;

/// Represents the animations that can be queued on the LED strip
#[derive(Clone)]
pub enum Animation {
    /// Paints the strip with one colour, one more pixel per step
    Wipe(WipeAnimation),
}

/// Helper function to get the new buffer regardless of animation. This is
/// because we cannot use dyn traits in a `no_std` build without setting up
/// a heap.
///
/// # Arguments
/// * `anim` - A mutable reference to the Animation enum that will generate
///   the next buffer state
/// # Returns
/// The result of the iterator on the animation
pub fn next_buffer(anim: &mut Animation) -> Option<LedBuffer> {
    match anim {
        Animation::Wipe(w) => w.next(),
    }
}

impl Format for Animation {
    fn format(&self, fmt: Formatter) {
        match self {
            Animation::Wipe(_) => write!(fmt, "Wipe"),
        }
    }
}

/// Fills the strip with a single colour from the first pixel up. Yields one
/// frame per painted pixel and terminates once the whole strip is covered;
/// the strip then holds the final frame until something else redraws it.
#[derive(Clone)]
pub struct WipeAnimation {
    /// The colour being painted across the strip
    colour: RGB8,
    /// How many pixels have been painted so far
    painted: usize,
}

impl WipeAnimation {
    pub fn new(colour: RGB8) -> Self {
        Self { colour, painted: 0 }
    }
}

impl Iterator for WipeAnimation {
    type Item = LedBuffer;

    fn next(&mut self) -> Option<Self::Item> {
        if self.painted >= LED_STRING_SIZE {
            return None;
        }
        self.painted += 1;
        let mut buffer = LedBuffer::default();
        for led in buffer.iter_mut().take(self.painted) {
            *led = self.colour;
        }
        Some(buffer)
    }
}

/// One frame of the weight rainbow: the base hue follows the reading and a
/// partial hue sweep spreads across the strip.
pub fn weight_rainbow(weight_dg: i32) -> LedBuffer {
    let base = weight_hue(weight_dg);
    let mut buffer = LedBuffer::default();
    for (index, led) in buffer.iter_mut().enumerate() {
        *led = hsv2rgb(Hsv {
            hue: pixel_hue(base, index),
            sat: 255,
            val: 255,
        });
    }
    buffer
}
