// Weight to colour mapping

use crate::{LED_STRING_SIZE, MAX_WEIGHT_DG};

/// Span of the hue wheel the weight range covers, out of 255. Stops at 80%
/// so a heavy reading does not wrap back to the colour of an empty scale.
const HUE_SPAN: u32 = 204;

/// Extra hue sweep spread across the strip, out of 255
const STRIP_SPREAD: u32 = 76;

/// Base hue for a weight reading; readings outside 0..MAX_WEIGHT_DG clamp
/// to the ends of the span
pub fn weight_hue(weight_dg: i32) -> u8 {
    let clamped = weight_dg.clamp(0, MAX_WEIGHT_DG) as u32;
    (clamped * HUE_SPAN / MAX_WEIGHT_DG as u32) as u8
}

/// Hue of a single pixel in the weight rainbow: the base hue plus this
/// pixel's share of the strip sweep, wrapping around the wheel
pub fn pixel_hue(base: u8, index: usize) -> u8 {
    base.wrapping_add((index as u32 * STRIP_SPREAD / LED_STRING_SIZE as u32) as u8)
}

// Read-out formatting

/// Renders deci-grams as e.g. "12.3 g" without pulling in float formatting
pub fn format_weight(weight_dg: i32) -> heapless::String<16> {
    let mut out = heapless::String::new();
    let sign = if weight_dg < 0 { "-" } else { "" };
    let dg = weight_dg.unsigned_abs();
    let _ = ufmt::uwrite!(out, "{}{}.{} g", sign, dg / 10, dg % 10);
    out
}
