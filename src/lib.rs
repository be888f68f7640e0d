#![no_std]

pub mod animations;
pub mod drivers;
pub mod maths;
pub mod melody;
pub mod scale;
pub mod tasks;

pub use tasks::*;

/// The LED wipe step interval in milliseconds (one more pixel per step)
pub const WIPE_STEP: u64 = 100;

/// The number of LEDs in the strip we are driving
pub const LED_STRING_SIZE: usize = 30;

/// Global brightness applied to every strip update, from 0 (off) to 255
pub const LED_BRIGHTNESS: u8 = 128;

/// The maximum number of pending wipes in the animation queue
pub const MAX_PENDING_ANIMATIONS: usize = 8;

/// Top of the weight range mapped onto the LED hue wheel, in deci-grams
pub const MAX_WEIGHT_DG: i32 = 10_000;

/// The known weight placed on the platform during calibration, in deci-grams
pub const KNOWN_WEIGHT_DG: i32 = 1_000;
