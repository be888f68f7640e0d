pub mod audio;
pub mod display;
pub mod leds;

pub use audio::{AudioCommand, audio_task};
pub use display::{DisplayState, display_task};
pub use leds::{LedCommand, led_task};
