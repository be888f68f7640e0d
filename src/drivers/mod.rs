pub mod button;
pub mod buzzer;
pub mod hx711;
pub mod neopixel;
