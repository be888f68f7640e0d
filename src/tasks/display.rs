use defmt::{error, info};
use embassy_futures::yield_now;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use embedded_graphics::{
    Drawable,
    mono_font::{MonoTextStyleBuilder, iso_8859_9::FONT_6X10, iso_8859_9::FONT_10X20},
    pixelcolor::BinaryColor,
    prelude::Point,
    text::{Baseline, Text},
};
use esp_hal::{Async, i2c::master::I2c};
use ssd1306::{
    I2CDisplayInterface, Ssd1306Async, mode::DisplayConfigAsync, prelude::DisplayRotation,
    size::DisplaySize128x64,
};

use crate::maths::format_weight;

/// Manage the OLED by sending the display task messages of this type
pub enum DisplayState {
    /// Static banner used by the plain OLED demo
    Banner,
    /// Live weight read-out in deci-grams, centred in the large font
    Weight(i32),
    /// The scale is being zeroed
    Taring,
    /// Ask for the known weight to be placed on the platform
    CalibratePrompt,
    /// Calibration finished with the given reference unit, in counts per gram
    Calibrated(i32),
    /// Blank the screen
    Clear,
}

const DISPLAY_QUEUE_SIZE: usize = 10;
/// Channel types for the display task.
pub type DisplayChannel = Channel<CriticalSectionRawMutex, DisplayState, DISPLAY_QUEUE_SIZE>;
pub type DisplayChannelSender =
    Sender<'static, CriticalSectionRawMutex, DisplayState, DISPLAY_QUEUE_SIZE>;
pub type DisplayChannelReceiver =
    Receiver<'static, CriticalSectionRawMutex, DisplayState, DISPLAY_QUEUE_SIZE>;

/// Display driver main task.
/// The OLED is fully managed from this task. It holds the screen contents
/// and redraws in response to messages sent to it via the channel.
///
/// # Parameters
/// * `channel` - Channel receiver for display state messages
/// * `i2c` - I2C bus the SSD1306 sits on
#[embassy_executor::task]
pub async fn display_task(
    channel: &'static DisplayChannelReceiver,
    i2c: &'static mut I2c<'static, Async>,
) {
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(_e) = display.init().await {
        error!("Display couldn't be initialised");
        loop {
            yield_now().await;
        }
    }
    let big = MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(BinaryColor::On)
        .build();
    let small = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build();

    info!("DISPLAY_TASK: Task started. Waiting for messages...");
    loop {
        use DisplayState::*;
        match channel.receive().await {
            Banner => {
                display.clear_buffer();
                Text::with_baseline("Hello, OLED!", Point::zero(), big, Baseline::Top)
                    .draw(&mut display)
                    .unwrap();
                Text::with_baseline("SSD1306 128x64", Point::new(0, 28), small, Baseline::Top)
                    .draw(&mut display)
                    .unwrap();
                display.flush().await.unwrap();
            }
            Weight(weight_dg) => {
                let text = format_weight(weight_dg);
                // Centre the read-out; the large font is 10 pixels a glyph
                let x = ((128 - 10 * text.len() as i32) / 2).max(0);
                display.clear_buffer();
                Text::with_baseline(text.as_str(), Point::new(x, 22), big, Baseline::Top)
                    .draw(&mut display)
                    .unwrap();
                display.flush().await.unwrap();
            }
            Taring => {
                display.clear_buffer();
                Text::with_baseline("Taring...", Point::new(34, 28), small, Baseline::Top)
                    .draw(&mut display)
                    .unwrap();
                display.flush().await.unwrap();
            }
            CalibratePrompt => {
                display.clear_buffer();
                Text::with_baseline(
                    "Calibration\nPlace known\nweight then\npress button",
                    Point::zero(),
                    small,
                    Baseline::Top,
                )
                .draw(&mut display)
                .unwrap();
                display.flush().await.unwrap();
            }
            Calibrated(reference_unit) => {
                let mut msg = heapless::String::<32>::new();
                ufmt::uwrite!(msg, "Calibrated\nRef: {}", reference_unit).unwrap();
                display.clear_buffer();
                Text::with_baseline(msg.as_str(), Point::zero(), small, Baseline::Top)
                    .draw(&mut display)
                    .unwrap();
                display.flush().await.unwrap();
            }
            Clear => {
                display.clear_buffer();
                display.flush().await.unwrap();
            }
        }
    }
}
