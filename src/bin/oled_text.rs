//! Writes a static banner to the OLED, holds it for a while, then clears
//! the screen.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::info;
use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use esp_hal::{
    Async, Config,
    clock::CpuClock,
    i2c::master::{Config as I2cConfig, I2c},
    timer::systimer::SystemTimer,
};
use grove_demo_rig::tasks::display::{
    DisplayChannel, DisplayChannelReceiver, DisplayState, display_task,
};
use panic_rtt_target as _;
use static_cell::StaticCell;

/// Communicate with the display task using this channel and the DisplayState enum
static DISPLAY_CHANNEL: StaticCell<DisplayChannel> = StaticCell::new();
static DISPLAY_RECEIVER: StaticCell<DisplayChannelReceiver> = StaticCell::new();

/// I2C bus the OLED sits on
static I2C_BUS: StaticCell<I2c<'static, Async>> = StaticCell::new();

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let display_channel = DISPLAY_CHANNEL.init(Channel::new());
    let sender = display_channel.sender();
    let receiver = DISPLAY_RECEIVER.init(display_channel.receiver());

    let i2c = I2C_BUS.init(
        I2c::new(peripherals.I2C0, I2cConfig::default())
            .unwrap()
            .with_scl(peripherals.GPIO6)
            .with_sda(peripherals.GPIO5)
            .into_async(),
    );
    spawner
        .spawn(display_task(receiver, i2c))
        .expect("Failed to spawn display task");

    info!("MAIN: Writing banner");
    sender.send(DisplayState::Banner).await;
    Timer::after_secs(50).await;
    sender.send(DisplayState::Clear).await;
    info!("MAIN: Done");

    loop {
        Timer::after_secs(1).await;
    }
}
