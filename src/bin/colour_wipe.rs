//! Cycles the LED strip through red, green, blue and white colour wipes,
//! blanking for a second between rounds.

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
use embassy_time::{Duration, Timer};
use esp_hal::{Config, clock::CpuClock, rmt::Rmt, time::Rate, timer::systimer::SystemTimer};
use grove_demo_rig::{
    LED_STRING_SIZE, WIPE_STEP,
    drivers::neopixel::LedDriver,
    tasks::leds::{LedChannel, LedChannelReceiver, LedCommand, led_task},
};
use panic_rtt_target as _;
use smart_leds::RGB8;
use static_cell::StaticCell;

/// Communicate with the LED task using this channel and the LedCommand enum
static LED_CHANNEL: StaticCell<LedChannel> = StaticCell::new();
static LED_RECEIVER: StaticCell<LedChannelReceiver> = StaticCell::new();

/// Our LED driver that underlies the LED task
static LED_DRIVER: StaticCell<LedDriver> = StaticCell::new();

/// One round of wipes: red, green, blue, white
const WIPE_COLOURS: [RGB8; 4] = [
    RGB8 { r: 255, g: 0, b: 0 },
    RGB8 { r: 0, g: 255, b: 0 },
    RGB8 { r: 0, g: 0, b: 255 },
    RGB8 {
        r: 255,
        g: 255,
        b: 255,
    },
];

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let led_channel = LED_CHANNEL.init(Channel::new());
    let sender = led_channel.sender();
    let receiver = LED_RECEIVER.init(led_channel.receiver());

    let rmt = Rmt::new(peripherals.RMT, Rate::from_mhz(80))
        .expect("Failed to initialise RMT0")
        .into_async();
    let led_driver = LED_DRIVER.init(LedDriver::new(rmt, peripherals.GPIO2));
    spawner
        .spawn(led_task(receiver, led_driver))
        .expect("Failed to spawn LED task");

    // A wipe takes one tick per pixel, plus a tick to notice completion
    let round =
        Duration::from_millis((WIPE_COLOURS.len() * (LED_STRING_SIZE + 1) + 1) as u64 * WIPE_STEP);

    info!("MAIN: Testing NeoPixels...");
    loop {
        for colour in WIPE_COLOURS {
            sender.send(LedCommand::Wipe(colour)).await;
        }
        Timer::after(round).await;
        sender.send(LedCommand::Off).await;
        Timer::after_secs(1).await;
    }
}
