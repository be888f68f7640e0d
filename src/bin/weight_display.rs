//! Full weight rig: live load-cell readings on the OLED with the LED strip
//! as a weight-coloured rainbow. Buttons tare and calibrate the scale.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{Either3, select3};
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use esp_hal::{
    Async, Config,
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c},
    rmt::Rmt,
    time::Rate,
    timer::systimer::SystemTimer,
};
use grove_demo_rig::{
    KNOWN_WEIGHT_DG,
    drivers::{button::wait_for_press, hx711::Hx711, neopixel::LedDriver},
    scale::Calibration,
    tasks::display::{DisplayChannel, DisplayChannelReceiver, DisplayState, display_task},
    tasks::leds::{LedChannel, LedChannelReceiver, LedCommand, led_task},
};
use panic_rtt_target as _;
use smart_leds::RGB8;
use static_cell::StaticCell;

/// Communicate with the display task using this channel and the DisplayState enum
static DISPLAY_CHANNEL: StaticCell<DisplayChannel> = StaticCell::new();
static DISPLAY_RECEIVER: StaticCell<DisplayChannelReceiver> = StaticCell::new();

/// Communicate with the LED task using this channel and the LedCommand enum
static LED_CHANNEL: StaticCell<LedChannel> = StaticCell::new();
static LED_RECEIVER: StaticCell<LedChannelReceiver> = StaticCell::new();

/// Our LED driver that underlies the LED task
static LED_DRIVER: StaticCell<LedDriver> = StaticCell::new();

/// I2C bus the OLED sits on
static I2C_BUS: StaticCell<I2c<'static, Async>> = StaticCell::new();

/// Readings averaged per weight sample
const SAMPLES: u32 = 5;

/// Strip colour while the scale is being zeroed
const TARE_COLOUR: RGB8 = RGB8 { r: 255, g: 255, b: 0 };
/// Strip colour during calibration
const CAL_COLOUR: RGB8 = RGB8 { r: 0, g: 255, b: 255 };

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
    let display = display_channel.sender();
    let display_receiver = DISPLAY_RECEIVER.init(display_channel.receiver());

    let led_channel = LED_CHANNEL.init(Channel::new());
    let leds = led_channel.sender();
    let led_receiver = LED_RECEIVER.init(led_channel.receiver());

    let i2c = I2C_BUS.init(
        I2c::new(peripherals.I2C0, I2cConfig::default())
            .unwrap()
            .with_scl(peripherals.GPIO6)
            .with_sda(peripherals.GPIO5)
            .into_async(),
    );
    spawner
        .spawn(display_task(display_receiver, i2c))
        .expect("Failed to spawn display task");

    let rmt = Rmt::new(peripherals.RMT, Rate::from_mhz(80))
        .expect("Failed to initialise RMT0")
        .into_async();
    let led_driver = LED_DRIVER.init(LedDriver::new(rmt, peripherals.GPIO2));
    spawner
        .spawn(led_task(led_receiver, led_driver))
        .expect("Failed to spawn LED task");

    let mut hx = Hx711::new(
        Input::new(peripherals.GPIO0, InputConfig::default().with_pull(Pull::Up)),
        Output::new(peripherals.GPIO1, Level::Low, OutputConfig::default()),
    );
    let mut cal = Calibration::default();

    // Set up buttons for the functions we need
    let config = InputConfig::default().with_pull(Pull::Up);
    let mut tare_button = Input::new(peripherals.GPIO9, config);
    let mut cal_button = Input::new(peripherals.GPIO3, config);

    info!("MAIN: Weight display demo, button0 tares, button1 calibrates");
    hx.reset().await;
    cal.tare(hx.read_average(SAMPLES).await);
    display.send(DisplayState::Weight(0)).await;

    loop {
        let weight = cal.weight_dg(hx.read_average(SAMPLES).await);
        info!("MAIN: Weight: {} dg", weight);
        display.send(DisplayState::Weight(weight)).await;
        leds.send(LedCommand::Weight(weight)).await;

        // Power the chip down between polls
        hx.power_down();
        hx.power_up();

        match select3(
            wait_for_press(&mut tare_button),
            wait_for_press(&mut cal_button),
            Timer::after_millis(300),
        )
        .await
        {
            Either3::First(_) => {
                info!("MAIN: Taring");
                leds.send(LedCommand::Fill(TARE_COLOUR)).await;
                display.send(DisplayState::Taring).await;
                cal.tare(hx.read_average(SAMPLES).await);
            }
            Either3::Second(_) => {
                leds.send(LedCommand::Fill(CAL_COLOUR)).await;
                display.send(DisplayState::CalibratePrompt).await;
                wait_for_press(&mut cal_button).await;
                let unit = cal.calibrate(hx.read_average(SAMPLES).await, KNOWN_WEIGHT_DG);
                info!("MAIN: Calibrated, new reference unit: {}", unit);
                display.send(DisplayState::Calibrated(unit as i32)).await;
                Timer::after_secs(2).await;
            }
            Either3::Third(_) => {}
        }
    }
}
