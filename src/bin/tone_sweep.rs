//! Steps once through a C major octave on the buzzer, then idles.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::{Config, clock::CpuClock, timer::systimer::SystemTimer};
use grove_demo_rig::{
    drivers::buzzer::{BuzzerError, NoteRelease, PwmBuzzer},
    melody::{pitches, player::ToneSink},
};
use panic_rtt_target as _;

/// C4 up to C5, one octave of the C major scale
const SWEEP: [u16; 8] = [
    pitches::C4,
    pitches::D4,
    pitches::E4,
    pitches::F4,
    pitches::G4,
    pitches::A4,
    pitches::B4,
    pitches::C5,
];

/// How long each tone sounds, in microseconds
const TONE_LEN_US: u64 = 400_000;
/// Pause between consecutive tones, in microseconds
const TONE_GAP_US: u64 = 50_000;

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let mut buzzer = PwmBuzzer::new(peripherals.LEDC, peripherals.GPIO10, NoteRelease::Stop);

    info!("MAIN: Playing {} tones", SWEEP.len());
    for freq in SWEEP {
        if let Err(e) = play(&mut buzzer, freq).await {
            error!("MAIN: Buzzer error at {} Hz: {}", freq, e);
        }
    }
    info!("MAIN: Done");

    loop {
        Timer::after_secs(1).await;
    }
}

async fn play(buzzer: &mut PwmBuzzer<'_>, freq: u16) -> Result<(), BuzzerError> {
    buzzer.tone(freq, TONE_LEN_US).await?;
    buzzer.silence(TONE_GAP_US).await
}
