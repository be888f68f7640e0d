//! Plays the Doraemon theme on the piezo buzzer, on repeat. The button
//! toggles playback.

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
use esp_hal::{
    Config,
    clock::CpuClock,
    gpio::{Input, InputConfig, Pull},
    timer::systimer::SystemTimer,
};
use grove_demo_rig::{
    drivers::{
        button::wait_for_press,
        buzzer::{NoteRelease, PwmBuzzer},
    },
    melody::{player::MelodyPlayer, songs::SongId},
    tasks::audio::{AudioChannel, AudioChannelReceiver, AudioCommand, audio_task},
};
use panic_rtt_target as _;
use static_cell::StaticCell;

/// Communicate with the audio task using this channel and the AudioCommand enum
static AUDIO_CHANNEL: StaticCell<AudioChannel> = StaticCell::new();
static AUDIO_RECEIVER: StaticCell<AudioChannelReceiver> = StaticCell::new();

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let audio_channel = AUDIO_CHANNEL.init(Channel::new());
    let sender = audio_channel.sender();
    let receiver = AUDIO_RECEIVER.init(audio_channel.receiver());

    // This buzzer variant kills its output between notes
    let buzzer = PwmBuzzer::new(peripherals.LEDC, peripherals.GPIO10, NoteRelease::Stop);
    spawner
        .spawn(audio_task(receiver, MelodyPlayer::new(buzzer)))
        .expect("Failed to spawn audio task");

    let config = InputConfig::default().with_pull(Pull::Up);
    let mut button = Input::new(peripherals.GPIO9, config);

    info!("MAIN: Playing the Doraemon theme, button toggles playback");
    sender.send(AudioCommand::Play(SongId::Doraemon)).await;
    let mut playing = true;
    loop {
        wait_for_press(&mut button).await;
        playing ^= true;
        if playing {
            sender.send(AudioCommand::Play(SongId::Doraemon)).await;
        } else {
            sender.send(AudioCommand::Stop).await;
        }
        info!("MAIN: Playback toggled {}", playing);
    }
}
