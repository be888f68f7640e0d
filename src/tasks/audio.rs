use defmt::{error, info};
use embassy_futures::select::{Either, select};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use embassy_time::{Duration, Timer};

use crate::drivers::buzzer::PwmBuzzer;
use crate::melody::player::MelodyPlayer;
use crate::melody::songs::{SongId, song};

/// Control the buzzer by sending the audio task messages of this type
#[derive(Clone, Copy, Debug, defmt::Format)]
pub enum AudioCommand {
    /// Play the given song on repeat until told otherwise
    Play(SongId),
    /// Silence the buzzer and go idle
    Stop,
}

const AUDIO_QUEUE_SIZE: usize = 4;
/// Channel types for the audio task.
pub type AudioChannel = Channel<CriticalSectionRawMutex, AudioCommand, AUDIO_QUEUE_SIZE>;
pub type AudioChannelSender =
    Sender<'static, CriticalSectionRawMutex, AudioCommand, AUDIO_QUEUE_SIZE>;
pub type AudioChannelReceiver =
    Receiver<'static, CriticalSectionRawMutex, AudioCommand, AUDIO_QUEUE_SIZE>;

/// Pause between repeats of a looping song
const REPEAT_PAUSE: Duration = Duration::from_secs(10);

/// Buzzer main task. Owns the melody player and responds to commands sent
/// via the channel. While a song is playing, the channel is polled at note
/// boundaries only; a cancelled pass always ends with the sink muted.
#[embassy_executor::task]
pub async fn audio_task(
    channel: &'static AudioChannelReceiver,
    mut player: MelodyPlayer<PwmBuzzer<'static>>,
) {
    info!("AUDIO_TASK: Task started. Waiting for commands...");
    let mut command = channel.receive().await;
    loop {
        let id = match command {
            AudioCommand::Play(id) => id,
            AudioCommand::Stop => {
                command = channel.receive().await;
                continue;
            }
        };
        let melody = match song(id) {
            Ok(melody) => melody,
            Err(e) => {
                error!("AUDIO_TASK: Song {} failed validation: {}", id, e);
                command = channel.receive().await;
                continue;
            }
        };

        info!("AUDIO_TASK: Playing {}", id);
        command = loop {
            // One pass of the song, watching for commands between notes
            let mut interrupted = None;
            for step in melody.steps() {
                if let Ok(next) = channel.try_receive() {
                    interrupted = Some(next);
                    break;
                }
                if let Err(e) = player.play_step(&step).await {
                    error!("AUDIO_TASK: Sink error: {}", e);
                    interrupted = Some(AudioCommand::Stop);
                    break;
                }
            }
            if let Some(next) = interrupted {
                // Whatever cut the pass short, leave the sink silent
                let _ = player.mute().await;
                break next;
            }
            match select(Timer::after(REPEAT_PAUSE), channel.receive()).await {
                Either::First(()) => {}
                Either::Second(next) => break next,
            }
        };
    }
}
