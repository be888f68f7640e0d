use super::note::{Melody, PlaybackStep};

/// Extra silence forced after every tone on sinks that start and stop
/// their output per note, so consecutive tones stay acoustically separated
/// even through the hardware's attack and decay.
pub const TONE_RELEASE_US: u64 = 20_000;

/// A device that can sound a frequency, or hold silence, for a requested
/// wall-clock duration. The player's only I/O dependency; anything that
/// satisfies the two operations can sit behind it.
#[allow(async_fn_in_trait)]
pub trait ToneSink {
    type Error;

    /// Sound `pitch` Hz for `micros` microseconds, blocking until the
    /// duration has elapsed.
    async fn tone(&mut self, pitch: u16, micros: u64) -> Result<(), Self::Error>;

    /// Hold silence for `micros` microseconds.
    async fn silence(&mut self, micros: u64) -> Result<(), Self::Error>;

    /// True for hardware that kills its output between notes and needs the
    /// forced release after each tone; false for hardware that only ever
    /// modulates a running output.
    fn discrete_stop(&self) -> bool;
}

/// Paces a melody's playback steps through a tone sink. Holds no state
/// between passes; playing the same melody twice produces the same call
/// sequence.
pub struct MelodyPlayer<S: ToneSink> {
    sink: S,
}

impl<S: ToneSink> MelodyPlayer<S> {
    pub fn new(sink: S) -> Self {
        MelodyPlayer { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play one pass of the melody, start to finish. Sink errors come back
    /// unchanged; there is no retry. Whether to loop again, and how long to
    /// wait before doing so, is the caller's decision.
    pub async fn play(&mut self, melody: &Melody<'_>) -> Result<(), S::Error> {
        for step in melody.steps() {
            self.play_step(&step).await?;
        }
        Ok(())
    }

    /// Render a single playback step: the sounding (or silent) phase, the
    /// forced release on discrete-stop sinks, then the staccato gap. Rests
    /// spend the same wall-clock time as tones so the measure arithmetic
    /// holds whether or not a pitch is sounding.
    pub async fn play_step(&mut self, step: &PlaybackStep) -> Result<(), S::Error> {
        match step.pitch {
            Some(pitch) => {
                self.sink.tone(pitch, step.active_us).await?;
                if self.sink.discrete_stop() {
                    self.sink.silence(TONE_RELEASE_US).await?;
                }
            }
            None => self.sink.silence(step.active_us).await?,
        }
        self.sink.silence(step.gap_us).await
    }

    /// Ask the sink for immediate silence. A caller that cancels playback
    /// between steps uses this to make sure no tone keeps sounding.
    pub async fn mute(&mut self) -> Result<(), S::Error> {
        self.sink.silence(0).await
    }
}
