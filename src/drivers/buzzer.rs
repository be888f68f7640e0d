use defmt::Format;
use embassy_time::Timer;
use esp_hal::{
    ledc::{
        channel::{self, ChannelIFace},
        timer::{self, TimerIFace},
        LSGlobalClkSource, Ledc, LowSpeed,
    },
    peripherals::{GPIO10, LEDC},
    time::Rate,
};

use crate::melody::player::ToneSink;

/// Lowest frequency the piezo reproduces usefully
pub const BUZZER_MIN_FREQ: u16 = 35;
/// Highest frequency the piezo reproduces usefully
pub const BUZZER_MAX_FREQ: u16 = 7000;

/// Idle frequency the timer is parked at before the first tone
const BUZZER_IDLE_FREQ: u16 = 440;

/// How the buzzer ends a note. `Stop` hardware kills the output between
/// tones and gets the forced release after each one; `Continuous` hardware
/// only ever changes duty cycle and leaves separation to the staccato gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum NoteRelease {
    Stop,
    Continuous,
}

#[derive(Clone, Copy, Debug, Format)]
pub enum BuzzerError {
    /// The LEDC timer rejected the requested frequency
    Timer,
    /// The LEDC channel rejected its configuration
    Channel,
}

impl From<timer::Error> for BuzzerError {
    fn from(_: timer::Error) -> Self {
        BuzzerError::Timer
    }
}

impl From<channel::Error> for BuzzerError {
    fn from(_: channel::Error) -> Self {
        BuzzerError::Channel
    }
}

/// Piezo buzzer on an LEDC low-speed PWM channel. A tone is a 50% duty
/// square wave at the note's frequency; silence is duty 0% with the timer
/// left running, so both hardware variants fall out of one driver.
pub struct PwmBuzzer<'d> {
    ledc: Ledc<'d>,
    pin: GPIO10<'d>,
    release: NoteRelease,
    /// The frequency the timer was last configured at
    freq: u16,
}

impl<'d> PwmBuzzer<'d> {
    pub fn new(ledc: LEDC<'d>, pin: GPIO10<'d>, release: NoteRelease) -> Self {
        let mut ledc = Ledc::new(ledc);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        PwmBuzzer {
            ledc,
            pin,
            release,
            freq: BUZZER_IDLE_FREQ,
        }
    }

    /// Reconfigure timer and channel in one go. The LEDC keeps whatever it
    /// was last told once the handles drop, so nothing outlives this call.
    fn set_output(&mut self, freq: u16, duty_pct: u8) -> Result<(), BuzzerError> {
        let mut pwm_timer = self.ledc.timer::<LowSpeed>(timer::Number::Timer0);
        pwm_timer.configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(freq as u32),
        })?;
        let mut pwm_channel = self
            .ledc
            .channel::<LowSpeed>(channel::Number::Channel0, self.pin.reborrow());
        pwm_channel.configure(channel::config::Config {
            timer: &pwm_timer,
            duty_pct,
            pin_config: channel::config::PinConfig::PushPull,
        })?;
        self.freq = freq;
        Ok(())
    }
}

impl ToneSink for PwmBuzzer<'_> {
    type Error = BuzzerError;

    async fn tone(&mut self, pitch: u16, micros: u64) -> Result<(), BuzzerError> {
        let pitch = pitch.clamp(BUZZER_MIN_FREQ, BUZZER_MAX_FREQ);
        self.set_output(pitch, 50)?;
        Timer::after_micros(micros).await;
        if self.release == NoteRelease::Stop {
            self.set_output(pitch, 0)?;
        }
        Ok(())
    }

    async fn silence(&mut self, micros: u64) -> Result<(), BuzzerError> {
        self.set_output(self.freq, 0)?;
        Timer::after_micros(micros).await;
        Ok(())
    }

    fn discrete_stop(&self) -> bool {
        self.release == NoteRelease::Stop
    }
}
