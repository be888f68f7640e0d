//! On-target checks for the melody timing engine: duration arithmetic and
//! the exact call sequences a sink sees.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_hal_embassy::Executor::new())]
mod tests {
    use grove_demo_rig::melody::{
        Melody, MelodyError, MelodyPlayer, Note, ToneSink,
        pitches,
        player::TONE_RELEASE_US,
        songs::{DORAEMON, SongId, song},
    };
    use heapless::Vec;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
    enum SinkCall {
        Tone { pitch: u16, micros: u64 },
        Silence { micros: u64 },
    }

    /// Records every request instead of making sound
    struct RecordingSink {
        calls: Vec<SinkCall, 64>,
        discrete: bool,
    }

    impl RecordingSink {
        fn new(discrete: bool) -> Self {
            RecordingSink {
                calls: Vec::new(),
                discrete,
            }
        }
    }

    impl ToneSink for RecordingSink {
        type Error = ();

        async fn tone(&mut self, pitch: u16, micros: u64) -> Result<(), ()> {
            self.calls
                .push(SinkCall::Tone { pitch, micros })
                .map_err(|_| ())
        }

        async fn silence(&mut self, micros: u64) -> Result<(), ()> {
            self.calls.push(SinkCall::Silence { micros }).map_err(|_| ())
        }

        fn discrete_stop(&self) -> bool {
            self.discrete
        }
    }

    /// A sink whose device has gone away
    struct DeadSink;

    #[derive(Debug, PartialEq, Eq)]
    struct SinkDown;

    impl ToneSink for DeadSink {
        type Error = SinkDown;

        async fn tone(&mut self, _pitch: u16, _micros: u64) -> Result<(), SinkDown> {
            Err(SinkDown)
        }

        async fn silence(&mut self, _micros: u64) -> Result<(), SinkDown> {
            Err(SinkDown)
        }

        fn discrete_stop(&self) -> bool {
            false
        }
    }

    const TEMPO: u16 = 180;

    #[init]
    fn init() {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timer0 = esp_hal::timer::systimer::SystemTimer::new(peripherals.SYSTIMER);
        esp_hal_embassy::init(timer0.alarm0);
    }

    #[test]
    fn quarter_note_at_180_bpm() {
        let notes = [Note::tone(pitches::A4, 4)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        assert_eq!(melody.whole_note_us(), 1_333_333);
        let step = melody.steps().next().unwrap();
        assert_eq!(step.pitch, Some(440));
        assert_eq!(step.active_us, 300_000);
        assert_eq!(step.gap_us, 33_333);
    }

    #[test]
    fn dotted_note_is_half_as_long_again() {
        let notes = [Note::tone(pitches::G4, -4), Note::tone(pitches::G4, 4)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        let mut steps = melody.steps();
        let dotted = steps.next().unwrap();
        let plain = steps.next().unwrap();
        assert_eq!(dotted.raw_us(), plain.raw_us() + plain.raw_us() / 2);
        assert_eq!(dotted.active_us, 450_000);
        assert_eq!(dotted.gap_us, 49_999);
        // The dot only stretches the note, it never moves the pitch
        assert_eq!(dotted.pitch, plain.pitch);
    }

    #[test]
    fn doubling_the_tempo_halves_every_duration() {
        let notes = [
            Note::tone(pitches::C4, 4),
            Note::rest(8),
            Note::tone(pitches::E4, -2),
        ];
        let slow = Melody::new(&notes, 120).unwrap();
        let fast = Melody::new(&notes, 240).unwrap();
        for (s, f) in slow.steps().zip(fast.steps()) {
            assert_eq!(s.raw_us(), 2 * f.raw_us());
        }
    }

    #[test]
    fn active_and_gap_sum_to_the_full_duration() {
        let melody = song(SongId::Doraemon).unwrap();
        let whole = melody.whole_note_us();
        for (note, step) in DORAEMON.iter().zip(melody.steps()) {
            let mut raw = whole / note.code().unsigned_abs() as u64;
            if note.code() < 0 {
                raw += raw / 2;
            }
            assert_eq!(step.active_us + step.gap_us, raw);
            assert_eq!(step.gap_us, raw / 10);
        }
    }

    #[test]
    async fn discrete_sink_gets_the_forced_release() {
        let notes = [Note::tone(pitches::A4, 4)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        let mut player = MelodyPlayer::new(RecordingSink::new(true));
        player.play(&melody).await.unwrap();
        assert_eq!(
            player.sink().calls.as_slice(),
            &[
                SinkCall::Tone {
                    pitch: 440,
                    micros: 300_000
                },
                SinkCall::Silence {
                    micros: TONE_RELEASE_US
                },
                SinkCall::Silence { micros: 33_333 },
            ]
        );
    }

    #[test]
    async fn continuous_sink_skips_the_forced_release() {
        let notes = [Note::tone(pitches::A4, 4)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        let mut player = MelodyPlayer::new(RecordingSink::new(false));
        player.play(&melody).await.unwrap();
        assert_eq!(
            player.sink().calls.as_slice(),
            &[
                SinkCall::Tone {
                    pitch: 440,
                    micros: 300_000
                },
                SinkCall::Silence { micros: 33_333 },
            ]
        );
    }

    #[test]
    async fn rest_notes_never_touch_the_tone_output() {
        let notes = [Note::rest(8)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        // Even a discrete-stop sink sees no tone and no forced release
        let mut player = MelodyPlayer::new(RecordingSink::new(true));
        player.play(&melody).await.unwrap();
        assert_eq!(
            player.sink().calls.as_slice(),
            &[
                SinkCall::Silence { micros: 150_000 },
                SinkCall::Silence { micros: 16_666 },
            ]
        );
    }

    #[test]
    async fn replaying_produces_an_identical_call_sequence() {
        let notes = [
            Note::tone(pitches::A4, 4),
            Note::rest(8),
            Note::tone(pitches::G4, -4),
            Note::tone(pitches::E4, 2),
        ];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        let mut player = MelodyPlayer::new(RecordingSink::new(true));
        player.play(&melody).await.unwrap();
        let first_pass = player.sink().calls.len();
        player.play(&melody).await.unwrap();
        let calls = player.sink().calls.as_slice();
        assert_eq!(calls.len(), 2 * first_pass);
        assert_eq!(calls[..first_pass], calls[first_pass..]);
    }

    #[test]
    async fn sink_errors_propagate_unchanged() {
        let notes = [Note::tone(pitches::A4, 4)];
        let melody = Melody::new(&notes, TEMPO).unwrap();
        let mut player = MelodyPlayer::new(DeadSink);
        assert_eq!(player.play(&melody).await, Err(SinkDown));
    }

    #[test]
    fn zero_duration_code_is_rejected() {
        let notes = [Note::tone(pitches::A4, 4), Note::rest(0)];
        assert_eq!(
            Melody::new(&notes, TEMPO).err(),
            Some(MelodyError::ZeroDurationCode(1))
        );
    }

    #[test]
    fn zero_tempo_is_rejected() {
        let notes = [Note::tone(pitches::A4, 4)];
        assert_eq!(Melody::new(&notes, 0).err(), Some(MelodyError::ZeroTempo));
    }

    #[test]
    fn the_bundled_song_is_valid() {
        let melody = song(SongId::Doraemon).unwrap();
        assert!(!melody.is_empty());
        assert_eq!(melody.len(), DORAEMON.len());
    }
}
