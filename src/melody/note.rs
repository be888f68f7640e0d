use defmt::Format;

/// One entry in a melody: a pitched tone or a rest, with a signed duration
/// code. A code of magnitude `n` stands for `1/n` of a whole note; a
/// negative code marks a dotted note (half as long again). The sign never
/// changes which pitch sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum Note {
    Tone { pitch: u16, code: i8 },
    Rest { code: i8 },
}

impl Note {
    pub const fn tone(pitch: u16, code: i8) -> Self {
        Note::Tone { pitch, code }
    }

    pub const fn rest(code: i8) -> Self {
        Note::Rest { code }
    }

    pub const fn code(&self) -> i8 {
        match self {
            Note::Tone { code, .. } | Note::Rest { code } => *code,
        }
    }

    /// The frequency to sound, or `None` for intentional silence
    pub const fn pitch(&self) -> Option<u16> {
        match self {
            Note::Tone { pitch, .. } => Some(*pitch),
            Note::Rest { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum MelodyError {
    /// The tempo was zero beats per minute
    ZeroTempo,
    /// The note at this index carries a duration code of zero
    ZeroDurationCode(usize),
}

/// A validated, immutable note sequence with its tempo. Construction is the
/// only place bad data can show up; a `Melody` that exists is playable, and
/// playing it mutates nothing.
#[derive(Clone, Copy, Debug)]
pub struct Melody<'a> {
    notes: &'a [Note],
    whole_note_us: u64,
}

impl<'a> Melody<'a> {
    /// Ties a note table to a tempo in beats per minute. Rejects a zero
    /// tempo and any zero duration code; both would poison the duration
    /// arithmetic later, so neither gets past this point.
    pub fn new(notes: &'a [Note], tempo: u16) -> Result<Self, MelodyError> {
        if tempo == 0 {
            return Err(MelodyError::ZeroTempo);
        }
        if let Some(index) = notes.iter().position(|note| note.code() == 0) {
            return Err(MelodyError::ZeroDurationCode(index));
        }
        Ok(Melody {
            notes,
            // A quarter note lasts 60/tempo seconds, a whole note four of those.
            whole_note_us: 240_000_000 / tempo as u64,
        })
    }

    pub const fn whole_note_us(&self) -> u64 {
        self.whole_note_us
    }

    pub const fn len(&self) -> usize {
        self.notes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Pure conversion of the note sequence into timed playback steps, in
    /// order. No I/O and no clock; pacing the steps is the player's job.
    pub fn steps(&self) -> impl Iterator<Item = PlaybackStep> + 'a {
        let whole_note_us = self.whole_note_us;
        self.notes
            .iter()
            .map(move |note| PlaybackStep::for_note(note, whole_note_us))
    }
}

/// Derived timing for a single note: the sounding (or resting) phase and
/// the staccato gap that separates it from the next note. Produced per note
/// during playback, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub struct PlaybackStep {
    /// Frequency in Hz, or `None` for a rest
    pub pitch: Option<u16>,
    /// Sounding phase, 90% of the note's duration, in microseconds
    pub active_us: u64,
    /// Trailing silent gap, the remaining 10%, in microseconds
    pub gap_us: u64,
}

impl PlaybackStep {
    fn for_note(note: &Note, whole_note_us: u64) -> Self {
        let code = note.code();
        let mut raw_us = whole_note_us / code.unsigned_abs() as u64;
        if code < 0 {
            // Dotted note, half as long again
            raw_us += raw_us / 2;
        }
        // Integer split so active + gap always equals the full duration
        let gap_us = raw_us / 10;
        PlaybackStep {
            pitch: note.pitch(),
            active_us: raw_us - gap_us,
            gap_us,
        }
    }

    /// The full note duration the split was derived from
    pub const fn raw_us(&self) -> u64 {
        self.active_us + self.gap_us
    }
}
