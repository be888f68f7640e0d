//! Symbolic melodies and their conversion into timed tone/silence
//! instructions. The playback arithmetic lives in [`note`], fully separated
//! from I/O; [`player`] paces the result through a [`player::ToneSink`].

pub mod note;
pub mod pitches;
pub mod player;
pub mod songs;

pub use note::{Melody, MelodyError, Note, PlaybackStep};
pub use player::{MelodyPlayer, ToneSink};
