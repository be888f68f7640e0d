use defmt::Format;

use super::note::{Melody, MelodyError, Note};
use super::pitches::*;

#[derive(Clone, Copy, Debug, Format)]
pub enum SongId {
    Doraemon,
}

/// Look up a song table and validate it against its tempo.
pub fn song(id: SongId) -> Result<Melody<'static>, MelodyError> {
    match id {
        SongId::Doraemon => Melody::new(DORAEMON, DORAEMON_TEMPO),
    }
}

pub const DORAEMON_TEMPO: u16 = 180;

/// Doraemon theme
pub const DORAEMON: &[Note] = &[
    Note::tone(A3, 4), Note::tone(D4, 8), Note::tone(D4, 4), Note::tone(FS4, 8),
    Note::tone(B4, 4), Note::tone(FS4, 8), Note::tone(A4, 4), Note::rest(8),
    Note::tone(A4, 4), Note::tone(B4, 8), Note::tone(A4, 4), Note::tone(FS4, 8),
    Note::tone(G4, 4), Note::tone(FS4, 8), Note::tone(E4, 4), Note::rest(8),
    Note::tone(B3, 4),
    Note::tone(E4, 8), Note::tone(E4, 4),
    Note::tone(G4, 8), Note::tone(CS5, 4),
    Note::tone(CS5, 8), Note::tone(B4, 4),
    Note::tone(A4, 8),
    Note::tone(G4, -4),
    Note::tone(G4, 4),
    Note::tone(FS4, 8), Note::tone(B3, 4),
    Note::tone(CS4, 4), Note::tone(D4, 4), Note::tone(E4, 4),

    Note::rest(4),

    Note::tone(A3, 4), Note::tone(D4, 8), Note::tone(D4, 4), Note::tone(FS4, 8),
    Note::tone(B4, 4), Note::tone(FS4, 8), Note::tone(A4, 4), Note::rest(8),
    Note::tone(A4, 4), Note::tone(B4, 8), Note::tone(A4, 4), Note::tone(FS4, 8),
    Note::tone(G4, 4), Note::tone(FS4, 8), Note::tone(E4, 4), Note::rest(8),
    Note::tone(B3, 4),
    Note::tone(E4, 8), Note::tone(E4, 4),
    Note::tone(G4, 8), Note::tone(CS5, 4),
    Note::tone(CS5, 8), Note::tone(B4, 4),
    Note::tone(A4, 8),
    Note::tone(G4, -4),
    Note::tone(G4, 4),
    Note::tone(FS4, 8), Note::tone(E4, 8),
    Note::tone(CS4, 4), Note::tone(E4, 4), Note::tone(D4, 4),
    Note::rest(4),

    Note::tone(B4, 4), Note::rest(8), Note::tone(B4, 4), Note::tone(A4, 8), Note::tone(G4, 8),
    Note::tone(A4, 8), Note::tone(B4, 8), Note::tone(A4, 8), Note::rest(4), Note::tone(E4, 4),
    Note::tone(FS4, 8), Note::tone(GS4, 4), Note::tone(E4, 8), Note::tone(A4, 4),
    Note::rest(2),

    Note::tone(B4, 4), Note::rest(8),
    Note::tone(A4, 4), Note::rest(8),
    Note::tone(G4, 4), Note::rest(2),
    Note::tone(E4, 4), Note::tone(E4, 8), Note::tone(CS5, 8), Note::rest(8),
    Note::tone(B4, 8), Note::tone(A4, 8), Note::rest(8),
    Note::tone(B4, 8), Note::tone(A4, 8), Note::rest(8),
    Note::tone(G4, 8), Note::rest(-4),

    Note::tone(A4, 8), Note::rest(8), Note::tone(B4, 8), Note::tone(FS4, 2),
    Note::tone(E4, 8), Note::tone(D4, 2),
];
