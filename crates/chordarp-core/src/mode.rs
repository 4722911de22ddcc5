//! Output modes: sustained chords or a cycling arpeggio.
//!
//! The live mode is a tagged variant that owns its local state. Both modes act
//! only at a retrigger boundary, always emitting owed note-offs before new
//! note-ons at the same offset.

use chordarp_midi::MidiEvent;
use tracing::trace;

use crate::pitch_set::PitchSet;

/// Observable state of the output machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    /// Nothing sounding.
    Idle,
    ChordSustaining,
    ArpeggioStepping,
}

/// Writes note events for one boundary into a pre-allocated buffer.
pub struct Emitter<'a> {
    out: &'a mut Vec<MidiEvent>,
    offset: usize,
    channel: u8,
    velocity: u8,
}

impl<'a> Emitter<'a> {
    pub fn new(out: &'a mut Vec<MidiEvent>, offset: usize, channel: u8, velocity: u8) -> Self {
        Self {
            out,
            offset,
            channel,
            velocity,
        }
    }

    #[inline]
    pub fn note_on(&mut self, note: u8) {
        self.out
            .push(MidiEvent::note_on(self.offset, self.channel, note, self.velocity));
    }

    #[inline]
    pub fn note_off(&mut self, note: u8) {
        self.out
            .push(MidiEvent::note_off(self.offset, self.channel, note, 0));
    }
}

/// Chord mode: every generated pitch sounds together and retriggers in unison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChordState {
    /// Pitches turned on at the last boundary; each owes a note-off.
    sustained: PitchSet,
}

impl ChordState {
    pub fn step(&mut self, snapshot: PitchSet, emit: &mut Emitter<'_>) {
        self.release(emit);
        for note in snapshot {
            emit.note_on(note);
        }
        self.sustained = snapshot;
    }

    pub fn release(&mut self, emit: &mut Emitter<'_>) {
        for note in self.sustained {
            emit.note_off(note);
        }
        self.sustained.clear();
    }

    #[inline]
    pub fn is_sustaining(&self) -> bool {
        !self.sustained.is_empty()
    }

    #[inline]
    pub fn sounding(&self) -> PitchSet {
        self.sustained
    }
}

/// Turbo mode: one generated pitch at a time, walking the ascending snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArpeggioState {
    /// Index of the last played step; `None` before the first.
    cursor: Option<usize>,
    last_note: Option<u8>,
}

impl ArpeggioState {
    pub fn step(&mut self, snapshot: PitchSet, emit: &mut Emitter<'_>) {
        self.release(emit);
        if snapshot.is_empty() {
            return;
        }
        // The cursor survives snapshot size changes, so holding or releasing
        // notes mid-cycle shifts which pitch comes next.
        let cursor = self.cursor.map_or(0, |c| (c + 1) % snapshot.len());
        self.cursor = Some(cursor);
        if let Some(note) = snapshot.nth(cursor) {
            emit.note_on(note);
            self.last_note = Some(note);
        }
    }

    pub fn release(&mut self, emit: &mut Emitter<'_>) {
        if let Some(note) = self.last_note.take() {
            emit.note_off(note);
        }
    }

    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[inline]
    pub fn last_note(&self) -> Option<u8> {
        self.last_note
    }
}

/// The live output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Chord(ChordState),
    Arpeggio(ArpeggioState),
}

impl OutputMode {
    pub fn for_turbo(turbo_enabled: bool) -> Self {
        if turbo_enabled {
            Self::Arpeggio(ArpeggioState::default())
        } else {
            Self::Chord(ChordState::default())
        }
    }

    #[inline]
    pub fn is_turbo(&self) -> bool {
        matches!(self, Self::Arpeggio(_))
    }

    /// Run one retrigger boundary. A changed `turbo_enabled` first releases the
    /// outgoing mode's notes, then the incoming mode starts fresh.
    pub fn step(&mut self, turbo_enabled: bool, snapshot: PitchSet, emit: &mut Emitter<'_>) {
        if self.is_turbo() != turbo_enabled {
            self.release(emit);
            *self = Self::for_turbo(turbo_enabled);
            trace!(turbo_enabled, "output mode switched");
        }
        match self {
            Self::Chord(state) => state.step(snapshot, emit),
            Self::Arpeggio(state) => state.step(snapshot, emit),
        }
    }

    /// Emit note-offs for everything this mode has sounding.
    pub fn release(&mut self, emit: &mut Emitter<'_>) {
        match self {
            Self::Chord(state) => state.release(emit),
            Self::Arpeggio(state) => state.release(emit),
        }
    }

    /// Output pitches currently sounding.
    pub fn sounding(&self) -> PitchSet {
        match self {
            Self::Chord(state) => state.sounding(),
            Self::Arpeggio(state) => state.last_note.into_iter().collect(),
        }
    }

    pub fn state(&self) -> ModeState {
        match self {
            Self::Chord(state) if state.is_sustaining() => ModeState::ChordSustaining,
            Self::Arpeggio(state) if state.last_note.is_some() => ModeState::ArpeggioStepping,
            _ => ModeState::Idle,
        }
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::for_turbo(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(notes: &[u8]) -> PitchSet {
        notes.iter().copied().collect()
    }

    /// (is_note_on, note) pairs in emission order.
    fn run(mode: &mut OutputMode, turbo: bool, snapshot: PitchSet) -> Vec<(bool, u8)> {
        let mut out = Vec::with_capacity(16);
        let mut emit = Emitter::new(&mut out, 7, 0, 127);
        mode.step(turbo, snapshot, &mut emit);
        assert!(out.iter().all(|e| e.frame_offset == 7));
        out.iter()
            .map(|e| (e.is_note_on(), e.note().unwrap()))
            .collect()
    }

    #[test]
    fn test_chord_retriggers_in_unison() {
        let mut mode = OutputMode::default();
        let chord = set(&[60, 64, 67]);

        let first = run(&mut mode, false, chord);
        assert_eq!(first, vec![(true, 60), (true, 64), (true, 67)]);
        assert_eq!(mode.state(), ModeState::ChordSustaining);

        let second = run(&mut mode, false, chord);
        assert_eq!(
            second,
            vec![
                (false, 60),
                (false, 64),
                (false, 67),
                (true, 60),
                (true, 64),
                (true, 67)
            ]
        );
    }

    #[test]
    fn test_chord_releases_previous_snapshot_not_current() {
        let mut mode = OutputMode::default();
        run(&mut mode, false, set(&[60, 64]));
        let events = run(&mut mode, false, set(&[62]));
        assert_eq!(events, vec![(false, 60), (false, 64), (true, 62)]);
    }

    #[test]
    fn test_chord_empty_snapshot_only_releases() {
        let mut mode = OutputMode::default();
        run(&mut mode, false, set(&[60]));
        assert_eq!(run(&mut mode, false, PitchSet::EMPTY), vec![(false, 60)]);
        assert_eq!(mode.state(), ModeState::Idle);
        assert!(run(&mut mode, false, PitchSet::EMPTY).is_empty());
    }

    #[test]
    fn test_arpeggio_cycles_in_order() {
        let mut mode = OutputMode::for_turbo(true);
        let snapshot = set(&[60, 67]);

        assert_eq!(run(&mut mode, true, snapshot), vec![(true, 60)]);
        assert_eq!(mode.state(), ModeState::ArpeggioStepping);
        assert_eq!(run(&mut mode, true, snapshot), vec![(false, 60), (true, 67)]);
        assert_eq!(run(&mut mode, true, snapshot), vec![(false, 67), (true, 60)]);
        assert_eq!(run(&mut mode, true, snapshot), vec![(false, 60), (true, 67)]);
    }

    #[test]
    fn test_arpeggio_cursor_drifts_with_snapshot_size() {
        let mut mode = OutputMode::for_turbo(true);
        run(&mut mode, true, set(&[60, 64, 67]));
        run(&mut mode, true, set(&[60, 64, 67]));
        // Cursor sits at 1; a shrunk snapshot continues from (1 + 1) % 2.
        assert_eq!(run(&mut mode, true, set(&[60, 72])), vec![(false, 64), (true, 60)]);
    }

    #[test]
    fn test_arpeggio_empty_snapshot_keeps_cursor() {
        let mut mode = OutputMode::for_turbo(true);
        run(&mut mode, true, set(&[60, 67]));
        assert_eq!(run(&mut mode, true, PitchSet::EMPTY), vec![(false, 60)]);
        assert_eq!(mode.state(), ModeState::Idle);
        assert_eq!(run(&mut mode, true, set(&[60, 67])), vec![(true, 67)]);
    }

    #[test]
    fn test_switch_releases_outgoing_mode() {
        let mut mode = OutputMode::default();
        run(&mut mode, false, set(&[60, 64]));

        let events = run(&mut mode, true, set(&[60, 64]));
        assert_eq!(events, vec![(false, 60), (false, 64), (true, 60)]);
        assert!(mode.is_turbo());

        let events = run(&mut mode, false, set(&[60, 64]));
        assert_eq!(events, vec![(false, 60), (true, 60), (true, 64)]);
        assert_eq!(mode.sounding(), set(&[60, 64]));
    }
}
