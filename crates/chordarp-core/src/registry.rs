//! Held-note registry.
//!
//! Tracks which input notes are held and reference-counts the chord pitches they
//! generate. Two held notes can produce the same output pitch; that pitch keeps
//! sounding until every contributor is released.
//!
//! All storage is fixed-size, so every operation is RT-safe.

use chordarp_midi::{transpose, NOTE_COUNT};
use serde::{Deserialize, Serialize};

use crate::interval::ChordQuality;
use crate::pitch_set::PitchSet;

/// How a note-off picks the chord shape to release when the quality changed
/// while the note was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeBinding {
    /// Release with the shape that was active at note-on.
    #[default]
    BindAtNoteOn,
    /// Release with the shape active at note-off. A quality change mid-hold can
    /// leave orphaned pitches until the next all-notes-off.
    ReleaseWithCurrent,
}

/// Reference-counted map from generated pitch to the number of held notes
/// producing it.
#[derive(Clone)]
pub struct HeldNoteRegistry {
    /// Generated pitch -> contributing held notes.
    counts: [u16; NOTE_COUNT],
    /// Input pitch -> note-ons outstanding, per chord quality.
    held: [[u16; 2]; NOTE_COUNT],
    binding: ShapeBinding,
}

impl HeldNoteRegistry {
    pub fn new(binding: ShapeBinding) -> Self {
        Self {
            counts: [0; NOTE_COUNT],
            held: [[0; 2]; NOTE_COUNT],
            binding,
        }
    }

    #[inline]
    pub fn binding(&self) -> ShapeBinding {
        self.binding
    }

    /// Register `pitch + offset` for every offset. Returns how many generated
    /// pitches went from silent to sounding.
    ///
    /// Offsets that land outside 0-127 are dropped.
    pub fn add(&mut self, pitch: u8, offsets: &[i8]) -> usize {
        let mut started = 0;
        for &offset in offsets {
            if let Some(note) = transpose(pitch, offset) {
                let count = &mut self.counts[note as usize];
                if *count == 0 {
                    started += 1;
                }
                *count = count.saturating_add(1);
            }
        }
        started
    }

    /// Release `pitch + offset` for every offset, clamping at zero. Returns how
    /// many generated pitches stopped sounding.
    pub fn remove(&mut self, pitch: u8, offsets: &[i8]) -> usize {
        let mut stopped = 0;
        for &offset in offsets {
            if let Some(note) = transpose(pitch, offset) {
                let count = &mut self.counts[note as usize];
                if *count == 1 {
                    stopped += 1;
                }
                *count = count.saturating_sub(1);
            }
        }
        stopped
    }

    /// Hold `pitch` with the chord shape of `quality`.
    pub fn note_on(&mut self, pitch: u8, quality: ChordQuality) -> usize {
        if pitch as usize >= NOTE_COUNT {
            return 0;
        }
        let held = &mut self.held[pitch as usize][quality.index()];
        *held = held.saturating_add(1);
        self.add(pitch, quality.intervals())
    }

    /// Release `pitch`. `current` is the quality selected right now; which shape
    /// is actually released depends on the [`ShapeBinding`].
    ///
    /// A note-off for a pitch that is not held is a no-op.
    pub fn note_off(&mut self, pitch: u8, current: ChordQuality) -> usize {
        if pitch as usize >= NOTE_COUNT {
            return 0;
        }
        let Some(bound) = self.bound_quality(pitch, current) else {
            return 0;
        };
        let held = &mut self.held[pitch as usize][bound.index()];
        *held -= 1;

        let release = match self.binding {
            ShapeBinding::BindAtNoteOn => bound,
            ShapeBinding::ReleaseWithCurrent => current,
        };
        self.remove(pitch, release.intervals())
    }

    /// Quality of an outstanding note-on for `pitch`, preferring `current`.
    fn bound_quality(&self, pitch: u8, current: ChordQuality) -> Option<ChordQuality> {
        let held = &self.held[pitch as usize];
        if held[current.index()] > 0 {
            Some(current)
        } else if held[current.toggled().index()] > 0 {
            Some(current.toggled())
        } else {
            None
        }
    }

    /// Currently sounding generated pitches, ascending.
    pub fn snapshot(&self) -> PitchSet {
        let mut set = PitchSet::new();
        for (note, &count) in self.counts.iter().enumerate() {
            if count > 0 {
                set.insert(note as u8);
            }
        }
        set
    }

    #[inline]
    pub fn count(&self, note: u8) -> u16 {
        self.counts.get(note as usize).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Number of outstanding input note-ons.
    pub fn held_count(&self) -> usize {
        self.held
            .iter()
            .map(|per_quality| per_quality.iter().map(|&n| n as usize).sum::<usize>())
            .sum()
    }

    pub fn is_held(&self, pitch: u8) -> bool {
        self.held
            .get(pitch as usize)
            .is_some_and(|per_quality| per_quality.iter().any(|&n| n > 0))
    }

    /// Drop every held note and generated pitch.
    pub fn clear(&mut self) {
        self.counts = [0; NOTE_COUNT];
        self.held = [[0; 2]; NOTE_COUNT];
    }
}

impl Default for HeldNoteRegistry {
    fn default() -> Self {
        Self::new(ShapeBinding::default())
    }
}
