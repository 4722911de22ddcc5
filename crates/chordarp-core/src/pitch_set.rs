//! Fixed-size set of MIDI pitches.

use core::fmt;

/// Set of MIDI notes 0-127 stored as a 128-bit mask.
///
/// Iteration is always ascending. Copy, no allocation.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PitchSet(u128);

impl PitchSet {
    pub const EMPTY: PitchSet = PitchSet(0);

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns false for notes above 127.
    #[inline]
    pub fn insert(&mut self, note: u8) -> bool {
        if note > 127 {
            return false;
        }
        let bit = 1u128 << note;
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    #[inline]
    pub fn remove(&mut self, note: u8) -> bool {
        if note > 127 {
            return false;
        }
        let bit = 1u128 << note;
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    #[inline]
    pub fn contains(&self, note: u8) -> bool {
        note <= 127 && self.0 & (1u128 << note) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// The `index`-th lowest pitch.
    pub fn nth(&self, index: usize) -> Option<u8> {
        self.iter().nth(index)
    }

    #[inline]
    pub fn iter(&self) -> PitchIter {
        PitchIter(self.0)
    }
}

impl fmt::Debug for PitchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u8> for PitchSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = PitchSet::new();
        for note in iter {
            set.insert(note);
        }
        set
    }
}

impl IntoIterator for PitchSet {
    type Item = u8;
    type IntoIter = PitchIter;

    fn into_iter(self) -> PitchIter {
        self.iter()
    }
}

impl IntoIterator for &PitchSet {
    type Item = u8;
    type IntoIter = PitchIter;

    fn into_iter(self) -> PitchIter {
        self.iter()
    }
}

/// Ascending iterator over a [`PitchSet`].
#[derive(Clone, Copy, Debug)]
pub struct PitchIter(u128);

impl Iterator for PitchIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let note = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(note)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PitchIter {}
