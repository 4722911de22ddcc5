//! Chord interval table.
//!
//! Maps the major/minor toggle to the semitone offsets applied to every held note.

use serde::{Deserialize, Serialize};

/// Number of offsets in every chord shape.
pub const SHAPE_LEN: usize = 5;

/// Semitone offsets from the held note, root first.
pub type ChordShape = [i8; SHAPE_LEN];

/// Major seventh chord with added ninth.
pub const MAJOR_SHAPE: ChordShape = [0, 4, 7, 11, 14];

/// Minor seventh chord with added ninth.
pub const MINOR_SHAPE: ChordShape = [0, 3, 7, 10, 14];

/// Which chord shape is applied to held notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 2] = [ChordQuality::Major, ChordQuality::Minor];

    #[inline]
    pub fn from_major(is_major: bool) -> Self {
        if is_major {
            Self::Major
        } else {
            Self::Minor
        }
    }

    #[inline]
    pub fn is_major(self) -> bool {
        self == Self::Major
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Major => Self::Minor,
            Self::Minor => Self::Major,
        }
    }

    #[inline]
    pub fn intervals(self) -> &'static ChordShape {
        match self {
            Self::Major => &MAJOR_SHAPE,
            Self::Minor => &MINOR_SHAPE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }

    /// Dense index, used for per-quality bookkeeping tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Major => 0,
            Self::Minor => 1,
        }
    }
}

/// Offsets for the given toggle state.
#[inline]
pub fn shape_for(is_major: bool) -> &'static ChordShape {
    ChordQuality::from_major(is_major).intervals()
}
