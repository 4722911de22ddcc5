//! RT-safe MIDI event types with sample-accurate timing.

use midi_msg::{Channel, ChannelModeMsg, ChannelVoiceMsg, ControlChange, MidiMsg};
use smallvec::SmallVec;

/// Controller number for "All Sound Off".
pub const CC_ALL_SOUND_OFF: u8 = 120;

/// Controller number for "All Notes Off".
pub const CC_ALL_NOTES_OFF: u8 = 123;

/// Events held inline before a [`MidiEventVec`] spills to the heap.
///
/// One timing boundary can release and restart every pitch (256 events). The
/// batch has to hold that inline so in-place processing never allocates.
pub const MIDI_STACK_CAPACITY: usize = 512;

/// Host-side event batch.
pub type MidiEventVec = SmallVec<[MidiEvent; MIDI_STACK_CAPACITY]>;

/// RT-safe MIDI event with sample-accurate frame offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// Offset within the current buffer (0 = first sample).
    pub frame_offset: usize,
    pub channel: Channel,
    pub msg: ChannelVoiceMsg,
}

impl MidiEvent {
    #[inline]
    pub fn new(frame_offset: usize, channel: Channel, msg: ChannelVoiceMsg) -> Self {
        Self {
            frame_offset,
            channel,
            msg,
        }
    }

    #[inline]
    pub fn note_on(frame_offset: usize, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            frame_offset,
            channel: Channel::from_u8(channel),
            msg: ChannelVoiceMsg::NoteOn { note, velocity },
        }
    }

    #[inline]
    pub fn note_off(frame_offset: usize, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            frame_offset,
            channel: Channel::from_u8(channel),
            msg: ChannelVoiceMsg::NoteOff { note, velocity },
        }
    }

    #[inline]
    pub fn control_change(frame_offset: usize, channel: u8, cc: u8, value: u8) -> Self {
        Self {
            frame_offset,
            channel: Channel::from_u8(channel),
            msg: ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC { control: cc, value },
            },
        }
    }

    /// "All Notes Off" on `channel`, carried as controller 123.
    #[inline]
    pub fn all_notes_off(frame_offset: usize, channel: u8) -> Self {
        Self::control_change(frame_offset, channel, CC_ALL_NOTES_OFF, 0)
    }

    #[inline]
    pub fn channel_num(&self) -> u8 {
        self.channel as u8
    }

    #[inline]
    pub fn is_note_on(&self) -> bool {
        matches!(self.msg, ChannelVoiceMsg::NoteOn { velocity, .. } if velocity > 0)
    }

    #[inline]
    pub fn is_note_off(&self) -> bool {
        matches!(
            self.msg,
            ChannelVoiceMsg::NoteOff { .. } | ChannelVoiceMsg::NoteOn { velocity: 0, .. }
        )
    }

    /// True for controller 120 (All Sound Off) and 123 (All Notes Off).
    #[inline]
    pub fn is_all_notes_off(&self) -> bool {
        matches!(
            self.msg,
            ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC { control, .. }
            } if control == CC_ALL_NOTES_OFF || control == CC_ALL_SOUND_OFF
        )
    }

    #[inline]
    pub fn note(&self) -> Option<u8> {
        match self.msg {
            ChannelVoiceMsg::NoteOn { note, .. }
            | ChannelVoiceMsg::NoteOff { note, .. }
            | ChannelVoiceMsg::HighResNoteOn { note, .. }
            | ChannelVoiceMsg::HighResNoteOff { note, .. }
            | ChannelVoiceMsg::PolyPressure { note, .. } => Some(note),
            _ => None,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Option<u8> {
        match self.msg {
            ChannelVoiceMsg::NoteOn { velocity, .. }
            | ChannelVoiceMsg::NoteOff { velocity, .. } => Some(velocity),
            ChannelVoiceMsg::HighResNoteOn { velocity, .. }
            | ChannelVoiceMsg::HighResNoteOff { velocity, .. } => {
                // High-res velocity is 14-bit, return upper 7 bits
                Some((velocity >> 7) as u8)
            }
            _ => None,
        }
    }

    /// Parse a channel message. Channel-mode "all notes/sound off" is folded into
    /// the matching controller event; other channel-mode and system messages are
    /// rejected.
    pub fn from_bytes_with_offset(
        bytes: &[u8],
        frame_offset: usize,
    ) -> Result<Self, midi_msg::ParseError> {
        let (msg, _len) = MidiMsg::from_midi(bytes)?;
        match msg {
            MidiMsg::ChannelVoice { channel, msg } => Ok(Self {
                frame_offset,
                channel,
                msg,
            }),
            MidiMsg::ChannelMode {
                channel,
                msg: ChannelModeMsg::AllNotesOff,
            } => Ok(Self::all_notes_off(frame_offset, channel as u8)),
            MidiMsg::ChannelMode {
                channel,
                msg: ChannelModeMsg::AllSoundOff,
            } => Ok(Self::control_change(
                frame_offset,
                channel as u8,
                CC_ALL_SOUND_OFF,
                0,
            )),
            _ => Err(midi_msg::ParseError::Invalid(
                "Expected ChannelVoice message",
            )),
        }
    }
}

/// Raw 3-byte MIDI event for unparsed storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMidiEvent {
    pub frame_offset: usize,
    pub data: [u8; 3],
    /// Valid bytes in `data` (1-3).
    pub len: u8,
}

impl RawMidiEvent {
    #[inline]
    pub fn new(frame_offset: usize, data: [u8; 3], len: u8) -> Self {
        Self {
            frame_offset,
            data,
            len,
        }
    }

    pub fn to_midi_event(&self) -> Result<MidiEvent, midi_msg::ParseError> {
        let len = (self.len as usize).min(3);
        MidiEvent::from_bytes_with_offset(&self.data[..len], self.frame_offset)
    }
}
