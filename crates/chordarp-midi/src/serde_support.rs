//! Serde support for MIDI events.
//!
//! Only the messages the note generator reads or writes are representable:
//! note on, note off and plain 7-bit controllers. Anything else fails to
//! serialize rather than being silently rewritten.

use crate::event::MidiEvent;
use midi_msg::{Channel, ChannelVoiceMsg, ControlChange};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
struct SerializableMidiEvent {
    frame_offset: usize,
    channel: u8,
    data: MsgData,
}

#[derive(Serialize, Deserialize)]
enum MsgData {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { control: u8, value: u8 },
}

impl Serialize for MidiEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = match self.msg {
            ChannelVoiceMsg::NoteOn { note, velocity } => MsgData::NoteOn { note, velocity },
            ChannelVoiceMsg::NoteOff { note, velocity } => MsgData::NoteOff { note, velocity },
            ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC { control, value },
            } => MsgData::ControlChange { control, value },
            other => {
                return Err(ser::Error::custom(format!(
                    "unsupported channel message: {other:?}"
                )))
            }
        };

        SerializableMidiEvent {
            frame_offset: self.frame_offset,
            channel: self.channel as u8,
            data,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MidiEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serializable = SerializableMidiEvent::deserialize(deserializer)?;

        let msg = match serializable.data {
            MsgData::NoteOn { note, velocity } => ChannelVoiceMsg::NoteOn { note, velocity },
            MsgData::NoteOff { note, velocity } => ChannelVoiceMsg::NoteOff { note, velocity },
            MsgData::ControlChange { control, value } => ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC { control, value },
            },
        };

        Ok(MidiEvent {
            frame_offset: serializable.frame_offset,
            channel: Channel::from_u8(serializable.channel),
            msg,
        })
    }
}
