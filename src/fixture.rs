//! MIDI event fixture fed to the target on stdin
//!
//! The target's input protocol is a flat sequence of 3-byte MIDI messages
//! (status, data, data). Every scenario shares the same fixture: one Note-On
//! for middle C at velocity 100 followed by its Note-Off.

/// Status nibble for a Note-On message
const NOTE_ON: u8 = 0x90;
/// Status nibble for a Note-Off message
const NOTE_OFF: u8 = 0x80;

/// Middle C (C4)
const FIXTURE_KEY: u8 = 0x3C;
/// Note-On velocity used by the fixture
const FIXTURE_VELOCITY: u8 = 100;

/// A channel-voice MIDI event, encoded as a status/data/data triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
}

impl MidiEvent {
    /// Encode the event as its 3-byte wire form
    pub fn encode(&self) -> [u8; 3] {
        match *self {
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => [NOTE_ON | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            } => [NOTE_OFF | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
        }
    }
}

/// Build the shared event fixture: Note-On (C4, vel 100) then Note-Off
///
/// Pure and deterministic; callable any number of times with identical output.
pub fn note_pair() -> Vec<u8> {
    let events = [
        MidiEvent::NoteOn {
            channel: 0,
            key: FIXTURE_KEY,
            velocity: FIXTURE_VELOCITY,
        },
        MidiEvent::NoteOff {
            channel: 0,
            key: FIXTURE_KEY,
            velocity: 0,
        },
    ];

    events.iter().flat_map(|e| e.encode()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_bytes() {
        let fixture = note_pair();
        assert_eq!(fixture, vec![0x90, 0x3C, 0x64, 0x80, 0x3C, 0x00]);
    }

    #[test]
    fn test_fixture_is_deterministic() {
        assert_eq!(note_pair(), note_pair());
    }

    #[test]
    fn test_fixture_is_triple_framed() {
        let fixture = note_pair();
        assert_eq!(fixture.len() % 3, 0);
        // Every triple starts with a status byte, data bytes stay in 0..=127
        for triple in fixture.chunks(3) {
            assert!(triple[0] & 0x80 != 0);
            assert!(triple[1] < 0x80);
            assert!(triple[2] < 0x80);
        }
    }

    #[test]
    fn test_encode_masks_out_of_range_values() {
        let event = MidiEvent::NoteOn {
            channel: 0x12,
            key: 0xFF,
            velocity: 0x90,
        };
        assert_eq!(event.encode(), [0x92, 0x7F, 0x10]);
    }
}
