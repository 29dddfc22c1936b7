//! Single-byte wire codes: client actions and server acknowledgements.

use std::fmt;

/// An action requested by an agent program.
///
/// Wire values are single ASCII characters so that agent transcripts
/// stay human-readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    /// Step forward into an empty cell.
    Advance = b'^',
    /// Rotate 90° counter-clockwise.
    TurnLeft = b'\\',
    /// Rotate 90° clockwise.
    TurnRight = b'/',
    /// Step forward, leaving a conductor in the vacated cell.
    Build = b'.',
    /// Strike the cell ahead.
    Hit = b'-',
}

impl Action {
    /// Decode a wire byte. Unknown bytes are not actions (the codec
    /// acknowledges them as invalid-message).
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            b'^' => Some(Self::Advance),
            b'\\' => Some(Self::TurnLeft),
            b'/' => Some(Self::TurnRight),
            b'.' => Some(Self::Build),
            b'-' => Some(Self::Hit),
            _ => None,
        }
    }

    /// The byte transmitted on the wire.
    pub fn wire_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Advance => "advance",
            Self::TurnLeft => "turn-left",
            Self::TurnRight => "turn-right",
            Self::Build => "build",
            Self::Hit => "hit",
        };
        write!(f, "{name}")
    }
}

/// Outcome of an agent's previous message, reported in the next server
/// frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ack {
    /// The action was applied.
    Ok = 0,
    /// No message has been accepted this turn yet (the pending state).
    #[default]
    NoMessage = 1,
    /// The message carried an unrecognized action byte.
    InvalidMessage = 2,
    /// A second message arrived this turn; the extra action was ignored.
    MultipleMessages = 3,
    /// The action was recognized but its precondition failed.
    InvalidAction = 4,
}

impl Ack {
    /// The byte transmitted on the wire.
    pub fn wire_byte(self) -> u8 {
        self as u8
    }

    /// Whether an accepted message is still outstanding this turn.
    pub fn is_pending(self) -> bool {
        self == Self::NoMessage
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::NoMessage => "no-message",
            Self::InvalidMessage => "invalid-message",
            Self::MultipleMessages => "multiple-messages",
            Self::InvalidAction => "invalid-action",
        };
        write!(f, "{name}")
    }
}
