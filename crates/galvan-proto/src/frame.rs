//! Wire frame layouts and byte-exact encode/decode.
//!
//! No compression, no alignment padding, no self-describing schema —
//! a `ServerFrame` is `3 + 2·side²` bytes, a `ClientFrame` is 2.

use std::error::Error;
use std::fmt;

/// Size of a client frame on the wire: timestamp + action.
pub const CLIENT_FRAME_LEN: usize = 2;

/// Decode errors. Fixed-size frames can only fail by length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// The byte slice does not match the frame size.
    Length {
        /// Bytes required.
        expected: usize,
        /// Bytes provided.
        got: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, got } => {
                write!(f, "frame length mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl Error for FrameError {}

/// One world→agent frame.
///
/// Layout: `ack:1, ts:1, inventory:1, cells:side², damage:side²`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerFrame {
    /// Acknowledgement of the agent's previous message.
    pub ack: u8,
    /// Masked world timestamp the agent must echo back.
    pub ts: u8,
    /// The agent's inventory count, masked to one byte.
    pub inventory: u8,
    /// Viewport cell bytes, window row-major.
    pub cells: Vec<u8>,
    /// Viewport damage bytes, parallel to `cells`.
    pub damage: Vec<u8>,
}

impl ServerFrame {
    /// Encoded size for a given viewport side.
    pub fn encoded_len(side: u16) -> usize {
        3 + 2 * (side as usize * side as usize)
    }

    /// Append the frame's bytes to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.reserve(3 + self.cells.len() + self.damage.len());
        out.push(self.ack);
        out.push(self.ts);
        out.push(self.inventory);
        out.extend_from_slice(&self.cells);
        out.extend_from_slice(&self.damage);
    }

    /// Decode a frame for the given viewport side. The slice must be
    /// exactly [`ServerFrame::encoded_len`] bytes.
    pub fn decode(bytes: &[u8], side: u16) -> Result<Self, FrameError> {
        let expected = Self::encoded_len(side);
        if bytes.len() != expected {
            return Err(FrameError::Length {
                expected,
                got: bytes.len(),
            });
        }
        let area = side as usize * side as usize;
        Ok(Self {
            ack: bytes[0],
            ts: bytes[1],
            inventory: bytes[2],
            cells: bytes[3..3 + area].to_vec(),
            damage: bytes[3 + area..].to_vec(),
        })
    }
}

/// One agent→world frame: an echoed timestamp and a single action byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientFrame {
    /// Echo of the timestamp from the last server frame.
    pub ts: u8,
    /// Raw action byte; unknown values are acknowledged invalid-message.
    pub action: u8,
}

impl ClientFrame {
    /// The frame's wire bytes.
    pub fn encode(&self) -> [u8; CLIENT_FRAME_LEN] {
        [self.ts, self.action]
    }

    /// Decode a frame. The slice must be exactly
    /// [`CLIENT_FRAME_LEN`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != CLIENT_FRAME_LEN {
            return Err(FrameError::Length {
                expected: CLIENT_FRAME_LEN,
                got: bytes.len(),
            });
        }
        Ok(Self {
            ts: bytes[0],
            action: bytes[1],
        })
    }
}
