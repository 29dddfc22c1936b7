//! Fixed-size wire protocol codec for Galvan agents.
//!
//! Both directions use fixed-size binary records with no delimiters —
//! framing is purely by byte count. Server→agent frames carry the
//! acknowledgement of the agent's previous message, the masked world
//! timestamp, the agent's inventory, and its viewport. Agent→server
//! frames carry an echoed timestamp and one action byte.
//!
//! The codec owns the turn-discipline rules: a frame echoing a stale
//! timestamp is silently dropped, a second accepted frame in one turn is
//! flagged multiple-messages and not applied, and exactly one
//! acknowledgement code accompanies every outgoing frame.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
mod frame;

pub use codec::{drain_incoming, enqueue_server_frame, IncomingSummary};
pub use frame::{ClientFrame, FrameError, ServerFrame, CLIENT_FRAME_LEN};
