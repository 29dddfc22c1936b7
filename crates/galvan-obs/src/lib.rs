//! Oriented viewport extraction for Galvan agents.
//!
//! Each turn every agent receives a square window of the grid rotated so
//! that its own facing maps to "window up", covering the ground ahead and
//! to its sides but not behind. Cell bytes for owned kinds are biased by
//! `owner - 1` so a renderer on the far side can recover per-owner colors
//! without a second channel; the bias is part of the wire format.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod viewport;

pub use viewport::{wire_byte, Viewport, ViewportError, DEFAULT_SIDE};
