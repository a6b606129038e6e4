//! Implements the framing layer of the Project 25 (P25) Phase 1 air interface: frame
//! synchronization, status symbol deinterleaving, NID-driven data unit assembly, and
//! decoding of trunking signalling blocks.
//!
//! The entry point is [`framer::Framer`], which consumes one C4FM symbol (dibit) per
//! call and pushes each completed data unit to a registered listener sink. Upstream
//! symbol recovery and downstream message interpretation are outside this crate.

pub mod bitbuf;
pub mod bits;
pub mod coding;
pub mod consts;
pub mod error;
pub mod framer;
pub mod message;
pub mod stats;
pub mod sync;
pub mod trunking;
