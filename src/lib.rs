//! Falling-packet puzzle game.
//!
//! `core` holds the deterministic game logic (shapes, packets, generation
//! and the per-frame placement state machine); `term` and `input` are the
//! terminal frontend around it.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
