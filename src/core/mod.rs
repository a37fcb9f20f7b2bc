//! Core game logic - pure and framework-free
//!
//! Everything in here is deterministic given a seed and the sequence of
//! `advance`/`apply_action` calls; no terminal or timing code.

pub mod generator;
pub mod packet;
pub mod rng;
pub mod round;
pub mod shape;

pub use generator::PacketGenerator;
pub use packet::{BlockRect, Packet};
pub use rng::SimpleRng;
pub use round::{GameRound, RoundPhase, RoundResult, ScorePopup};
pub use shape::{GeometryError, ShapeGrid};
