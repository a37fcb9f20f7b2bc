//! Terminal rendering module.
//!
//! Renders the round into a simple framebuffer that is flushed to a
//! crossterm backend. The view layer is pure; only `TerminalRenderer`
//! touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
