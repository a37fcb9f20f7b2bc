//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Side length of a single block in pixels.
pub const BLOCK_SIDE: i32 = 64;

/// Default playfield dimensions in pixels.
pub const GAME_WIDTH: i32 = 960;
pub const GAME_HEIGHT: i32 = 1600;

/// Default margin left and right of the main field.
pub const SIDE_SPACE: i32 = 64;
/// Default margin under (and mirrored above) the main field.
pub const BOTTOM_SPACE: i32 = 200;

/// Delay before the first packet starts falling, in seconds.
pub const INITIAL_WAIT_SECS: f32 = 2.0;

/// Scoring constants: base points per block, bonus per downward contact.
pub const POINTS_PER_BLOCK: u32 = 100;
pub const POINTS_PER_CONTACT: u32 = 10;

/// Score popup animation: total lifetime and upward drift distance.
pub const POPUP_LIFETIME_SECS: f32 = 2.0;
pub const POPUP_RISE_PX: f32 = 300.0;

/// Game modes
///
/// `Standard` generates organically grown packet shapes; `Speed` doubles the
/// fall speed and restricts generation to solid rectangles ("block-only").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Standard,
    Speed,
}

impl GameMode {
    /// Fall speed in pixels per second.
    pub fn fall_speed(&self) -> f32 {
        match self {
            GameMode::Standard => 300.0,
            GameMode::Speed => 600.0,
        }
    }

    /// Whether packet generation is restricted to solid rectangles.
    pub fn block_only(&self) -> bool {
        matches!(self, GameMode::Speed)
    }

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(GameMode::Standard),
            "speed" => Some(GameMode::Speed),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Speed => "speed",
        }
    }
}

/// The four discrete commands a player can issue on the falling packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketAction {
    ShiftLeft,
    ShiftRight,
    RotateCcw,
    RotateCw,
}

/// Playfield geometry, in pixels.
///
/// These are configuration inputs to the core; the core never computes them.
/// `x` coordinates of packets are in blocks relative to the left field edge,
/// `y` coordinates are raw screen-space pixels with the floor at
/// `bottom_space` and larger values further up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGeometry {
    pub width_px: i32,
    pub height_px: i32,
    pub side_space: i32,
    pub bottom_space: i32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width_px: GAME_WIDTH,
            height_px: GAME_HEIGHT,
            side_space: SIDE_SPACE,
            bottom_space: BOTTOM_SPACE,
        }
    }
}

impl FieldGeometry {
    /// Usable field width in blocks.
    pub fn width_blocks(&self) -> i32 {
        (self.width_px - 2 * self.side_space) / BLOCK_SIDE
    }

    /// Usable field height in blocks.
    pub fn height_blocks(&self) -> i32 {
        (self.height_px - 2 * self.bottom_space) / BLOCK_SIDE
    }

    /// Pixel y of the field floor.
    pub fn floor_y(&self) -> i32 {
        self.bottom_space
    }

    /// Pixel y of the top usable boundary; a landed packet whose top edge
    /// exceeds this ends the round.
    pub fn ceiling_y(&self) -> i32 {
        self.height_px - self.bottom_space
    }

    /// Pixel y at which new packets appear (above the visible field).
    pub fn spawn_y(&self) -> i32 {
        self.height_px
    }

    /// Largest block x at which a packet of the given width still fits.
    pub fn max_packet_x(&self, width_blocks: i32) -> i32 {
        self.width_blocks() - width_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_dimensions() {
        let field = FieldGeometry::default();
        assert_eq!(field.width_blocks(), 13);
        assert_eq!(field.height_blocks(), 18);
        assert_eq!(field.floor_y(), 200);
        assert_eq!(field.ceiling_y(), 1400);
    }

    #[test]
    fn test_max_packet_x() {
        let field = FieldGeometry::default();
        assert_eq!(field.max_packet_x(2), 11);
        assert_eq!(field.max_packet_x(13), 0);
    }

    #[test]
    fn test_mode_roundtrip() {
        assert_eq!(GameMode::from_str("SPEED"), Some(GameMode::Speed));
        assert_eq!(GameMode::from_str("standard"), Some(GameMode::Standard));
        assert_eq!(GameMode::from_str("turbo"), None);
        assert_eq!(GameMode::Speed.as_str(), "speed");
    }

    #[test]
    fn test_mode_speeds() {
        assert_eq!(GameMode::Standard.fall_speed(), 300.0);
        assert_eq!(GameMode::Speed.fall_speed(), 600.0);
        assert!(GameMode::Speed.block_only());
        assert!(!GameMode::Standard.block_only());
    }
}
