//! Packet module - a falling or landed arrangement of blocks
//!
//! A packet owns one [`ShapeGrid`] plus its field position: `x` in blocks
//! from the left field edge, `y` in raw pixels (floor at
//! `FieldGeometry::floor_y`, larger values further up). `y` is not
//! block-snapped while the packet is falling; landing and rotation realign it.
//!
//! All collision tests run on axis-aligned pixel rectangles with strict
//! inequality at the edges, so packets resting flush against each other do
//! not count as overlapping. The downward contact padding exists exactly to
//! re-detect that flush contact when it matters for landing and scoring.

use crate::core::shape::ShapeGrid;
use crate::types::{FieldGeometry, BLOCK_SIDE, POINTS_PER_BLOCK};

/// Axis-aligned pixel rectangle used for block collision tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BlockRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict intersection: rectangles that merely share an edge do not
    /// overlap.
    pub fn intersects(&self, other: &BlockRect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Downward shift applied to a packet's cells when counting resting contact:
/// 5% of a block's side length.
fn contact_padding() -> i32 {
    (BLOCK_SIDE as f32 * 0.05).round() as i32
}

/// A packet on the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    shape: ShapeGrid,
    /// Block-aligned x of the bottom-left corner, relative to the field.
    x: i32,
    /// Pixel y of the bottom-left corner.
    y: i32,
    moving: bool,
    marked: bool,
}

impl Packet {
    pub fn new(shape: ShapeGrid, x: i32, y: i32) -> Self {
        Self {
            shape,
            x,
            y,
            moving: true,
            marked: false,
        }
    }

    pub fn shape(&self) -> &ShapeGrid {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn x_px(&self) -> i32 {
        self.x * BLOCK_SIDE
    }

    pub fn width_px(&self) -> i32 {
        self.shape.width() as i32 * BLOCK_SIDE
    }

    pub fn height_px(&self) -> i32 {
        self.shape.height() as i32 * BLOCK_SIDE
    }

    /// True while the packet is falling and controllable.
    pub fn moving(&self) -> bool {
        self.moving
    }

    /// True for the packet that ended the round; render it in alert color.
    pub fn marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub(crate) fn mark(&mut self) {
        self.marked = true;
    }

    /// Stop the packet and return its base score (100 per block).
    pub(crate) fn land(&mut self) -> u32 {
        self.moving = false;
        POINTS_PER_BLOCK * self.shape.block_count() as u32
    }

    /// Stop the packet without awarding points (game-over path).
    pub(crate) fn freeze(&mut self) {
        self.moving = false;
    }

    fn cell_rect(&self, cx: usize, cy: usize, pad_down: i32) -> BlockRect {
        BlockRect::new(
            self.x * BLOCK_SIDE + cx as i32 * BLOCK_SIDE,
            self.y + cy as i32 * BLOCK_SIDE - pad_down,
            BLOCK_SIDE,
            BLOCK_SIDE,
        )
    }

    /// True if any occupied cell's block rectangle intersects `rect`.
    pub fn overlaps_rect(&self, rect: BlockRect) -> bool {
        for cy in 0..self.shape.height() {
            for cx in 0..self.shape.width() {
                if self.shape.occupied(cx as i32, cy as i32)
                    && self.cell_rect(cx, cy, 0).intersects(&rect)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Count this packet's occupied cells whose rectangles, optionally padded
    /// downward, intersect `other`'s occupied rectangles.
    pub fn overlap_count(&self, other: &Packet, padded: bool) -> u32 {
        let pad = if padded { contact_padding() } else { 0 };
        let mut n = 0;
        for cy in 0..self.shape.height() {
            for cx in 0..self.shape.width() {
                if self.shape.occupied(cx as i32, cy as i32)
                    && other.overlaps_rect(self.cell_rect(cx, cy, pad))
                {
                    n += 1;
                }
            }
        }
        n
    }

    pub fn overlaps(&self, other: &Packet) -> bool {
        self.overlap_count(other, false) > 0
    }

    /// Shift horizontally by `delta` blocks if the new position stays within
    /// the field and does not overlap any other packet. A rejected shift
    /// leaves the packet untouched.
    pub fn try_shift(&mut self, delta: i32, others: &[Packet], field: &FieldGeometry) -> bool {
        let new_x = self.x + delta;
        if new_x < 0 || new_x > field.max_packet_x(self.shape.width() as i32) {
            return false;
        }

        let old_x = self.x;
        self.x = new_x;
        if others.iter().any(|p| self.overlaps(p)) {
            self.x = old_x;
            return false;
        }
        true
    }

    /// Rotate 90 degrees around the packet's approximate center.
    ///
    /// The new x is clamped into the horizontal field bounds and the new y
    /// keeps the vertical pixel center. If the rotated packet overlaps any
    /// other packet the rotation is fully reverted. Vertical clipping at the
    /// field top/bottom is not checked while the packet is falling.
    pub fn try_rotate(&mut self, clockwise: bool, others: &[Packet], field: &FieldGeometry) -> bool {
        let rotated = self.shape.rotated(clockwise);
        let new_w = rotated.width() as i32;
        if new_w > field.width_blocks() {
            return false;
        }

        let old_w = self.shape.width() as i32;
        let old_h_px = self.height_px();
        let new_h_px = rotated.height() as i32 * BLOCK_SIDE;

        let new_x = (self.x + old_w / 2 - new_w / 2).clamp(0, field.max_packet_x(new_w));
        let new_y = self.y + old_h_px / 2 - new_h_px / 2;

        let old_x = self.x;
        let old_y = self.y;
        let old_shape = std::mem::replace(&mut self.shape, rotated);
        self.x = new_x;
        self.y = new_y;

        if others.iter().any(|p| self.overlaps(p)) {
            self.shape = old_shape;
            self.x = old_x;
            self.y = old_y;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::ShapeGrid;

    fn solid(w: usize, h: usize, x: i32, y: i32) -> Packet {
        let mut grid = ShapeGrid::new(w, h).unwrap();
        for cy in 0..h {
            for cx in 0..w {
                grid.set(cx, cy, true).unwrap();
            }
        }
        Packet::new(grid, x, y)
    }

    #[test]
    fn test_block_rect_strict_edges() {
        let a = BlockRect::new(0, 0, 64, 64);
        let b = BlockRect::new(64, 0, 64, 64);
        let c = BlockRect::new(63, 0, 64, 64);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_flush_stack_needs_padding() {
        // b rests exactly on top of a.
        let a = solid(2, 1, 0, 200);
        let b = solid(2, 1, 0, 264);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert_eq!(b.overlap_count(&a, true), 2);
        // Padding shifts downward only, so a never "touches" b above it.
        assert_eq!(a.overlap_count(&b, true), 0);
    }

    #[test]
    fn test_padding_never_reduces_count() {
        let a = solid(2, 2, 0, 200);
        let b = solid(2, 2, 0, 290);
        assert!(b.overlap_count(&a, true) >= b.overlap_count(&a, false));
    }

    #[test]
    fn test_land_returns_base_points() {
        let mut p = solid(2, 2, 0, 200);
        assert!(p.moving());
        assert_eq!(p.land(), 400);
        assert!(!p.moving());
    }
}
