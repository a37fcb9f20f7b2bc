//! Procedural packet generation
//!
//! Two modes. Organic mode grows a random 4-connected region cell by cell,
//! so the result is always one connected shape. Block-only mode fills a
//! solid rectangle with even target dimensions, used by the faster game mode
//! where irregular shapes would be unfair.

use crate::core::packet::Packet;
use crate::core::rng::SimpleRng;
use crate::core::shape::{GeometryError, ShapeGrid};
use crate::types::FieldGeometry;

/// Generates new packets for a round.
///
/// The generator owns the round's RNG so a seed fully determines the packet
/// sequence.
#[derive(Debug, Clone)]
pub struct PacketGenerator {
    rng: SimpleRng,
    block_only: bool,
}

impl PacketGenerator {
    pub fn new(seed: u32, block_only: bool) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            block_only,
        }
    }

    pub fn block_only(&self) -> bool {
        self.block_only
    }

    /// Current RNG state, for replaying a packet sequence.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Generate a trimmed shape within `max_w` x `max_h` blocks.
    ///
    /// Fails only when the boundary itself is invalid: non-positive, larger
    /// than the field, or (block-only mode) too small to hold an even-sided
    /// rectangle. That is a caller contract violation, not a retryable event.
    pub fn generate(
        &mut self,
        max_w: i32,
        max_h: i32,
        field: &FieldGeometry,
    ) -> Result<ShapeGrid, GeometryError> {
        if max_w < 1
            || max_h < 1
            || max_w > field.width_blocks()
            || max_h > field.height_blocks()
        {
            return Err(GeometryError::InvalidBounds);
        }

        let raw = if self.block_only {
            self.generate_block(max_w, max_h)?
        } else {
            self.generate_organic(max_w, max_h)?
        };
        raw.trimmed()
    }

    /// Solid rectangle with even dimensions. Target block counts are even
    /// because every convex shape wider or taller than one block has an even
    /// cell count.
    fn generate_block(&mut self, max_w: i32, max_h: i32) -> Result<ShapeGrid, GeometryError> {
        let even_w = (max_w / 2) * 2;
        let even_h = (max_h / 2) * 2;
        if even_w < 2 || even_h < 2 {
            return Err(GeometryError::InvalidBounds);
        }

        let target = 2 * self.rng.range_inclusive(1, 4);
        let w = even_w.min(2 * self.rng.range_inclusive(1, target / 2));
        let h = even_h.min(target / w);

        let mut grid = ShapeGrid::new(w as usize, h as usize)?;
        for y in 0..h as usize {
            for x in 0..w as usize {
                grid.set(x, y, true)?;
            }
        }
        Ok(grid)
    }

    /// Grow a connected region: seed at the origin, then repeatedly occupy a
    /// random empty cell 4-adjacent to the region until the target count is
    /// reached.
    fn generate_organic(&mut self, max_w: i32, max_h: i32) -> Result<ShapeGrid, GeometryError> {
        let mut grid = ShapeGrid::new(max_w as usize, max_h as usize)?;
        // Target is clamped to capacity so the growth loop always terminates.
        let target = self.rng.range_inclusive(4, 8).min(max_w * max_h);

        grid.set(0, 0, true)?;
        let mut set = 1;
        while set < target {
            let x = self.rng.range_inclusive(0, max_w - 1);
            let y = self.rng.range_inclusive(0, max_h - 1);
            if grid.occupied(x, y) {
                continue;
            }
            let adjacent = grid.occupied(x - 1, y)
                || grid.occupied(x + 1, y)
                || grid.occupied(x, y - 1)
                || grid.occupied(x, y + 1);
            if adjacent {
                grid.set(x as usize, y as usize, true)?;
                set += 1;
            }
        }
        Ok(grid)
    }

    /// Spawn a complete packet at the top of the field.
    ///
    /// The shape boundary is randomized per packet: width limit is a power of
    /// two in [2, 8] and the height limit keeps the boundary area at 16
    /// cells. The packet appears at a random x and above the visible field.
    pub fn spawn(&mut self, field: &FieldGeometry) -> Result<Packet, GeometryError> {
        let n = self.rng.range_inclusive(1, 3);
        let max_w = 1 << n;
        let max_h = 16 / max_w;

        let shape = self.generate(max_w, max_h, field)?;
        let x = self
            .rng
            .range_inclusive(0, field.max_packet_x(shape.width() as i32));
        Ok(Packet::new(shape, x, field.spawn_y()))
    }
}
