//! ShapeGrid - the block geometry of a packet
//!
//! A rectangular boolean grid where row 0 is the bottom row. The grid is a
//! value type: every transform (transpose, flip, rotate, trim) returns a new
//! grid, which keeps the tentative-apply / revert pattern in `Packet` simple.
//! Uses flat row-major storage like the rest of the core.

use std::fmt;

/// Fatal construction errors. These indicate a violated caller contract,
/// not a runtime game event; rejected moves are plain `bool` outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Non-positive or over-large grid dimensions.
    InvalidBounds,
    /// Direct indexing outside the grid.
    OutOfBounds,
    /// A trim was requested on a grid with no occupied cells.
    EmptyShape,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidBounds => write!(f, "invalid grid bounds"),
            GeometryError::OutOfBounds => write!(f, "grid index out of bounds"),
            GeometryError::EmptyShape => write!(f, "grid has no occupied cells"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// A packet shape: `width` x `height` cells, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x).
    cells: Vec<bool>,
}

impl ShapeGrid {
    /// Create an empty grid. Fails on non-positive dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidBounds);
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Build a grid from explicit rows, `rows[0]` being the bottom row.
    /// All rows must have the same non-zero length.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self, GeometryError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(GeometryError::InvalidBounds);
        }
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                grid.cells[y * width + x] = occupied;
            }
        }
        Ok(grid)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked membership query; out-of-range coordinates are simply
    /// unoccupied. This is what the generator's adjacency checks rely on.
    pub fn occupied(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |idx| self.cells[idx])
    }

    /// Set a cell. Direct indexing outside the grid is a caller bug.
    pub fn set(&mut self, x: usize, y: usize, occupied: bool) -> Result<(), GeometryError> {
        let idx = self
            .index(x as i32, y as i32)
            .ok_or(GeometryError::OutOfBounds)?;
        self.cells[idx] = occupied;
        Ok(())
    }

    /// Total occupied cells; the base scoring unit.
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in the bottom row (row 0).
    pub fn bottom_row_count(&self) -> usize {
        self.cells[..self.width].iter().filter(|&&c| c).count()
    }

    /// Swap axes: `out[x][y] = self[y][x]`, dimensions become (h, w).
    pub fn transposed(&self) -> ShapeGrid {
        let mut out = ShapeGrid {
            width: self.height,
            height: self.width,
            cells: vec![false; self.width * self.height],
        };
        for y in 0..self.height {
            for x in 0..self.width {
                out.cells[x * out.width + y] = self.cells[y * self.width + x];
            }
        }
        out
    }

    /// Reverse the row order (flip along the y axis).
    pub fn flipped_vertical(&self) -> ShapeGrid {
        let mut out = self.clone();
        for y in 0..self.height {
            let src = (self.height - 1 - y) * self.width;
            let dst = y * self.width;
            out.cells[dst..dst + self.width].copy_from_slice(&self.cells[src..src + self.width]);
        }
        out
    }

    /// 90 degree rotation. The transpose/flip order differs per direction;
    /// swapping the order would produce a mirror image instead.
    pub fn rotated(&self, clockwise: bool) -> ShapeGrid {
        if clockwise {
            self.transposed().flipped_vertical()
        } else {
            self.flipped_vertical().transposed()
        }
    }

    /// Crop to the tight bounding box of the occupied cells, so that every
    /// edge row and column contains at least one occupied cell.
    pub fn trimmed(&self) -> Result<ShapeGrid, GeometryError> {
        let mut min_x = self.width;
        let mut max_x = 0usize;
        let mut min_y = self.height;
        let mut max_y = 0usize;
        let mut any = false;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x] {
                    any = true;
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }

        if !any {
            return Err(GeometryError::EmptyShape);
        }

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut out = ShapeGrid::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                out.cells[y * width + x] = self.cells[(min_y + y) * self.width + (min_x + x)];
            }
        }
        Ok(out)
    }

    /// True when the bounding box is already tight.
    pub fn is_trimmed(&self) -> bool {
        match self.trimmed() {
            Ok(t) => t.width == self.width && t.height == self.height,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(ShapeGrid::new(0, 3), Err(GeometryError::InvalidBounds));
        assert_eq!(ShapeGrid::new(3, 0), Err(GeometryError::InvalidBounds));
        assert!(ShapeGrid::new(1, 1).is_ok());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = ShapeGrid::new(2, 2).unwrap();
        assert!(grid.set(1, 1, true).is_ok());
        assert_eq!(grid.set(2, 0, true), Err(GeometryError::OutOfBounds));
        assert_eq!(grid.set(0, 2, true), Err(GeometryError::OutOfBounds));
    }

    #[test]
    fn test_occupied_out_of_range_is_false() {
        let mut grid = ShapeGrid::new(2, 2).unwrap();
        grid.set(0, 0, true).unwrap();
        assert!(grid.occupied(0, 0));
        assert!(!grid.occupied(-1, 0));
        assert!(!grid.occupied(0, -1));
        assert!(!grid.occupied(2, 0));
        assert!(!grid.occupied(0, 2));
    }

    #[test]
    fn test_transpose_swaps_axes() {
        // 3 wide, 2 tall L-ish shape.
        let grid = ShapeGrid::from_rows(&[&[T, T, T], &[T, F, F]]).unwrap();
        let t = grid.transposed();
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 3);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.occupied(x, y), t.occupied(y, x));
            }
        }
    }

    #[test]
    fn test_flip_vertical_reverses_rows() {
        let grid = ShapeGrid::from_rows(&[&[T, F], &[F, T]]).unwrap();
        let flipped = grid.flipped_vertical();
        assert!(flipped.occupied(0, 1));
        assert!(flipped.occupied(1, 0));
        assert!(!flipped.occupied(0, 0));
    }

    #[test]
    fn test_rotation_is_not_a_mirror() {
        // An asymmetric shape must come back to itself only after four turns.
        let grid = ShapeGrid::from_rows(&[&[T, T, T], &[T, F, F]]).unwrap();
        let once = grid.rotated(true);
        assert_ne!(once, grid.transposed());
        let twice = once.rotated(true);
        assert_ne!(twice, grid);
        let four = twice.rotated(true).rotated(true);
        assert_eq!(four, grid);
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        let grid = ShapeGrid::from_rows(&[&[T, T], &[T, F], &[T, F]]).unwrap();
        assert_eq!(grid.rotated(true).rotated(false), grid);
        assert_eq!(grid.rotated(false).rotated(true), grid);
    }

    #[test]
    fn test_rotation_preserves_block_count() {
        let grid = ShapeGrid::from_rows(&[&[T, T, F], &[F, T, T]]).unwrap();
        assert_eq!(grid.rotated(true).block_count(), grid.block_count());
        assert_eq!(grid.rotated(false).block_count(), grid.block_count());
    }

    #[test]
    fn test_trim_crops_empty_border() {
        let mut grid = ShapeGrid::new(4, 4).unwrap();
        grid.set(1, 1, true).unwrap();
        grid.set(2, 1, true).unwrap();
        grid.set(1, 2, true).unwrap();
        let trimmed = grid.trimmed().unwrap();
        assert_eq!(trimmed.width(), 2);
        assert_eq!(trimmed.height(), 2);
        assert!(trimmed.occupied(0, 0));
        assert!(trimmed.occupied(1, 0));
        assert!(trimmed.occupied(0, 1));
        assert!(!trimmed.occupied(1, 1));
        assert!(trimmed.is_trimmed());
    }

    #[test]
    fn test_trim_empty_grid_fails() {
        let grid = ShapeGrid::new(3, 3).unwrap();
        assert_eq!(grid.trimmed(), Err(GeometryError::EmptyShape));
        assert!(!grid.is_trimmed());
    }

    #[test]
    fn test_bottom_row_count() {
        let grid = ShapeGrid::from_rows(&[&[T, F, T], &[T, T, T]]).unwrap();
        assert_eq!(grid.bottom_row_count(), 2);
        assert_eq!(grid.block_count(), 5);
    }
}
