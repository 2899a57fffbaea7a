//! Cursor state
//!
//! Position of the marker glyph and the rules for moving it around a
//! fixed-size display.

/// Display size in cells, sampled once when the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub cols: u16,
    pub rows: u16,
}

impl Bounds {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl From<(u16, u16)> for Bounds {
    /// Build from crossterm's `(cols, rows)` size tuple
    fn from((cols, rows): (u16, u16)) -> Self {
        Self::new(cols, rows)
    }
}

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column delta for one step
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Marker glyph position
///
/// Row 0 belongs to the hint line, so a clamped position always has
/// `row >= 1` unless the display is a single row tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Midpoint of the display, clamped
    pub fn centered(bounds: Bounds) -> Self {
        let mut pos = Self::new(bounds.rows / 2, bounds.cols / 2);
        pos.clamp(bounds);
        pos
    }

    /// Move one cell. The result may lie outside the display until `clamp`.
    pub fn step(&mut self, dir: Direction) {
        let (dr, dc) = dir.delta();
        self.row = offset(self.row, dr);
        self.col = offset(self.col, dc);
    }

    /// Pull the position back inside `[1, rows-1] x [0, cols-1]`.
    ///
    /// Lower bound is applied before the upper bound, so a one-row display
    /// ends up on row 0.
    pub fn clamp(&mut self, bounds: Bounds) {
        if self.row < 1 {
            self.row = 1;
        }
        if self.row >= bounds.rows {
            self.row = bounds.rows.saturating_sub(1);
        }
        if self.col >= bounds.cols {
            self.col = bounds.cols.saturating_sub(1);
        }
    }

    /// Whether the position satisfies the clamp invariant for `bounds`
    #[cfg(test)]
    pub fn is_within(&self, bounds: Bounds) -> bool {
        self.row >= 1 && self.row < bounds.rows && self.col < bounds.cols
    }
}

fn offset(value: u16, delta: i32) -> u16 {
    (i32::from(value) + delta).clamp(0, i32::from(u16::MAX)) as u16
}
