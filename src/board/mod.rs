//! Board representation for the 5x5x5 stacking game

pub mod board;


// Re-exports
pub use board::Board;

/// Board size along each axis (5x5x5)
pub const BOARD_SIZE: usize = 5;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE * BOARD_SIZE; // 125

/// Unit direction vector in (x, y, z)
pub type Direction = (i8, i8, i8);

/// All 26 directions, stored as opposite pairs: `DIRECTIONS[2k]` and
/// `DIRECTIONS[2k + 1]` point along the same axis.
pub const DIRECTIONS: [Direction; 26] = [
    // Axes
    (1, 0, 0), (-1, 0, 0),
    (0, 1, 0), (0, -1, 0),
    (0, 0, 1), (0, 0, -1),
    // xy diagonals
    (1, 1, 0), (-1, -1, 0),
    (1, -1, 0), (-1, 1, 0),
    // xz diagonals
    (1, 0, 1), (-1, 0, -1),
    (1, 0, -1), (-1, 0, 1),
    // yz diagonals
    (0, 1, 1), (0, -1, -1),
    (0, 1, -1), (0, -1, 1),
    // Space diagonals
    (1, 1, 1), (-1, -1, -1),
    (1, 1, -1), (-1, -1, 1),
    (1, -1, 1), (-1, 1, -1),
    (1, -1, -1), (-1, 1, 1),
];

/// The 13 line axes, one representative per opposite pair
pub const AXES: [Direction; 13] = [
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (1, 1, 0),
    (1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
];

/// Cell occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Human player
    Player,
    /// Engine-controlled side
    Ai,
}

impl Cell {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Cell {
        match self {
            Cell::Player => Cell::Ai,
            Cell::Ai => Cell::Player,
            Cell::Empty => Cell::Empty,
        }
    }

    /// Evaluation sign: AI positive, Player negative.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Cell::Ai => 1,
            Cell::Player => -1,
            Cell::Empty => 0,
        }
    }

    /// Single-character symbol used by the board printout
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Cell::Player => 'R',
            Cell::Ai => 'B',
            Cell::Empty => '.',
        }
    }
}

/// Position on the board, 0-indexed on every axis.
///
/// The public coordinate system is 1-based; use [`Pos::from_coords`] and
/// [`Pos::coords`] at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Pos {
    #[inline]
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(
            (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE && (z as usize) < BOARD_SIZE
        );
        Self { x, y, z }
    }

    /// Build a position from 1-based public coordinates.
    ///
    /// Returns `None` for anything outside 1..=5 on any axis.
    pub fn from_coords(x: i32, y: i32, z: i32) -> Option<Self> {
        let n = BOARD_SIZE as i32;
        let in_range = |c: i32| (1..=n).contains(&c);
        if in_range(x) && in_range(y) && in_range(z) {
            Some(Self::new((x - 1) as u8, (y - 1) as u8, (z - 1) as u8))
        } else {
            None
        }
    }

    /// 1-based public coordinates
    #[inline]
    pub fn coords(self) -> (u8, u8, u8) {
        (self.x + 1, self.y + 1, self.z + 1)
    }

    #[inline]
    pub fn to_index(self) -> usize {
        (self.x as usize * BOARD_SIZE + self.y as usize) * BOARD_SIZE + self.z as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx / (BOARD_SIZE * BOARD_SIZE)) as u8,
            y: ((idx / BOARD_SIZE) % BOARD_SIZE) as u8,
            z: (idx % BOARD_SIZE) as u8,
        }
    }

    /// Check 0-indexed coordinates against the board bounds
    #[inline]
    pub fn is_valid(x: i32, y: i32, z: i32) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&x) && (0..n).contains(&y) && (0..n).contains(&z)
    }

    /// Step `steps` cells along `dir`, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, dir: Direction, steps: i32) -> Option<Pos> {
        let x = self.x as i32 + dir.0 as i32 * steps;
        let y = self.y as i32 + dir.1 as i32 * steps;
        let z = self.z as i32 + dir.2 as i32 * steps;
        if Self::is_valid(x, y, z) {
            Some(Pos::new(x as u8, y as u8, z as u8))
        } else {
            None
        }
    }

    /// The cell directly below, if any
    #[inline]
    pub fn below(self) -> Option<Pos> {
        self.offset((0, 0, -1), 1)
    }

    /// True when the position lies on an outer face of the cube
    #[inline]
    pub fn is_boundary(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        [self.x, self.y, self.z].iter().any(|&c| c == 0 || c == last)
    }

    /// True when the position lies in the inner 3x3x3 core
    #[inline]
    pub fn is_core(self) -> bool {
        !self.is_boundary()
    }

    /// All 125 positions in scan order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y, z) = self.coords();
        write!(f, "({x}, {y}, {z})")
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
