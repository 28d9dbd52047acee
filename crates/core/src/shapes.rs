//! Shape catalog - pre-authored rotation grids for the seven tetrominoes
//!
//! Every rotation state is written out by hand rather than derived by
//! rotating a matrix at runtime. Grids are square: 4x4 for I, 2x2 for O and
//! 3x3 for the rest. Row 0 is the top of the grid, column 0 its left edge.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the grid's top-left origin, as (column, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the grid origin
pub type PieceShape = [MinoOffset; 4];

/// One rotation state of one tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGrid {
    size: u8,
    cells: [[bool; 4]; 4],
    minos: PieceShape,
    min_col: i8,
    max_col: i8,
}

impl ShapeGrid {
    /// Side length of the square grid
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at grid column `col`, grid row `row` is filled
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size as usize && row < self.size as usize && self.cells[row][col]
    }

    /// Filled offsets in row-major order
    pub fn minos(&self) -> &PieceShape {
        &self.minos
    }

    /// Leftmost filled column
    pub fn min_col(&self) -> i8 {
        self.min_col
    }

    /// Rightmost filled column
    pub fn max_col(&self) -> i8 {
        self.max_col
    }

    /// Width of the tightest horizontal bounding box
    pub fn bounding_width(&self) -> i8 {
        self.max_col - self.min_col + 1
    }
}

const fn grid(size: u8, rows: [[u8; 4]; 4]) -> ShapeGrid {
    let mut cells = [[false; 4]; 4];
    let mut minos = [(0i8, 0i8); 4];
    let mut count = 0;
    let mut min_col = 4i8;
    let mut max_col = -1i8;

    let mut row = 0;
    while row < size as usize {
        let mut col = 0;
        while col < size as usize {
            if rows[row][col] != 0 {
                assert!(count < 4, "tetromino grid has more than four cells");
                cells[row][col] = true;
                minos[count] = (col as i8, row as i8);
                count += 1;
                if (col as i8) < min_col {
                    min_col = col as i8;
                }
                if (col as i8) > max_col {
                    max_col = col as i8;
                }
            }
            col += 1;
        }
        row += 1;
    }
    assert!(count == 4, "tetromino grid must have exactly four cells");

    ShapeGrid {
        size,
        cells,
        minos,
        min_col,
        max_col,
    }
}

static I_STATES: [ShapeGrid; 4] = [
    grid(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    grid(4, [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    grid(4, [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    grid(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const O_GRID: ShapeGrid = grid(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
static O_STATES: [ShapeGrid; 4] = [O_GRID; 4];

static T_STATES: [ShapeGrid; 4] = [
    grid(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    grid(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

static S_STATES: [ShapeGrid; 4] = [
    grid(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0; 4]]),
    grid(3, [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0; 4]]),
    grid(3, [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

static Z_STATES: [ShapeGrid; 4] = [
    grid(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    grid(3, [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    grid(3, [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0; 4]]),
];

static L_STATES: [ShapeGrid; 4] = [
    grid(3, [[1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0], [0; 4]]),
    grid(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
    grid(3, [[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
];

static J_STATES: [ShapeGrid; 4] = [
    grid(3, [[1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0], [0; 4]]),
    grid(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
    grid(3, [[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0; 4]]),
    grid(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

/// Get the grid for a piece kind and rotation
pub fn cells_of(kind: PieceKind, rotation: Rotation) -> &'static ShapeGrid {
    let states = match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
    };
    &states[rotation.index()]
}

/// Same as [`cells_of`] with a raw rotation index, taken modulo 4
pub fn cells_at(kind: PieceKind, rotation_index: usize) -> &'static ShapeGrid {
    cells_of(kind, Rotation::from_index(rotation_index))
}

/// Get the mino offsets for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    *cells_of(kind, rotation).minos()
}

/// Display color of a piece kind as (r, g, b)
pub const fn color_of(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::I => (0, 220, 240),
        PieceKind::O => (240, 220, 60),
        PieceKind::T => (180, 90, 240),
        PieceKind::S => (60, 200, 100),
        PieceKind::Z => (220, 70, 70),
        PieceKind::L => (240, 160, 50),
        PieceKind::J => (60, 110, 240),
    }
}
