use crate::types::{BOARD_SIZE, Coord, Direction};

const HALF: i32 = BOARD_SIZE / 2;

/// Where a single step of a capture walk lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStep {
    /// Still on the board; travel continues in the same direction.
    OnBoard,
    /// Off the board next to a corner. The ring is not defined there.
    DeadEnd,
    /// Re-entered the board on a perpendicular edge.
    Wrap { to: Coord, direction: Direction },
}

/// Resolves a position that is at most one step off the board. Anything
/// further out is a dead end.
///
/// The non-corner perimeter is threaded into one ring: leaving the board
/// through the near half of an edge re-enters on the adjacent edge of the
/// same side, turned 90 degrees.
pub fn map_off_board(pos: Coord) -> TrackStep {
    if pos.is_on_board() {
        return TrackStep::OnBoard;
    }

    let last = BOARD_SIZE - 1;
    let Coord { row, col } = pos;

    let (k, near, far) = if row == -1 {
        (
            col,
            (Coord::new(col, 0), Direction::Right),
            (Coord::new(last - col, last), Direction::Left),
        )
    } else if row == BOARD_SIZE {
        (
            col,
            (Coord::new(last - col, 0), Direction::Right),
            (Coord::new(col, last), Direction::Left),
        )
    } else if col == -1 {
        (
            row,
            (Coord::new(0, row), Direction::Down),
            (Coord::new(last, last - row), Direction::Up),
        )
    } else if col == BOARD_SIZE {
        (
            row,
            (Coord::new(0, last - row), Direction::Down),
            (Coord::new(last, row), Direction::Up),
        )
    } else {
        return TrackStep::DeadEnd;
    };

    // Diagonally off a corner, or in line with no board cell.
    if k <= 0 || k >= last {
        return TrackStep::DeadEnd;
    }

    let (to, direction) = if k < HALF { near } else { far };
    TrackStep::Wrap { to, direction }
}

/// One step of a capture walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub pos: Coord,
    pub direction: Direction,
    pub wrapped: bool,
}

/// Moves one cell from `pos` in `direction`, following the ring when the
/// step leaves the board. Returns `None` at a dead end.
pub fn advance(pos: Coord, direction: Direction) -> Option<Advance> {
    let next = pos + direction;
    match map_off_board(next) {
        TrackStep::OnBoard => Some(Advance {
            pos: next,
            direction,
            wrapped: false,
        }),
        TrackStep::DeadEnd => None,
        TrackStep::Wrap { to, direction } => Some(Advance {
            pos: to,
            direction,
            wrapped: true,
        }),
    }
}
