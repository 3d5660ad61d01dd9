use crate::error::GameError;
use crate::track::advance;
use crate::types::{Coord, Direction, MoveRecord, NUM_CELLS, Player};

const START_ROWS_PLAYER1: [i32; 2] = [0, 1];
const START_ROWS_PLAYER2: [i32; 2] = [4, 5];

/// Board state represented by two disjoint 36-bit piece sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    player1: u64,
    player2: u64,
}

/// How a single-direction capture walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    Reached,
    Blocked(Coord),
    DeadEnd,
    /// Came back to the starting cell heading the starting direction.
    Orbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    pub end: WalkEnd,
    pub steps: usize,
    pub wrapped: bool,
}

impl Walk {
    /// A walk captures only if it reached the target through the ring.
    pub fn captures(&self) -> bool {
        self.end == WalkEnd::Reached && self.wrapped
    }
}

impl Board {
    /// Creates the starting layout: player 1 on rows 0-1, player 2 on rows 4-5.
    pub fn new() -> Self {
        Self {
            player1: mask_of(Self::starting_coords(Player::One)),
            player2: mask_of(Self::starting_coords(Player::Two)),
        }
    }

    pub fn starting_coords(player: Player) -> Vec<Coord> {
        let rows = match player {
            Player::One => START_ROWS_PLAYER1,
            Player::Two => START_ROWS_PLAYER2,
        };
        rows.iter()
            .flat_map(|&row| Coord::all().filter(move |c| c.row == row))
            .collect()
    }

    /// Builds an arbitrary position. Every coordinate must be on the board
    /// and no cell may hold two pieces.
    pub fn from_pieces(player1: &[Coord], player2: &[Coord]) -> Result<Self, GameError> {
        let mut board = Self {
            player1: 0,
            player2: 0,
        };
        for (player, coords) in [(Player::One, player1), (Player::Two, player2)] {
            for &coord in coords {
                if !coord.is_on_board() {
                    return Err(GameError::OutOfBoard {
                        row: coord.row,
                        col: coord.col,
                    });
                }
                if board.is_occupied(coord) {
                    return Err(GameError::Overlap(coord));
                }
                *board.mask_mut(player) |= bit(coord);
            }
        }
        Ok(board)
    }

    pub fn owner(&self, coord: Coord) -> Option<Player> {
        let square = bit(coord);
        if (self.player1 & square) != 0 {
            Some(Player::One)
        } else if (self.player2 & square) != 0 {
            Some(Player::Two)
        } else {
            None
        }
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        ((self.player1 | self.player2) & bit(coord)) != 0
    }

    pub fn count(&self, player: Player) -> u8 {
        self.mask(player).count_ones() as u8
    }

    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Coord> + '_ {
        let mask = self.mask(player);
        Coord::all().filter(move |&c| (mask & bit(c)) != 0)
    }

    /// One-square king move onto an empty cell.
    ///
    /// `start == end` passes the distance test; callers exclude it.
    pub fn is_adjacent_move(&self, start: Coord, end: Coord) -> bool {
        if !self.is_occupied(start) || self.is_occupied(end) || !end.is_on_board() {
            return false;
        }
        (start.row - end.row).abs() <= 1 && (start.col - end.col).abs() <= 1
    }

    /// Lands exactly on an enemy piece via an unobstructed walk that uses
    /// the perimeter ring at least once, in any of the four directions.
    pub fn is_capture_move(&self, start: Coord, end: Coord) -> bool {
        let Some(mover) = self.owner(start) else {
            return false;
        };
        if self.owner(end) != Some(mover.opponent()) {
            return false;
        }
        Direction::ALL
            .into_iter()
            .any(|dir| self.capture_walk(start, end, dir).captures())
    }

    pub fn is_legal_move(&self, start: Coord, end: Coord) -> bool {
        self.is_adjacent_move(start, end) || self.is_capture_move(start, end)
    }

    /// Walks from `start` towards `end`, beginning in `initial`. An off-board
    /// `start` is a dead end.
    ///
    /// Occupancy is checked on every visited cell except `start` and `end`.
    /// The step map is a bijection on (cell, direction), so a walk that
    /// neither stops nor dead-ends returns to its initial state.
    pub fn capture_walk(&self, start: Coord, end: Coord, initial: Direction) -> Walk {
        if !start.is_on_board() {
            return Walk {
                end: WalkEnd::DeadEnd,
                steps: 0,
                wrapped: false,
            };
        }

        let mut pos = start;
        let mut direction = initial;
        let mut steps = 0;
        let mut wrapped = false;

        let end_reason = loop {
            if pos == end {
                break WalkEnd::Reached;
            }
            if pos != start && self.is_occupied(pos) {
                break WalkEnd::Blocked(pos);
            }
            let Some(step) = advance(pos, direction) else {
                break WalkEnd::DeadEnd;
            };
            pos = step.pos;
            direction = step.direction;
            wrapped |= step.wrapped;
            steps += 1;
            if pos == start && direction == initial {
                break WalkEnd::Orbit;
            }
        };

        Walk {
            end: end_reason,
            steps,
            wrapped,
        }
    }

    /// Every destination the piece on `from` may legally move to.
    pub fn legal_targets(&self, from: Coord) -> Vec<Coord> {
        if !self.is_occupied(from) {
            return Vec::new();
        }
        Coord::all()
            .filter(|&to| to != from && self.is_legal_move(from, to))
            .collect()
    }

    /// Moves the piece on `start` to `end`, removing any enemy piece there.
    ///
    /// Does not re-validate legality. Returns `None` without touching the
    /// board when `start` is empty or the mover already occupies `end`.
    pub fn execute_move(&mut self, start: Coord, end: Coord) -> Option<MoveRecord> {
        let mover = self.owner(start)?;
        if self.owner(end) == Some(mover) || !end.is_on_board() {
            return None;
        }

        let opponent = mover.opponent();
        let captured = (self.mask(opponent) & bit(end)) != 0;

        *self.mask_mut(opponent) &= !bit(end);
        let mine = self.mask_mut(mover);
        *mine = (*mine & !bit(start)) | bit(end);

        Some(MoveRecord {
            from: start,
            to: end,
            captured,
        })
    }

    /// Converts board to `[u8; 36]` where 0=empty, 1=player 1, 2=player 2.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (cell, coord) in board.iter_mut().zip(Coord::all()) {
            *cell = self.owner(coord).map_or(0, Player::id);
        }
        board
    }

    fn mask(&self, player: Player) -> u64 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn mask_mut(&mut self, player: Player) -> &mut u64 {
        match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(coord: Coord) -> u64 {
    if coord.is_on_board() {
        1u64 << coord.index()
    } else {
        0
    }
}

fn mask_of(coords: Vec<Coord>) -> u64 {
    coords.into_iter().fold(0, |mask, c| mask | bit(c))
}
