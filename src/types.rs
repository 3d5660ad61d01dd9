use std::fmt;
use std::ops::Add;

use serde::Serialize;

pub const BOARD_SIZE: i32 = 6;
pub const NUM_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// A board coordinate.
///
/// On-board values lie in `0..BOARD_SIZE`. During a capture walk a
/// coordinate may transiently sit one step off the board (`-1` or
/// `BOARD_SIZE`) before the track mapper resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Row-major cell index. Caller contract: `self` is on the board.
    pub(crate) fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "index() on off-board {self}");
        (self.row * BOARD_SIZE + self.col) as usize
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Self::new(idx as i32 / BOARD_SIZE, idx as i32 % BOARD_SIZE)
    }

    /// Every on-board coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_CELLS).map(Self::from_index)
    }
}

impl Add<Direction> for Coord {
    type Output = Coord;

    fn add(self, rhs: Direction) -> Self::Output {
        let (dr, dc) = rhs.delta();
        Coord::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit `(row, col)` delta.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn id(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.id()
    }
}

/// Turn/win state machine. The `*Win` states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameStatus {
    Player1Turn,
    Player2Turn,
    Player1Win,
    Player2Win,
}

impl GameStatus {
    pub const fn turn_of(player: Player) -> Self {
        match player {
            Player::One => Self::Player1Turn,
            Player::Two => Self::Player2Turn,
        }
    }

    /// The player to move, or `None` once the game is decided.
    pub const fn active_player(self) -> Option<Player> {
        match self {
            Self::Player1Turn => Some(Player::One),
            Self::Player2Turn => Some(Player::Two),
            Self::Player1Win | Self::Player2Win => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Player1Win | Self::Player2Win)
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Player1Turn => "Player 1's turn",
            Self::Player2Turn => "Player 2's turn",
            Self::Player1Win => "Player 1 WIN!",
            Self::Player2Win => "Player 2 WIN!",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub captured: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major, 0=empty, 1=player 1, 2=player 2.
    pub board: Vec<u8>,
    pub status: GameStatus,
    pub message: String,
    /// `0` once the game is decided.
    pub current_player: u8,
    pub player1_count: u8,
    pub player2_count: u8,
    pub selected: Option<Coord>,
    /// Row-major; `true` where a click would be accepted.
    pub interactable: Vec<bool>,
    pub last_move: Option<MoveRecord>,
}
