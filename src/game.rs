use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::config::GameOptions;
use crate::error::GameError;
use crate::rng::GameRng;
use crate::types::{Coord, GameState, GameStatus, MoveRecord, Player};

/// What a single cell activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Selected(Coord),
    Deselected,
    Moved(MoveRecord),
    /// Nothing selectable there, or the game is already decided.
    Ignored,
}

pub struct GameInstance {
    board: Board,
    status: GameStatus,
    selected: Option<Coord>,
    last_move: Option<MoveRecord>,
    rng: GameRng,
}

impl GameInstance {
    pub fn new(options: GameOptions) -> Result<Self, GameError> {
        let first_player = options.first_player()?;
        let rng = options.seed.map_or_else(GameRng::from_clock, GameRng::new);
        Ok(Self::start(rng, first_player))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::start(GameRng::new(seed), None)
    }

    fn start(mut rng: GameRng, first_player: Option<Player>) -> Self {
        let first_player = first_player.unwrap_or_else(|| rng.starting_player());
        debug!(seed = rng.seed(), ?first_player, "new game");

        Self {
            board: Board::new(),
            status: GameStatus::turn_of(first_player),
            selected: None,
            last_move: None,
            rng,
        }
    }

    /// Back to the starting layout with a freshly drawn first player.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let first_player = self.rng.starting_player();
        self.board = Board::new();
        self.status = GameStatus::turn_of(first_player);
        self.selected = None;
        self.last_move = None;
        debug!(?first_player, "game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub fn status_message(&self) -> &'static str {
        self.status.message()
    }

    /// Click gating: nothing once the game is decided, the active player's
    /// own pieces while nothing is selected, and every cell once a piece
    /// is selected.
    pub fn is_cell_selectable(&self, coord: Coord) -> bool {
        let Some(player) = self.status.active_player() else {
            return false;
        };
        if !coord.is_on_board() {
            return false;
        }
        self.selected.is_some() || self.board.owner(coord) == Some(player)
    }

    /// Same rule as `is_cell_selectable`.
    pub fn is_cell_interactable(&self, coord: Coord) -> bool {
        self.is_cell_selectable(coord)
    }

    /// Legal destinations for the piece on `from`.
    pub fn legal_targets(&self, from: Coord) -> Vec<Coord> {
        self.board.legal_targets(from)
    }

    /// Drives the select / deselect / move protocol for one click.
    ///
    /// An illegal destination returns `GameError::InvalidMove` and leaves the
    /// selection and turn untouched.
    #[instrument(skip(self), fields(status = ?self.status, selected = ?self.selected))]
    pub fn on_cell_activated(&mut self, coord: Coord) -> Result<Activation, GameError> {
        if !coord.is_on_board() {
            return Err(GameError::OutOfBoard {
                row: coord.row,
                col: coord.col,
            });
        }
        if self.status.is_terminal() {
            debug!("game is over, ignoring input");
            return Ok(Activation::Ignored);
        }

        let Some(from) = self.selected else {
            if self.board.owner(coord) != self.status.active_player() {
                return Ok(Activation::Ignored);
            }
            self.selected = Some(coord);
            debug!(%coord, "piece selected");
            return Ok(Activation::Selected(coord));
        };

        if from == coord {
            self.selected = None;
            debug!(%coord, "piece deselected");
            return Ok(Activation::Deselected);
        }

        if !self.board.is_legal_move(from, coord) {
            warn!(%from, to = %coord, "invalid move");
            return Err(GameError::InvalidMove { from, to: coord });
        }
        let record = self
            .board
            .execute_move(from, coord)
            .ok_or(GameError::InvalidMove { from, to: coord })?;

        self.selected = None;
        self.last_move = Some(record);
        self.status = advance_turn(&self.board, self.status);
        debug!(
            %from,
            to = %coord,
            captured = record.captured,
            status = ?self.status,
            "move committed"
        );

        Ok(Activation::Moved(record))
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            status: self.status,
            message: self.status_message().to_string(),
            current_player: self.status.active_player().map_or(0, Player::id),
            player1_count: self.board.count(Player::One),
            player2_count: self.board.count(Player::Two),
            selected: self.selected,
            interactable: Coord::all()
                .map(|coord| self.is_cell_interactable(coord))
                .collect(),
            last_move: self.last_move,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, status: GameStatus) {
        self.board = board;
        self.status = status;
        self.selected = None;
        self.last_move = None;
    }
}

/// Next status after a committed move. A side with no pieces left loses.
pub fn advance_turn(board: &Board, status: GameStatus) -> GameStatus {
    if board.count(Player::One) == 0 {
        GameStatus::Player2Win
    } else if board.count(Player::Two) == 0 {
        GameStatus::Player1Win
    } else if status == GameStatus::Player1Turn {
        GameStatus::Player2Turn
    } else {
        GameStatus::Player1Turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn game_with_turn(player: Player) -> GameInstance {
        GameInstance::new(GameOptions {
            seed: Some(1),
            first_player: Some(player.id()),
        })
        .unwrap()
    }

    fn capture_position(status: GameStatus) -> GameInstance {
        let mut game = game_with_turn(Player::One);
        let board = Board::from_pieces(&[c(2, 1)], &[c(1, 0)]).unwrap();
        game.set_board_for_test(board, status);
        game
    }

    #[test]
    fn initial_state_is_correct() {
        let game = game_with_turn(Player::One);
        let state = game.to_game_state();

        assert_eq!(state.status, GameStatus::Player1Turn);
        assert_eq!(state.message, "Player 1's turn");
        assert_eq!(state.current_player, 1);
        assert_eq!(state.player1_count, 12);
        assert_eq!(state.player2_count, 12);
        assert_eq!(state.selected, None);
        assert_eq!(state.last_move, None);
        assert_eq!(state.board.len(), 36);
        // Only player 1's own pieces are clickable before a selection.
        assert_eq!(state.interactable.iter().filter(|&&i| i).count(), 12);
        assert!(state.interactable[..12].iter().all(|&i| i));
    }

    #[test]
    fn adjacency_move_passes_the_turn() {
        let mut game = game_with_turn(Player::One);

        assert_eq!(game.on_cell_activated(c(1, 2)), Ok(Activation::Selected(c(1, 2))));
        let outcome = game.on_cell_activated(c(2, 2)).unwrap();

        assert_eq!(
            outcome,
            Activation::Moved(MoveRecord {
                from: c(1, 2),
                to: c(2, 2),
                captured: false,
            })
        );
        assert_eq!(game.board().owner(c(2, 2)), Some(Player::One));
        assert_eq!(game.board().owner(c(1, 2)), None);
        assert_eq!(game.board().count(Player::Two), 12);
        assert_eq!(game.status(), GameStatus::Player2Turn);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn move_onto_own_piece_is_invalid_and_keeps_selection() {
        let mut game = game_with_turn(Player::One);
        let before = *game.board();

        game.on_cell_activated(c(1, 2)).unwrap();
        let err = game.on_cell_activated(c(1, 3)).unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidMove {
                from: c(1, 2),
                to: c(1, 3),
            }
        );
        assert_eq!(game.selected(), Some(c(1, 2)));
        assert_eq!(game.status(), GameStatus::Player1Turn);
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn clicking_the_selection_again_deselects() {
        let mut game = game_with_turn(Player::One);

        game.on_cell_activated(c(0, 0)).unwrap();
        assert_eq!(game.on_cell_activated(c(0, 0)), Ok(Activation::Deselected));
        assert_eq!(game.selected(), None);
        assert_eq!(game.status(), GameStatus::Player1Turn);
    }

    #[test]
    fn opponent_and_empty_cells_are_not_selectable() {
        let mut game = game_with_turn(Player::Two);

        assert!(!game.is_cell_selectable(c(0, 0)));
        assert!(!game.is_cell_selectable(c(3, 3)));
        assert!(game.is_cell_selectable(c(4, 0)));

        assert_eq!(game.on_cell_activated(c(0, 0)), Ok(Activation::Ignored));
        assert_eq!(game.on_cell_activated(c(3, 3)), Ok(Activation::Ignored));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn every_cell_is_interactable_once_selected() {
        let mut game = game_with_turn(Player::One);
        game.on_cell_activated(c(1, 1)).unwrap();

        assert!(Coord::all().all(|coord| game.is_cell_interactable(coord)));
        assert!(Coord::all().all(|coord| game.is_cell_selectable(coord)));
    }

    #[test]
    fn selectable_and_interactable_agree_through_a_turn() {
        let mut game = game_with_turn(Player::One);
        let agree = |game: &GameInstance| {
            Coord::all()
                .all(|coord| game.is_cell_selectable(coord) == game.is_cell_interactable(coord))
        };

        assert!(agree(&game));
        game.on_cell_activated(c(1, 1)).unwrap();
        assert!(agree(&game));
        assert!(game.is_cell_selectable(c(2, 2)));
        assert!(game.is_cell_selectable(c(4, 4)));

        game.on_cell_activated(c(2, 2)).unwrap();
        assert!(agree(&game));
        assert!(!game.is_cell_selectable(c(0, 0)));
        assert!(game.is_cell_selectable(c(4, 4)));
        assert!(!game.is_cell_selectable(c(6, 0)));
    }

    #[test]
    fn capture_around_the_ring_wins_the_game() {
        let mut game = capture_position(GameStatus::Player1Turn);

        game.on_cell_activated(c(2, 1)).unwrap();
        let outcome = game.on_cell_activated(c(1, 0)).unwrap();

        assert_eq!(
            outcome,
            Activation::Moved(MoveRecord {
                from: c(2, 1),
                to: c(1, 0),
                captured: true,
            })
        );
        assert_eq!(game.board().owner(c(1, 0)), Some(Player::One));
        assert_eq!(game.board().count(Player::Two), 0);
        assert_eq!(game.status(), GameStatus::Player1Win);
        assert_eq!(game.status_message(), "Player 1 WIN!");
    }

    #[test]
    fn decided_game_ignores_all_input() {
        let mut game = capture_position(GameStatus::Player1Turn);
        game.on_cell_activated(c(2, 1)).unwrap();
        game.on_cell_activated(c(1, 0)).unwrap();
        let before = game.to_game_state();

        for coord in Coord::all() {
            assert!(!game.is_cell_interactable(coord));
            assert_eq!(game.on_cell_activated(coord), Ok(Activation::Ignored));
        }
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn out_of_board_click_is_an_error() {
        let mut game = game_with_turn(Player::One);
        assert_eq!(
            game.on_cell_activated(c(6, 0)),
            Err(GameError::OutOfBoard { row: 6, col: 0 })
        );
    }

    #[test]
    fn advance_turn_alternates_and_detects_wins() {
        let board = Board::new();
        assert_eq!(advance_turn(&board, GameStatus::Player1Turn), GameStatus::Player2Turn);
        assert_eq!(advance_turn(&board, GameStatus::Player2Turn), GameStatus::Player1Turn);

        let only_p1 = Board::from_pieces(&[c(0, 0)], &[]).unwrap();
        assert_eq!(advance_turn(&only_p1, GameStatus::Player2Turn), GameStatus::Player1Win);

        let only_p2 = Board::from_pieces(&[], &[c(0, 0)]).unwrap();
        assert_eq!(advance_turn(&only_p2, GameStatus::Player1Turn), GameStatus::Player2Win);
    }

    #[test]
    fn reset_restores_layout_and_clears_selection() {
        let mut game = game_with_turn(Player::One);
        game.on_cell_activated(c(1, 2)).unwrap();
        game.on_cell_activated(c(2, 2)).unwrap();
        game.on_cell_activated(c(4, 0)).unwrap();

        game.reset();
        let first = game.to_game_state();
        game.reset();
        let second = game.to_game_state();

        assert_eq!(first.board, Board::new().to_array().to_vec());
        assert_eq!(first.board, second.board);
        assert_eq!(first.selected, None);
        assert_eq!(first.last_move, None);
        assert!(!first.status.is_terminal());
        assert!(!second.status.is_terminal());
    }

    #[test]
    fn same_seed_replays_starting_players() {
        let mut a = GameInstance::with_seed(99);
        let mut b = GameInstance::new(GameOptions {
            seed: Some(99),
            first_player: None,
        })
        .unwrap();

        for _ in 0..8 {
            assert_eq!(a.status(), b.status());
            a.reset();
            b.reset();
        }
    }

    #[test]
    fn legal_targets_for_selected_piece() {
        let game = capture_position(GameStatus::Player1Turn);
        let targets = game.legal_targets(c(2, 1));

        assert!(targets.contains(&c(1, 0)));
        assert!(game.legal_targets(c(3, 3)).is_empty());
    }
}
