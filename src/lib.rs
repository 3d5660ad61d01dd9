use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rng;
pub mod track;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameOptions;
pub use error::GameError;
pub use game::{Activation, GameInstance, advance_turn};
pub use types::{Coord, Direction, GameStatus, Player};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
