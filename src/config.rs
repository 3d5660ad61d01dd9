use serde::Deserialize;

use crate::error::GameError;
use crate::types::Player;

/// Options accepted by `new_game`. Every field may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    /// Seed for the starting-player draw; the wall clock when absent.
    pub seed: Option<u64>,
    /// 1 or 2 to skip the random draw for the first game.
    pub first_player: Option<u8>,
}

impl GameOptions {
    pub fn first_player(&self) -> Result<Option<Player>, GameError> {
        self.first_player
            .map(|id| {
                Player::from_id(id).ok_or_else(|| {
                    GameError::InvalidOptions(format!("firstPlayer must be 1 or 2, got {id}"))
                })
            })
            .transpose()
    }
}
