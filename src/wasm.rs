//! JS boundary. One game per module instance, guarded by a single lock.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameOptions;
use crate::error::GameError;
use crate::game::{Activation, GameInstance};
use crate::types::{Coord, GameState, MoveRecord};

static GAME: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

/// Result of a click as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClickOutcome {
    Selected { at: Coord },
    Deselected,
    Moved { record: MoveRecord },
    Ignored,
    InvalidMove { from: Coord, to: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickResult {
    pub outcome: ClickOutcome,
    pub state: GameState,
}

impl ClickOutcome {
    /// Folds the invalid-move error into a regular outcome; other errors
    /// are passed through.
    pub fn from_activation(result: Result<Activation, GameError>) -> Result<Self, GameError> {
        match result {
            Ok(Activation::Selected(at)) => Ok(Self::Selected { at }),
            Ok(Activation::Deselected) => Ok(Self::Deselected),
            Ok(Activation::Moved(record)) => Ok(Self::Moved { record }),
            Ok(Activation::Ignored) => Ok(Self::Ignored),
            Err(GameError::InvalidMove { from, to }) => Ok(Self::InvalidMove { from, to }),
            Err(err) => Err(err),
        }
    }
}

fn with_game<T>(f: impl FnOnce(&mut GameInstance) -> Result<T, GameError>) -> Result<T, GameError> {
    let mut guard = GAME.lock().map_err(|_| GameError::StatePoisoned)?;
    let game = guard.as_mut().ok_or(GameError::NoActiveGame)?;
    f(game)
}

fn parse_options(options: JsValue) -> Result<GameOptions, GameError> {
    if options.is_undefined() || options.is_null() {
        return Ok(GameOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| GameError::InvalidOptions(e.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn new_game(options: JsValue) -> Result<JsValue, JsValue> {
    let options = parse_options(options).map_err(js_err)?;
    let game = GameInstance::new(options).map_err(js_err)?;
    let state = game.to_game_state();

    let mut guard = GAME.lock().map_err(|_| js_err(GameError::StatePoisoned))?;
    *guard = Some(game);
    to_js(&state)
}

#[wasm_bindgen]
pub fn reset_game() -> Result<JsValue, JsValue> {
    let state = with_game(|game| {
        game.reset();
        Ok(game.to_game_state())
    })
    .map_err(js_err)?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn click_cell(row: i32, col: i32) -> Result<JsValue, JsValue> {
    let result = with_game(|game| {
        let outcome = ClickOutcome::from_activation(game.on_cell_activated(Coord::new(row, col)))?;
        Ok(ClickResult {
            outcome,
            state: game.to_game_state(),
        })
    })
    .map_err(js_err)?;
    to_js(&result)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_game(|game| Ok(game.to_game_state())).map_err(js_err)?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_status_message() -> Result<String, JsValue> {
    with_game(|game| Ok(game.status_message().to_string())).map_err(js_err)
}

#[wasm_bindgen]
pub fn get_legal_targets(row: i32, col: i32) -> Result<JsValue, JsValue> {
    let targets = with_game(|game| Ok(game.legal_targets(Coord::new(row, col)))).map_err(js_err)?;
    to_js(&targets)
}

#[wasm_bindgen]
pub fn is_cell_selectable(row: i32, col: i32) -> Result<bool, JsValue> {
    with_game(|game| Ok(game.is_cell_selectable(Coord::new(row, col)))).map_err(js_err)
}

#[wasm_bindgen]
pub fn is_cell_interactable(row: i32, col: i32) -> Result<bool, JsValue> {
    with_game(|game| Ok(game.is_cell_interactable(Coord::new(row, col)))).map_err(js_err)
}
