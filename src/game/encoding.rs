//! Saved-game codec.
//!
//! An in-progress game is persisted as a JSON blob:
//!
//! ```json
//! {
//!   "gridNumber": 3,
//!   "activePlayer": { "moves": [{"row": 0, "col": 2}], "mark": "x", "type": 0 },
//!   "waitingPlayer": { "moves": [], "mark": "o", "type": 1 }
//! }
//! ```
//!
//! `type` 0 is a human, 1 is a bot. Decoding is defensive: unrecognized
//! marks or player types, positions outside the grid, and positions claimed
//! twice are all rejected instead of being deferred to move validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::game::error::GameError;
use crate::game::grid::Position;
use crate::game::player::{Mark, Player, PlayerKind};
use crate::game::state::GameState;

#[derive(thiserror::Error, Debug)]
pub enum SavedStateError {
    #[error("unrecognized mark (expected: \"x\" or \"o\", found: {found:?})")]
    InvalidMark { found: String },
    #[error("unrecognized player type (expected: 0 or 1, found: {found})")]
    InvalidPlayerKind { found: u8 },
    #[error("position ({row}, {col}) is listed twice for one player")]
    DuplicatePosition { row: usize, col: usize },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type SavedStateResult<T> = Result<T, SavedStateError>;

#[derive(Serialize, Deserialize)]
struct SavedPosition {
    row: usize,
    col: usize,
}

#[derive(Serialize, Deserialize)]
struct SavedPlayer {
    moves: Vec<SavedPosition>,
    mark: String,
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedState {
    grid_number: usize,
    active_player: SavedPlayer,
    waiting_player: SavedPlayer,
}

fn encode_player(player: &Player) -> SavedPlayer {
    SavedPlayer {
        moves: player
            .moves()
            .iter()
            .map(|position| SavedPosition {
                row: position.row(),
                col: position.col(),
            })
            .collect(),
        mark: player.mark().as_str().to_owned(),
        kind: match player.kind() {
            PlayerKind::Human => 0,
            PlayerKind::Bot => 1,
        },
    }
}

fn decode_player(saved: SavedPlayer) -> SavedStateResult<Player> {
    let mark = match saved.mark.as_str() {
        "x" => Mark::X,
        "o" => Mark::O,
        _ => return Err(SavedStateError::InvalidMark { found: saved.mark }),
    };
    let kind = match saved.kind {
        0 => PlayerKind::Human,
        1 => PlayerKind::Bot,
        found => return Err(SavedStateError::InvalidPlayerKind { found }),
    };
    let mut moves = HashSet::with_capacity(saved.moves.len());
    for SavedPosition { row, col } in saved.moves {
        if !moves.insert(Position::new(row, col)) {
            return Err(SavedStateError::DuplicatePosition { row, col });
        }
    }
    Ok(Player::with_moves(mark, kind, moves))
}

/// Serializes `state` into the persistable blob.
pub fn encode(state: &GameState) -> SavedStateResult<Vec<u8>> {
    let saved = SavedState {
        grid_number: state.grid_size(),
        active_player: encode_player(state.active_player()),
        waiting_player: encode_player(state.waiting_player()),
    };
    Ok(serde_json::to_vec(&saved)?)
}

/// Reconstructs a [`GameState`] from a blob produced by [`encode`]. The
/// available set and the winning-combination table are recomputed from the
/// decoded grid size and move sets.
pub fn decode(blob: &[u8]) -> SavedStateResult<GameState> {
    let saved: SavedState = serde_json::from_slice(blob)?;
    let active = decode_player(saved.active_player)?;
    let waiting = decode_player(saved.waiting_player)?;
    Ok(GameState::new(saved.grid_number, active, waiting)?)
}
