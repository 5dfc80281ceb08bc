//! Turn sequencing on top of [`GameState`]: applies candidate moves,
//! settles wins and draws, lets the automated side reply, and notifies the
//! presentation layer of every cell change.

use tracing::{debug, info, warn};

use crate::bot::MoveSelector;
use crate::game::encoding::{self, SavedStateError};
use crate::game::{GameError, GameResult, GameState, Mark, Position, PlayerKind};
use crate::storage::{SaveStore, StoreError};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

/// Where the game stands between two calls to [`GameController::submit`].
/// `Finished` is terminal: no transition leaves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Turn(Mark),
    Finished(Outcome),
}

/// Notification for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CellOccupied { position: Position, mark: Mark },
    GameEnded(Outcome),
}

/// Presentation-side sink for [`GameEvent`]s.
pub trait GameObserver {
    fn handle(&mut self, event: GameEvent);
}

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Codec(#[from] SavedStateError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives one game from the first move to a terminal state.
pub struct GameController<S> {
    state: GameState,
    selector: S,
    status: Status,
}

impl<S: MoveSelector> GameController<S> {
    /// Starts on `state` with the active player to move.
    pub fn new(state: GameState, selector: S) -> Self {
        let status = Status::Turn(state.active_player().mark());
        Self {
            state,
            selector,
            status,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Runs one full turn starting from `position`: applies the move,
    /// settles win/draw, and keeps taking replies from the selector while
    /// the newly active player is a bot, so control only returns once a
    /// human is up again or the game ended.
    ///
    /// A rejected move (occupied cell, out of bounds, finished game)
    /// changes nothing and switches no turn.
    pub fn submit(
        &mut self,
        position: Position,
        observer: &mut impl GameObserver,
    ) -> GameResult<Status> {
        if let Status::Finished(_) = self.status {
            return Err(GameError::GameIsFinished);
        }
        self.step(position, observer)?;

        while let Status::Turn(_) = self.status {
            if self.state.active_player().kind() != PlayerKind::Bot {
                break;
            }
            let Some(reply) = self.selector.select(self.state.available_positions()) else {
                // draw detection must have fired before the board ran dry
                warn!("selector found no candidates on an unfinished game");
                return Err(GameError::NoCandidateMoves);
            };
            debug!(%reply, "bot replies");
            self.step(reply, observer)?;
        }
        Ok(self.status)
    }

    /// Applies a single move and settles its consequences: win first, then
    /// draw, otherwise the turn passes.
    fn step(&mut self, position: Position, observer: &mut impl GameObserver) -> GameResult<()> {
        self.state.apply_move(position)?;
        let mark = self.state.active_player().mark();
        observer.handle(GameEvent::CellOccupied { position, mark });

        if self.state.has_active_player_won() {
            self.finish(Outcome::Win(mark), observer);
            return Ok(());
        }
        if self.state.is_draw() {
            self.finish(Outcome::Draw, observer);
            return Ok(());
        }
        self.state.switch_turn();
        self.status = Status::Turn(self.state.active_player().mark());
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome, observer: &mut impl GameObserver) {
        info!(?outcome, "game over");
        self.status = Status::Finished(outcome);
        observer.handle(GameEvent::GameEnded(outcome));
    }

    /// Snapshots the game into `store` under `key`. A finished game has
    /// nothing to resume, so reaching a terminal state drops the save
    /// instead.
    pub fn save_to(&self, store: &mut dyn SaveStore, key: &str) -> Result<(), PersistError> {
        if let Status::Finished(_) = self.status {
            store.delete(key)?;
            return Ok(());
        }
        let blob = encoding::encode(&self.state)?;
        store.save(key, &blob)?;
        Ok(())
    }

    /// Restores the game saved under `key`. A missing save yields
    /// `Ok(None)`; an unreadable one is deleted and also reported as
    /// absent, leaving a fresh start as the only option.
    pub fn resume_from(
        store: &mut dyn SaveStore,
        key: &str,
        selector: S,
    ) -> Result<Option<Self>, PersistError> {
        let Some(blob) = store.load(key)? else {
            return Ok(None);
        };
        match encoding::decode(&blob) {
            Ok(state) => Ok(Some(Self::new(state, selector))),
            Err(err) => {
                warn!(%err, "discarding unreadable save");
                store.delete(key)?;
                Ok(None)
            }
        }
    }
}
