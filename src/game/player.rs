use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::game::grid::Position;

/// Sign a player puts on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Lowercase name of the mark, also the name of its glyph asset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "x",
            Mark::O => "o",
        }
    }

    /// The mark held by the other player.
    pub fn other(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who produces moves for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Bot,
}

/// One participant: a mark, a kind, and the set of cells claimed so far.
/// The move set only ever grows while a game is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    mark: Mark,
    kind: PlayerKind,
    moves: HashSet<Position>,
}

impl Player {
    /// Constructs a player with no moves yet.
    pub fn new(mark: Mark, kind: PlayerKind) -> Self {
        Self {
            mark,
            kind,
            moves: HashSet::new(),
        }
    }

    /// Reconstructs a player that already owns `moves`, e.g. from a saved game.
    pub fn with_moves(mark: Mark, kind: PlayerKind, moves: HashSet<Position>) -> Self {
        Self { mark, kind, moves }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn moves(&self) -> &HashSet<Position> {
        &self.moves
    }

    pub(crate) fn add_move(&mut self, position: Position) {
        self.moves.insert(position);
    }
}
