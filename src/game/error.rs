use crate::game::grid::Position;
use crate::game::player::Mark;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("grid size must be at least 1")]
    GridTooSmall,
    #[error("both players hold the {0} mark")]
    DuplicateMark(Mark),
    #[error("cell ({row}, {col}) is claimed by both players")]
    OverlappingMoves { row: usize, col: usize },
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("cell ({row}, {col}) is occupied")]
    CellIsOccupied { row: usize, col: usize },
    #[error("can't make turn on a finished game")]
    GameIsFinished,
    #[error("no candidate moves to select from")]
    NoCandidateMoves,
}

impl GameError {
    pub fn out_of_bounds(position: Position, size: usize) -> Self {
        Self::OutOfBounds {
            row: position.row(),
            col: position.col(),
            size,
        }
    }

    pub fn cell_is_occupied(position: Position) -> Self {
        Self::CellIsOccupied {
            row: position.row(),
            col: position.col(),
        }
    }

    pub fn overlapping_moves(position: Position) -> Self {
        Self::OverlappingMoves {
            row: position.row(),
            col: position.col(),
        }
    }
}
