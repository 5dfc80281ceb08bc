pub mod encoding;
pub mod error;
pub mod grid;
pub mod player;
pub mod state;

pub use error::GameError;
pub use grid::Position;
pub use player::{Mark, Player, PlayerKind};
pub use state::{Combination, GameState};

pub type GameResult<T> = Result<T, GameError>;
