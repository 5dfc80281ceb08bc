use std::collections::HashSet;

use smallvec::SmallVec;
use tracing::debug;

use crate::game::error::GameError;
use crate::game::grid::Position;
use crate::game::player::{Mark, Player};
use crate::game::GameResult;

/// Positions that win the game for whoever claims all of them.
pub type Combination = SmallVec<[Position; 8]>;

/// Builds the winning lines of a `size`x`size` grid: every full row, every
/// full column, the main diagonal and the anti-diagonal, in that order.
/// Yields `2 * size + 2` combinations of `size` positions each.
pub fn winning_combinations(size: usize) -> Vec<Combination> {
    let mut combinations = Vec::with_capacity(2 * size + 2);
    for i in 0..size {
        combinations.push((0..size).map(|j| Position::new(i, j)).collect());
        combinations.push((0..size).map(|j| Position::new(j, i)).collect());
    }
    combinations.push((0..size).map(|i| Position::new(i, i)).collect());
    combinations.push((0..size).map(|i| Position::new(i, size - 1 - i)).collect());
    combinations
}

/// The turn-based state machine of a single game.
///
/// The available set and the two players' move sets always partition the
/// grid exactly. Turn switching swaps which player slot is active; the two
/// [`Player`] values themselves are conserved for the whole game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    grid_size: usize,
    active: Player,
    waiting: Player,
    available: HashSet<Position>,
    winning_combinations: Vec<Combination>,
}

impl GameState {
    /// Constructs a game on a `grid_size`x`grid_size` grid. Cells already
    /// claimed by either player (e.g. when restoring a saved game) are
    /// excluded from the available set.
    pub fn new(grid_size: usize, active: Player, waiting: Player) -> GameResult<Self> {
        if grid_size == 0 {
            return Err(GameError::GridTooSmall);
        }
        if active.mark() == waiting.mark() {
            return Err(GameError::DuplicateMark(active.mark()));
        }
        if let Some(&position) = active
            .moves()
            .union(waiting.moves())
            .find(|position| !position.fits(grid_size))
        {
            return Err(GameError::out_of_bounds(position, grid_size));
        }
        if let Some(&position) = active.moves().intersection(waiting.moves()).next() {
            return Err(GameError::overlapping_moves(position));
        }

        let available = (0..grid_size)
            .flat_map(|row| (0..grid_size).map(move |col| Position::new(row, col)))
            .filter(|position| {
                !active.moves().contains(position) && !waiting.moves().contains(position)
            })
            .collect();
        Ok(Self {
            grid_size,
            active,
            waiting,
            available,
            winning_combinations: winning_combinations(grid_size),
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn active_player(&self) -> &Player {
        &self.active
    }

    pub fn waiting_player(&self) -> &Player {
        &self.waiting
    }

    pub fn available_positions(&self) -> &HashSet<Position> {
        &self.available
    }

    pub fn winning_combinations(&self) -> &[Combination] {
        &self.winning_combinations
    }

    /// Claims `position` for the active player. The turn does not switch.
    /// On error nothing changes.
    pub fn apply_move(&mut self, position: Position) -> GameResult<()> {
        if !position.fits(self.grid_size) {
            return Err(GameError::out_of_bounds(position, self.grid_size));
        }
        if !self.available.remove(&position) {
            return Err(GameError::cell_is_occupied(position));
        }
        self.active.add_move(position);
        debug!(mark = %self.active.mark(), %position, "move applied");
        Ok(())
    }

    /// Returns `true` if the active player owns a full winning combination.
    ///
    /// Only the active player is inspected: the check runs right after that
    /// player's move, before any turn switch, so nobody else can have just
    /// completed a line. Fewer than `grid_size` moves can't complete any
    /// combination, so that case returns early.
    pub fn has_active_player_won(&self) -> bool {
        if self.active.moves().len() < self.grid_size {
            return false;
        }
        self.winning_combinations.iter().any(|combination| {
            combination
                .iter()
                .all(|position| self.active.moves().contains(position))
        })
    }

    /// Returns `true` once no position is left to play. A full board can
    /// also hold a completed line, so callers check
    /// [`Self::has_active_player_won`] first.
    pub fn is_draw(&self) -> bool {
        self.available.is_empty()
    }

    /// Swaps which player is active. The player values themselves don't
    /// change, and neither does anything else.
    pub fn switch_turn(&mut self) {
        std::mem::swap(&mut self.active, &mut self.waiting);
    }

    /// Returns the mark occupying `position`, if any.
    pub fn mark_at(&self, position: Position) -> Option<Mark> {
        [&self.active, &self.waiting]
            .into_iter()
            .find(|player| player.moves().contains(&position))
            .map(|player| player.mark())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::player::PlayerKind;
    use itertools::Itertools;

    fn fresh(grid_size: usize) -> GameState {
        GameState::new(
            grid_size,
            Player::new(Mark::X, PlayerKind::Human),
            Player::new(Mark::O, PlayerKind::Bot),
        )
        .unwrap()
    }

    #[test]
    fn test_combination_table() {
        for size in [1, 2, 3, 4, 7] {
            let combinations = winning_combinations(size);
            assert_eq!(combinations.len(), 2 * size + 2);
            for combination in &combinations {
                assert_eq!(combination.len(), size);
                assert_eq!(combination.iter().unique().count(), size);
                assert!(combination.iter().all(|p| p.fits(size)));
            }
            assert_eq!(combinations.iter().unique().count(), combinations.len());
        }
    }

    #[test]
    fn test_combination_table_3x3() {
        let combinations = winning_combinations(3);
        let diagonal: Combination = [(0, 0), (1, 1), (2, 2)]
            .into_iter()
            .map(Position::from)
            .collect();
        let anti_diagonal: Combination = [(0, 2), (1, 1), (2, 0)]
            .into_iter()
            .map(Position::from)
            .collect();
        assert!(combinations.contains(&diagonal));
        assert!(combinations.contains(&anti_diagonal));
    }

    #[test]
    fn test_construction_partitions_grid() {
        let state = fresh(3);
        assert_eq!(state.available_positions().len(), 9);

        let x_moves: HashSet<_> = [(0, 0), (1, 1)].map(Position::from).into();
        let o_moves: HashSet<_> = [(2, 2)].map(Position::from).into();
        let state = GameState::new(
            3,
            Player::with_moves(Mark::X, PlayerKind::Human, x_moves.clone()),
            Player::with_moves(Mark::O, PlayerKind::Bot, o_moves.clone()),
        )
        .unwrap();
        assert_eq!(state.available_positions().len(), 9 - 2 - 1);
        assert!(x_moves
            .union(&o_moves)
            .all(|p| !state.available_positions().contains(p)));
    }

    #[test]
    fn test_construction_rejects_bad_input() {
        assert_eq!(
            GameState::new(
                0,
                Player::new(Mark::X, PlayerKind::Human),
                Player::new(Mark::O, PlayerKind::Bot),
            ),
            Err(GameError::GridTooSmall)
        );
        assert_eq!(
            GameState::new(
                3,
                Player::new(Mark::X, PlayerKind::Human),
                Player::new(Mark::X, PlayerKind::Bot),
            ),
            Err(GameError::DuplicateMark(Mark::X))
        );

        let shared: HashSet<_> = [Position::new(1, 1)].into();
        assert_eq!(
            GameState::new(
                3,
                Player::with_moves(Mark::X, PlayerKind::Human, shared.clone()),
                Player::with_moves(Mark::O, PlayerKind::Bot, shared),
            ),
            Err(GameError::OverlappingMoves { row: 1, col: 1 })
        );

        let outside: HashSet<_> = [Position::new(3, 0)].into();
        assert_eq!(
            GameState::new(
                3,
                Player::with_moves(Mark::X, PlayerKind::Human, outside),
                Player::new(Mark::O, PlayerKind::Bot),
            ),
            Err(GameError::OutOfBounds {
                row: 3,
                col: 0,
                size: 3
            })
        );
    }

    #[test]
    fn test_apply_move() {
        let mut state = fresh(3);
        state.apply_move(Position::new(1, 1)).unwrap();
        assert!(state.active_player().moves().contains(&Position::new(1, 1)));
        assert!(!state.available_positions().contains(&Position::new(1, 1)));
        assert_eq!(state.available_positions().len(), 8);
        assert_eq!(state.mark_at(Position::new(1, 1)), Some(Mark::X));
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let mut state = fresh(3);
        let untouched = state.clone();
        assert_eq!(
            state.apply_move(Position::new(0, 3)),
            Err(GameError::OutOfBounds {
                row: 0,
                col: 3,
                size: 3
            })
        );
        assert_eq!(state, untouched);
    }

    #[test]
    fn test_apply_same_move_twice() {
        let mut state = fresh(3);
        state.apply_move(Position::new(0, 0)).unwrap();
        let after_first = state.clone();
        assert_eq!(
            state.apply_move(Position::new(0, 0)),
            Err(GameError::CellIsOccupied { row: 0, col: 0 })
        );
        assert_eq!(state, after_first);

        // also occupied when the waiting player owns the cell
        state.switch_turn();
        assert_eq!(
            state.apply_move(Position::new(0, 0)),
            Err(GameError::CellIsOccupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_switch_turn_twice_restores_bindings() {
        let mut state = fresh(3);
        let initial = state.clone();
        state.switch_turn();
        assert_eq!(state.active_player().mark(), Mark::O);
        assert_eq!(state.waiting_player().mark(), Mark::X);
        state.switch_turn();
        assert_eq!(state, initial);
    }

    #[test]
    fn test_switch_turn_touches_nothing_else() {
        let mut state = fresh(3);
        state.apply_move(Position::new(0, 1)).unwrap();
        let available_before = state.available_positions().clone();
        state.switch_turn();
        assert_eq!(*state.available_positions(), available_before);
        assert!(!state.is_draw());
    }

    #[test]
    fn test_diagonal_win_through_turn_sequence() {
        let mut state = fresh(3);
        let x_moves = [(0, 0), (1, 1), (2, 2)].map(Position::from);
        let o_moves = [(0, 1), (0, 2)].map(Position::from);

        for (i, &x_move) in x_moves.iter().enumerate() {
            state.apply_move(x_move).unwrap();
            let expect_win = i == 2;
            assert_eq!(state.has_active_player_won(), expect_win);
            if expect_win {
                break;
            }
            state.switch_turn();
            state.apply_move(o_moves[i]).unwrap();
            assert!(!state.has_active_player_won());
            state.switch_turn();
        }
        assert_eq!(state.active_player().mark(), Mark::X);
        assert!(state.has_active_player_won());
    }

    #[test]
    fn test_win_needs_at_least_grid_size_moves() {
        let mut state = fresh(3);
        state.apply_move(Position::new(0, 0)).unwrap();
        assert!(!state.has_active_player_won());
        state.apply_move(Position::new(0, 1)).unwrap();
        assert!(!state.has_active_player_won());
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // x o x
        // x o o
        // o x x
        let x_moves = [(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)].map(Position::from);
        let o_moves = [(0, 1), (1, 1), (1, 2), (2, 0)].map(Position::from);
        let mut state = GameState::new(
            3,
            Player::with_moves(Mark::X, PlayerKind::Human, x_moves.into()),
            Player::with_moves(Mark::O, PlayerKind::Bot, o_moves.into()),
        )
        .unwrap();

        assert!(state.is_draw());
        assert!(!state.has_active_player_won());
        state.switch_turn();
        assert!(!state.has_active_player_won());
    }

    #[test]
    fn test_single_cell_grid() {
        let mut state = fresh(1);
        assert_eq!(state.winning_combinations().len(), 4);
        assert_eq!(state.available_positions().len(), 1);
        state.apply_move(Position::new(0, 0)).unwrap();
        assert!(state.has_active_player_won());
    }

    #[test]
    fn test_mark_at() {
        let mut state = fresh(3);
        state.apply_move(Position::new(0, 0)).unwrap();
        state.switch_turn();
        state.apply_move(Position::new(1, 0)).unwrap();
        assert_eq!(state.mark_at(Position::new(0, 0)), Some(Mark::X));
        assert_eq!(state.mark_at(Position::new(1, 0)), Some(Mark::O));
        assert_eq!(state.mark_at(Position::new(2, 0)), None);
    }
}
