//! Move selection for the scripted opponent.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::{Board, Mark};

/// Chooses the scripted opponent's next cell.
///
/// `Send` because the strategy lives inside the coordinator, which is
/// shared across connection tasks behind a mutex.
pub trait MoveStrategy: Send {
    /// Picks an open cell for `own` to play on `board`.
    ///
    /// Returns `None` only when the board has no open cell.
    fn choose(&mut self, board: &Board, own: Mark) -> Option<usize>;
}

/// The default opponent: win if possible, else block, else random.
pub struct Heuristic<R = StdRng> {
    rng: R,
}

impl Heuristic<StdRng> {
    /// A heuristic seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A heuristic with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Heuristic<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> MoveStrategy for Heuristic<R> {
    fn choose(&mut self, board: &Board, own: Mark) -> Option<usize> {
        if let Some(cell) = board.winning_cell(own) {
            return Some(cell);
        }
        if let Some(cell) = board.winning_cell(own.opponent()) {
            return Some(cell);
        }
        let open: Vec<usize> = board.open_cells().collect();
        open.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(x: &[usize], o: &[usize]) -> Board {
        let mut b = Board::new();
        for &c in x {
            b.place(c, Mark::X);
        }
        for &c in o {
            b.place(c, Mark::O);
        }
        b
    }

    #[test]
    fn test_choose_takes_winning_cell() {
        // O can win at 2 (right column); X threatens at 6. Winning
        // comes first.
        let b = board(&[0, 3], &[5, 8]);
        let mut ai = Heuristic::seeded(1);
        assert_eq!(ai.choose(&b, Mark::O), Some(2));
    }

    #[test]
    fn test_choose_blocks_opponent_line() {
        // X threatens the left column at 6; O has no win.
        let b = board(&[0, 3], &[4]);
        let mut ai = Heuristic::seeded(1);
        assert_eq!(ai.choose(&b, Mark::O), Some(6));
    }

    #[test]
    fn test_choose_random_cell_is_open() {
        let b = board(&[4], &[]);
        for seed in 0..32 {
            let mut ai = Heuristic::seeded(seed);
            let cell = ai.choose(&b, Mark::O).expect("board has open cells");
            assert!(b.is_open(cell), "seed {seed} picked taken cell {cell}");
        }
    }

    #[test]
    fn test_choose_same_seed_same_choice() {
        let b = Board::new();
        let a = Heuristic::seeded(7).choose(&b, Mark::O);
        let c = Heuristic::seeded(7).choose(&b, Mark::O);
        assert_eq!(a, c);
    }

    #[test]
    fn test_choose_full_board_returns_none() {
        let b = board(&[0, 2, 3, 5, 7], &[1, 4, 6, 8]);
        let mut ai = Heuristic::seeded(1);
        assert_eq!(ai.choose(&b, Mark::O), None);
    }
}
