//! Breadth-first search: fewest actions, counting a compound move as one.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::neighbors;
use crate::search::{reconstruct, Solution};
use log::debug;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub cancel: CancelToken,
}

pub fn solve(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    solve_with(start, goal, &Options::default())
}

/// Explores by increasing action count; the first path to reach the goal
/// has the fewest actions, though not necessarily the lowest cost.
pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    if start.size() != goal.size() {
        return Solution::NotFound;
    }
    if start == goal {
        return Solution::Found(vec![start.clone()]);
    }

    let mut queue = VecDeque::from([start.clone()]);
    // Keys double as the visited set; the root maps to None.
    let mut parent: HashMap<Board, Option<Board>> = HashMap::from([(start.clone(), None)]);
    let mut expanded = 0usize;

    while let Some(current) = queue.pop_front() {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        expanded += 1;
        for next in neighbors::with_compound(&current) {
            if parent.contains_key(&next.board) {
                continue;
            }
            parent.insert(next.board.clone(), Some(current.clone()));
            if next.board == *goal {
                debug!("bfs: goal found after {} expansions", expanded);
                return Solution::Found(reconstruct(goal, &parent));
            }
            queue.push_back(next.board);
        }
    }

    debug!("bfs: frontier exhausted after {} expansions", expanded);
    Solution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::assert_valid_path;

    #[test]
    fn single_trailing_swap_solved_in_one_action() {
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let goal = Board::solved(3);
        let path = solve(&start, &goal).into_option().unwrap();
        assert_eq!(path, vec![start, goal]);
    }

    #[test]
    fn start_equal_to_goal() {
        let goal = Board::solved(3);
        assert_eq!(solve(&goal, &goal), Solution::Found(vec![goal.clone()]));
    }

    #[test]
    fn shape_mismatch_fails_soft() {
        let start = Board::solved(2);
        let goal = Board::solved(3);
        assert_eq!(solve(&start, &goal), Solution::NotFound);
    }

    #[test_log::test]
    fn finds_a_valid_minimal_action_path() {
        let goal = Board::solved(3);
        // Goal after Up, Up, Left (blank ends in the middle-right area).
        let start = goal
            .apply(crate::board::Move::Up)
            .and_then(|b| b.apply(crate::board::Move::Up))
            .and_then(|b| b.apply(crate::board::Move::Left))
            .unwrap();
        let path = solve(&start, &goal).into_option().unwrap();
        assert_valid_path(&path, &start, &goal);
        // Three slides fit into two actions (one compound + one single),
        // and no single action can undo three slides.
        assert_eq!(path.len() - 1, 2);
    }

    #[test]
    fn unsolvable_pair_exhausts_to_not_found() {
        // Swapping two non-blank tiles on a 2x2 grid lands in the other
        // parity class; the frontier drains without reaching the goal.
        let start = Board::new(vec![2, 1, 3, 4]).unwrap();
        let goal = Board::solved(2);
        assert_eq!(solve(&start, &goal), Solution::NotFound);
    }

    #[test]
    fn cancellation_returns_not_found() {
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let goal = Board::solved(3);
        let opts = Options {
            cancel: CancelToken::new(),
        };
        opts.cancel.cancel();
        assert_eq!(solve_with(&start, &goal, &opts), Solution::NotFound);
    }
}
