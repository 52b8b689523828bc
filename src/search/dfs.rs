//! Depth-first search with a hard depth bound.
//!
//! Returns the first path found, which depends on the neighbor
//! enumeration order of the shared generator, an implementation detail
//! callers must not rely on. No optimality guarantee.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::neighbors;
use crate::search::{reconstruct, Solution};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Options {
    /// States deeper than this many actions are not expanded.
    pub max_depth: usize,
    pub cancel: CancelToken,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: 50,
            cancel: CancelToken::default(),
        }
    }
}

pub fn solve(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    solve_with(start, goal, &Options::default())
}

pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    if start.size() != goal.size() {
        return Solution::NotFound;
    }
    if start == goal {
        return Solution::Found(vec![start.clone()]);
    }

    let mut stack = vec![start.clone()];
    let mut parent: HashMap<Board, Option<Board>> = HashMap::from([(start.clone(), None)]);
    let mut depth: HashMap<Board, usize> = HashMap::from([(start.clone(), 0)]);

    while let Some(current) = stack.pop() {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        if current == *goal {
            debug!("dfs: goal found, {} states remembered", parent.len());
            return Solution::Found(reconstruct(goal, &parent));
        }
        let current_depth = depth[&current];
        if current_depth >= opts.max_depth {
            continue;
        }
        for next in neighbors::with_compound(&current) {
            if parent.contains_key(&next.board) {
                continue;
            }
            parent.insert(next.board.clone(), Some(current.clone()));
            depth.insert(next.board.clone(), current_depth + 1);
            stack.push(next.board);
        }
    }

    Solution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::assert_valid_path;

    #[test]
    fn finds_some_path_within_the_bound() {
        // Small grid keeps the worst-case dive cheap; DFS may return any
        // legal path, so only validity and the bound are asserted.
        let goal = Board::solved(2);
        let start = goal
            .apply(crate::board::Move::Up)
            .and_then(|b| b.apply(crate::board::Move::Left))
            .unwrap();
        let path = solve(&start, &goal).into_option().unwrap();
        assert_valid_path(&path, &start, &goal);
        assert!(path.len() - 1 <= Options::default().max_depth);
    }

    #[test]
    fn zero_depth_only_solves_the_trivial_case() {
        let goal = Board::solved(3);
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let opts = Options {
            max_depth: 0,
            ..Options::default()
        };
        assert_eq!(solve_with(&start, &goal, &opts), Solution::NotFound);
        assert_eq!(
            solve_with(&goal, &goal, &opts),
            Solution::Found(vec![goal.clone()])
        );
    }

    #[test]
    fn unsolvable_pair_is_not_found() {
        let start = Board::new(vec![2, 1, 3, 4]).unwrap();
        let goal = Board::solved(2);
        assert_eq!(solve(&start, &goal), Solution::NotFound);
    }
}
