//! A* search keyed on f = g + h with the Manhattan heuristic.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::heuristic::manhattan;
use crate::neighbors;
use crate::search::{reconstruct, Solution};
use log::debug;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub cancel: CancelToken,
}

pub fn solve(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    solve_with(start, goal, &Options::default())
}

/// With the admissible Manhattan heuristic and non-negative costs, the
/// first time the goal is popped its cost is optimal. States pop at most
/// once thanks to the closed set; a cheaper route to an open state
/// re-inserts it rather than mutating the queue.
pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    let Some(start_h) = manhattan(start, goal) else {
        return Solution::NotFound;
    };

    // Entries are (f, g, state); f-ties pop in order of lower g.
    let mut queue: BinaryHeap<Reverse<(u32, u32, Board)>> = BinaryHeap::new();
    queue.push(Reverse((start_h, 0, start.clone())));
    let mut best_g: HashMap<Board, u32> = HashMap::from([(start.clone(), 0)]);
    let mut parent: HashMap<Board, Option<Board>> = HashMap::from([(start.clone(), None)]);
    let mut closed: HashSet<Board> = HashSet::new();

    while let Some(Reverse((_, g, current))) = queue.pop() {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        if !closed.insert(current.clone()) {
            continue;
        }
        if current == *goal {
            debug!(
                "astar: goal found at cost {} after {} expansions",
                g,
                closed.len()
            );
            return Solution::Found(reconstruct(goal, &parent));
        }
        for next in neighbors::with_compound(&current) {
            if closed.contains(&next.board) {
                continue;
            }
            let new_g = g + next.cost;
            if new_g < *best_g.get(&next.board).unwrap_or(&u32::MAX) {
                let Some(h) = manhattan(&next.board, goal) else {
                    continue;
                };
                best_g.insert(next.board.clone(), new_g);
                parent.insert(next.board.clone(), Some(current.clone()));
                queue.push(Reverse((new_g + h, new_g, next.board)));
            }
        }
    }

    Solution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::assert_valid_path;
    use crate::search::ucs;

    #[test]
    fn single_trailing_swap_costs_one() {
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let goal = Board::solved(3);
        let path = solve(&start, &goal).into_option().unwrap();
        assert_eq!(path, vec![start.clone(), goal.clone()]);
        assert_eq!(assert_valid_path(&path, &start, &goal), 1);
    }

    #[test_log::test]
    fn matches_uniform_cost_optimum() {
        let goal = Board::solved(3);
        for tiles in [
            vec![1, 2, 3, 4, 9, 5, 6, 7, 8],
            vec![4, 1, 3, 7, 2, 5, 9, 8, 6],
            vec![1, 2, 3, 7, 4, 6, 9, 5, 8],
        ] {
            let start = Board::new(tiles).unwrap();
            let astar_path = solve(&start, &goal).into_option().unwrap();
            let ucs_path = ucs::solve(&start, &goal).into_option().unwrap();
            let astar_cost = assert_valid_path(&astar_path, &start, &goal);
            let ucs_cost = assert_valid_path(&ucs_path, &start, &goal);
            assert_eq!(astar_cost, ucs_cost, "A* must return the optimal cost");
        }
    }

    #[test]
    fn shape_mismatch_fails_soft() {
        assert_eq!(
            solve(&Board::solved(2), &Board::solved(3)),
            Solution::NotFound
        );
    }

    #[test]
    fn unsolvable_pair_is_not_found() {
        let start = Board::new(vec![2, 1, 3, 4]).unwrap();
        let goal = Board::solved(2);
        assert_eq!(solve(&start, &goal), Solution::NotFound);
    }
}
