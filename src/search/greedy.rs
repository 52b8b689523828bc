//! Greedy best-first search: frontier ordered by heuristic alone.

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

/// No cost accounting and no optimality claim; a state counts as visited
/// only once popped, and re-popped states are skipped. Until then its
/// parent link may be overwritten by a later discovery.
pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    let Some(start_h) = manhattan(start, goal) else {
        return Solution::NotFound;
    };

    let mut queue: BinaryHeap<Reverse<(u32, Board)>> = BinaryHeap::new();
    queue.push(Reverse((start_h, start.clone())));
    let mut parent: HashMap<Board, Option<Board>> = HashMap::from([(start.clone(), None)]);
    let mut visited: HashSet<Board> = HashSet::new();

    while let Some(Reverse((_, current))) = queue.pop() {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        if current == *goal {
            debug!("greedy: goal found after {} expansions", visited.len());
            return Solution::Found(reconstruct(goal, &parent));
        }
        for next in neighbors::with_compound(&current) {
            if visited.contains(&next.board) {
                continue;
            }
            if let Some(h) = manhattan(&next.board, goal) {
                parent.insert(next.board.clone(), Some(current.clone()));
                queue.push(Reverse((h, next.board)));
            }
        }
    }

    Solution::NotFound
}
