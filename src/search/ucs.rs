//! Uniform-cost search: minimum total cost under the 1/2 move costing.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::neighbors;
use crate::search::{reconstruct, Solution};
use log::debug;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub cancel: CancelToken,
}

pub fn solve(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    solve_with(start, goal, &Options::default())
}

/// A state may sit in the queue several times with different costs; stale
/// entries are recognized on pop by comparing against the best known cost.
pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    if start.size() != goal.size() {
        return Solution::NotFound;
    }

    let mut queue: BinaryHeap<Reverse<(u32, Board)>> = BinaryHeap::new();
    queue.push(Reverse((0, start.clone())));
    let mut best_cost: HashMap<Board, u32> = HashMap::from([(start.clone(), 0)]);
    let mut parent: HashMap<Board, Option<Board>> = HashMap::from([(start.clone(), None)]);

    while let Some(Reverse((cost, current))) = queue.pop() {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        if cost > *best_cost.get(&current).unwrap_or(&u32::MAX) {
            continue;
        }
        if current == *goal {
            debug!("ucs: goal found at cost {}", cost);
            return Solution::Found(reconstruct(goal, &parent));
        }
        for next in neighbors::with_compound(&current) {
            let new_cost = cost + next.cost;
            if new_cost < *best_cost.get(&next.board).unwrap_or(&u32::MAX) {
                best_cost.insert(next.board.clone(), new_cost);
                parent.insert(next.board.clone(), Some(current.clone()));
                queue.push(Reverse((new_cost, next.board)));
            }
        }
    }

    Solution::NotFound
}
