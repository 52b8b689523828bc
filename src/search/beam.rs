//! Beam search: heuristic best-first with a width-bounded frontier.
//!
//! Incomplete: the round cut can discard the only path to the goal, and
//! a depth bound guards against running forever.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::heuristic::manhattan;
use crate::neighbors;
use crate::search::Solution;
use log::debug;

#[derive(Debug, Clone)]
pub struct Options {
    /// How many candidates survive into the next round.
    pub beam_width: usize,
    /// Maximum number of expansion rounds.
    pub max_depth: usize,
    pub cancel: CancelToken,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            beam_width: 10,
            max_depth: 100,
            cancel: CancelToken::default(),
        }
    }
}

pub fn solve(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    solve_with(start, goal, &Options::default())
}

/// Every frontier entry is expanded each round; the `beam_width` children
/// with the lowest heuristic survive. Ties keep discovery order (the sort
/// is stable), which makes the cut deterministic.
pub fn solve_with(start: &Board, goal: &Board, opts: &Options) -> Solution<Vec<Board>> {
    let Some(start_h) = manhattan(start, goal) else {
        return Solution::NotFound;
    };

    let mut beam: Vec<(u32, Board, Vec<Board>)> = vec![(start_h, start.clone(), vec![start.clone()])];
    let mut visited = std::collections::HashSet::from([start.clone()]);

    for round in 0..opts.max_depth {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }

        let mut candidates: Vec<(u32, Board, Vec<Board>)> = Vec::new();
        for (_, state, path) in &beam {
            if state == goal {
                debug!("beam: goal found after {} rounds", round);
                return Solution::Found(path.clone());
            }
            for next in neighbors::with_compound(state) {
                if !visited.insert(next.board.clone()) {
                    continue;
                }
                if let Some(h) = manhattan(&next.board, goal) {
                    let mut next_path = path.clone();
                    next_path.push(next.board.clone());
                    candidates.push((h, next.board, next_path));
                }
            }
        }

        candidates.sort_by_key(|(h, _, _)| *h);
        candidates.truncate(opts.beam_width);
        beam = candidates;
        if beam.is_empty() {
            debug!("beam: frontier emptied in round {}", round);
            break;
        }
    }

    Solution::NotFound
}
