//! Trajectory-based local search: the hill-climbing family and simulated
//! annealing. All variants walk the compound-move neighborhood, keep a
//! per-attempt visited set to avoid cycling, and share one restart policy.

mod annealing;

pub use annealing::{
    simulated_annealing, simulated_annealing_with, simulated_annealing_with_rng, AnnealingOptions,
};

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::heuristic::manhattan;
use crate::neighbors;
use crate::search::Solution;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Where a failed attempt restarts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestartPolicy {
    /// Every restart begins again at the original start state.
    FromStart,
    /// With the given probability, resume from the best state seen so far
    /// (only once it actually improves on the start); otherwise fall back
    /// to the original start.
    ResumeBest { probability: f64 },
}

#[derive(Debug, Clone)]
pub struct ClimbOptions {
    /// Steps allowed within one attempt.
    pub max_iterations: usize,
    /// Attempts before giving up.
    pub max_restarts: usize,
    /// Consecutive stuck steps tolerated before the attempt ends. Ignored
    /// by steepest ascent, which never takes a non-improving step.
    pub patience: u32,
    pub restart: RestartPolicy,
    pub cancel: CancelToken,
}

impl ClimbOptions {
    /// Defaults for first-choice hill-climbing.
    pub fn first_choice() -> Self {
        ClimbOptions {
            max_iterations: 1000,
            max_restarts: 50,
            patience: 5,
            restart: RestartPolicy::ResumeBest { probability: 0.7 },
            cancel: CancelToken::default(),
        }
    }

    /// Defaults for steepest-ascent hill-climbing.
    pub fn steepest_ascent() -> Self {
        ClimbOptions {
            patience: 0,
            ..ClimbOptions::first_choice()
        }
    }

    /// Defaults for stochastic hill-climbing.
    pub fn stochastic() -> Self {
        ClimbOptions {
            max_iterations: 10000,
            max_restarts: 20,
            patience: 10,
            restart: RestartPolicy::ResumeBest { probability: 0.6 },
            cancel: CancelToken::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Variant {
    FirstChoice,
    SteepestAscent,
    Stochastic,
}

pub fn hill_climbing(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    hill_climbing_with(start, goal, &ClimbOptions::first_choice())
}

pub fn hill_climbing_with(start: &Board, goal: &Board, opts: &ClimbOptions) -> Solution<Vec<Board>> {
    hill_climbing_with_rng(start, goal, opts, &mut rand::thread_rng())
}

/// Moves to the best of the strictly-improving neighbors; when none
/// exist, takes a random unvisited neighbor until patience runs out.
pub fn hill_climbing_with_rng(
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
    rng: &mut impl Rng,
) -> Solution<Vec<Board>> {
    climb(Variant::FirstChoice, start, goal, opts, rng)
}

pub fn steepest_ascent(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    steepest_ascent_with(start, goal, &ClimbOptions::steepest_ascent())
}

pub fn steepest_ascent_with(
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
) -> Solution<Vec<Board>> {
    steepest_ascent_with_rng(start, goal, opts, &mut rand::thread_rng())
}

/// Like first-choice climbing, but an attempt with no strictly-improving
/// neighbor ends on the spot.
pub fn steepest_ascent_with_rng(
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
    rng: &mut impl Rng,
) -> Solution<Vec<Board>> {
    climb(Variant::SteepestAscent, start, goal, opts, rng)
}

pub fn stochastic_hill_climbing(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    stochastic_hill_climbing_with(start, goal, &ClimbOptions::stochastic())
}

pub fn stochastic_hill_climbing_with(
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
) -> Solution<Vec<Board>> {
    stochastic_hill_climbing_with_rng(start, goal, opts, &mut rand::thread_rng())
}

/// Picks uniformly among the strictly-improving neighbors to diversify
/// the trajectory; keeps the first-choice stuck escape.
pub fn stochastic_hill_climbing_with_rng(
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
    rng: &mut impl Rng,
) -> Solution<Vec<Board>> {
    climb(Variant::Stochastic, start, goal, opts, rng)
}

/// Picks the restart point for attempts after the first.
pub(crate) fn restart_point(
    start: &Board,
    start_h: u32,
    best: &Board,
    best_h: u32,
    policy: RestartPolicy,
    rng: &mut impl Rng,
) -> Board {
    match policy {
        RestartPolicy::FromStart => start.clone(),
        RestartPolicy::ResumeBest { probability } => {
            if best_h < start_h && rng.gen::<f64>() < probability {
                best.clone()
            } else {
                start.clone()
            }
        }
    }
}

fn climb(
    variant: Variant,
    start: &Board,
    goal: &Board,
    opts: &ClimbOptions,
    rng: &mut impl Rng,
) -> Solution<Vec<Board>> {
    if !start.is_solvable_to(goal) {
        debug!("climb: inversion parity mismatch, no search performed");
        return Solution::NotFound;
    }
    let Some(start_h) = manhattan(start, goal) else {
        return Solution::NotFound;
    };
    if start == goal {
        return Solution::Found(vec![start.clone()]);
    }

    let mut best = start.clone();
    let mut best_h = start_h;

    for restart in 0..opts.max_restarts {
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        let mut current = if restart == 0 {
            start.clone()
        } else {
            restart_point(start, start_h, &best, best_h, opts.restart, rng)
        };
        let Some(mut current_h) = manhattan(&current, goal) else {
            return Solution::NotFound;
        };

        let mut path = vec![current.clone()];
        let mut visited: HashSet<Board> = HashSet::from([current.clone()]);
        let mut stuck = 0u32;
        let mut iterations = 0usize;

        while current != *goal && iterations < opts.max_iterations {
            if opts.cancel.is_cancelled() {
                return Solution::NotFound;
            }
            iterations += 1;

            let neighborhood = neighbors::with_compound(&current);
            let mut improving: Vec<(Board, u32)> = neighborhood
                .iter()
                .filter(|n| !visited.contains(&n.board))
                .filter_map(|n| manhattan(&n.board, goal).map(|h| (n.board.clone(), h)))
                .filter(|&(_, h)| h < current_h)
                .collect();

            let next = if !improving.is_empty() {
                stuck = 0;
                match variant {
                    Variant::FirstChoice | Variant::SteepestAscent => {
                        improving.sort_by_key(|&(_, h)| h);
                        Some(improving.swap_remove(0))
                    }
                    Variant::Stochastic => improving.choose(rng).cloned(),
                }
            } else {
                match variant {
                    Variant::SteepestAscent => None,
                    Variant::FirstChoice | Variant::Stochastic => {
                        stuck += 1;
                        if stuck >= opts.patience {
                            None
                        } else {
                            // Sideways/uphill escape from the local optimum.
                            let unvisited: Vec<&Board> = neighborhood
                                .iter()
                                .map(|n| &n.board)
                                .filter(|b| !visited.contains(*b))
                                .collect();
                            unvisited.choose(rng).and_then(|&b| {
                                manhattan(b, goal).map(|h| (b.clone(), h))
                            })
                        }
                    }
                }
            };

            let Some((next_state, next_h)) = next else {
                break;
            };
            current = next_state;
            current_h = next_h;
            path.push(current.clone());
            visited.insert(current.clone());

            if current_h < best_h {
                best = current.clone();
                best_h = current_h;
            }
            if current == *goal {
                debug!(
                    "climb: goal reached on restart {} after {} iterations",
                    restart, iterations
                );
                return Solution::Found(path);
            }
        }
        // A failed attempt contributes nothing to the returned path.
    }

    debug!("climb: no attempt reached the goal, best h = {}", best_h);
    Solution::NotFound
}
