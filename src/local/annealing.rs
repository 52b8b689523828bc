//! Simulated annealing over the compound-move neighborhood.

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::heuristic::manhattan;
use crate::local::{restart_point, RestartPolicy};
use crate::neighbors;
use crate::search::Solution;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct AnnealingOptions {
    pub initial_temperature: f64,
    /// Geometric decay applied every iteration: `t *= 1 - cooling_rate`.
    pub cooling_rate: f64,
    /// The walk stops once the temperature falls below this floor.
    pub min_temperature: f64,
    pub max_iterations: usize,
    /// Attempts before giving up; the classic annealer runs one.
    pub max_restarts: usize,
    pub restart: RestartPolicy,
    pub cancel: CancelToken,
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        AnnealingOptions {
            initial_temperature: 100.0,
            cooling_rate: 0.005,
            min_temperature: 0.1,
            max_iterations: 50000,
            max_restarts: 1,
            restart: RestartPolicy::ResumeBest { probability: 0.7 },
            cancel: CancelToken::default(),
        }
    }
}

pub fn simulated_annealing(start: &Board, goal: &Board) -> Solution<Vec<Board>> {
    simulated_annealing_with(start, goal, &AnnealingOptions::default())
}

pub fn simulated_annealing_with(
    start: &Board,
    goal: &Board,
    opts: &AnnealingOptions,
) -> Solution<Vec<Board>> {
    simulated_annealing_with_rng(start, goal, opts, &mut rand::thread_rng())
}

/// Draws one neighbor uniformly at random each iteration, accepting it
/// outright when it improves the heuristic and with probability
/// `exp(-delta / temperature)` otherwise.
///
/// The best state ever seen is tracked separately from the trajectory and
/// only steers resume-from-best restarts; the returned path follows the
/// accepted random walk alone, so a run that never walks onto the goal
/// reports `NotFound` even if it brushed past better states.
pub fn simulated_annealing_with_rng(
    start: &Board,
    goal: &Board,
    opts: &AnnealingOptions,
    rng: &mut impl Rng,
) -> Solution<Vec<Board>> {
    if !start.is_solvable_to(goal) {
        debug!("annealing: inversion parity mismatch, no search performed");
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
        let mut current = if restart == 0 {
            start.clone()
        } else {
            restart_point(start, start_h, &best, best_h, opts.restart, rng)
        };
        let Some(mut current_h) = manhattan(&current, goal) else {
            return Solution::NotFound;
        };

        let mut path = vec![current.clone()];
        let mut temperature = opts.initial_temperature;
        let mut iterations = 0usize;

        while temperature > opts.min_temperature && iterations < opts.max_iterations {
            if opts.cancel.is_cancelled() {
                return Solution::NotFound;
            }
            iterations += 1;
            if current == *goal {
                debug!("annealing: goal reached after {} iterations", iterations);
                return Solution::Found(path);
            }

            let neighborhood = neighbors::with_compound(&current);
            let Some(pick) = neighborhood.choose(rng) else {
                break;
            };
            let Some(next_h) = manhattan(&pick.board, goal) else {
                continue;
            };

            let delta = next_h as f64 - current_h as f64;
            if delta < 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                current = pick.board.clone();
                current_h = next_h;
                path.push(current.clone());
                if current_h < best_h {
                    best = current.clone();
                    best_h = current_h;
                }
            }

            temperature *= 1.0 - opts.cooling_rate;
        }

        // The walk may land on the goal with its final accepted step.
        if current == *goal {
            debug!("annealing: goal reached as the walk froze");
            return Solution::Found(path);
        }
    }

    debug!("annealing: walk froze away from the goal, best h = {}", best_h);
    Solution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::assert_valid_path;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn start_equal_to_goal() {
        let goal = Board::solved(3);
        assert_eq!(
            simulated_annealing(&goal, &goal),
            Solution::Found(vec![goal.clone()])
        );
    }

    #[test]
    fn parity_mismatch_short_circuits() {
        let start = Board::new(vec![2, 1, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        let goal = Board::solved(3);
        assert_eq!(simulated_annealing(&start, &goal), Solution::NotFound);
    }

    #[test]
    fn found_walks_are_legal_paths() {
        let goal = Board::solved(3);
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        for seed in 0..4u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Solution::Found(path) =
                simulated_annealing_with_rng(&start, &goal, &AnnealingOptions::default(), &mut rng)
            {
                assert_valid_path(&path, &start, &goal);
            }
        }
    }

    #[test]
    fn cancellation_returns_not_found() {
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let goal = Board::solved(3);
        let opts = AnnealingOptions::default();
        opts.cancel.cancel();
        assert_eq!(
            simulated_annealing_with(&start, &goal, &opts),
            Solution::NotFound
        );
    }

    #[test]
    fn frozen_temperature_prevents_any_walk() {
        let start = Board::new(vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        let goal = Board::solved(3);
        let opts = AnnealingOptions {
            initial_temperature: 0.05,
            ..AnnealingOptions::default()
        };
        // Temperature starts below the floor, so the walk never moves.
        assert_eq!(
            simulated_annealing_with(&start, &goal, &opts),
            Solution::NotFound
        );
    }
}
