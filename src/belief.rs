//! Belief-state search: one shared, unobservable action sequence that
//! drives several simultaneous boards into a common goal set.
//!
//! Used when the true start among K candidates is unknown. The frontier
//! holds whole belief states (canonically sorted member lists); a member
//! for which a direction is invalid keeps its previous configuration
//! instead of failing the collective move, so a member can lag behind
//! the others for any number of steps.

use crate::board::{Board, Move};
use crate::cancel::CancelToken;
use crate::search::Solution;
use log::debug;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone)]
pub struct Options {
    /// Belief expansions allowed before giving up.
    pub max_iterations: usize,
    /// Longest action sequence considered.
    pub max_depth: usize,
    pub cancel: CancelToken,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_iterations: 300_000,
            max_depth: 60,
            cancel: CancelToken::default(),
        }
    }
}

/// Applies `mv` to `board`, or hands the board back unchanged when the
/// move is invalid for it. Every belief expansion follows this rule, and
/// consumers use it to replay a returned sequence.
pub fn apply_or_hold(board: &Board, mv: Move) -> Board {
    board.apply(mv).unwrap_or_else(|| board.clone())
}

pub fn solve(starts: &[Board], goals: &HashSet<Board>) -> Solution<Vec<Move>> {
    solve_with(starts, goals, &Options::default())
}

/// Breadth-first over the product space, so the returned sequence is the
/// shortest that lands every member in the goal set simultaneously.
pub fn solve_with(starts: &[Board], goals: &HashSet<Board>, opts: &Options) -> Solution<Vec<Move>> {
    if starts.is_empty() {
        return Solution::NotFound;
    }
    let mut initial: Vec<Board> = starts.to_vec();
    initial.sort();
    if initial.iter().all(|b| goals.contains(b)) {
        return Solution::Found(Vec::new());
    }

    let mut queue: VecDeque<(Vec<Board>, Vec<Move>)> = VecDeque::from([(initial.clone(), Vec::new())]);
    let mut visited: HashSet<Vec<Board>> = HashSet::from([initial]);
    let mut iterations = 0usize;

    while let Some((belief, path)) = queue.pop_front() {
        iterations += 1;
        if iterations > opts.max_iterations {
            debug!("belief: iteration cap reached at depth {}", path.len());
            return Solution::NotFound;
        }
        if opts.cancel.is_cancelled() {
            return Solution::NotFound;
        }
        if path.len() >= opts.max_depth {
            continue;
        }

        for mv in Move::ALL {
            let mut next: Vec<Board> = belief.iter().map(|b| apply_or_hold(b, mv)).collect();
            next.sort();
            if visited.contains(&next) {
                continue;
            }
            if next.iter().all(|b| goals.contains(b)) {
                let mut found = path.clone();
                found.push(mv);
                debug!(
                    "belief: common sequence of {} moves after {} expansions",
                    found.len(),
                    iterations
                );
                return Solution::Found(found);
            }
            visited.insert(next.clone());
            let mut next_path = path.clone();
            next_path.push(mv);
            queue.push_back((next, next_path));
        }
    }

    debug!("belief: frontier exhausted after {} expansions", iterations);
    Solution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_set() -> HashSet<Board> {
        // The three acceptable targets the blind-search screen drives to.
        HashSet::from([
            Board::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap(),
            Board::new(vec![1, 4, 7, 2, 5, 8, 3, 6, 9]).unwrap(),
            Board::new(vec![1, 2, 3, 8, 9, 4, 7, 6, 5]).unwrap(),
        ])
    }

    #[test]
    fn already_at_goals_needs_no_moves() {
        let goals = goal_set();
        let starts = vec![
            Board::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap(),
            Board::new(vec![1, 4, 7, 2, 5, 8, 3, 6, 9]).unwrap(),
        ];
        assert_eq!(solve(&starts, &goals), Solution::Found(Vec::new()));
    }

    #[test]
    fn empty_start_set_is_not_found() {
        assert_eq!(solve(&[], &goal_set()), Solution::NotFound);
    }

    #[test_log::test]
    fn held_member_lets_the_other_catch_up() {
        let goal = Board::solved(3);
        let goals = HashSet::from([goal.clone()]);
        // One member a single slide behind, one already home. Down is
        // invalid for the solved member (blank on the bottom row), so it
        // holds while the lagging member catches up.
        let behind = goal.apply(Move::Up).unwrap();
        let starts = vec![behind.clone(), goal.clone()];

        let moves = solve(&starts, &goals).into_option().unwrap();
        assert_eq!(moves, vec![Move::Down]);
        for start in &starts {
            let mut state = start.clone();
            for &mv in &moves {
                state = apply_or_hold(&state, mv);
            }
            assert!(goals.contains(&state));
        }
    }

    #[test]
    fn shortest_common_sequence_for_two_candidates() {
        let goals = goal_set();
        let canonical = Board::solved(3);
        // Two candidate starts, each one slide away from the canonical
        // goal in different directions.
        let s1 = canonical.apply(Move::Up).unwrap();
        let s2 = canonical.apply(Move::Left).unwrap();
        let moves = solve(&[s1.clone(), s2.clone()], &goals)
            .into_option()
            .unwrap();
        assert!(!moves.is_empty());
        for start in [&s1, &s2] {
            let mut state = start.clone();
            for &mv in &moves {
                state = apply_or_hold(&state, mv);
            }
            assert!(goals.contains(&state), "member did not reach a goal");
        }
    }

    #[test]
    fn iteration_cap_fails_soft() {
        let goal = Board::solved(3);
        let goals = HashSet::from([goal.clone()]);
        let behind = goal.apply(Move::Up).and_then(|b| b.apply(Move::Left)).unwrap();
        let opts = Options {
            max_iterations: 1,
            ..Options::default()
        };
        assert_eq!(
            solve_with(&[behind], &goals, &opts),
            Solution::NotFound
        );
    }

    #[test]
    fn depth_bound_fails_soft() {
        let goal = Board::solved(3);
        let goals = HashSet::from([goal.clone()]);
        let behind = goal.apply(Move::Up).and_then(|b| b.apply(Move::Left)).unwrap();
        let opts = Options {
            max_depth: 1,
            ..Options::default()
        };
        assert_eq!(
            solve_with(&[behind], &goals, &opts),
            Solution::NotFound
        );
    }
}
