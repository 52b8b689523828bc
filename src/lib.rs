//! Sliding-puzzle solving with interchangeable search strategies.
//!
//! One state/move model (square boards, blank-relative moves, and a
//! compound move that chains two slides into a single cost-2 action) is
//! shared by uninformed search ([`search::bfs`], [`search::dfs`],
//! [`search::ucs`]), heuristic search ([`search::greedy`],
//! [`search::astar`], [`search::beam`]), the local-search family
//! ([`local`]), and a belief-state searcher ([`belief`]) that drives
//! several boards at once with one unobserved action sequence.

pub mod belief;
pub mod board;
pub mod cancel;
pub mod heuristic;
pub mod local;
pub mod neighbors;
pub mod search;

pub use board::{Board, BoardError, Move};
pub use cancel::CancelToken;
pub use search::Solution;
