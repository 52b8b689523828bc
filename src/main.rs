use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use rand::thread_rng;
use rand::Rng;
use std::collections::HashSet;
use std::env;

use slider_search::search::{astar, beam, bfs, dfs, greedy, ucs};
use slider_search::{belief, local, Board, Move, Solution};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let strategy = args.first().map(String::as_str).unwrap_or("astar");
    let size: usize = args
        .get(1)
        .map(|s| s.parse())
        .transpose()
        .context("grid size must be a number")?
        .unwrap_or(3);
    let steps: usize = args
        .get(2)
        .map(|s| s.parse())
        .transpose()
        .context("scramble steps must be a number")?
        .unwrap_or(12);

    let mut rng = thread_rng();
    if strategy == "belief" {
        run_belief(steps, &mut rng)
    } else {
        run_single(strategy, size, steps, &mut rng)
    }
}

fn run_single(strategy: &str, size: usize, steps: usize, rng: &mut impl Rng) -> Result<()> {
    let goal = Board::solved(size);
    let start = Board::scrambled(size, steps, rng);

    println!("{}", "Scrambled puzzle:".bold());
    println!("{}", start);

    let outcome = match strategy {
        "bfs" => bfs::solve(&start, &goal),
        "dfs" => dfs::solve(&start, &goal),
        "ucs" => ucs::solve(&start, &goal),
        "greedy" => greedy::solve(&start, &goal),
        "astar" => astar::solve(&start, &goal),
        "beam" => beam::solve(&start, &goal),
        "hill" => local::hill_climbing(&start, &goal),
        "steepest" => local::steepest_ascent(&start, &goal),
        "stochastic" => local::stochastic_hill_climbing(&start, &goal),
        "anneal" => local::simulated_annealing(&start, &goal),
        other => bail!(
            "unknown strategy '{}' (expected bfs, dfs, ucs, greedy, astar, beam, hill, \
             steepest, stochastic, anneal or belief)",
            other
        ),
    };

    match outcome {
        Solution::Found(path) => {
            println!(
                "{} {} actions",
                "Solved in".green().bold(),
                (path.len() - 1).to_string().green().bold()
            );
            for (i, board) in path.iter().enumerate().skip(1) {
                println!("{} {}", "Action".cyan(), i);
                println!("{}", board);
            }
        }
        Solution::NotFound => println!("{}", "No solution found.".red().bold()),
    }
    Ok(())
}

/// Blind-search demo: two candidate 3x3 starts scrambled off the goal
/// set, driven by one shared move sequence.
fn run_belief(steps: usize, rng: &mut impl Rng) -> Result<()> {
    let goals: HashSet<Board> = HashSet::from([
        Board::solved(3),
        Board::new(vec![1, 4, 7, 2, 5, 8, 3, 6, 9]).context("bad goal")?,
        Board::new(vec![1, 2, 3, 8, 9, 4, 7, 6, 5]).context("bad goal")?,
    ]);
    let starts = vec![
        Board::scrambled(3, steps, rng),
        Board::scrambled(3, steps, rng),
    ];

    println!("{}", "Candidate starts:".bold());
    for start in &starts {
        println!("{}", start);
    }

    match belief::solve(&starts, &goals) {
        Solution::Found(moves) => {
            let rendered: Vec<String> = moves.iter().map(Move::to_string).collect();
            println!(
                "{} {} moves: {}",
                "Common sequence of".green().bold(),
                moves.len(),
                rendered.join(" -> ")
            );
            for start in &starts {
                let mut state = start.clone();
                for &mv in &moves {
                    state = belief::apply_or_hold(&state, mv);
                }
                println!("{}", state);
            }
        }
        Solution::NotFound => println!("{}", "No common sequence found.".red().bold()),
    }
    Ok(())
}
