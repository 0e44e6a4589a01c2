//! Binary that solves a river-crossing puzzle and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `solve_fixture [puzzle.json]`
//!
//! Without an argument the built-in fox/goose/grain puzzle is used.
//! Output: key=value lines, then the rendered solution. Logs go to stderr
//! (filter with `RUST_LOG`).

use std::path::Path;

use ferry_harness::config::{load_puzzle_config, PuzzleConfigV1};
use ferry_harness::runner::run_search;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_puzzle_config(Path::new(&path)).expect("puzzle config failed to load"),
        None => {
            tracing::debug!("no config given, using built-in fox_goose_grain");
            PuzzleConfigV1::fox_goose_grain()
        }
    };
    let config_digest = config.digest().expect("config digest failed");
    let policy = config.policy().expect("invalid budgets");
    let world = config.into_world().expect("invalid puzzle config");

    let report = run_search(&world, &policy).expect("search run failed");
    let term_type = ferry_search::graph::termination_reason_to_json(
        &report.graph.metadata.termination_reason,
    )["type"]
        .as_str()
        .expect("termination reason has a type")
        .to_string();

    println!("world_id={}", report.world_id);
    println!("config_digest={}", config_digest.as_str());
    println!("search_graph_digest={}", report.graph_digest.as_str());
    println!("report_digest={}", report.digest.as_str());
    println!("termination_reason={term_type}");
    println!("total_expansions={}", report.graph.metadata.total_expansions);
    println!(
        "solution_len={}",
        report.solution().map_or(0, <[String]>::len)
    );
    for line in &report.rendered {
        println!("{line}");
    }
}
