use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches, Command};
use hexicut::algorithm::{QueryResult, ShortestPathClassic, ShortestPathPruned};
use hexicut::graph::{GetStats, ShortcutGraph};
use hexicut::EdgeId;
use mimalloc::MiMalloc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod io;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let app = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand(
            Command::new("query")
                .about("Run a single shortest-path query")
                .arg(input_arg("shortcuts", "shortcut Parquet file or directory"))
                .arg(input_arg("edges", "edge metadata CSV file"))
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help("source edge id")
                        .required(true),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .help("target edge id")
                        .required(true),
                )
                .arg(
                    Arg::new("algorithm")
                        .long("algorithm")
                        .help("query algorithm: classic or pruned")
                        .default_value("pruned"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Load a graph and print some basic stats")
                .arg(input_arg("shortcuts", "shortcut Parquet file or directory"))
                .arg(input_arg("edges", "edge metadata CSV file")),
        );

    dispatch_command(app.get_matches())
}

fn input_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).required(true)
}

fn dispatch_command(matches: ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("query", sc_matches)) => subcommand_query(sc_matches)?,
        Some(("stats", sc_matches)) => subcommand_stats(sc_matches)?,
        _ => {
            println!("unknown subcommand");
        }
    }
    Ok(())
}

fn load_graph(sc_matches: &ArgMatches) -> Result<ShortcutGraph> {
    let shortcuts_path: &String = sc_matches.get_one("shortcuts").unwrap();
    let edges_path: &String = sc_matches.get_one("edges").unwrap();

    let started = Instant::now();
    let graph = io::load_graph(Path::new(shortcuts_path), Path::new(edges_path))?;
    info!(
        "loaded {} shortcuts and {} edge records in {:.1}ms",
        graph.num_shortcuts(),
        graph.num_edge_records(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(graph)
}

fn subcommand_query(sc_matches: &ArgMatches) -> Result<()> {
    let source: EdgeId = sc_matches.get_one::<String>("source").unwrap().parse()?;
    let target: EdgeId = sc_matches.get_one::<String>("target").unwrap().parse()?;
    let algorithm: &String = sc_matches.get_one("algorithm").unwrap();

    let graph = load_graph(sc_matches)?;

    let started = Instant::now();
    let result = match algorithm.as_str() {
        "classic" => graph.shortest_path_classic(source, target),
        "pruned" => graph.shortest_path_pruned(source, target),
        other => bail!("unknown algorithm: {}", other),
    };
    let query_ms = started.elapsed().as_secs_f64() * 1000.0;

    print_result(source, target, &result);
    println!("query time: {:.3}ms", query_ms);
    Ok(())
}

fn print_result(source: EdgeId, target: EdgeId, result: &QueryResult) {
    if !result.reachable {
        println!("no path found from {} to {}", source, target);
        return;
    }
    println!("distance: {}", result.distance);
    println!("path length: {} edges", result.path.len());

    const MAX_SHOWN: usize = 10;
    let shown: Vec<String> = result
        .path
        .iter()
        .take(MAX_SHOWN)
        .map(|edge| edge.to_string())
        .collect();
    let suffix = if result.path.len() > MAX_SHOWN {
        " -> ..."
    } else {
        ""
    };
    println!("path: {}{}", shown.join(" -> "), suffix);
}

fn subcommand_stats(sc_matches: &ArgMatches) -> Result<()> {
    let graph = load_graph(sc_matches)?;
    println!("{}", serde_yaml::to_string(&graph.get_stats())?);
    Ok(())
}
