//! Solve one `.uwg` instance.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use mfmst_core::load_uwg;
use mfmst_search::solve_mfmst;

use crate::report::{save_json, SolveReport};
use crate::strategy::SearchArgs;

/// Directory searched by `-g <XX>`.
const GRAPH_DIR: &str = "Graphs";

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Path of an undirected weighted graph (.uwg) file
    #[arg(short = 'f', long = "file", value_name = "UWG")]
    pub file: Option<PathBuf>,

    /// Use the graph at Graphs/test<XX>.uwg
    #[arg(short = 'g', long = "graph", value_name = "XX", conflicts_with = "file")]
    pub graph: Option<String>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Write the solution report as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl SolveArgs {
    /// Instance path from `-f` or `-g`.
    pub fn instance_path(&self) -> Result<PathBuf> {
        match (&self.file, &self.graph) {
            (Some(file), _) => Ok(file.clone()),
            (None, Some(id)) => Ok(PathBuf::from(GRAPH_DIR).join(format!("test{}.uwg", id))),
            (None, None) => bail!("missing graph file: pass -f <uwg file> or -g <XX>"),
        }
    }
}

pub fn run(args: &SolveArgs, verbose: bool) -> Result<()> {
    let path = args.instance_path()?;
    let graph = load_uwg(&path)
        .with_context(|| format!("Failed to load graph from {}", path.display()))?;

    let settings = args.search.settings(args.search.strategy, verbose);
    let solution = solve_mfmst(&graph, &settings).context("Solver rejected the settings")?;

    let report = SolveReport::new(
        &path.display().to_string(),
        args.search.strategy.name(),
        &graph,
        &solution,
    );
    report.print();

    if let Some(json) = &args.json {
        save_json(&report, json)?;
        log::info!("Report written to {}", json.display());
    }

    Ok(())
}
