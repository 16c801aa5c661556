//! Random connected instances in `.uwg` form.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of nodes
    #[arg(short, long, default_value_t = 10)]
    pub nodes: usize,

    /// Probability of each extra (non-tree) edge
    #[arg(short, long, default_value_t = 0.3)]
    pub density: f64,

    /// Largest edge weight
    #[arg(long, default_value_t = 20)]
    pub max_weight: u64,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Instance shape.
#[derive(Debug, Clone, Copy)]
pub struct InstanceSpec {
    pub nodes: usize,
    pub density: f64,
    pub max_weight: u64,
}

/// Edges of a random connected simple graph on nodes `1..=nodes`.
///
/// A random spanning tree is laid down first, then every other pair is
/// added with probability `density`. Edge order is shuffled so that the
/// loader's mirror pairing varies between instances.
pub fn random_edges(rng: &mut ChaCha8Rng, spec: &InstanceSpec) -> Vec<(String, String, u64)> {
    let n = spec.nodes;
    let mut present = vec![vec![false; n]; n];
    let mut pairs = Vec::new();

    for v in 1..n {
        let u = rng.gen_range(0..v);
        present[u][v] = true;
        pairs.push((u, v));
    }

    for u in 0..n {
        for v in u + 1..n {
            if !present[u][v] && rng.gen_bool(spec.density) {
                present[u][v] = true;
                pairs.push((u, v));
            }
        }
    }

    pairs.shuffle(rng);
    pairs
        .into_iter()
        .map(|(u, v)| {
            (
                (u + 1).to_string(),
                (v + 1).to_string(),
                rng.gen_range(0..=spec.max_weight),
            )
        })
        .collect()
}

/// Write `edges` in `.uwg` form.
pub fn write_uwg<W: Write>(
    writer: &mut W,
    nodes: usize,
    edges: &[(String, String, u64)],
) -> io::Result<()> {
    writeln!(writer, "{}", nodes)?;
    writeln!(writer, "{}", edges.len())?;
    for (u, v, w) in edges {
        writeln!(writer, "{} {} {}", u, v, w)?;
    }
    Ok(())
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    ensure!(args.nodes >= 2, "need at least 2 nodes, got {}", args.nodes);
    ensure!(
        (0.0..=1.0).contains(&args.density),
        "density must be in [0, 1], got {}",
        args.density
    );

    let spec = InstanceSpec {
        nodes: args.nodes,
        density: args.density,
        max_weight: args.max_weight,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let edges = random_edges(&mut rng, &spec);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_uwg(&mut writer, spec.nodes, &edges)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writer.flush()?;
            log::info!(
                "Wrote {} nodes, {} edges to {}",
                spec.nodes,
                edges.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_uwg(&mut lock, spec.nodes, &edges)?;
        }
    }

    Ok(())
}
