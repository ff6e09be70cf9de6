use anyhow::Context;
use clap::Parser;
use pmm_bench::{find_mismatches, hardware_threads, measure, random_matrix, Report};
use pmm_core::{Element, Multiplier, ParallelConfig, ParallelMultiplier, SequentialMultiplier};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Compare sequential and parallel matrix multiplication on random inputs
#[derive(Parser, Debug)]
#[command(name = "pmm-bench", version, about)]
struct Args {
    /// Rows of A (and of the result)
    #[arg(long, default_value_t = 1000)]
    rows_a: usize,

    /// Columns of A, which is also the row count of B
    #[arg(long, default_value_t = 1000)]
    cols_a: usize,

    /// Columns of B (and of the result)
    #[arg(long, default_value_t = 1000)]
    cols_b: usize,

    /// Timed repetitions per strategy, after one warm-up run
    #[arg(long, default_value_t = 3)]
    runs: usize,

    /// Worker threads for the parallel strategy [default: $PMM_THREADS, or detected]
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for the input generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Smallest generated element
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    min_value: Element,

    /// Largest generated element
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    max_value: Element,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match args.threads {
        Some(n) => ParallelConfig::new(n)?,
        None => ParallelConfig::from_env()?,
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let range = args.min_value..=args.max_value;
    let a = random_matrix(args.rows_a, args.cols_a, range.clone(), &mut rng)
        .context("generating A")?;
    let b = random_matrix(args.cols_a, args.cols_b, range, &mut rng).context("generating B")?;

    let sequential = SequentialMultiplier::new();
    let parallel = ParallelMultiplier::new(config);

    info!(strategy = sequential.name(), "evaluating");
    let (seq_time, seq_result) = measure(&sequential, &a, &b, args.runs)?;

    info!(
        strategy = parallel.name(),
        threads = parallel.config().threads(),
        "evaluating"
    );
    let (par_time, par_result) = measure(&parallel, &a, &b, args.runs)?;

    let mismatches = find_mismatches(&seq_result, &par_result)?;
    for m in &mismatches {
        error!("{}", m);
    }

    let report = Report {
        sequential: seq_time,
        parallel: par_time,
        hardware_threads: hardware_threads(),
        mismatches: mismatches.len(),
    };
    println!("{}", report);

    if !mismatches.is_empty() {
        anyhow::bail!("{} cells differ between strategies", mismatches.len());
    }
    Ok(())
}
