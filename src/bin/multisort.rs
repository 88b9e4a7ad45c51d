//! Lab driver for the multisort kernel: deterministic fill, timed sort,
//! sortedness check.

use std::error::Error;
use std::time::Instant;

use clap::Parser;
use lab_test_tools::patterns;

use task_lab::multisort::{self, SortParams, DEFAULT_CUTOFF_DEPTH};

#[derive(Parser, Debug)]
#[command(name = "multisort", about = "Task-parallel multisort lab driver")]
struct Args {
    /// Size of the vector to sort, in Ki-elements; must be a power of two.
    #[arg(short = 'n', long = "size", default_value_t = 32_768)]
    size_kelems: usize,

    /// Size that breaks recursion in the sort phase; a power of two.
    #[arg(short = 's', long, default_value_t = 1_024)]
    min_sort_size: usize,

    /// Size that breaks recursion in the merge phase; a power of two.
    #[arg(short = 'm', long, default_value_t = 1_024)]
    min_merge_size: usize,

    /// Recursion depth at which task generation stops.
    #[arg(short = 'c', long, default_value_t = DEFAULT_CUTOFF_DEPTH)]
    cutoff: usize,

    /// Worker threads; defaults to the number of logical CPUs.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Seed for the deterministic input recurrence.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let n = args.size_kelems * 1024;
    let params = SortParams::new(args.min_sort_size, args.min_merge_size)?;
    let threads = args.threads.unwrap_or_else(num_cpus::get);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    println!(
        "Problem size: N={} Ki-elements, MIN_SORT_SIZE={}, MIN_MERGE_SIZE={}",
        args.size_kelems, args.min_sort_size, args.min_merge_size
    );
    println!("Cut-off depth: {}, worker threads: {}", args.cutoff, threads);

    let stamp = Instant::now();
    let mut data = patterns::recurrence_with_seed(n, args.seed);
    let mut tmp = vec![0i32; n];
    println!(
        "Initialization time:      {:.6}s",
        stamp.elapsed().as_secs_f64()
    );

    let stamp = Instant::now();
    multisort::sort_with_cutoff(&mut data, &mut tmp, &params, args.cutoff)?;
    println!(
        "Multisort execution time: {:.6}s",
        stamp.elapsed().as_secs_f64()
    );

    let stamp = Instant::now();
    let unsorted = multisort::count_unsorted(&data);
    println!(
        "Check time:               {:.6}s",
        stamp.elapsed().as_secs_f64()
    );

    if unsorted > 0 {
        return Err(format!("data is NOT properly sorted: {unsorted} unordered positions").into());
    }

    println!("Multisort program finished");
    Ok(())
}
