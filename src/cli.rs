//! Command-line surface. Matches the positional argument order from
//! `original_source/CarSharing/__main__.py`'s `argparse` setup exactly:
//! `input output [runtime_seconds] [seed] [threads]`.

use std::path::PathBuf;

use clap::Parser;
use rand::RngCore;

#[derive(Debug, Parser)]
#[command(name = "carshare-annealer", about = "Offline car-sharing assignment optimiser")]
pub struct Cli {
    /// The input file to parse.
    pub input: PathBuf,

    /// Where to write the solution.
    pub output: PathBuf,

    /// Max runtime in seconds. 0 means run until the cooling schedule
    /// finishes on its own (or until interrupted).
    #[arg(default_value_t = 0)]
    pub runtime_seconds: u64,

    /// Base RNG seed; workers derive their own stream from this plus
    /// their worker id. 0 means draw a nondeterministic seed.
    #[arg(default_value_t = 0)]
    pub seed: u64,

    /// Number of worker threads. 0 means one worker per available CPU.
    #[arg(default_value_t = 0)]
    pub threads: usize,
}

impl Cli {
    pub fn resolved_threads(&self) -> usize {
        if self.threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.threads
        }
    }

    /// `seed == 0` means "nondeterministic" per §6: draw a fresh seed
    /// from the OS RNG rather than running every unseeded invocation
    /// with the literal value zero.
    pub fn resolved_seed(&self) -> u64 {
        if self.seed == 0 {
            rand::thread_rng().next_u64()
        } else {
            self.seed
        }
    }
}
