//! Simulated-annealing parameters, overridable from the environment.
//!
//! Mirrors the original `CarSharing/Problem.py` module-level
//! `get_from_env_or_default` calls: `SA_TMAX`, `SA_TMIN`,
//! `SA_ITERATIONS`, `SA_ALPHA`.

use std::env;

/// Initial temperature.
pub const DEFAULT_T_MAX: f64 = 1000.0;
/// Termination temperature.
pub const DEFAULT_T_MIN: f64 = 10.0;
/// Inner-loop length at each temperature.
pub const DEFAULT_ITERATIONS: u32 = 5000;
/// Geometric cooling factor, 0 < alpha < 1.
pub const DEFAULT_ALPHA: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub t_max: f64,
    pub t_min: f64,
    pub iterations: u32,
    pub alpha: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            t_max: DEFAULT_T_MAX,
            t_min: DEFAULT_T_MIN,
            iterations: DEFAULT_ITERATIONS,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Config {
    /// Layer `SA_TMAX`/`SA_TMIN`/`SA_ITERATIONS`/`SA_ALPHA` over the
    /// defaults, the way the original Python loader does.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            t_max: env_or(defaults.t_max, "SA_TMAX"),
            t_min: env_or(defaults.t_min, "SA_TMIN"),
            iterations: env_or(defaults.iterations, "SA_ITERATIONS"),
            alpha: env_or(defaults.alpha, "SA_ALPHA"),
        }
    }

    /// Estimated total inner-loop iterations the cooling schedule will
    /// run for: `ceil(log(t_min/t_max)/log(alpha)) * iterations`.
    ///
    /// This is the same formula `original_source/CarSharing/
    /// Problem.py` logs at startup — an estimate for the log line, not
    /// the literal termination check. The actual outer loop runs `while
    /// temp >= t_min`, which can execute one step more than this
    /// estimate when a cooling step lands exactly on `t_min`.
    pub fn total_iterations(&self) -> u64 {
        let steps = (self.t_min / self.t_max).ln() / self.alpha.ln();
        (steps.ceil() as u64) * self.iterations as u64
    }
}

fn env_or<T: std::str::FromStr>(default: T, key: &str) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
