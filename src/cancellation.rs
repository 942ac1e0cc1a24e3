//! Cooperative cancellation: a shared atomic flag workers poll between
//! inner-loop iterations, plus an optional wall-clock timer thread that
//! flips it. Replaces the original implementation's signal-based
//! timeout (`SIGALRM` raised inside numerical code) with polling, since
//! signal delivery to an arbitrary worker thread isn't reliable.
//!
//! A Ctrl-C (SIGINT) handler can flip the same flag, mirroring the
//! original's `except (KeyboardInterrupt, TimeoutError): aborted = True`
//! in `Problem.py::run` — an interrupted run still preserves and writes
//! out `global_best` instead of dying mid-search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Spawn a detached timer thread that cancels this token after
    /// `seconds`. `0` means "no budget" — the caller should simply not
    /// call this.
    pub fn arm_timer(&self, seconds: u64) {
        if seconds == 0 {
            return;
        }
        self.arm_timer_millis(seconds * 1000);
    }

    /// Millisecond-granularity variant of [`Self::arm_timer`], useful
    /// for keeping cancellation-driven tests fast.
    pub fn arm_timer_millis(&self, millis: u64) {
        if millis == 0 {
            return;
        }
        let token = self.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(millis));
            token.cancel();
        });
    }

    /// Install a process-wide Ctrl-C handler that cancels this token.
    /// `ctrlc` only allows one handler per process, so this should be
    /// called at most once, from `main`.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            token.cancel();
        })
    }
}
