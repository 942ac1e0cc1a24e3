use thiserror::Error;

/// Fatal conditions the optimiser and its collaborators can raise.
///
/// Evaluator infeasibility is *not* represented here — it is a plain
/// `(false, _)` tuple, suppressed by the acceptance rule, because moves
/// are designed to never produce it.
#[derive(Debug, Error)]
pub enum CarshareError {
    #[error("input malformed: {0}")]
    InputMalformed(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("cancelled before completion")]
    Cancelled,

    #[error("no feasible solution could be produced")]
    NoFeasibleSolution,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CarshareError {
    /// Process exit code for this error kind. `main` uses this rather
    /// than a single catch-all failure code, so a caller scripting
    /// around this binary can tell input errors apart from internal
    /// bugs.
    pub fn exit_code(&self) -> u8 {
        match self {
            CarshareError::InputMalformed(_) => 2,
            CarshareError::InvariantViolation(_) => 3,
            CarshareError::NoFeasibleSolution => 4,
            CarshareError::Cancelled => 5,
            CarshareError::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CarshareError>;
