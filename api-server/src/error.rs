use std::path::PathBuf;

/// Why a single solve request failed.
///
/// The `Display` text is what the client sees after the `"Error: "` prefix,
/// so the wording of the first two variants must not drift.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("Search timed out. Scramble too complex for current heuristic.")]
    SearchTimedOut,
    #[error("Invalid Output from Solver")]
    InvalidEngineOutput { last_line: String },
    #[error("{0}")]
    EngineProcess(#[from] std::io::Error),
    #[error("{0}")]
    Internal(String),
}

impl SolveError {
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::SearchTimedOut => "search_timed_out",
            SolveError::InvalidEngineOutput { .. } => "invalid_engine_output",
            SolveError::EngineProcess(_) => "engine_process_error",
            SolveError::Internal(_) => "internal_error",
        }
    }
}

/// Startup configuration problems. Any of these aborts the server.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("Solver executable not found at: {0}")]
    SolverExecutableMissing(PathBuf),
    #[error("Solver work dir is not a directory: {0}")]
    WorkDirMissing(PathBuf),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
