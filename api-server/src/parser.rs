use crate::engine::{EngineRawOutput, EngineStatus};
use crate::error::SolveError;

/// A move sequence read from the engine's answer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSolution {
    pub moves: Vec<String>,
}

impl ParsedSolution {
    pub fn depth(&self) -> usize {
        self.moves.len()
    }
}

/// Lines the engine prints around its answer that are never move sequences.
/// An already-solved cube gets an empty answer line, which leaves the last
/// progress line as the final non-empty one.
const SEARCH_STATUS_PREFIXES: &[&str] = &[
    "Starting IDA* Search",
    "Searching depth:",
    "Solution not found",
];

/// Classifies raw engine output as a solution or a failure.
///
/// The answer is the last non-empty stdout line. Lines containing `Error`
/// or starting with `[` are engine diagnostics, never solutions. Search
/// status lines mean no moves were returned, which also counts as invalid.
pub fn parse_output(raw: &EngineRawOutput) -> Result<ParsedSolution, SolveError> {
    if raw.status == EngineStatus::TimedOut {
        return Err(SolveError::SearchTimedOut);
    }

    let last_line = raw
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or_default();

    let is_status = SEARCH_STATUS_PREFIXES
        .iter()
        .any(|prefix| last_line.starts_with(prefix));

    if last_line.is_empty()
        || last_line.contains("Error")
        || last_line.starts_with('[')
        || is_status
    {
        return Err(SolveError::InvalidEngineOutput {
            last_line: last_line.to_string(),
        });
    }

    let moves: Vec<String> = last_line
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if moves.is_empty() {
        return Err(SolveError::InvalidEngineOutput {
            last_line: last_line.to_string(),
        });
    }

    Ok(ParsedSolution { moves })
}
