use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::SolveError;
use crate::metrics::estimate_nodes;
use crate::parser::parse_output;
use crate::translator::encode_state;

#[derive(Debug, Clone, PartialEq)]
pub struct Solved {
    pub moves: Vec<String>,
    pub elapsed_ms: f64,
    pub depth: u32,
    pub estimated_nodes: u64,
}

impl Solved {
    pub fn notation(&self) -> String {
        self.moves.join(" ")
    }
}

#[derive(Debug)]
pub enum SolveOutcome {
    Solved(Solved),
    Failed(SolveError),
}

/// Runs one solve per call: encode, invoke the engine, classify, estimate.
pub struct SolveService {
    engine: Arc<dyn Engine>,
}

impl SolveService {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Never fails: every error, including a panic in the pipeline, comes
    /// back as [`SolveOutcome::Failed`].
    pub async fn solve(&self, state: Vec<i64>) -> SolveOutcome {
        let engine = Arc::clone(&self.engine);
        let task = tokio::spawn(async move { run_pipeline(engine.as_ref(), &state).await });

        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(SolveError::Internal(e.to_string())),
        };

        match result {
            Ok(solved) => {
                info!(
                    depth = solved.depth,
                    time_ms = solved.elapsed_ms,
                    nodes = solved.estimated_nodes,
                    "Solve finished"
                );
                SolveOutcome::Solved(solved)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = ?e, "Solve failed");
                SolveOutcome::Failed(e)
            }
        }
    }
}

async fn run_pipeline(engine: &dyn Engine, state: &[i64]) -> Result<Solved, SolveError> {
    let encoded = encode_state(state);
    info!(state = %encoded, "Received solve request");

    let raw = engine.invoke(&encoded).await?;
    let parsed = parse_output(&raw).inspect_err(|_| {
        if !raw.stderr.trim().is_empty() {
            warn!(stderr = %raw.stderr.trim(), "Solver engine reported on stderr");
        }
    })?;

    let depth = u32::try_from(parsed.depth()).unwrap_or(u32::MAX);
    Ok(Solved {
        moves: parsed.moves,
        elapsed_ms: raw.elapsed_ms,
        depth,
        estimated_nodes: estimate_nodes(depth),
    })
}
