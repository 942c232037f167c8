use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metrics::format_grouped;
use crate::service::SolveOutcome;
use crate::translator::facelet_index;

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub state: Vec<Value>,
}

impl SolveRequest {
    /// Colour indices, with unrecognised elements read as white.
    pub fn facelets(&self) -> Vec<i64> {
        self.state.iter().map(facelet_index).collect()
    }
}

/// Body of every `/solve` response.
///
/// Failures reuse the `solution` field with an `"Error: "` prefix; existing
/// clients rely on that shape.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SolveResponse {
    Solved {
        solution: String,
        time: f64,
        depth: u32,
        nodes: String,
    },
    Failed {
        solution: String,
    },
}

impl SolveResponse {
    pub fn error(message: impl std::fmt::Display) -> Self {
        SolveResponse::Failed {
            solution: format!("Error: {}", message),
        }
    }
}

impl From<SolveOutcome> for SolveResponse {
    fn from(outcome: SolveOutcome) -> Self {
        match outcome {
            SolveOutcome::Solved(solved) => SolveResponse::Solved {
                solution: solved.notation(),
                time: solved.elapsed_ms,
                depth: solved.depth,
                nodes: format_grouped(solved.estimated_nodes),
            },
            SolveOutcome::Failed(e) => SolveResponse::error(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub solver_path: String,
}
