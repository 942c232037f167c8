//! Search-effort estimate shown next to a solution.
//!
//! The engine does not report how many nodes it expanded, so the figure is
//! derived from the solution depth alone. It is an illustration of how the
//! search grows with depth, not a measurement.

/// Corner pattern database size; no estimate is ever larger.
pub const NODE_ESTIMATE_CAP: u64 = 88_179_840;

const LINEAR_DEPTH_LIMIT: u32 = 5;
const NODES_PER_SHALLOW_MOVE: u64 = 15;
const GROWTH_EXPONENT: f64 = 0.45;

/// Estimated node count for a solution of `depth` moves.
///
/// Shallow solves grow linearly (`depth * 15`), deeper ones follow
/// `floor(10^(depth * 0.45))`, clamped to [`NODE_ESTIMATE_CAP`].
pub fn estimate_nodes(depth: u32) -> u64 {
    let nodes = if depth < LINEAR_DEPTH_LIMIT {
        u64::from(depth) * NODES_PER_SHALLOW_MOVE
    } else {
        // `as` truncates toward zero and saturates on overflow.
        10f64.powf(f64::from(depth) * GROWTH_EXPONENT) as u64
    };
    nodes.min(NODE_ESTIMATE_CAP)
}

/// Renders `n` with comma thousands separators, e.g. `1,230,000`.
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
