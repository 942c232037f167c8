use serde_json::Value;

/// Facelet colours in the order the client numbers them (0..=5).
pub const COLOR_ALPHABET: [char; 6] = ['W', 'G', 'R', 'B', 'O', 'Y'];

/// Colour used for any index outside the alphabet.
const FALLBACK_COLOR: char = 'W';

pub fn color_for(index: i64) -> char {
    usize::try_from(index)
        .ok()
        .and_then(|i| COLOR_ALPHABET.get(i).copied())
        .unwrap_or(FALLBACK_COLOR)
}

/// Reads one client-supplied facelet as a colour index.
///
/// Numbers equal to an integer (`1`, `1.0`) and booleans (`true` is 1) keep
/// their value; anything else is white.
pub fn facelet_index(value: &Value) -> i64 {
    const WHITE: i64 = 0;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && (0.0..COLOR_ALPHABET.len() as f64).contains(f))
                    .map(|f| f as i64)
            })
            .unwrap_or(WHITE),
        Value::Bool(b) => i64::from(*b),
        _ => WHITE,
    }
}

/// Encodes a cube state into the engine's argument string.
///
/// Out-of-range indices become `W` instead of failing, and the length is
/// not checked: a short state gives a short string.
pub fn encode_state(state: &[i64]) -> String {
    state.iter().map(|&c| color_for(c)).collect()
}
