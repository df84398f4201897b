//! Cosine similarity over sparse term-frequency vectors

use crate::frequency::FrequencyMap;

/// Cosine similarity between two frequency maps, treated as sparse
/// vectors over the union of their keys.
///
/// Returns a value in [0, 1]: 1 for proportional vectors, 0 when the
/// maps share no tokens or either map is empty (by convention, never a
/// division fault). Symmetric in its arguments.
pub fn cosine(a: &FrequencyMap, b: &FrequencyMap) -> f64 {
    // Only shared keys contribute to the dot product, so walk the
    // smaller map and probe the larger.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut dot = 0.0f64;
    for (token, count) in small.iter() {
        let other = large.count(token);
        if other > 0 {
            dot += count as f64 * other as f64;
        }
    }
    if dot == 0.0 {
        return 0.0;
    }

    let norm_a = norm(a);
    let norm_b = norm(b);
    dot / (norm_a * norm_b)
}

fn norm(map: &FrequencyMap) -> f64 {
    map.iter()
        .map(|(_, count)| {
            let c = count as f64;
            c * c
        })
        .sum::<f64>()
        .sqrt()
}
