use crate::types::{InteractionFindings, InteractionResult, PairwiseResult};

/// Benjamini-Hochberg FDR correction.
///
/// Returns adjusted p-values in the same order as the input so each maps
/// back to its originating pair.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let n = p_values.len();
    if n == 0 {
        return vec![];
    }

    let mut by_p: Vec<usize> = (0..n).collect();
    by_p.sort_by(|&a, &b| p_values[a].partial_cmp(&p_values[b]).unwrap());

    // Step-up: walk from the largest rank down carrying the running
    // minimum of p * n / rank, clipped to 1
    let mut adjusted = vec![0.0; n];
    let mut running_min = 1.0_f64;
    for rank in (0..n).rev() {
        let idx = by_p[rank];
        let candidate = (p_values[idx] * n as f64 / (rank + 1) as f64).min(1.0);
        running_min = running_min.min(candidate);
        adjusted[idx] = running_min;
    }

    adjusted
}

/// Attach BH-adjusted p-values and the significance call to raw pair
/// results. Input order is preserved.
pub fn adjust_results(raw: Vec<PairwiseResult>, pvalue_cutoff: f64) -> Vec<InteractionResult> {
    let p_values: Vec<f64> = raw.iter().map(|r| r.p_value).collect();
    let adjusted = benjamini_hochberg(&p_values);

    raw.into_iter()
        .zip(adjusted)
        .map(|(pair, adjusted_p_value)| InteractionResult {
            significant: adjusted_p_value < pvalue_cutoff,
            raw: pair,
            adjusted_p_value,
        })
        .collect()
}

/// Keep the significant pairs, ranked by ascending adjusted p-value.
///
/// The sort is stable, so ties keep their pair-enumeration order. Zero
/// pairs or zero survivors is a normal outcome, reported as `NoneFound`.
pub fn rank_significant(results: Vec<InteractionResult>) -> InteractionFindings {
    let tested = results.len();
    let mut significant: Vec<InteractionResult> =
        results.into_iter().filter(|r| r.significant).collect();
    significant.sort_by(|a, b| a.adjusted_p_value.partial_cmp(&b.adjusted_p_value).unwrap());

    if significant.is_empty() {
        InteractionFindings::NoneFound { tested }
    } else {
        InteractionFindings::Significant(significant)
    }
}
