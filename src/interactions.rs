use crate::statistics;
use crate::types::{ContingencyTable, EventKind, MutationMatrix, PairwiseResult};
use crate::MafError;
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Number of unordered pairs among `k` genes
pub fn pair_count(k: usize) -> usize {
    k * k.saturating_sub(1) / 2
}

/// Run the exact test over every unordered pair of selected genes.
///
/// Each pair {g1, g2} is tested exactly once; results come back in
/// enumeration order (0,1), (0,2), ..., (k-2,k-1) over the ranking, which
/// downstream FDR correction relies on. `sample_count` is the cohort size
/// M. Pairs are independent and read-only over the shared sets, so the
/// loop runs on the rayon pool; the ordered collect is the only
/// coordination needed.
pub fn test_pairwise(
    matrix: &MutationMatrix,
    sample_count: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<PairwiseResult>, MafError> {
    let k = matrix.ranking.len();
    let mut pairs = Vec::with_capacity(pair_count(k));
    for i in 0..k {
        for j in (i + 1)..k {
            pairs.push((i, j));
        }
    }

    pairs
        .par_iter()
        .map(|&(i, j)| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
            test_pair(matrix, i, j, sample_count)
        })
        .collect()
}

/// Contingency table and two-sided exact test for one gene pair.
///
/// A negative n00 means a mutated sample id that is not in the cohort's
/// sample list; that is a bookkeeping defect, not a user error, and aborts
/// the analysis.
fn test_pair(
    matrix: &MutationMatrix,
    i: usize,
    j: usize,
    sample_count: usize,
) -> Result<PairwiseResult, MafError> {
    let gene1 = &matrix.ranking[i].symbol;
    let gene2 = &matrix.ranking[j].symbol;
    let set1 = &matrix.mutated[i];
    let set2 = &matrix.mutated[j];

    let n11 = set1.intersection(set2).count() as u64;
    let n10 = set1.len() as u64 - n11;
    let n01 = set2.len() as u64 - n11;

    let remainder = sample_count as i64 - (n11 + n10 + n01) as i64;
    if remainder < 0 {
        return Err(MafError::InvariantViolation {
            gene1: gene1.clone(),
            gene2: gene2.clone(),
            detail: format!(
                "mutated samples exceed cohort size: n11={} n10={} n01={} M={}",
                n11, n10, n01, sample_count
            ),
        });
    }
    let n00 = remainder as u64;

    let (odds_ratio, p_value) = statistics::fisher_exact(n11, n10, n01, n00);
    let event = if odds_ratio > 1.0 {
        EventKind::CoOccurring
    } else {
        EventKind::MutuallyExclusive
    };

    Ok(PairwiseResult {
        gene1: gene1.clone(),
        gene2: gene2.clone(),
        p_value,
        odds_ratio,
        table: ContingencyTable { n11, n10, n01, n00 },
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeneFrequency;
    use std::collections::HashSet;

    fn matrix_from(genes: &[(&str, &[&str])]) -> MutationMatrix {
        let ranking = genes
            .iter()
            .map(|(symbol, samples)| GeneFrequency {
                symbol: symbol.to_string(),
                mutated_samples: samples.len(),
            })
            .collect();
        let mutated = genes
            .iter()
            .map(|(_, samples)| samples.iter().map(|s| s.to_string()).collect::<HashSet<_>>())
            .collect();
        MutationMatrix { ranking, mutated }
    }

    #[test]
    fn test_pair_enumeration_count() {
        let matrix = matrix_from(&[
            ("A", &["s1"]),
            ("B", &["s2"]),
            ("C", &["s3"]),
            ("D", &["s4"]),
            ("E", &["s1"]),
        ]);
        let results = test_pairwise(&matrix, 4, None).unwrap();
        assert_eq!(results.len(), pair_count(5));
        assert_eq!(results.len(), 10);

        // No pair appears twice in either orientation
        let mut seen = HashSet::new();
        for r in &results {
            assert!(seen.insert((r.gene1.clone(), r.gene2.clone())));
            assert!(!seen.contains(&(r.gene2.clone(), r.gene1.clone())));
        }
    }

    #[test]
    fn test_contingency_sums_to_cohort_size() {
        let matrix = matrix_from(&[
            ("X", &["s1", "s2", "s3"]),
            ("Y", &["s1", "s2"]),
            ("Z", &["s4"]),
        ]);
        for r in test_pairwise(&matrix, 6, None).unwrap() {
            assert_eq!(r.table.total(), 6);
        }
    }

    #[test]
    fn test_cooccurring_with_zero_cell() {
        // 4 samples; X in {1,2,3}, Y in {1,2} => n11=2 n10=1 n01=0 n00=1
        let matrix = matrix_from(&[("X", &["s1", "s2", "s3"]), ("Y", &["s1", "s2"])]);
        let results = test_pairwise(&matrix, 4, None).unwrap();
        let r = &results[0];
        assert_eq!(
            r.table,
            ContingencyTable {
                n11: 2,
                n10: 1,
                n01: 0,
                n00: 1
            }
        );
        assert!(r.odds_ratio.is_infinite());
        assert!(r.p_value.is_finite());
        assert_eq!(r.event, EventKind::CoOccurring);
    }

    #[test]
    fn test_mutually_exclusive_disjoint() {
        // 10 samples split 5/5 with no overlap
        let matrix = matrix_from(&[
            ("X", &["s1", "s2", "s3", "s4", "s5"]),
            ("Y", &["s6", "s7", "s8", "s9", "s10"]),
        ]);
        let results = test_pairwise(&matrix, 10, None).unwrap();
        let r = &results[0];
        assert_eq!(
            r.table,
            ContingencyTable {
                n11: 0,
                n10: 5,
                n01: 5,
                n00: 0
            }
        );
        assert_eq!(r.odds_ratio, 0.0);
        assert_eq!(r.event, EventKind::MutuallyExclusive);
    }

    #[test]
    fn test_unity_odds_ratio_is_mutually_exclusive() {
        // n11=1 n10=1 n01=1 n00=1 => odds ratio exactly 1
        let matrix = matrix_from(&[("X", &["s1", "s2"]), ("Y", &["s1", "s3"])]);
        let results = test_pairwise(&matrix, 4, None).unwrap();
        let r = &results[0];
        assert_eq!(r.odds_ratio, 1.0);
        assert_eq!(r.event, EventKind::MutuallyExclusive);
    }

    #[test]
    fn test_negative_n00_is_fatal() {
        // Sets mention 4 distinct samples but the caller claims M=3
        let matrix = matrix_from(&[("X", &["s1", "s2", "s3"]), ("Y", &["s4"])]);
        let err = test_pairwise(&matrix, 3, None).unwrap_err();
        assert!(matches!(err, MafError::InvariantViolation { .. }));
    }

    #[test]
    fn test_single_gene_yields_no_pairs() {
        let matrix = matrix_from(&[("X", &["s1"])]);
        let results = test_pairwise(&matrix, 1, None).unwrap();
        assert!(results.is_empty());
    }
}
