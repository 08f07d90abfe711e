use statrs::function::factorial::ln_binomial;

/// Odds ratio for a 2x2 contingency table.
///
/// Contingency table:
///                   gene2 mutated | gene2 wild-type
/// gene1 mutated:         n11      |      n10
/// gene1 wild-type:       n01      |      n00
///
/// Defined as (n11 * n00) / (n10 * n01). A zero denominator cell yields
/// +inf; a zero numerator over a positive denominator yields 0.
pub fn odds_ratio(n11: u64, n10: u64, n01: u64, n00: u64) -> f64 {
    if n10 == 0 || n01 == 0 {
        f64::INFINITY
    } else {
        (n11 * n00) as f64 / (n10 * n01) as f64
    }
}

/// Two-sided Fisher's exact test on the table [[n11, n10], [n01, n00]].
///
/// Returns (odds_ratio, p_value). With the margins fixed, the p-value is
/// the total probability of every table no more likely than the observed
/// one under the conditional hypergeometric distribution. Stays exact when
/// cells are zero; sparse tables are the common case at cohort scale.
pub fn fisher_exact(n11: u64, n10: u64, n01: u64, n00: u64) -> (f64, f64) {
    let or = odds_ratio(n11, n10, n01, n00);

    let population = n11 + n10 + n01 + n00;
    let gene1_total = n11 + n10;
    let gene2_total = n11 + n01;

    if population == 0 {
        return (or, 1.0);
    }

    // Log space: direct binomial coefficients overflow f64 once the
    // cohort grows past a few hundred samples.
    let ln_pmf = |x: u64| {
        ln_binomial(gene1_total, x) + ln_binomial(population - gene1_total, gene2_total - x)
            - ln_binomial(population, gene2_total)
    };

    // Support of n11 given the fixed margins
    let lo = (gene1_total + gene2_total).saturating_sub(population);
    let hi = gene1_total.min(gene2_total);

    let observed = ln_pmf(n11).exp();
    // Slack so tables tied with the observed one survive float rounding
    let cutoff = observed * (1.0 + 1e-7);

    let mut p = 0.0;
    for x in lo..=hi {
        let prob = ln_pmf(x).exp();
        if prob <= cutoff {
            p += prob;
        }
    }

    (or, p.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_table() {
        // [[3,1],[1,3]]: pmf over C(8,4)=70 is {1,16,36,16,1}/70,
        // observed pmf(3)=16/70, two-sided p = (16+16+1+1)/70
        let (or, p) = fisher_exact(3, 1, 1, 3);
        assert_relative_eq!(or, 9.0, epsilon = 1e-12);
        assert_relative_eq!(p, 34.0 / 70.0, epsilon = 1e-10);
    }

    #[test]
    fn test_disjoint_mutation_sets() {
        // Perfect mutual exclusivity in 10 samples: only the two extreme
        // tables are as unlikely as the observed one
        let (or, p) = fisher_exact(0, 5, 5, 0);
        assert_eq!(or, 0.0);
        assert_relative_eq!(p, 2.0 / 252.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_cell_infinite_odds() {
        // 4 samples, gene1 in {1,2,3}, gene2 in {1,2}
        let (or, p) = fisher_exact(2, 1, 0, 1);
        assert!(or.is_infinite() && or > 0.0);
        assert!(p.is_finite());
        assert_relative_eq!(p, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_unity_odds_ratio() {
        let or = odds_ratio(2, 2, 2, 2);
        assert_relative_eq!(or, 1.0);
    }

    #[test]
    fn test_zero_numerator() {
        assert_eq!(odds_ratio(0, 3, 3, 5), 0.0);
    }

    #[test]
    fn test_denominator_conventions() {
        assert!(odds_ratio(2, 0, 3, 1).is_infinite());
        assert!(odds_ratio(2, 3, 0, 1).is_infinite());
        // scipy's convention: denominator wins even with a zero numerator
        assert!(odds_ratio(0, 0, 3, 1).is_infinite());
    }

    #[test]
    fn test_empty_table() {
        let (_, p) = fisher_exact(0, 0, 0, 0);
        assert_relative_eq!(p, 1.0);
    }

    #[test]
    fn test_p_values_in_range() {
        for &(a, b, c, d) in &[
            (5u64, 0u64, 0u64, 5u64),
            (1, 9, 11, 3),
            (10, 10, 10, 10),
            (0, 1, 1, 0),
            (100, 3, 2, 95),
        ] {
            let (_, p) = fisher_exact(a, b, c, d);
            assert!(p > 0.0 && p <= 1.0, "p out of range for ({},{},{},{}): {}", a, b, c, d, p);
        }
    }

    #[test]
    fn test_large_cohort_no_overflow() {
        // Cohorts in the thousands must not degrade to NaN/inf
        let (_, p) = fisher_exact(120, 380, 410, 4090);
        assert!(p.is_finite() && p > 0.0 && p <= 1.0);
    }

    #[test]
    fn test_independence_gives_high_p() {
        // Counts proportional to independent margins
        let (or, p) = fisher_exact(10, 40, 10, 40);
        assert_relative_eq!(or, 1.0);
        assert!(p > 0.9);
    }
}
