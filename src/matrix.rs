use crate::types::{Cohort, GeneFrequency, MutationMatrix};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Rank genes by the number of distinct mutated samples and keep the top
/// `top_n`.
///
/// A sample with several variants in the same gene counts once: presence,
/// not multiplicity. Ties are broken by the gene's first appearance in the
/// table (stable sort), so reruns select the same genes in the same order.
/// Fewer than `top_n` genes in the cohort is fine; all of them are used.
pub fn build_matrix(cohort: &Cohort, top_n: usize) -> MutationMatrix {
    let mut order: Vec<String> = Vec::new();
    let mut sets: HashMap<String, HashSet<String>> = HashMap::new();

    for record in &cohort.records {
        if !sets.contains_key(&record.gene_symbol) {
            order.push(record.gene_symbol.clone());
        }
        sets.entry(record.gene_symbol.clone())
            .or_default()
            .insert(record.sample_id.clone());
    }

    // Stable sort keeps first-appearance order within equal counts
    let mut ranked = order;
    ranked.sort_by_key(|gene| Reverse(sets[gene].len()));
    ranked.truncate(top_n);

    let mut ranking = Vec::with_capacity(ranked.len());
    let mut mutated = Vec::with_capacity(ranked.len());
    for symbol in ranked {
        let set = sets.remove(&symbol).expect("ranked gene has a sample set");
        ranking.push(GeneFrequency {
            symbol,
            mutated_samples: set.len(),
        });
        mutated.push(set);
    }

    MutationMatrix { ranking, mutated }
}
