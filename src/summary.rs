use crate::types::Cohort;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Key statistics for a loaded cohort
#[derive(Debug, Clone)]
pub struct MafSummary {
    pub sample_count: usize,
    pub gene_count: usize,
    /// Variant classification row counts, descending, ties alphabetical.
    /// Empty when the MAF carries no classification column.
    pub classification_counts: Vec<(String, u64)>,
}

/// Summarize a cohort: distinct samples, distinct genes, and per-row
/// variant classification counts.
pub fn summarize(cohort: &Cohort) -> MafSummary {
    let mut genes: HashSet<&str> = HashSet::new();
    let mut classes: HashMap<&str, u64> = HashMap::new();

    for record in &cohort.records {
        genes.insert(record.gene_symbol.as_str());
        if let Some(class) = &record.variant_classification {
            *classes.entry(class.as_str()).or_insert(0) += 1;
        }
    }

    let mut classification_counts: Vec<(String, u64)> = classes
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    classification_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    MafSummary {
        sample_count: cohort.sample_ids.len(),
        gene_count: genes.len(),
        classification_counts,
    }
}

impl fmt::Display for MafSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MAF Summary:")?;
        writeln!(f, "  Number of Samples: {}", self.sample_count)?;
        writeln!(f, "  Number of Genes: {}", self.gene_count)?;
        if self.classification_counts.is_empty() {
            write!(f, "  Variant Classifications: not present")
        } else {
            write!(f, "  Variant Classifications:")?;
            for (name, count) in &self.classification_counts {
                write!(f, "\n    {}: {}", name, count)?;
            }
            Ok(())
        }
    }
}
