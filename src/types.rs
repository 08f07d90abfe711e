use crate::MafError;
use std::collections::HashSet;
use std::fmt;

/// A single somatic variant call from one MAF row
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub sample_id: String,
    pub gene_symbol: String,
    /// Only the summarizer needs this; many MAF exports omit the column
    pub variant_classification: Option<String>,
}

/// A loaded cohort: every variant call plus the distinct sample ids.
///
/// `sample_ids` is deduplicated in first-appearance order so repeated runs
/// over the same file produce identical output ordering.
#[derive(Debug, Clone)]
pub struct Cohort {
    pub records: Vec<MutationRecord>,
    pub sample_ids: Vec<String>,
}

impl Cohort {
    /// Cohort size M
    pub fn sample_count(&self) -> usize {
        self.sample_ids.len()
    }
}

/// Mutation frequency for one gene: distinct samples, not variant rows
#[derive(Debug, Clone)]
pub struct GeneFrequency {
    pub symbol: String,
    pub mutated_samples: usize,
}

/// Binary mutation-presence matrix over the selected genes.
///
/// `mutated[i]` holds the sample ids carrying at least one variant in
/// `ranking[i]`; the two vectors are index-aligned.
#[derive(Debug, Clone)]
pub struct MutationMatrix {
    pub ranking: Vec<GeneFrequency>,
    pub mutated: Vec<HashSet<String>>,
}

/// 2x2 cross-tabulation of mutation presence for a gene pair
///
/// Invariant: n11 + n10 + n01 + n00 == M for the cohort the table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    /// Both genes mutated
    pub n11: u64,
    /// Gene 1 only
    pub n10: u64,
    /// Gene 2 only
    pub n01: u64,
    /// Neither
    pub n00: u64,
}

impl ContingencyTable {
    pub fn total(&self) -> u64 {
        self.n11 + self.n10 + self.n01 + self.n00
    }
}

/// Direction of a pairwise interaction.
///
/// An odds ratio of exactly 1 classifies as `MutuallyExclusive`; the
/// non-strict boundary is externally observable and kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    CoOccurring,
    MutuallyExclusive,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::CoOccurring => write!(f, "Co_Occurrence"),
            EventKind::MutuallyExclusive => write!(f, "Mutually_Exclusive"),
        }
    }
}

/// Raw exact-test result for one unordered gene pair
#[derive(Debug, Clone)]
pub struct PairwiseResult {
    pub gene1: String,
    pub gene2: String,
    pub p_value: f64,
    /// (n11 * n00) / (n10 * n01); +inf when n10 or n01 is zero
    pub odds_ratio: f64,
    pub table: ContingencyTable,
    pub event: EventKind,
}

/// Pair result enriched with its BH-adjusted p-value
#[derive(Debug, Clone)]
pub struct InteractionResult {
    pub raw: PairwiseResult,
    pub adjusted_p_value: f64,
    /// adjusted_p_value < pvalue_cutoff
    pub significant: bool,
}

/// Outcome of a full interaction analysis.
///
/// An empty selection is a normal result, not an error; callers can tell
/// "ran and found nothing" apart from failure.
#[derive(Debug, Clone)]
pub enum InteractionFindings {
    /// Pairs below the cutoff, ascending by adjusted p-value
    Significant(Vec<InteractionResult>),
    /// Every tested pair stayed at or above the cutoff
    NoneFound { tested: usize },
}

impl InteractionFindings {
    pub fn significant(&self) -> &[InteractionResult] {
        match self {
            InteractionFindings::Significant(results) => results,
            InteractionFindings::NoneFound { .. } => &[],
        }
    }
}

/// Knobs for the interaction analysis, validated before any work starts
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of top mutated genes to test
    pub top_n: usize,
    /// Adjusted p-value cutoff for significance, in (0, 1]
    pub pvalue_cutoff: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 25,
            pvalue_cutoff: 0.05,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), MafError> {
        if self.top_n < 1 {
            return Err(MafError::InvalidConfig(format!(
                "top_n must be >= 1, got {}",
                self.top_n
            )));
        }
        if !(self.pvalue_cutoff > 0.0 && self.pvalue_cutoff <= 1.0) {
            return Err(MafError::InvalidConfig(format!(
                "pvalue_cutoff must be in (0, 1], got {}",
                self.pvalue_cutoff
            )));
        }
        Ok(())
    }
}
