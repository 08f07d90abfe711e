//! Pairwise somatic-interaction analysis for MAF-style mutation tables.
//!
//! Loads a tab-delimited mutation-call table, selects the top-N most
//! frequently mutated genes, tests every unordered gene pair for
//! co-occurrence or mutual exclusivity with a two-sided Fisher's exact
//! test, and applies Benjamini-Hochberg FDR correction before filtering
//! to the significant pairs.

pub mod interactions;
pub mod maf_reader;
pub mod matrix;
pub mod output;
pub mod significance;
pub mod statistics;
pub mod summary;
pub mod types;

use crate::types::{AnalysisConfig, Cohort, InteractionFindings};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MafError {
    #[error("MAF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("required column '{column}' not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("malformed MAF file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("MAF file {} contains no mutation records", .0.display())]
    EmptyCohort(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("contingency bookkeeping violated for pair {gene1}/{gene2}: {detail}")]
    InvariantViolation {
        gene1: String,
        gene2: String,
        detail: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Full interaction analysis over a loaded cohort.
///
/// Validates the configuration, selects the top genes, runs every pairwise
/// exact test, applies BH correction, and returns the significant pairs
/// ranked ascending by adjusted p-value (or the explicit empty outcome).
/// Either the whole pair set is tested or the analysis fails; there is no
/// partial-result mode, since FDR control over an incomplete hypothesis
/// set is unsound.
pub fn analyze(cohort: &Cohort, config: &AnalysisConfig) -> Result<InteractionFindings, MafError> {
    config.validate()?;

    let matrix = matrix::build_matrix(cohort, config.top_n);
    let raw = interactions::test_pairwise(&matrix, cohort.sample_count(), None)?;
    let adjusted = significance::adjust_results(raw, config.pvalue_cutoff);
    Ok(significance::rank_significant(adjusted))
}
