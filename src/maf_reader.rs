use crate::types::{Cohort, MutationRecord};
use crate::MafError;
use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Sample identifier column, per MAF convention
pub const SAMPLE_COLUMN: &str = "Tumor_Sample_Barcode";
/// Gene symbol column, per MAF convention
pub const GENE_COLUMN: &str = "Hugo_Symbol";
/// Optional classification column; only the summarizer reads it
pub const CLASSIFICATION_COLUMN: &str = "Variant_Classification";

/// Load a MAF-style mutation table.
///
/// Tab-separated; lines whose first character is `#` are skipped entirely,
/// and the first non-comment line is the header row. Required columns are
/// looked up by name. A table with a valid header but no data rows is
/// rejected: an empty cohort is a caller-side input problem, and letting
/// it through would only surface later as a zero-sample contingency table.
pub fn load(path: &Path) -> Result<Cohort, MafError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MafError::FileNotFound(path.to_path_buf()),
        _ => MafError::Io(e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, &e))?
        .clone();
    let sample_idx = require_column(&headers, SAMPLE_COLUMN, path)?;
    let gene_idx = require_column(&headers, GENE_COLUMN, path)?;
    let class_idx = headers.iter().position(|h| h == CLASSIFICATION_COLUMN);

    let mut records = Vec::new();
    let mut sample_ids = Vec::new();
    let mut seen = HashSet::new();

    for row in reader.records() {
        let row = row.map_err(|e| malformed(path, &e))?;
        let sample_id = field(&row, sample_idx, path)?;
        let gene_symbol = field(&row, gene_idx, path)?;
        let variant_classification = match class_idx {
            Some(idx) => Some(field(&row, idx, path)?),
            None => None,
        };

        if seen.insert(sample_id.clone()) {
            sample_ids.push(sample_id.clone());
        }
        records.push(MutationRecord {
            sample_id,
            gene_symbol,
            variant_classification,
        });
    }

    if sample_ids.is_empty() {
        return Err(MafError::EmptyCohort(path.to_path_buf()));
    }

    Ok(Cohort {
        records,
        sample_ids,
    })
}

fn require_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, MafError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| MafError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn field(row: &csv::StringRecord, idx: usize, path: &Path) -> Result<String, MafError> {
    row.get(idx)
        .map(str::to_string)
        .ok_or_else(|| MafError::Malformed {
            path: path.to_path_buf(),
            reason: match row.position() {
                Some(pos) => format!("row at line {} is shorter than the header", pos.line()),
                None => "row is shorter than the header".to_string(),
            },
        })
}

fn malformed(path: &Path, err: &csv::Error) -> MafError {
    MafError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
