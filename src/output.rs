use crate::types::InteractionResult;
use crate::MafError;
use std::fmt::Write as _;
use std::path::Path;

/// Sentinel for the downstream report layer when nothing clears the cutoff
pub const NO_FINDINGS_MESSAGE: &str = "No significant somatic interactions found.";

const COLUMNS: [&str; 10] = [
    "gene1", "gene2", "pValue", "oddsRatio", "n00", "n01", "n11", "n10", "event", "pAdjust",
];

/// Write significant pairs to a TSV file
pub fn write_results(results: &[InteractionResult], path: &Path) -> Result<(), MafError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    wtr.write_record(COLUMNS)?;

    for result in results {
        let table = result.raw.table;
        wtr.write_record(&[
            result.raw.gene1.clone(),
            result.raw.gene2.clone(),
            format_p(result.raw.p_value),
            format_odds(result.raw.odds_ratio),
            table.n00.to_string(),
            table.n01.to_string(),
            table.n11.to_string(),
            table.n10.to_string(),
            result.raw.event.to_string(),
            format_p(result.adjusted_p_value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render significant pairs as an aligned text table for the terminal
pub fn render_table(results: &[InteractionResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:>12} {:>10} {:>6} {:>6} {:>6} {:>6} {:<19} {:>12}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5], COLUMNS[6],
        COLUMNS[7], COLUMNS[8], COLUMNS[9],
    );
    for result in results {
        let table = result.raw.table;
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:>12} {:>10} {:>6} {:>6} {:>6} {:>6} {:<19} {:>12}",
            result.raw.gene1,
            result.raw.gene2,
            format_p(result.raw.p_value),
            format_odds(result.raw.odds_ratio),
            table.n00,
            table.n01,
            table.n11,
            table.n10,
            result.raw.event.to_string(),
            format_p(result.adjusted_p_value),
        );
    }
    out
}

fn format_p(p: f64) -> String {
    format!("{:.6e}", p)
}

fn format_odds(odds_ratio: f64) -> String {
    if odds_ratio.is_infinite() {
        "Inf".to_string()
    } else {
        format!("{:.6}", odds_ratio)
    }
}
