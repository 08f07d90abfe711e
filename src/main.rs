use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use somatic_interactions::{
    interactions, maf_reader, matrix, output, significance, summary,
    types::{AnalysisConfig, InteractionFindings},
};
use std::path::Path;

#[derive(Parser)]
#[command(name = "somatic-interactions")]
#[command(version)]
#[command(about = "Identify co-occurring and mutually exclusive gene pairs in a MAF cohort", long_about = None)]
struct Args {
    /// Input MAF file (tab-separated; '#' comment lines are skipped)
    #[arg(short, long)]
    input: String,

    /// Output TSV file for significant pairs
    #[arg(short, long)]
    output: Option<String>,

    /// Number of top mutated genes to test
    #[arg(long, default_value = "25")]
    top_n: usize,

    /// Adjusted p-value cutoff for significance
    #[arg(long, default_value = "0.05")]
    pvalue_cutoff: f64,

    /// Print a cohort summary before testing
    #[arg(long)]
    summary: bool,

    /// Number of threads for the pairwise test loop
    #[arg(long, default_value_t = num_cpus())]
    threads: usize,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

macro_rules! progress {
    ($quiet:expr) => {
        if !$quiet {
            eprintln!();
        }
    };
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            eprintln!($($arg)*);
        }
    };
}

fn make_progress_bar(quiet: bool, len: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  [{elapsed_precise}/{eta_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}

fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("  {spinner} [{elapsed_precise}] {msg}").unwrap());
    pb
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AnalysisConfig {
        top_n: args.top_n,
        pvalue_cutoff: args.pvalue_cutoff,
    };
    config.validate()?;

    // Configure rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .unwrap();

    progress!(args.quiet, "Somatic Interaction Analysis");
    progress!(args.quiet, "=========================================");
    progress!(args.quiet, "Input MAF: {}", args.input);
    if let Some(ref out) = args.output {
        progress!(args.quiet, "Output TSV: {}", out);
    }
    progress!(args.quiet, "Top genes: {}", config.top_n);
    progress!(args.quiet, "P-value cutoff: {}", config.pvalue_cutoff);
    progress!(args.quiet, "Threads: {}", args.threads);
    progress!(args.quiet);

    // Step 1: Load the mutation table
    progress!(args.quiet, "Step 1: Loading MAF...");
    let pb_load = make_spinner(args.quiet);
    pb_load.set_message("reading records");
    let cohort = maf_reader::load(Path::new(&args.input))?;
    pb_load.finish_and_clear();
    progress!(
        args.quiet,
        "  {} records across {} samples",
        cohort.records.len(),
        cohort.sample_count()
    );

    if args.summary {
        progress!(args.quiet);
        println!("{}", summary::summarize(&cohort));
    }

    // Step 2: Select the top mutated genes
    progress!(args.quiet);
    progress!(args.quiet, "Step 2: Selecting top {} mutated genes...", config.top_n);
    let mutation_matrix = matrix::build_matrix(&cohort, config.top_n);
    let k = mutation_matrix.ranking.len();
    progress!(args.quiet, "  Selected {} genes", k);
    for gene in mutation_matrix.ranking.iter().take(5) {
        progress!(args.quiet, "    {} ({} samples)", gene.symbol, gene.mutated_samples);
    }
    if k > 5 {
        progress!(args.quiet, "    ...");
    }

    // Step 3: Pairwise Fisher's exact tests
    let n_pairs = interactions::pair_count(k);
    progress!(args.quiet);
    progress!(args.quiet, "Step 3: Testing {} gene pairs...", n_pairs);
    let pb_pairs = make_progress_bar(args.quiet, n_pairs as u64);
    let raw = interactions::test_pairwise(&mutation_matrix, cohort.sample_count(), Some(&pb_pairs))?;
    pb_pairs.finish_and_clear();

    // Step 4: FDR correction and filtering
    progress!(args.quiet, "Step 4: Benjamini-Hochberg correction...");
    let adjusted = significance::adjust_results(raw, config.pvalue_cutoff);
    let n_significant = adjusted.iter().filter(|r| r.significant).count();
    progress!(
        args.quiet,
        "  Significant pairs (pAdjust < {}): {} / {}",
        config.pvalue_cutoff,
        n_significant,
        adjusted.len()
    );
    let findings = significance::rank_significant(adjusted);

    // Step 5: Report
    progress!(args.quiet);
    match &findings {
        InteractionFindings::Significant(results) => {
            print!("{}", output::render_table(results));
            if let Some(ref out) = args.output {
                output::write_results(results, Path::new(out))?;
                progress!(args.quiet, "Results written to: {}", out);
            }
        }
        InteractionFindings::NoneFound { tested } => {
            println!("{}", output::NO_FINDINGS_MESSAGE);
            progress!(args.quiet, "  ({} pairs tested)", tested);
            if let Some(ref out) = args.output {
                output::write_results(&[], Path::new(out))?;
                progress!(args.quiet, "Empty result table written to: {}", out);
            }
        }
    }

    Ok(())
}
