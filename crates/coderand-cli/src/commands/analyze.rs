use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use coderand_core::{TestConfiguration, to_bits};
use coderand_tests::{AnalysisRecord, run_all};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use super::report::{self, OutputFormat};
use super::{CliError, Result};

/// Outcome of analyzing one input code. Every input yields exactly one.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CodeResult {
    Analyzed(AnalysisRecord),
    Failed {
        code: String,
        error: String,
        overall_passed: bool,
    },
}

impl CodeResult {
    pub fn code(&self) -> &str {
        match self {
            Self::Analyzed(r) => &r.code,
            Self::Failed { code, .. } => code,
        }
    }

    pub fn overall_passed(&self) -> bool {
        match self {
            Self::Analyzed(r) => r.overall_passed,
            Self::Failed { .. } => false,
        }
    }

    pub fn record(&self) -> Option<&AnalysisRecord> {
        match self {
            Self::Analyzed(r) => Some(r),
            Self::Failed { .. } => None,
        }
    }
}

/// Convert then test one code. Conversion errors become a `Failed` result.
pub fn analyze_code(code: &str, config: &TestConfiguration) -> CodeResult {
    match to_bits(code) {
        Ok(bits) => CodeResult::Analyzed(run_all(&bits, code, config)),
        Err(e) => CodeResult::Failed {
            code: code.to_string(),
            error: e.to_string(),
            overall_passed: false,
        },
    }
}

/// Lazily yield every non-empty trimmed cell of every row. No header row.
pub fn iter_codes<R: Read>(reader: R) -> impl Iterator<Item = Result<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .flat_map(|record| -> Vec<Result<String>> {
            match record {
                Ok(r) => r
                    .iter()
                    .filter(|f| !f.is_empty())
                    .map(|f| Ok(f.to_string()))
                    .collect(),
                Err(e) => vec![Err(e.into())],
            }
        })
}

/// Analyze a stream of codes on `threads` workers, preserving input order.
/// The first read error aborts the batch.
pub fn analyze_stream<I>(
    codes: I,
    config: &TestConfiguration,
    threads: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<CodeResult>>
where
    I: Iterator<Item = Result<String>> + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()?;
    let mut indexed: Vec<(usize, CodeResult)> = pool.install(|| {
        codes
            .enumerate()
            .par_bridge()
            .map(|(i, code)| {
                code.map(|code| {
                    let result = analyze_code(&code, config);
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    (i, result)
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;
    indexed.sort_unstable_by_key(|(i, _)| *i);
    Ok(indexed.into_iter().map(|(_, result)| result).collect())
}

pub struct AnalyzeCommandConfig<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub format: OutputFormat,
    pub processes: usize,
    pub limit: Option<usize>,
    pub quiet: bool,
    pub config: TestConfiguration,
}

pub fn run(cmd: AnalyzeCommandConfig<'_>) -> Result<()> {
    if !cmd.quiet {
        eprintln!(
            "Analyzing codes from {} with {} worker(s)...",
            cmd.input.display(),
            cmd.processes
        );
    }
    let input = File::open(cmd.input)?;
    let pb = if cmd.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} codes analyzed ({per_sec}, {elapsed})")?,
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    };

    let codes = iter_codes(input).take(cmd.limit.unwrap_or(usize::MAX));
    let t0 = Instant::now();
    let results = analyze_stream(codes, &cmd.config, cmd.processes, pb.as_ref());
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let results = results?;
    if results.is_empty() {
        return Err(CliError::EmptyInput(cmd.input.display().to_string()));
    }
    let failed: Vec<&str> = results
        .iter()
        .filter(|r| r.record().is_none())
        .map(CodeResult::code)
        .collect();
    if let Some(first) = failed.first() {
        log::warn!("{} code(s) failed conversion, first: {first}", failed.len());
    }
    if !cmd.quiet {
        eprintln!(
            "Analysis complete: {} codes in {:.2}s\n",
            results.len(),
            t0.elapsed().as_secs_f64()
        );
    }

    let mut out = super::open_output(cmd.output)?;
    report::write_results(&mut out, &results, cmd.format, &cmd.config)?;
    out.flush()?;
    if let (Some(path), false) = (cmd.output, cmd.quiet) {
        eprintln!("Results saved to {}", path.display());
    }
    Ok(())
}
