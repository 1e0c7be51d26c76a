use std::io::Write;

use clap::ValueEnum;
use coderand_core::TestConfiguration;
use coderand_tests::TestKind;

use super::Result;
use super::analyze::CodeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Summary,
}

/// Per-test tallies across a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSummary {
    pub test: TestKind,
    pub passed: usize,
    /// Records where the test produced a p-value.
    pub applicable: usize,
    pub indeterminate: usize,
    /// Mean p-value over applicable records.
    pub mean_p: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub conversion_failures: usize,
    pub overall_passed: usize,
    pub tests: Vec<TestSummary>,
}

impl BatchSummary {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.overall_passed as f64 / self.total as f64
        }
    }
}

pub fn summarize(results: &[CodeResult]) -> BatchSummary {
    let records: Vec<_> = results.iter().filter_map(CodeResult::record).collect();
    let tests = TestKind::ALL
        .iter()
        .map(|&test| {
            let p_values: Vec<f64> = records
                .iter()
                .filter_map(|r| r.outcome(test).and_then(|o| o.p_value))
                .collect();
            let passed = records
                .iter()
                .filter(|r| r.outcome(test).is_some_and(|o| o.passed))
                .count();
            TestSummary {
                test,
                passed,
                applicable: p_values.len(),
                indeterminate: records.len() - p_values.len(),
                mean_p: if p_values.is_empty() {
                    None
                } else {
                    Some(p_values.iter().sum::<f64>() / p_values.len() as f64)
                },
            }
        })
        .collect();
    BatchSummary {
        total: results.len(),
        conversion_failures: results.len() - records.len(),
        overall_passed: results.iter().filter(|r| r.overall_passed()).count(),
        tests,
    }
}

pub fn write_results(
    out: &mut dyn Write,
    results: &[CodeResult],
    format: OutputFormat,
    config: &TestConfiguration,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(out, results)?,
        OutputFormat::Summary => write!(out, "{}", render_summary(&summarize(results), config))?,
    }
    Ok(())
}

fn csv_header() -> Vec<String> {
    let mut header = vec![
        "code".to_string(),
        "bit_length".to_string(),
        "monobit_entropy".to_string(),
    ];
    for test in TestKind::ALL {
        header.push(format!("{}_pvalue", test.key()));
        header.push(format!("{}_passed", test.key()));
    }
    header.push("overall_passed".to_string());
    header.push("error".to_string());
    header
}

/// One row per result. Indeterminate p-values and absent fields are empty cells.
fn write_csv(out: &mut dyn Write, results: &[CodeResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(csv_header())?;
    for result in results {
        let mut row = Vec::with_capacity(3 + 2 * TestKind::ALL.len() + 2);
        match result {
            CodeResult::Analyzed(record) => {
                row.push(record.code.clone());
                row.push(record.bit_length.to_string());
                row.push(format!("{:.6}", record.monobit_entropy));
                for test in TestKind::ALL {
                    match record.outcome(test) {
                        Some(o) => {
                            row.push(o.p_value.map(|p| format!("{p:.6}")).unwrap_or_default());
                            row.push(o.passed.to_string());
                        }
                        None => row.extend([String::new(), String::new()]),
                    }
                }
                row.push(record.overall_passed.to_string());
                row.push(String::new());
            }
            CodeResult::Failed { code, error, .. } => {
                row.push(code.clone());
                row.extend(std::iter::repeat_n(String::new(), 2 + 2 * TestKind::ALL.len()));
                row.push("false".to_string());
                row.push(error.clone());
            }
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn render_summary(summary: &BatchSummary, config: &TestConfiguration) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n", "=".repeat(72)));
    s.push_str("CODE RANDOMNESS TESTS - SUMMARY REPORT\n");
    s.push_str(&format!("{}\n", "=".repeat(72)));
    s.push_str(&format!("Significance level (alpha): {}\n", config.alpha));
    s.push_str(&format!("Total codes analyzed:       {}\n", summary.total));
    s.push_str(&format!(
        "Conversion failures:        {}\n",
        summary.conversion_failures
    ));
    s.push_str(&format!(
        "Codes passing all tests:    {}\n",
        summary.overall_passed
    ));
    s.push_str(&format!(
        "Overall pass rate:          {:.2}%\n\n",
        summary.pass_rate()
    ));
    s.push_str(&format!(
        "{:<26} {:>17} {:>8} {:>10} {:>10}\n",
        "Test", "Passed", "Rate", "Indeterm.", "Mean p"
    ));
    s.push_str(&format!("{}\n", "-".repeat(72)));
    for t in &summary.tests {
        let rate = if t.applicable == 0 {
            "-".to_string()
        } else {
            format!("{:.2}%", 100.0 * t.passed as f64 / t.applicable as f64)
        };
        let mean = t
            .mean_p
            .map(|p| format!("{p:.6}"))
            .unwrap_or_else(|| "-".to_string());
        s.push_str(&format!(
            "{:<26} {:>17} {:>8} {:>10} {:>10}\n",
            t.test.name(),
            format!("{}/{}", t.passed, t.applicable),
            rate,
            t.indeterminate,
            mean
        ));
    }
    s.push_str(&format!("{}\n", "=".repeat(72)));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::analyze::analyze_code;

    fn sample() -> Vec<CodeResult> {
        let cfg = TestConfiguration::default();
        ["ABCDEF2345", "2222222222", "I0I0"]
            .iter()
            .map(|c| analyze_code(c, &cfg))
            .collect()
    }

    #[test]
    fn test_summary_counts() {
        let summary = summarize(&sample());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.conversion_failures, 1);
        assert_eq!(summary.overall_passed, 1);
        let spectral = summary
            .tests
            .iter()
            .find(|t| t.test == TestKind::Spectral)
            .unwrap();
        assert_eq!(spectral.applicable, 0);
        assert_eq!(spectral.indeterminate, 2);
        assert_eq!(spectral.mean_p, None);
        let freq = &summary.tests[0];
        assert_eq!(freq.applicable, 2);
        assert_eq!(freq.passed, 1);
    }

    #[test]
    fn test_csv_has_one_row_per_code() {
        let mut buf = Vec::new();
        write_results(
            &mut buf,
            &sample(),
            OutputFormat::Csv,
            &TestConfiguration::default(),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("code,bit_length,monobit_entropy,frequency_pvalue"));
        assert!(lines[0].ends_with("overall_passed,error"));
        assert!(lines[1].starts_with("ABCDEF2345,50,"));
        assert!(lines[3].starts_with("I0I0,"));
        assert!(lines[3].contains("invalid character"));
        let columns = lines[0].split(',').count();
        assert_eq!(columns, 3 + 18 + 2);
    }

    #[test]
    fn test_json_is_array_of_records() {
        let mut buf = Vec::new();
        write_results(
            &mut buf,
            &sample(),
            OutputFormat::Json,
            &TestConfiguration::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["code"], "ABCDEF2345");
        assert_eq!(arr[0]["outcomes"].as_array().unwrap().len(), 9);
        assert_eq!(arr[2]["overall_passed"], false);
        assert!(arr[2]["error"].is_string());
    }

    #[test]
    fn test_summary_text() {
        let text = render_summary(&summarize(&sample()), &TestConfiguration::default());
        assert!(text.contains("Total codes analyzed:       3"));
        assert!(text.contains("Overall pass rate:          33.33%"));
        assert!(text.contains("Spectral (DFT)"));
    }
}
