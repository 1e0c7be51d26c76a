pub mod analyze;
pub mod convert;
pub mod generate;
pub mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use coderand_core::TestConfiguration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no codes found in {0}")]
    EmptyInput(String),

    #[error("progress bar: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("{failed} of {total} input(s) could not be converted")]
    Conversion { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Build the run configuration: file (if any), then `--strict`, then `--alpha`.
pub fn load_config(
    path: Option<&Path>,
    alpha: Option<f64>,
    strict: bool,
) -> Result<TestConfiguration> {
    let mut config = match path {
        Some(p) => {
            let file = File::open(p)?;
            serde_json::from_reader(io::BufReader::new(file))?
        }
        None => TestConfiguration::default(),
    };
    if strict {
        config.runs_min_length = config.runs_min_length.max(100);
    }
    if let Some(a) = alpha {
        config.alpha = a;
    }
    if !(config.alpha > 0.0 && config.alpha < 1.0) {
        return Err(CliError::Config(format!(
            "alpha must be in (0, 1), got {}",
            config.alpha
        )));
    }
    log::debug!("configuration: {config:?}");
    Ok(config)
}

/// Open `path` for writing, or stdout when `None`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = load_config(None, None, false).unwrap();
        assert_eq!(cfg, TestConfiguration::default());
    }

    #[test]
    fn test_alpha_override_and_strict() {
        let cfg = load_config(None, Some(0.05), true).unwrap();
        assert_eq!(cfg.alpha, 0.05);
        assert_eq!(cfg.runs_min_length, 100);
    }

    #[test]
    fn test_alpha_out_of_range() {
        assert!(matches!(
            load_config(None, Some(1.5), false),
            Err(CliError::Config(_))
        ));
        assert!(load_config(None, Some(0.0), false).is_err());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"pattern_length": 3, "alpha": 0.02}"#).unwrap();
        let cfg = load_config(Some(&path), None, false).unwrap();
        assert_eq!(cfg.pattern_length, 3);
        assert_eq!(cfg.alpha, 0.02);
        assert_eq!(cfg.template_length, 9);
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/cfg.json")), None, false);
        assert!(matches!(err, Err(CliError::Io(_))));
    }
}
