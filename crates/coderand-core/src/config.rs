//! Parameters shared by every analysis in a run.
//!
//! A [`TestConfiguration`] is built once and then only read, so a single
//! instance can be shared by reference across worker threads.

use serde::{Deserialize, Serialize};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.01;

/// Which Serial test p-value is reported as the test's p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerialPValue {
    /// p-value of the first difference statistic only.
    First,
    /// Smaller of the two p-values.
    #[default]
    Minimum,
}

/// Significance level plus per-test structural parameters.
///
/// Deserializing fills any missing field from [`Default`], so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfiguration {
    /// A test passes when its p-value is at least `alpha`.
    pub alpha: f64,
    /// Block Frequency block length. `None` picks `min(20, max(1, n / 10))`.
    pub block_size: Option<usize>,
    /// Pattern length `m` for the Serial and Approximate Entropy tests.
    pub pattern_length: usize,
    pub serial_p_value: SerialPValue,
    /// Poker test block length.
    pub poker_block_length: usize,
    /// Length of the all-ones template in the Overlapping Patterns test.
    pub template_length: usize,
    /// Overlapping Patterns block length.
    pub template_block_size: usize,
    /// Shortest sequence the Runs test will evaluate.
    pub runs_min_length: usize,
    /// Shortest sequence the Spectral test will evaluate.
    pub spectral_min_length: usize,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            block_size: None,
            pattern_length: 2,
            serial_p_value: SerialPValue::Minimum,
            poker_block_length: 4,
            template_length: 9,
            template_block_size: 1032,
            runs_min_length: 1,
            spectral_min_length: 1000,
        }
    }
}

impl TestConfiguration {
    /// Defaults with a custom significance level.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Defaults with the NIST recommended 100-bit floor for the Runs test.
    pub fn nist_strict() -> Self {
        Self {
            runs_min_length: 100,
            ..Self::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Block Frequency block length for a sequence of `n` bits.
    pub fn block_size_for(&self, n: usize) -> usize {
        self.block_size.unwrap_or_else(|| (n / 10).clamp(1, 20))
    }

    /// Whether a p-value clears the significance level.
    pub fn passes(&self, p_value: f64) -> bool {
        p_value >= self.alpha
    }
}
