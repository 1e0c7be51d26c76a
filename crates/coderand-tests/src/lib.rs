//! NIST SP 800-22 inspired randomness battery for base-32 codes.
//!
//! Nine tests run over the bit sequence of a single code. Each one returns a
//! [`TestOutcome`] with a p-value and a pass/fail verdict against the
//! configured significance level, or an indeterminate outcome when the
//! sequence is too short for the test's assumptions. [`run_all`] gathers the
//! nine outcomes into an [`AnalysisRecord`].
//!
//! ```
//! use coderand_core::{TestConfiguration, to_bits};
//! use coderand_tests::{TestKind, run_all};
//!
//! let bits = to_bits("ABCDEF2345").unwrap();
//! let record = run_all(&bits, "ABCDEF2345", &TestConfiguration::default());
//! assert_eq!(record.outcomes.len(), 9);
//! assert!(record.outcome(TestKind::Frequency).unwrap().p_value.is_some());
//! assert!(record.outcome(TestKind::Spectral).unwrap().is_indeterminate());
//! ```

pub mod numeric;

use coderand_core::{BitSequence, SerialPValue, TestConfiguration};
use serde::Serialize;
use std::f64::consts::LN_2;

use numeric::{
    chi_square_p, cyclic_pattern_counts, dft_magnitudes, erfc, igamc, ln_gamma,
    normal_two_sided_p,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// The nine tests of the battery, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Frequency,
    BlockFrequency,
    Runs,
    LongestRun,
    Serial,
    ApproximateEntropy,
    Spectral,
    Poker,
    OverlappingPatterns,
}

impl TestKind {
    pub const ALL: [TestKind; 9] = [
        TestKind::Frequency,
        TestKind::BlockFrequency,
        TestKind::Runs,
        TestKind::LongestRun,
        TestKind::Serial,
        TestKind::ApproximateEntropy,
        TestKind::Spectral,
        TestKind::Poker,
        TestKind::OverlappingPatterns,
    ];

    /// Human-readable test name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Frequency => "Frequency (Monobit)",
            Self::BlockFrequency => "Block Frequency",
            Self::Runs => "Runs",
            Self::LongestRun => "Longest Run of Ones",
            Self::Serial => "Serial",
            Self::ApproximateEntropy => "Approximate Entropy",
            Self::Spectral => "Spectral (DFT)",
            Self::Poker => "Poker",
            Self::OverlappingPatterns => "Overlapping Patterns",
        }
    }

    /// Column key used in exported results.
    pub fn key(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::BlockFrequency => "block_frequency",
            Self::Runs => "runs",
            Self::LongestRun => "longest_run",
            Self::Serial => "serial",
            Self::ApproximateEntropy => "approximate_entropy",
            Self::Spectral => "spectral",
            Self::Poker => "poker",
            Self::OverlappingPatterns => "overlapping_patterns",
        }
    }

    /// Shortest sequence (in bits) this test evaluates for an `n`-bit input.
    ///
    /// Only Block Frequency depends on `n`, through its adaptive block size.
    /// Saturates at `usize::MAX` for absurd pattern lengths.
    pub fn minimum_length(self, config: &TestConfiguration, n: usize) -> usize {
        match self {
            Self::Frequency => 1,
            Self::BlockFrequency => config.block_size_for(n).max(1),
            Self::Runs => config.runs_min_length.max(1),
            Self::LongestRun => LONGEST_RUN_MIN_BITS,
            Self::Serial => pow2(config.pattern_length.saturating_add(1)).saturating_mul(5),
            Self::ApproximateEntropy => pow2(config.pattern_length).saturating_mul(10),
            Self::Spectral => config.spectral_min_length.max(2),
            Self::Poker => pow2(config.poker_block_length).saturating_mul(10),
            Self::OverlappingPatterns => config.template_block_size.max(1),
        }
    }

    /// Run this test on a raw bit slice (0/1 values).
    pub fn evaluate(self, bits: &[u8], config: &TestConfiguration) -> TestOutcome {
        match self {
            Self::Frequency => frequency(bits, config),
            Self::BlockFrequency => block_frequency(bits, config),
            Self::Runs => runs(bits, config),
            Self::LongestRun => longest_run_of_ones(bits, config),
            Self::Serial => serial(bits, config),
            Self::ApproximateEntropy => approximate_entropy(bits, config),
            Self::Spectral => spectral(bits, config),
            Self::Poker => poker(bits, config),
            Self::OverlappingPatterns => overlapping_patterns(bits, config),
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TestKind {
    type Err = String;

    /// Accepts either the column key or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.key() == wanted || k.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown test '{s}'"))
    }
}

/// Result of a single test on a single sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOutcome {
    pub test: TestKind,
    pub name: String,
    /// `None` when the test was not applicable (indeterminate).
    pub p_value: Option<f64>,
    /// Raw test statistic; NaN when indeterminate.
    pub statistic: f64,
    pub passed: bool,
    pub details: String,
}

impl TestOutcome {
    fn computed(
        test: TestKind,
        p: f64,
        statistic: f64,
        config: &TestConfiguration,
        details: String,
    ) -> Self {
        TestOutcome {
            test,
            name: test.name().to_string(),
            passed: config.passes(p),
            p_value: Some(p),
            statistic,
            details,
        }
    }

    /// True when the test was not applicable to the sequence.
    pub fn is_indeterminate(&self) -> bool {
        self.p_value.is_none()
    }
}

/// All nine outcomes for one code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub code: String,
    pub bit_length: usize,
    /// Binary entropy (bits) of the ones proportion.
    pub monobit_entropy: f64,
    /// One outcome per test, in [`TestKind::ALL`] order.
    pub outcomes: Vec<TestOutcome>,
    /// True iff every non-indeterminate test passed.
    pub overall_passed: bool,
}

impl AnalysisRecord {
    pub fn outcome(&self, test: TestKind) -> Option<&TestOutcome> {
        self.outcomes.iter().find(|o| o.test == test)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.passed && !o.is_indeterminate())
            .count()
    }

    pub fn indeterminate_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_indeterminate()).count()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Indeterminate outcome when the sequence is shorter than the test needs.
fn insufficient(test: TestKind, needed: usize, got: usize) -> TestOutcome {
    indeterminate(test, format!("Insufficient data: need {needed} bits, got {got}"))
}

fn indeterminate(test: TestKind, details: String) -> TestOutcome {
    TestOutcome {
        test,
        name: test.name().to_string(),
        p_value: None,
        statistic: f64::NAN,
        passed: false,
        details,
    }
}

/// `2^k`, saturating.
fn pow2(k: usize) -> usize {
    if k >= usize::BITS as usize {
        usize::MAX
    } else {
        1usize << k
    }
}

fn ones(bits: &[u8]) -> usize {
    bits.iter().filter(|&&b| b == 1).count()
}

fn longest_one_run(block: &[u8]) -> usize {
    let mut max_run = 0;
    let mut current = 0;
    for &bit in block {
        if bit == 1 {
            current += 1;
            max_run = max_run.max(current);
        } else {
            current = 0;
        }
    }
    max_run
}

/// `Σ (observed - N·p)² / (N·p)`, skipping categories with zero expectation.
fn chi_square(observed: &[u64], probs: &[f64], total: f64) -> f64 {
    observed
        .iter()
        .zip(probs)
        .map(|(&obs, &p)| {
            let expected = total * p;
            if expected > 0.0 {
                let diff = obs as f64 - expected;
                diff * diff / expected
            } else {
                0.0
            }
        })
        .sum()
}

/// Binary Shannon entropy of the ones proportion; 0 for constant or empty input.
pub fn monobit_entropy(bits: &[u8]) -> f64 {
    if bits.is_empty() {
        return 0.0;
    }
    let p = ones(bits) as f64 / bits.len() as f64;
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. FREQUENCY TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Frequency (monobit): proportion of ones vs zeros over the whole sequence.
pub fn frequency(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::Frequency;
    let n = bits.len();
    if n == 0 {
        return insufficient(test, 1, n);
    }
    let s: i64 = bits.iter().map(|&b| if b == 1 { 1i64 } else { -1i64 }).sum();
    let s_obs = s.unsigned_abs() as f64 / (n as f64).sqrt();
    let p = erfc(s_obs / std::f64::consts::SQRT_2);
    TestOutcome::computed(test, p, s_obs, config, format!("S={s}, n={n}"))
}

/// Block frequency: proportion of ones within non-overlapping M-bit blocks.
pub fn block_frequency(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::BlockFrequency;
    let n = bits.len();
    let block_size = config.block_size_for(n);
    if block_size == 0 {
        return indeterminate(test, "Block size must be at least 1".to_string());
    }
    if n < block_size {
        return insufficient(test, block_size, n);
    }
    let num_blocks = n / block_size;
    let mut chi2 = 0.0;
    for block in bits.chunks_exact(block_size) {
        let proportion = ones(block) as f64 / block_size as f64;
        chi2 += (proportion - 0.5) * (proportion - 0.5);
    }
    chi2 *= 4.0 * block_size as f64;
    let p = igamc(num_blocks as f64 / 2.0, chi2 / 2.0);
    TestOutcome::computed(
        test,
        p,
        chi2,
        config,
        format!("blocks={num_blocks}, M={block_size}"),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. RUNS TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs: total number of maximal same-valued stretches.
///
/// A sequence whose ones proportion is too far from one half fails outright
/// with p = 0, since the runs statistic assumes near balance.
pub fn runs(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::Runs;
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }
    let nf = n as f64;
    let prop = ones(bits) as f64 / nf;
    let v_obs = 1 + bits.windows(2).filter(|w| w[0] != w[1]).count();

    if (prop - 0.5).abs() >= 2.0 / nf.sqrt() {
        return TestOutcome {
            test,
            name: test.name().to_string(),
            passed: false,
            p_value: Some(0.0),
            statistic: v_obs as f64,
            details: format!("Pre-test failed: proportion={prop:.4}"),
        };
    }
    let spread = prop * (1.0 - prop);
    if spread <= 0.0 {
        return TestOutcome {
            test,
            name: test.name().to_string(),
            passed: false,
            p_value: Some(0.0),
            statistic: v_obs as f64,
            details: "Zero variance".to_string(),
        };
    }
    let expected = 2.0 * nf * spread;
    let z = (v_obs as f64 - expected).abs() / (2.0 * (2.0 * nf).sqrt() * spread);
    let p = erfc(z);
    TestOutcome::computed(
        test,
        p,
        v_obs as f64,
        config,
        format!("runs={v_obs}, expected={expected:.1}"),
    )
}

const LONGEST_RUN_MIN_BITS: usize = 128;

/// NIST block layout for the longest-run test, chosen by sequence length.
struct LongestRunTable {
    block_size: usize,
    /// Longest-run value of the first category (`<= v_min`).
    v_min: usize,
    probs: &'static [f64],
}

fn longest_run_table(n: usize) -> LongestRunTable {
    if n < 6272 {
        LongestRunTable {
            block_size: 8,
            v_min: 1,
            probs: &[0.2148, 0.3672, 0.2305, 0.1875],
        }
    } else if n < 750_000 {
        LongestRunTable {
            block_size: 128,
            v_min: 4,
            probs: &[0.1174, 0.2430, 0.2493, 0.1752, 0.1027, 0.1124],
        }
    } else {
        LongestRunTable {
            block_size: 10_000,
            v_min: 10,
            probs: &[0.0882, 0.2092, 0.2483, 0.1933, 0.1208, 0.0675, 0.0727],
        }
    }
}

/// Longest run of ones within M-bit blocks, chi-square against NIST category probabilities.
pub fn longest_run_of_ones(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::LongestRun;
    let n = bits.len();
    if n < LONGEST_RUN_MIN_BITS {
        return insufficient(test, LONGEST_RUN_MIN_BITS, n);
    }
    let table = longest_run_table(n);
    let k = table.probs.len() - 1;
    let v_max = table.v_min + k;

    let mut observed = vec![0u64; table.probs.len()];
    for block in bits.chunks_exact(table.block_size) {
        let run = longest_one_run(block).clamp(table.v_min, v_max);
        observed[run - table.v_min] += 1;
    }
    let num_blocks = n / table.block_size;
    let chi2 = chi_square(&observed, table.probs, num_blocks as f64);
    let p = igamc(k as f64 / 2.0, chi2 / 2.0);
    TestOutcome::computed(
        test,
        p,
        chi2,
        config,
        format!(
            "blocks={num_blocks}, M={}, K={k}, counts={observed:?}",
            table.block_size
        ),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. SERIAL TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// ψ² statistic over cyclic overlapping `m`-bit windows. ψ²₀ is 0 by definition.
fn psi_sq(bits: &[u8], m: usize) -> f64 {
    if m == 0 {
        return 0.0;
    }
    let n = bits.len() as f64;
    let counts = cyclic_pattern_counts(bits, m);
    let sum_sq: f64 = counts.iter().map(|&c| (c as f64) * (c as f64)).sum();
    sum_sq * pow2(m) as f64 / n - n
}

/// Serial: uniformity of overlapping m-bit patterns (cyclic).
pub fn serial(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::Serial;
    let m = config.pattern_length;
    if m < 2 {
        return indeterminate(test, format!("Pattern length must be at least 2, got {m}"));
    }
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }

    let psi_m = psi_sq(bits, m);
    let psi_m1 = psi_sq(bits, m - 1);
    let psi_m2 = psi_sq(bits, m - 2);
    let delta1 = psi_m - psi_m1;
    let delta2 = psi_m - 2.0 * psi_m1 + psi_m2;

    let p1 = igamc(2f64.powi(m as i32 - 2), delta1 / 2.0);
    let p2 = igamc(2f64.powi(m as i32 - 3), delta2 / 2.0);
    let p = match config.serial_p_value {
        SerialPValue::First => p1,
        SerialPValue::Minimum => p1.min(p2),
    };
    TestOutcome::computed(
        test,
        p,
        delta1,
        config,
        format!("m={m}, del1={delta1:.4}, del2={delta2:.4}, p1={p1:.6}, p2={p2:.6}"),
    )
}

/// Φ(m) = Σ (c/n)·ln(c/n) over cyclic m-bit window counts; empty bins contribute 0.
fn phi(bits: &[u8], m: usize) -> f64 {
    let n = bits.len() as f64;
    cyclic_pattern_counts(bits, m)
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / n;
            p * p.ln()
        })
        .sum()
}

/// Approximate entropy: compares m and m+1 bit pattern frequencies.
pub fn approximate_entropy(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::ApproximateEntropy;
    let m = config.pattern_length;
    if m == 0 {
        return indeterminate(test, "Pattern length must be at least 1".to_string());
    }
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }

    let apen = phi(bits, m) - phi(bits, m + 1);
    // ApEn can exceed ln 2 by rounding on degenerate input; the statistic is
    // non-negative by construction.
    let chi2 = (2.0 * n as f64 * (LN_2 - apen)).max(0.0);
    let p = igamc(2f64.powi(m as i32 - 1), chi2 / 2.0);
    TestOutcome::computed(
        test,
        p,
        chi2,
        config,
        format!("ApEn={apen:.6}, m={m}"),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. SPECTRAL TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// ln(1 / 0.05)
const SPECTRAL_LN_INV_CONFIDENCE: f64 = 2.995_732_273_553_991;

/// DFT spectral: detects periodic features via peak heights of the Fourier transform.
pub fn spectral(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::Spectral;
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }
    let nf = n as f64;
    let magnitudes = dft_magnitudes(bits);

    let threshold = (SPECTRAL_LN_INV_CONFIDENCE * nf).sqrt();
    let n0 = 0.95 * nf / 2.0;
    let n1 = magnitudes.iter().filter(|&&m| m < threshold).count() as f64;
    let d = (n1 - n0) / (nf * 0.95 * 0.05 / 4.0).sqrt();
    let p = normal_two_sided_p(d);
    TestOutcome::computed(
        test,
        p,
        d,
        config,
        format!(
            "peaks_below_threshold={}/{}, T={threshold:.3}",
            n1 as u64,
            magnitudes.len()
        ),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. PATTERN TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Poker: chi-square over non-overlapping m-bit block patterns.
pub fn poker(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::Poker;
    let m = config.poker_block_length;
    if m == 0 {
        return indeterminate(test, "Block length must be at least 1".to_string());
    }
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }
    let num_patterns = pow2(m);
    let num_blocks = n / m;
    let mut counts = vec![0u64; num_patterns];
    for block in bits.chunks_exact(m) {
        let val = block.iter().fold(0usize, |acc, &b| (acc << 1) | b as usize);
        counts[val] += 1;
    }
    let sum_sq: f64 = counts.iter().map(|&c| (c as f64) * (c as f64)).sum();
    let chi2 = num_patterns as f64 / num_blocks as f64 * sum_sq - num_blocks as f64;
    let p = chi_square_p((num_patterns - 1) as f64, chi2);
    TestOutcome::computed(
        test,
        p,
        chi2,
        config,
        format!("blocks={num_blocks}, m={m}"),
    )
}

/// Category probabilities NIST tabulates for a 1032-bit block and a 9-bit template.
const OVERLAPPING_NIST_PROBS: [f64; 6] = [0.364091, 0.185659, 0.139381, 0.100571, 0.070432, 0.139865];

/// Number of occurrence categories beyond zero (0, 1, 2, 3, 4, >=5).
const OVERLAPPING_K: usize = 5;

/// Expected probabilities of 0..K-1 and >=K template hits per block.
fn overlapping_probabilities(block_size: usize, m: usize) -> [f64; OVERLAPPING_K + 1] {
    if block_size == 1032 && m == 9 {
        return OVERLAPPING_NIST_PROBS;
    }
    let lambda = (block_size - m + 1) as f64 / 2f64.powi(m as i32);
    let eta = lambda / 2.0;
    let mut probs = [0.0; OVERLAPPING_K + 1];
    probs[0] = (-eta).exp();
    for (u, slot) in probs.iter_mut().enumerate().take(OVERLAPPING_K).skip(1) {
        let uf = u as f64;
        *slot = (1..=u)
            .map(|l| {
                let lf = l as f64;
                (-eta - uf * LN_2 + lf * eta.ln() - ln_gamma(lf + 1.0) + ln_gamma(uf)
                    - ln_gamma(lf)
                    - ln_gamma(uf - lf + 1.0))
                .exp()
            })
            .sum();
    }
    let head: f64 = probs[..OVERLAPPING_K].iter().sum();
    probs[OVERLAPPING_K] = (1.0 - head).max(0.0);
    probs
}

/// Overlapping occurrences of an all-ones template of length `m` in `block`.
fn count_all_ones_windows(block: &[u8], m: usize) -> usize {
    let mut run = 0usize;
    let mut hits = 0usize;
    for &bit in block {
        if bit == 1 {
            run += 1;
            if run >= m {
                hits += 1;
            }
        } else {
            run = 0;
        }
    }
    hits
}

/// Overlapping template matching with an all-ones template.
pub fn overlapping_patterns(bits: &[u8], config: &TestConfiguration) -> TestOutcome {
    let test = TestKind::OverlappingPatterns;
    let m = config.template_length;
    let block_size = config.template_block_size;
    if m == 0 || block_size == 0 || m > block_size {
        return indeterminate(
            test,
            format!("Template length {m} does not fit block size {block_size}"),
        );
    }
    let n = bits.len();
    let needed = test.minimum_length(config, n);
    if n < needed {
        return insufficient(test, needed, n);
    }
    let num_blocks = n / block_size;
    let mut observed = [0u64; OVERLAPPING_K + 1];
    for block in bits.chunks_exact(block_size) {
        let hits = count_all_ones_windows(block, m).min(OVERLAPPING_K);
        observed[hits] += 1;
    }
    let probs = overlapping_probabilities(block_size, m);
    let chi2 = chi_square(&observed, &probs, num_blocks as f64);
    let p = igamc(OVERLAPPING_K as f64 / 2.0, chi2 / 2.0);
    TestOutcome::computed(
        test,
        p,
        chi2,
        config,
        format!("blocks={num_blocks}, M={block_size}, m={m}, counts={observed:?}"),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Test battery
// ═══════════════════════════════════════════════════════════════════════════════

/// Run one test. A panic inside the test becomes an indeterminate outcome.
pub fn run_one(test: TestKind, bits: &BitSequence, config: &TestConfiguration) -> TestOutcome {
    let data = bits.as_slice();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test.evaluate(data, config))) {
        Ok(outcome) => outcome,
        Err(_) => {
            log::warn!("{} panicked on a {}-bit sequence", test.name(), data.len());
            indeterminate(test, "Test panicked".to_string())
        }
    }
}

/// Run the complete nine-test battery on one code's bit sequence.
///
/// `code` only labels the record; nothing is derived from it.
pub fn run_all(bits: &BitSequence, code: &str, config: &TestConfiguration) -> AnalysisRecord {
    let outcomes: Vec<TestOutcome> = TestKind::ALL
        .iter()
        .map(|&test| run_one(test, bits, config))
        .collect();
    let overall_passed = outcomes
        .iter()
        .filter(|o| !o.is_indeterminate())
        .all(|o| o.passed);
    log::debug!(
        "{code}: {} bits, {}/{} applicable tests passed",
        bits.len(),
        outcomes.iter().filter(|o| o.passed).count(),
        outcomes.iter().filter(|o| !o.is_indeterminate()).count()
    );
    AnalysisRecord {
        code: code.to_string(),
        bit_length: bits.len(),
        monobit_entropy: monobit_entropy(bits.as_slice()),
        outcomes,
        overall_passed,
    }
}
