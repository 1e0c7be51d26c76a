//! End-to-end properties of the battery over converted codes.

use coderand_core::{ALPHABET, BitSequence, TestConfiguration, to_bits};
use coderand_tests::{TestKind, run_all, run_one};

/// Deterministic pseudo-random codes drawn from the alphabet.
fn codes(count: usize, len: usize) -> Vec<String> {
    let symbols: Vec<char> = ALPHABET.chars().collect();
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    symbols[(state >> 59) as usize]
                })
                .collect()
        })
        .collect()
}

#[test]
fn short_code_end_to_end() {
    let code = "ABCDEF2345";
    let bits = to_bits(code).unwrap();
    assert_eq!(bits.len(), 50);
    let record = run_all(&bits, code, &TestConfiguration::default());

    assert_eq!(record.code, code);
    assert_eq!(record.bit_length, 50);
    assert_eq!(record.outcomes.len(), 9);

    for kind in [TestKind::Frequency, TestKind::Runs] {
        let outcome = record.outcome(kind).unwrap();
        assert!(outcome.p_value.is_some(), "{kind} should be computed");
    }
    for kind in [
        TestKind::LongestRun,
        TestKind::Spectral,
        TestKind::Poker,
        TestKind::OverlappingPatterns,
    ] {
        let outcome = record.outcome(kind).unwrap();
        assert!(outcome.is_indeterminate(), "{kind} should be indeterminate");
        assert!(!outcome.passed);
        assert!(outcome.statistic.is_nan());
    }

    // 17 ones in 50 bits: S = -16, p = erfc(16 / sqrt(100)) = 0.023652
    let freq = record.outcome(TestKind::Frequency).unwrap();
    assert!((freq.p_value.unwrap() - 0.023_651_6).abs() < 1e-6);
    assert_eq!(record.indeterminate_count(), 4);
    assert!(record.overall_passed);
}

#[test]
fn all_twos_code_fails() {
    let bits = to_bits("2222222222").unwrap();
    assert!(bits.as_slice().iter().all(|&b| b == 0));
    let record = run_all(&bits, "2222222222", &TestConfiguration::default());
    assert!(!record.overall_passed);
    assert!(!record.outcome(TestKind::Frequency).unwrap().passed);
    assert_eq!(record.outcome(TestKind::Runs).unwrap().p_value, Some(0.0));
    assert_eq!(record.monobit_entropy, 0.0);
}

#[test]
fn known_vectors_128_bits() {
    let config = TestConfiguration::default();

    let all_ones = BitSequence::from_raw(vec![1; 128]);
    let freq = run_one(TestKind::Frequency, &all_ones, &config);
    assert!(freq.p_value.unwrap() < 1e-20);
    assert!(!freq.passed);
    assert!(!run_one(TestKind::Runs, &all_ones, &config).passed);

    let alternating = BitSequence::from_raw((0..128).map(|i| (i % 2) as u8).collect());
    let runs = run_one(TestKind::Runs, &alternating, &config);
    assert!(!runs.passed);
    assert_eq!(runs.statistic, 128.0);
}

#[test]
fn run_all_is_deterministic() {
    let config = TestConfiguration::default();
    for code in codes(20, 220) {
        let bits = to_bits(&code).unwrap();
        let a = run_all(&bits, &code, &config);
        let b = run_all(&bits, &code, &config);
        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }
}

#[test]
fn p_values_are_probabilities() {
    let config = TestConfiguration::default();
    for len in [1, 10, 26, 40, 210] {
        for code in codes(25, len) {
            let record = run_all(&to_bits(&code).unwrap(), &code, &config);
            for outcome in &record.outcomes {
                if let Some(p) = outcome.p_value {
                    assert!(
                        (0.0..=1.0).contains(&p),
                        "{code}: {} p={p}",
                        outcome.name
                    );
                    assert!(!outcome.statistic.is_nan(), "{code}: {}", outcome.name);
                }
            }
        }
    }
}

#[test]
fn overall_passed_law() {
    let config = TestConfiguration::default();
    for code in codes(50, 30) {
        let record = run_all(&to_bits(&code).unwrap(), &code, &config);
        let expected = record
            .outcomes
            .iter()
            .filter(|o| !o.is_indeterminate())
            .all(|o| o.passed);
        assert_eq!(record.overall_passed, expected, "{code}");
    }
}

#[test]
fn lowering_alpha_never_revokes_a_pass() {
    let strict = TestConfiguration::new(0.05);
    let lenient = TestConfiguration::new(0.001);
    for code in codes(40, 40) {
        let bits = to_bits(&code).unwrap();
        let hi = run_all(&bits, &code, &strict);
        let lo = run_all(&bits, &code, &lenient);
        for (h, l) in hi.outcomes.iter().zip(&lo.outcomes) {
            assert_eq!(h.p_value, l.p_value);
            if h.passed {
                assert!(l.passed, "{code}: {}", h.name);
            }
        }
    }
}

#[test]
fn alpha_changes_verdict_not_p_value() {
    let bits = to_bits("ABCDEF2345").unwrap();
    let at_01 = run_one(TestKind::Frequency, &bits, &TestConfiguration::new(0.01));
    let at_05 = run_one(TestKind::Frequency, &bits, &TestConfiguration::new(0.05));
    assert_eq!(at_01.p_value, at_05.p_value);
    assert!(at_01.passed);
    assert!(!at_05.passed);
}

#[test]
fn long_code_runs_every_test() {
    let code = codes(1, 420).remove(0);
    let record = run_all(&to_bits(&code).unwrap(), &code, &TestConfiguration::default());
    assert_eq!(record.bit_length, 2100);
    assert_eq!(record.indeterminate_count(), 0);
}

#[test]
fn indeterminate_outcome_serializes_as_null() {
    let bits = to_bits("ABC").unwrap();
    let outcome = run_one(TestKind::Spectral, &bits, &TestConfiguration::default());
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json["p_value"].is_null());
    assert!(json["statistic"].is_null());
    assert_eq!(json["test"], "spectral");
}
