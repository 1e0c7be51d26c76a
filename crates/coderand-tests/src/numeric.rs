//! Numerical primitives shared by the battery.
//!
//! Every chi-square based test funnels through [`igamc`] and every normal-tail
//! test through [`erfc`], so tests that share a formula share its precision.

use rustfft::{FftPlanner, num_complex::Complex};
use statrs::function::gamma::checked_gamma_ur;

/// Complementary error function.
pub fn erfc(x: f64) -> f64 {
    statrs::function::erf::erfc(x)
}

/// Upper regularized incomplete gamma function `Q(a, x) = Γ(a, x) / Γ(a)`.
///
/// Saturates instead of failing: `x <= 0` gives 1 and an infinite `x` gives 0.
pub fn igamc(a: f64, x: f64) -> f64 {
    if x.is_nan() || a.is_nan() || a <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }
    match checked_gamma_ur(a, x) {
        Ok(q) => clamp_probability(q),
        Err(e) => {
            log::warn!("igamc({a}, {x}) did not converge: {e}");
            if x > a { 0.0 } else { 1.0 }
        }
    }
}

/// Survival function of a chi-square distribution with `df` degrees of freedom.
pub fn chi_square_p(df: f64, chi2: f64) -> f64 {
    igamc(df / 2.0, chi2 / 2.0)
}

/// Two-sided normal tail probability of a standardized deviation.
pub fn normal_two_sided_p(z: f64) -> f64 {
    clamp_probability(erfc(z.abs() / std::f64::consts::SQRT_2))
}

/// Clamp into `[0, 1]`, leaving NaN untouched.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { p } else { p.clamp(0.0, 1.0) }
}

/// `ln Γ(x)`.
pub fn ln_gamma(x: f64) -> f64 {
    statrs::function::gamma::ln_gamma(x)
}

/// DFT moduli of the ±1-mapped sequence (0 -> -1, 1 -> +1) for the first
/// `n / 2` frequency components.
pub fn dft_magnitudes(bits: &[u8]) -> Vec<f64> {
    let n = bits.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer: Vec<Complex<f64>> = bits
        .iter()
        .map(|&b| Complex {
            re: if b == 1 { 1.0 } else { -1.0 },
            im: 0.0,
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer[..n / 2].iter().map(|c| c.norm()).collect()
}

/// Counts of every overlapping `m`-bit window, wrapping around the end of
/// `bits` so that exactly `n` windows are read.
///
/// Index `i` of the result is the count of the pattern whose big-endian value is `i`.
pub fn cyclic_pattern_counts(bits: &[u8], m: usize) -> Vec<u64> {
    let n = bits.len();
    if m == 0 || n == 0 {
        return vec![n as u64];
    }
    let mut counts = vec![0u64; 1usize << m];
    for i in 0..n {
        let mut val = 0usize;
        for j in 0..m {
            val = (val << 1) | bits[(i + j) % n] as usize;
        }
        counts[val] += 1;
    }
    counts
}
