use std::collections::HashSet;
use std::path::Path;

use coderand_core::ALPHABET;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CliError, Result};

/// Draw `count` distinct codes of `length` symbols.
pub fn generate_codes<R: Rng>(rng: &mut R, count: usize, length: usize) -> Result<Vec<String>> {
    if length == 0 {
        return Err(CliError::Config("code length must be at least 1".to_string()));
    }
    let capacity = 32usize
        .checked_pow(length.min(u32::MAX as usize) as u32)
        .unwrap_or(usize::MAX);
    if count > capacity {
        return Err(CliError::Config(format!(
            "only {capacity} distinct codes of length {length} exist, {count} requested"
        )));
    }
    let symbols: Vec<char> = ALPHABET.chars().collect();
    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    while codes.len() < count {
        let code: String = (0..length)
            .map(|_| symbols[rng.random_range(0..symbols.len())])
            .collect();
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    Ok(codes)
}

/// Write codes as CSV, `per_line` codes per row.
pub fn write_codes<W: std::io::Write>(out: W, codes: &[String], per_line: usize) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for row in codes.chunks(per_line.max(1)) {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run(
    count: usize,
    length: usize,
    per_line: usize,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let codes = generate_codes(&mut rng, count, length)?;
    let out = super::open_output(output)?;
    write_codes(out, &codes, per_line)?;
    if let Some(path) = output {
        eprintln!("Generated {} codes and saved to {}", codes.len(), path.display());
    }
    Ok(())
}
