use coderand_core::{parse_bit_string, to_bits, to_code};

use super::{CliError, Result};

/// Print each code's bit string; conversion failures go to stderr.
pub fn run(codes: &[String]) -> Result<()> {
    let mut failed = 0;
    for code in codes {
        match to_bits(code) {
            Ok(bits) => println!("{code}\t{bits}"),
            Err(e) => {
                eprintln!("{code}\terror: {e}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(CliError::Conversion {
            failed,
            total: codes.len(),
        });
    }
    Ok(())
}

/// Print the code for a `0`/`1` bit string.
pub fn decode(bits: &str) -> Result<()> {
    let code = parse_bit_string(bits)
        .and_then(|b| to_code(b.as_slice()))
        .map_err(|e| {
            eprintln!("error: {e}");
            CliError::Conversion {
                failed: 1,
                total: 1,
            }
        })?;
    println!("{code}");
    Ok(())
}
