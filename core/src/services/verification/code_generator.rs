//! Verification code generation

use rand::rngs::OsRng;
use rand::Rng;

use crate::domain::entities::email_verification::CODE_LENGTH;

/// Generate a cryptographically secure random verification code.
///
/// Draws from the OS CSPRNG via `OsRng`; `gen_range` rejects out-of-range
/// samples, so the distribution over the 6-digit space is uniform.
pub fn generate_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = CODE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_format() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().expect("generated code should parse");
            assert!(num < 1_000_000);
        }
    }

    #[test]
    fn test_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
        // 100 draws from a million-value space collapsing to one value
        // would mean the source is broken
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_zero_padding() {
        // Small values must keep their leading zeros
        assert_eq!(format!("{:0width$}", 7u32, width = CODE_LENGTH), "000007");
    }
}
