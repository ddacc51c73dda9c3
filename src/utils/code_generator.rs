//! Short code generation.
//!
//! Codes are drawn from the 62-symbol alphanumeric alphabet. At the default
//! length of 9 there are about 1.35e16 possible codes, so collisions are rare;
//! uniqueness is still enforced by the store, not here.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 9;

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 7;

/// Longest code length accepted by configuration.
pub const MAX_CODE_LENGTH: usize = 32;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{7,32}$").expect("valid code regex"));

/// Source of candidate short codes.
///
/// Implementations are stateless with respect to the store: a returned code may
/// already be taken, and callers must rely on the store's atomic insert.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a fresh candidate code.
    fn generate(&self) -> String;
}

/// Generates random alphanumeric codes from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// `length` is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(self.length)
    }
}

/// Generates a random alphanumeric code of `length` characters.
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `candidate` could have been produced by a generator.
///
/// Used to reject impossible codes before touching the store.
pub fn looks_like_code(candidate: &str) -> bool {
    CODE_REGEX.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_length() {
        assert_eq!(generate_code(9).len(), 9);
        assert_eq!(generate_code(16).len(), 16);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        let code = generate_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_codes_are_unique() {
        let generator = RandomCodeGenerator::default();
        let codes: HashSet<String> = (0..10_000).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn test_generator_clamps_length() {
        assert_eq!(RandomCodeGenerator::new(1).length(), MIN_CODE_LENGTH);
        assert_eq!(RandomCodeGenerator::new(100).length(), MAX_CODE_LENGTH);
        assert_eq!(RandomCodeGenerator::new(12).generate().len(), 12);
    }

    #[test]
    fn test_generated_code_looks_like_code() {
        let generator = RandomCodeGenerator::default();
        for _ in 0..100 {
            assert!(looks_like_code(&generator.generate()));
        }
    }

    #[test]
    fn test_looks_like_code_rejects_garbage() {
        assert!(looks_like_code("doesnotexist"));
        assert!(!looks_like_code(""));
        assert!(!looks_like_code("abc"));
        assert!(!looks_like_code("abc-def-ghi"));
        assert!(!looks_like_code("abcdefg/../"));
        assert!(!looks_like_code(&"a".repeat(33)));
    }
}
