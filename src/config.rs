//! Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::CrackError;

/// Longest password the brute-force enumerator will generate. Worker scratch
/// buffers are sized to this, so candidates never touch the heap.
pub const MAX_PASSWORD_LEN: usize = 16;

/// Immutable configuration for one search invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrackConfig {
    /// Minimum length for generated passwords.
    pub min_length: usize,
    /// Maximum length for generated passwords.
    pub max_length: usize,
    /// Include lowercase letters `a-z`.
    pub use_lowercase: bool,
    /// Include uppercase letters `A-Z`.
    pub use_uppercase: bool,
    /// Include digits `0-9`.
    pub use_numbers: bool,
    /// Include the 32 ASCII punctuation symbols.
    pub use_symbols: bool,
    /// Run the embedded common-password corpus before brute force.
    pub use_dictionary: bool,
    /// Extra candidate words, tried before everything else.
    #[serde(default)]
    pub custom_words: Vec<String>,
}

impl CrackConfig {
    /// True if any character class is enabled for brute force.
    pub fn has_charset(&self) -> bool {
        self.use_lowercase || self.use_uppercase || self.use_numbers || self.use_symbols
    }

    /// Check the invariants of §configuration: `1 <= min <= max <= 16`, and
    /// at least one character class or the dictionary enabled.
    pub fn validate(&self) -> Result<(), CrackError> {
        if self.min_length == 0 {
            return Err(CrackError::InvalidConfig(
                "minimum length must be at least 1".into(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(CrackError::InvalidConfig(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_length, self.max_length
            )));
        }
        if self.max_length > MAX_PASSWORD_LEN {
            return Err(CrackError::InvalidConfig(format!(
                "maximum length {} exceeds the {} byte limit",
                self.max_length, MAX_PASSWORD_LEN
            )));
        }
        if !self.has_charset() && !self.use_dictionary {
            return Err(CrackError::InvalidConfig(
                "no character class selected and dictionary disabled".into(),
            ));
        }
        Ok(())
    }
}
