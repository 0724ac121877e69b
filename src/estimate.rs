//! Search-space estimation.

use crate::charset::CharSet;
use crate::config::CrackConfig;
use crate::dictionary;

/// Exact number of candidates the configured search enumerates: custom
/// words, the embedded corpus when enabled, and `Σ |Σ|^L` over the length
/// range. Computed in `u128`: the space is bounded by `16 · 94^16`, which
/// fits with room to spare, so no big-integer dependency is needed.
pub fn estimate(config: &CrackConfig) -> u128 {
    let mut total = config.custom_words.len() as u128;
    if config.use_dictionary {
        total += dictionary::embedded_len() as u128;
    }

    let charset = CharSet::from_config(config);
    if !charset.is_empty() {
        for len in config.min_length..=config.max_length {
            total += (charset.len() as u128).pow(len as u32);
        }
    }
    total
}
