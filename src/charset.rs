//! Candidate alphabet and fixed-length password enumeration.
//!
//! The search space for a length `L` is treated as a base-`|Σ|` numeral
//! system: the candidate at ordinal `n` is the `L`-digit representation of
//! `n`, least-significant digit on the right. `seek` materializes an
//! ordinal, `advance` is the in-place successor.

use crate::config::CrackConfig;

/// Every printable ASCII character except space: the upper bound on `|Σ|`.
pub const MAX_CHARSET: usize = 94;

const SYMBOLS: &[u8; 32] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Ordered, duplicate-free candidate alphabet, stored inline.
///
/// Classes are concatenated in a fixed order (numbers, lowercase,
/// uppercase, symbols) so enumeration is deterministic across runs.
#[derive(Clone)]
pub struct CharSet {
    data: [u8; MAX_CHARSET],
    len: usize,
    /// `successor[b]` is the symbol after `b` in alphabet order; the last
    /// symbol wraps to the first. Carry handling in `advance` is a single
    /// table lookup.
    successor: [u8; 256],
}

impl CharSet {
    pub fn from_config(config: &CrackConfig) -> Self {
        let mut data = [0u8; MAX_CHARSET];
        let mut len = 0usize;

        if config.use_numbers {
            for b in b'0'..=b'9' {
                data[len] = b;
                len += 1;
            }
        }
        if config.use_lowercase {
            for b in b'a'..=b'z' {
                data[len] = b;
                len += 1;
            }
        }
        if config.use_uppercase {
            for b in b'A'..=b'Z' {
                data[len] = b;
                len += 1;
            }
        }
        if config.use_symbols {
            for &b in SYMBOLS {
                data[len] = b;
                len += 1;
            }
        }

        Self::from_symbols(&data[..len])
    }

    /// Build a set from an explicit symbol sequence. Order is preserved;
    /// duplicates are dropped, first occurrence wins; anything beyond
    /// [`MAX_CHARSET`] distinct symbols is ignored.
    pub fn from_symbols(symbols: &[u8]) -> Self {
        let mut data = [0u8; MAX_CHARSET];
        let mut len = 0usize;
        let mut seen = [false; 256];
        for &b in symbols {
            if !seen[b as usize] && len < MAX_CHARSET {
                seen[b as usize] = true;
                data[len] = b;
                len += 1;
            }
        }

        let mut successor = [0u8; 256];
        for i in 0..len {
            successor[data[i] as usize] = data[(i + 1) % len];
        }

        Self { data, len, successor }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The alphabet in enumeration order.
    #[inline(always)]
    pub fn symbols(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Number of candidates of length `len`, saturating at `u64::MAX`.
    /// Spaces anywhere near the saturation point are not exhaustible anyway.
    pub fn space(&self, len: usize) -> u64 {
        (self.len as u64).saturating_pow(len as u32)
    }

    /// Write the candidate at `ordinal` into `buf`.
    #[inline]
    pub fn seek(&self, mut ordinal: u64, buf: &mut [u8]) {
        let base = self.len as u64;
        for slot in buf.iter_mut().rev() {
            *slot = self.data[(ordinal % base) as usize];
            ordinal /= base;
        }
    }

    /// Advance `buf` to its successor candidate in place and return how
    /// many trailing positions changed. Amortized O(1): only a carry
    /// touches more than the final position, and the changed count lets
    /// callers rebuild exactly the invalidated suffix of any derived
    /// per-prefix state.
    #[inline(always)]
    pub fn advance(&self, buf: &mut [u8]) -> usize {
        let last = self.data[self.len - 1];
        let mut changed = 0usize;
        for slot in buf.iter_mut().rev() {
            let b = *slot;
            *slot = self.successor[b as usize];
            changed += 1;
            if b != last {
                break;
            }
        }
        changed
    }
}
