//! Chunked brute-force scan over the per-length ordinal space.

use rayon::prelude::*;

use super::WitnessSlot;
use crate::archive::EncryptedEntry;
use crate::charset::CharSet;
use crate::config::{CrackConfig, MAX_PASSWORD_LEN};
use crate::crypto::ZipCipher;
use crate::progress::{self, SearchState, BATCH};

/// Candidates per work unit. Large enough that chunk hand-off is noise
/// next to the scan itself.
const CHUNK: u64 = 1 << 16;

/// Enumerate every length in the configured range, fanning each length's
/// ordinal space out as fixed-size chunks over the rayon pool.
pub(super) fn search(
    archive: &[u8],
    entry: &EncryptedEntry,
    config: &CrackConfig,
    state: &SearchState,
    witness: &WitnessSlot,
) {
    let charset = CharSet::from_config(config);
    if charset.is_empty() {
        return;
    }

    for len in config.min_length..=config.max_length {
        if state.found() {
            return;
        }

        let total = charset.space(len);
        let chunks = total.div_ceil(CHUNK);
        let _ = (0..chunks).into_par_iter().find_map_any(|chunk| {
            if state.found() {
                return Some(());
            }
            let start = chunk * CHUNK;
            let end = start.saturating_add(CHUNK).min(total);
            scan_range(archive, entry, &charset, len, start, end, state, witness);
            state.found().then_some(())
        });
    }
}

/// Scan one ordinal range: seek once, then advance in place. Every
/// [`BATCH`] candidates the worker re-checks the shared flags, flushes its
/// attempt count, and refreshes the sampled candidate.
#[allow(clippy::too_many_arguments)]
fn scan_range(
    archive: &[u8],
    entry: &EncryptedEntry,
    charset: &CharSet,
    len: usize,
    start: u64,
    end: u64,
    state: &SearchState,
    witness: &WitnessSlot,
) {
    let mut buf = [0u8; MAX_PASSWORD_LEN];
    let candidate = &mut buf[..len];
    charset.seek(start, candidate);

    // states[i] is the cipher state after the first i candidate bytes.
    // Advancing invalidates only the changed suffix, so the common case
    // re-derives a single byte of key schedule per candidate.
    let mut states = [ZipCipher::new(); MAX_PASSWORD_LEN + 1];
    for i in 0..len {
        let mut next = states[i];
        next.feed(candidate[i]);
        states[i + 1] = next;
    }

    let span = end - start;
    let mut tested: u64 = 0;
    while tested < span {
        if tested % BATCH == 0 {
            if state.found() {
                return;
            }
            progress::wait_if_paused(state);
        }

        let hit = super::try_candidate(archive, entry, states[len], candidate, state, witness);
        tested += 1;
        if tested % BATCH == 0 {
            state.add_attempts(BATCH);
            state.set_sample(candidate);
        }
        if hit {
            state.add_attempts(tested % BATCH);
            state.set_sample(candidate);
            return;
        }

        let changed = charset.advance(candidate);
        for i in len - changed..len {
            let mut next = states[i];
            next.feed(candidate[i]);
            states[i + 1] = next;
        }
    }

    state.add_attempts(tested % BATCH);
}
