//! Search scheduling: the dictionary passes and the brute-force fan-out.
//!
//! Three phases in order: user-supplied words (sequential, the list is
//! small), the embedded corpus (parallel over newline-aligned slabs), then
//! brute force length by length over fixed-size ordinal chunks. All
//! parallel fan-out runs on the rayon global pool, one worker thread per
//! logical core.
//!
//! The witness is decided by the shared `found` flag: the first worker to
//! pass the full validator claims it and deposits the password in the
//! witness slot. Everyone else observes the raised flag within one batch
//! and drains; the parallel drivers short-circuit on it so a cancelled or
//! decided search never walks the rest of the chunk index space.

mod brute;

use std::sync::{Arc, Mutex};

use rayon::prelude::*;

use crate::archive::EncryptedEntry;
use crate::config::CrackConfig;
use crate::crypto::ZipCipher;
use crate::dictionary;
use crate::progress::{self, Phase, SearchState, BATCH};
use crate::validate;

/// Single-writer slot for the confirmed password.
pub(super) type WitnessSlot = Mutex<Option<Vec<u8>>>;

/// Run all configured phases and return the witness, if any.
pub(crate) fn run(
    archive: &[u8],
    entry: &EncryptedEntry,
    config: &CrackConfig,
    state: &Arc<SearchState>,
) -> Option<Vec<u8>> {
    let witness: WitnessSlot = Mutex::new(None);

    if !config.custom_words.is_empty() || config.use_dictionary {
        state.set_phase(Phase::Dictionary);
        custom_words_pass(archive, entry, config, state, &witness);
        if config.use_dictionary && !state.found() {
            corpus_pass(archive, entry, config, state, &witness);
        }
    }

    if config.has_charset() && !state.found() {
        state.set_phase(Phase::Running);
        brute::search(archive, entry, config, state, &witness);
    }

    witness.into_inner().ok().flatten()
}

/// Funnel one candidate through both validators and, on an authoritative
/// match, claim the witness slot. Returns true only for the single winner.
/// `seeded` must be the cipher state after feeding `candidate`.
#[inline(always)]
pub(super) fn try_candidate(
    archive: &[u8],
    entry: &EncryptedEntry,
    seeded: ZipCipher,
    candidate: &[u8],
    state: &SearchState,
    witness: &WitnessSlot,
) -> bool {
    if validate::fast_check_seeded(entry, seeded)
        && validate::full_check(archive, entry, candidate)
        && state.claim()
    {
        if let Ok(mut slot) = witness.lock() {
            *slot = Some(candidate.to_vec());
        }
        true
    } else {
        false
    }
}

fn custom_words_pass(
    archive: &[u8],
    entry: &EncryptedEntry,
    config: &CrackConfig,
    state: &SearchState,
    witness: &WitnessSlot,
) {
    for word in &config.custom_words {
        if state.found() {
            return;
        }
        progress::wait_if_paused(state);

        let candidate = word.as_bytes();
        let seeded = ZipCipher::with_password(candidate);
        let hit = try_candidate(archive, entry, seeded, candidate, state, witness);
        state.add_attempts(1);
        state.set_sample(candidate);
        if hit {
            return;
        }
    }
}

fn corpus_pass(
    archive: &[u8],
    entry: &EncryptedEntry,
    config: &CrackConfig,
    state: &SearchState,
    witness: &WitnessSlot,
) {
    let _ = dictionary::slabs(dictionary::embedded())
        .into_par_iter()
        .find_map_any(|slab| {
            scan_slab(archive, entry, slab, config.max_length, state, witness);
            // Surface the raised flag so the driver stops handing out slabs.
            state.found().then_some(())
        });
}

/// Sequential scan of one corpus slab. Attempts are flushed per batch with
/// an exact remainder so dictionary counts stay precise.
fn scan_slab(
    archive: &[u8],
    entry: &EncryptedEntry,
    slab: &[u8],
    max_len: usize,
    state: &SearchState,
    witness: &WitnessSlot,
) {
    let mut tested: u64 = 0;
    for candidate in dictionary::lines(slab, max_len) {
        if tested % BATCH == 0 {
            if state.found() {
                return;
            }
            progress::wait_if_paused(state);
        }

        let seeded = ZipCipher::with_password(candidate);
        let hit = try_candidate(archive, entry, seeded, candidate, state, witness);
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
    }
    state.add_attempts(tested % BATCH);
}
