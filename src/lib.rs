//! # zipcrack Core Library
//!
//! Password recovery engine for ZIP archives protected with the
//! traditional PKWARE stream cipher ("ZipCrypto").
//!
//! Given the raw archive bytes and a [`CrackConfig`], the engine locates
//! the first encrypted entry, then funnels dictionary and brute-force
//! candidates through a two-phase validator: a keystream pre-check that
//! rejects ~255/256 of wrong passwords without touching the payload, and
//! an authoritative CRC-verified decrypt-and-decompress for the survivors.
//! Work is fanned out across all cores; progress streams to an observer
//! channel at a fixed cadence.
//!
//! ## Key Modules
//!
//! - [`crypto`]: the CRC-32 table and the three-word ZipCrypto key schedule.
//! - [`archive`]: local-file-header location and reference-material extraction.
//! - [`validate`]: the fast and full password validators.
//! - [`charset`]: candidate alphabet and ordinal enumeration.
//! - [`dictionary`]: the embedded common-password corpus.
//! - [`progress`]: shared coordination state, pause control and the reporter.
//! - [`estimate`]: exact search-space size.

pub mod archive;
pub mod charset;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod dictionary;
pub mod error;
pub mod estimate;
pub mod progress;
pub mod validate;

mod workers;

pub use config::CrackConfig;
pub use error::CrackError;
pub use estimate::estimate;
pub use progress::{is_paused, set_paused, Phase, Snapshot};

use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::progress::SearchState;

/// Recover the password of the first encrypted entry in `archive`.
///
/// Blocks until the search terminates. Progress snapshots are pushed to
/// `observer` at ≈500 ms cadence; a snapshot is dropped when the observer
/// is slow, and a disconnected observer cancels the search. The terminal
/// outcome is the return value, mirrored by one final snapshot (phase
/// `Done` on success, `Error` otherwise) when the observer is still
/// attached.
pub fn crack(
    archive: &[u8],
    config: &CrackConfig,
    observer: Sender<Snapshot>,
) -> Result<String, CrackError> {
    let state = Arc::new(SearchState::new());

    if let Err(e) = config.validate() {
        report_failure(&state, &observer, &e);
        return Err(e);
    }
    let entry = match archive::locate_encrypted_entry(archive) {
        Ok(entry) => entry,
        Err(e) => {
            report_failure(&state, &observer, &e);
            return Err(e);
        }
    };

    let reporter = progress::spawn_reporter(Arc::clone(&state), observer.clone());
    let witness = workers::run(archive, &entry, config, &state);
    state.finish();
    let _ = reporter.join();

    match witness {
        Some(bytes) => {
            let password = String::from_utf8_lossy(&bytes).into_owned();
            state.set_phase(Phase::Done);
            let mut snapshot = state.snapshot();
            snapshot.current_password = password.clone();
            let _ = observer.try_send(snapshot);
            Ok(password)
        }
        None if state.cancelled() => Err(CrackError::Cancelled),
        None => {
            let e = CrackError::NotFound;
            report_failure(&state, &observer, &e);
            Err(e)
        }
    }
}

/// Spawn [`crack`] on a background thread and hand back the observer
/// stream plus the join handle carrying the terminal result. Dropping the
/// receiver cancels the search.
pub fn crack_stream(
    archive: Vec<u8>,
    config: CrackConfig,
) -> (
    crossbeam_channel::Receiver<Snapshot>,
    std::thread::JoinHandle<Result<String, CrackError>>,
) {
    let (sender, receiver) = crossbeam_channel::bounded(32);
    let handle = std::thread::spawn(move || crack(&archive, &config, sender));
    (receiver, handle)
}

/// Run one candidate through both validators against the first encrypted
/// entry of `archive`.
pub fn test_single(archive: &[u8], password: &str) -> Result<bool, CrackError> {
    let entry = archive::locate_encrypted_entry(archive)?;
    let candidate = password.as_bytes();
    Ok(validate::fast_check(&entry, candidate)
        && validate::full_check(archive, &entry, candidate))
}

fn report_failure(state: &SearchState, observer: &Sender<Snapshot>, error: &CrackError) {
    state.set_phase(Phase::Error);
    let mut snapshot = state.snapshot();
    snapshot.current_password = error.to_string();
    let _ = observer.try_send(snapshot);
}
