//! Shared coordination state and the periodic progress reporter.
//!
//! One `SearchState` lives for the duration of an invocation and is shared
//! by every worker. All flag and counter traffic uses relaxed ordering;
//! correctness only needs bounded propagation of `found`, which the
//! mandatory per-batch check in the workers provides.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, TrySendError};
use serde::{Deserialize, Serialize};

/// Candidates a worker tests between checks of the shared flags. Also the
/// granularity of `attempts` batching and `sample` refresh.
pub const BATCH: u64 = 16_384;

const PAUSE_POLL: Duration = Duration::from_millis(50);
const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// Process-wide pause flag, shared by all invocations.
static PAUSE_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

fn pause_flag() -> &'static Arc<AtomicBool> {
    PAUSE_FLAG.get_or_init(|| Arc::new(AtomicBool::new(false)))
}

/// Pause or resume every running search. Idempotent; visible to workers
/// within one batch plus one 50 ms poll.
pub fn set_paused(paused: bool) {
    pause_flag().store(paused, Ordering::Relaxed);
}

/// Whether searches are currently paused.
pub fn is_paused() -> bool {
    pause_flag().load(Ordering::Relaxed)
}

/// Park the calling worker while the pause flag is set. Returns when the
/// flag clears or the search terminates.
pub(crate) fn wait_if_paused(state: &SearchState) {
    while is_paused() && !state.found() {
        thread::sleep(PAUSE_POLL);
    }
}

/// Search phase, as surfaced in progress snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Dictionary,
    Running,
    Done,
    Error,
}

impl Phase {
    fn from_u8(v: u8) -> Phase {
        match v {
            0 => Phase::Dictionary,
            1 => Phase::Running,
            2 => Phase::Done,
            _ => Phase::Error,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Dictionary => "Dictionary",
            Phase::Running => "Running",
            Phase::Done => "Done",
            Phase::Error => "Error",
        };
        f.write_str(name)
    }
}

/// One progress observation, emitted on the observer stream at a fixed
/// cadence and once more as the terminal record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Total password attempts so far. Non-decreasing across snapshots.
    pub attempts: u64,
    /// Seconds since the invocation started.
    pub elapsed_seconds: u64,
    /// Average attempt rate since the start.
    pub passwords_per_second: f64,
    /// Most recently sampled candidate, the recovered password (phase
    /// `Done`), or a short error token (phase `Error`).
    pub current_password: String,
    pub phase: Phase,
}

/// Coordination plane shared by the workers and the reporter.
pub struct SearchState {
    attempts: AtomicU64,
    found: AtomicBool,
    cancelled: AtomicBool,
    phase: AtomicU8,
    sample: Mutex<String>,
    started: Instant,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            found: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            phase: AtomicU8::new(Phase::Dictionary as u8),
            sample: Mutex::new(String::new()),
            started: Instant::now(),
        }
    }

    #[inline(always)]
    pub fn found(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    /// Claim the witness slot. Exactly one caller per invocation wins;
    /// losers drop their candidate and drain.
    pub fn claim(&self) -> bool {
        self.found
            .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
    }

    /// Raise `found` without claiming, so the reporter and stragglers wind
    /// down after the scheduler returns.
    pub fn finish(&self) {
        self.found.store(true, Ordering::Relaxed);
    }

    /// Observer detached: poison the search so every worker drains. Workers
    /// do not distinguish this from a genuine find.
    pub fn poison(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.found.store(true, Ordering::Relaxed);
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub fn add_attempts(&self, n: u64) {
        if n > 0 {
            self.attempts.fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::Relaxed);
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    /// Record the candidate a worker is currently testing. Purely
    /// informational; readers may observe a stale value.
    pub fn set_sample(&self, candidate: &[u8]) {
        if let Ok(mut sample) = self.sample.lock() {
            sample.clear();
            sample.push_str(&String::from_utf8_lossy(candidate));
        }
    }

    pub fn sample(&self) -> String {
        self.sample.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Materialize the current state as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let attempts = self.attempts();
        let elapsed = self.started.elapsed();
        let secs = elapsed.as_secs_f64();
        Snapshot {
            attempts,
            elapsed_seconds: elapsed.as_secs(),
            passwords_per_second: if secs > 0.0 { attempts as f64 / secs } else { 0.0 },
            current_password: self.sample(),
            phase: self.phase(),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the periodic reporter. It samples the shared state every 500 ms
/// and pushes a snapshot to the observer; a full channel drops the
/// snapshot, a disconnected observer poisons the search and ends the
/// reporter. Never blocks the workers.
pub(crate) fn spawn_reporter(state: Arc<SearchState>, observer: Sender<Snapshot>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(REPORT_INTERVAL);
        if state.found() {
            break;
        }
        match observer.try_send(state.snapshot()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                state.poison();
                break;
            }
        }
    })
}
