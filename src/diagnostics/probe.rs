// ============================================================================
// Engine Diagnostics Probe
// ============================================================================
//
// InnoDB engine status is the only way to see why a transaction deadlocked,
// but not every adapter supports the command and not every account may run
// it. The probe resolves that once per process and then captures status text
// on each retry, best-effort only: diagnostics must never turn a successful
// retry path into a failure path.
//
// ============================================================================

use crate::core::{DbError, Result};
use crate::transaction::TransactionExecutor;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use std::sync::{Arc, RwLock};

lazy_static! {
    static ref MYSQL_FAMILY: Regex = Regex::new("(?i)mysql").unwrap();

    // Process-wide probe shared by decorators built with `RetryingExecutor::new`
    static ref GLOBAL_PROBE: Arc<DiagnosticsProbe> = Arc::new(DiagnosticsProbe::new());
}

const VERSION_QUERY: &str = "show variables like 'version'";
const STATUS_CMD_LEGACY: &str = "show innodb status";
const STATUS_CMD: &str = "show engine innodb status";

/// Resolution state of the engine introspection capability
///
/// `Unknown` transitions exactly once, to `Available` with the remembered
/// command string or to `Unavailable`, and stays there for the rest of the
/// process unless explicitly [`reset`](DiagnosticsProbe::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeState {
    Unknown,
    Available { command: String },
    Unavailable,
}

/// One-time capability probe plus best-effort status capture
pub struct DiagnosticsProbe {
    state: RwLock<ProbeState>,
}

impl Default for DiagnosticsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsProbe {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProbeState::Unknown),
        }
    }

    /// The process-wide default probe
    pub fn global() -> Arc<DiagnosticsProbe> {
        GLOBAL_PROBE.clone()
    }

    /// Current resolution state
    pub fn state(&self) -> ProbeState {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(_) => ProbeState::Unavailable,
        }
    }

    /// Forget the resolved capability (test/administrative override)
    pub fn reset(&self) {
        if let Ok(mut state) = self.state.write() {
            *state = ProbeState::Unknown;
        }
    }

    /// Resolve the capability on first use; a no-op once resolved
    ///
    /// Informational only: never raises. Two threads racing here may both
    /// run the probe, the first writer wins and the outcome is the same.
    pub fn ensure_resolved<E: TransactionExecutor>(&self, executor: &E) {
        match self.state.read() {
            Ok(state) if *state == ProbeState::Unknown => {}
            _ => return,
        }

        let resolved = Self::resolve(executor);
        if let Ok(mut state) = self.state.write() {
            if *state == ProbeState::Unknown {
                *state = resolved;
            }
        }
    }

    /// Capture engine status text at warn level, if available
    ///
    /// Every failure here is demoted to an info line; the retry loop must
    /// proceed regardless.
    pub fn capture<E: TransactionExecutor>(&self, executor: &E) {
        let command = match self.state() {
            ProbeState::Available { command } => command,
            _ => return,
        };

        match executor.probe_rows(&command) {
            Ok(rows) => {
                warn!("INNODB Status follows:");
                for row in rows {
                    warn!("{}", row.join("\t"));
                }
            }
            Err(error) => {
                // Access denied at capture time, ignore
                info!("Cannot log innodb status: {}", error);
            }
        }
    }

    fn resolve<E: TransactionExecutor>(executor: &E) -> ProbeState {
        if !MYSQL_FAMILY.is_match(&executor.adapter_name()) {
            return ProbeState::Unavailable;
        }

        match Self::select_command(executor) {
            Ok(command) => ProbeState::Available { command },
            Err(error) => {
                info!("Cannot log innodb status: {}", error);
                ProbeState::Unavailable
            }
        }
    }

    /// Pick the version-appropriate status command and run it once to
    /// confirm permission; without that check a denied command would break
    /// in-flight transactions later, silently.
    fn select_command<E: TransactionExecutor>(executor: &E) -> Result<String> {
        let rows = executor.probe_rows(VERSION_QUERY)?;
        let version = rows
            .first()
            .and_then(|row| row.get(1))
            .cloned()
            .ok_or_else(|| DbError::ExecutionError("engine version not reported".into()))?;

        // String comparison, as the server reports versions
        let command = if version.as_str() < "5.5" {
            STATUS_CMD_LEGACY
        } else {
            STATUS_CMD
        };

        executor.probe_rows(command)?;
        Ok(command.to_string())
    }
}
