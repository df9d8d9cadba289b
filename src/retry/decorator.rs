// ============================================================================
// Retrying Transaction Decorator
// ============================================================================

use super::policy::{FailureClass, RetryPolicy};
use crate::core::Result;
use crate::diagnostics::DiagnosticsProbe;
use crate::transaction::{Sleeper, ThreadSleeper, TransactionConfig, TransactionExecutor};
use log::info;
use std::sync::Arc;

/// Transaction executor with deadlock retry layered on top
///
/// Wraps any [`TransactionExecutor`] and re-runs the unit of work when the
/// storage engine reports a deadlock or a lock-wait timeout. Every other
/// failure passes through unchanged on the first attempt. A call made while
/// an enclosing transaction is already open never retries on its own: it
/// re-raises so the outermost scope re-executes the whole call tree.
///
/// Callers opt in by construction rather than by patching the executor:
///
/// ```
/// use retrytx::{DbError, Result, RetryingExecutor, TransactionConfig, TransactionExecutor};
/// use std::cell::Cell;
///
/// struct SingleConnection {
///     open: Cell<usize>,
/// }
///
/// impl TransactionExecutor for SingleConnection {
///     fn execute<T>(
///         &self,
///         _config: &TransactionConfig,
///         unit: &mut dyn FnMut() -> Result<T>,
///     ) -> Result<T> {
///         self.open.set(self.open.get() + 1);
///         let result = unit();
///         self.open.set(self.open.get() - 1);
///         result
///     }
///
///     fn open_transactions(&self) -> usize {
///         self.open.get()
///     }
///
///     fn adapter_name(&self) -> String {
///         "demo".to_string()
///     }
///
///     fn probe_rows(&self, _command: &str) -> Result<Vec<Vec<String>>> {
///         Ok(Vec::new())
///     }
/// }
///
/// let retrying = RetryingExecutor::new(SingleConnection { open: Cell::new(0) });
/// let value = retrying.transaction(&mut || Ok(42))?;
/// assert_eq!(value, 42);
/// # Ok::<(), DbError>(())
/// ```
pub struct RetryingExecutor<E, S = ThreadSleeper> {
    executor: E,
    policy: RetryPolicy,
    sleeper: S,
    probe: Arc<DiagnosticsProbe>,
}

impl<E: TransactionExecutor> RetryingExecutor<E> {
    /// Wrap an executor with the default policy, the thread sleeper, and the
    /// process-wide diagnostics probe
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            policy: RetryPolicy::default(),
            sleeper: ThreadSleeper,
            probe: DiagnosticsProbe::global(),
        }
    }
}

impl<E: TransactionExecutor, S: Sleeper> RetryingExecutor<E, S> {
    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a private diagnostics probe instead of the process-wide one
    pub fn with_probe(mut self, probe: Arc<DiagnosticsProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Replace the delay primitive (tests substitute a recording one)
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> RetryingExecutor<E, S2> {
        RetryingExecutor {
            executor: self.executor,
            policy: self.policy,
            sleeper,
            probe: self.probe,
        }
    }

    /// Access the wrapped executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `unit` in a transaction, retrying transient lock contention
    ///
    /// Same shape as [`TransactionExecutor::execute`], so existing callers of
    /// the primitive need no change.
    pub fn execute<T>(
        &self,
        config: &TransactionConfig,
        unit: &mut dyn FnMut() -> Result<T>,
    ) -> Result<T> {
        self.probe.ensure_resolved(&self.executor);

        if self.in_nested_transaction() {
            // Only the outermost scope retries; re-raise so the whole nested
            // call tree is re-executed together.
            return self.executor.execute(config, unit).map_err(|error| {
                if FailureClass::classify(&error).is_retryable() {
                    info!(
                        "Deadlock detected in a nested transaction, not retrying. [{}]",
                        error.kind()
                    );
                }
                error
            });
        }

        let mut retry_count: u32 = 0;
        loop {
            match self.executor.execute(config, unit) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !FailureClass::classify(&error).is_retryable() {
                        return Err(error);
                    }

                    if self.policy.exhausted(retry_count) {
                        info!(
                            "Deadlock detected and maximum retries exceeded (maximum: {}), not retrying. [{}]",
                            self.policy.maximum(),
                            error.kind()
                        );
                        return Err(error);
                    }

                    retry_count += 1;
                    let pause = self.policy.backoff(retry_count);
                    info!(
                        "Deadlock detected on retry {}, retrying transaction in {} seconds. [{}]",
                        retry_count,
                        pause.as_secs(),
                        error.kind()
                    );
                    self.probe.capture(&self.executor);
                    if !pause.is_zero() {
                        self.sleeper.sleep(pause);
                    }
                }
            }
        }
    }

    /// Convenience wrapper using the default transaction configuration
    pub fn transaction<T>(&self, unit: &mut dyn FnMut() -> Result<T>) -> Result<T> {
        self.execute(&TransactionConfig::default(), unit)
    }

    fn in_nested_transaction(&self) -> bool {
        // Depth is read before this call opens its own scope; nonzero means
        // an enclosing transaction is already open on this connection.
        self.executor.open_transactions() > 0
    }
}
