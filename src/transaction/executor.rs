use super::TransactionConfig;
use crate::core::Result;
use std::time::Duration;

/// External transaction primitive
///
/// Implemented by the storage client; the retrying wrapper only ever calls
/// into it. Similar in spirit to how a connection pool hands out connections
/// that know how to run `BEGIN`/`COMMIT`/`ROLLBACK` themselves.
pub trait TransactionExecutor {
    /// Run `unit` inside a transaction scope described by `config`.
    ///
    /// The implementation owns the open-transaction depth and must restore it
    /// on every exit path, normal return and error alike. The retrying
    /// wrapper reads that depth but never mutates it.
    fn execute<T>(
        &self,
        config: &TransactionConfig,
        unit: &mut dyn FnMut() -> Result<T>,
    ) -> Result<T>;

    /// Number of transaction scopes currently open on this logical connection.
    fn open_transactions(&self) -> usize;

    /// Storage adapter family name, e.g. "MySQL" or "PostgreSQL".
    fn adapter_name(&self) -> String;

    /// Run an introspection command and return its rows as text.
    ///
    /// Used only for diagnostic capture, never for retry decisions.
    fn probe_rows(&self, command: &str) -> Result<Vec<Vec<String>>>;
}

/// Blocking delay primitive used for the backoff pause between retries.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Default sleeper backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
