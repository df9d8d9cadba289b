#![allow(dead_code)]

/// Shared test doubles for the integration tests
///
/// `MockExecutor` plays the storage client: it maintains the open-transaction
/// depth the way a real primitive must (restored on every exit path) and
/// answers introspection queries with canned rows. `RecordingSleeper` stands
/// in for the blocking delay so tests can assert on pause durations without
/// actually sleeping.
use retrytx::{DbError, Result, Sleeper, TransactionConfig, TransactionExecutor};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub const VERSION_QUERY: &str = "show variables like 'version'";
pub const LEGACY_STATUS_CMD: &str = "show innodb status";
pub const STATUS_CMD: &str = "show engine innodb status";

pub struct MockExecutor {
    depth: Cell<usize>,
    adapter: &'static str,
    version: &'static str,
    /// Times `execute` was entered, nested calls included
    pub executions: Cell<usize>,
    /// When set, every introspection query fails
    pub deny_probe: Cell<bool>,
    /// Introspection queries issued so far
    pub probe_commands: RefCell<Vec<String>>,
}

impl MockExecutor {
    /// An adapter family with no introspection support
    pub fn new() -> Self {
        Self::with_adapter("MockDB", "0.1")
    }

    /// A MySQL-family adapter, old enough for the legacy status command
    pub fn mysql() -> Self {
        Self::with_adapter("MySQL", "5.1.45")
    }

    pub fn with_adapter(adapter: &'static str, version: &'static str) -> Self {
        Self {
            depth: Cell::new(0),
            adapter,
            version,
            executions: Cell::new(0),
            deny_probe: Cell::new(false),
            probe_commands: RefCell::new(Vec::new()),
        }
    }

    /// How many times a given introspection command was issued
    pub fn probe_count(&self, command: &str) -> usize {
        self.probe_commands
            .borrow()
            .iter()
            .filter(|issued| issued.as_str() == command)
            .count()
    }
}

impl TransactionExecutor for MockExecutor {
    fn execute<T>(
        &self,
        _config: &TransactionConfig,
        unit: &mut dyn FnMut() -> Result<T>,
    ) -> Result<T> {
        self.executions.set(self.executions.get() + 1);
        self.depth.set(self.depth.get() + 1);
        let result = unit();
        self.depth.set(self.depth.get() - 1);
        result
    }

    fn open_transactions(&self) -> usize {
        self.depth.get()
    }

    fn adapter_name(&self) -> String {
        self.adapter.to_string()
    }

    fn probe_rows(&self, command: &str) -> Result<Vec<Vec<String>>> {
        self.probe_commands.borrow_mut().push(command.to_string());
        if self.deny_probe.get() {
            return Err(DbError::ExecutionError("Access denied".into()));
        }
        if command == VERSION_QUERY {
            Ok(vec![vec!["version".to_string(), self.version.to_string()]])
        } else {
            Ok(vec![vec!["FAKE INNODB STATUS HERE".to_string()]])
        }
    }
}

/// Sleeper that records requested pauses instead of blocking
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }

    pub fn seconds(&self) -> Vec<u64> {
        self.slept.borrow().iter().map(|d| d.as_secs()).collect()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}
