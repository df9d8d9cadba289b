use serde::{Deserialize, Serialize};

/// Transaction isolation level selector
///
/// Passed through to the underlying executor untouched; the decorator never
/// interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// Transaction execution configuration
///
/// Mirrors what the underlying transaction primitive accepts, so callers of
/// the retrying wrapper need no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfig {
    /// Open a new transaction scope even when one is already open
    pub requires_new: bool,

    /// Isolation level for the scope (engine default when unset)
    pub isolation: Option<IsolationLevel>,

    /// Whether an already-open scope may be joined
    pub joinable: bool,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            requires_new: false,
            isolation: None,
            joinable: true,
        }
    }
}

impl TransactionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a new transaction scope
    pub fn requires_new(mut self, requires_new: bool) -> Self {
        self.requires_new = requires_new;
        self
    }

    /// Set the isolation level
    pub fn isolation(mut self, isolation: IsolationLevel) -> Self {
        self.isolation = Some(isolation);
        self
    }

    /// Set whether an open scope may be joined
    pub fn joinable(mut self, joinable: bool) -> Self {
        self.joinable = joinable;
        self
    }
}
