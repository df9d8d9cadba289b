// ============================================================================
// RetryTx Library
// ============================================================================

pub mod core;
pub mod transaction;
pub mod retry;
pub mod diagnostics;

// Re-export main types for convenience
pub use crate::core::{DbError, Result};
pub use crate::diagnostics::{DiagnosticsProbe, ProbeState};
pub use crate::retry::{FailureClass, RetryPolicy, RetryingExecutor};
pub use crate::transaction::{
    IsolationLevel, Sleeper, ThreadSleeper, TransactionConfig, TransactionExecutor,
};
