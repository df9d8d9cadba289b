// ============================================================================
// Transaction Boundary Module
// ============================================================================
//
// The transaction primitive itself lives outside this crate. This module
// defines what the decorator needs from it: the configuration a transaction
// call accepts, the executor trait the storage client implements, and the
// blocking delay primitive used between retries.
//
// ============================================================================

pub mod config;
pub mod executor;

pub use config::{IsolationLevel, TransactionConfig};
pub use executor::{Sleeper, ThreadSleeper, TransactionExecutor};
