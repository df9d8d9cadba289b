// ============================================================================
// Retry Engine Module
// ============================================================================
//
// Classifies storage failures, owns the backoff schedule, and drives the
// outermost-scope retry loop.
//
// ============================================================================

pub mod decorator;
pub mod policy;

pub use decorator::RetryingExecutor;
pub use policy::{FailureClass, RetryPolicy};
