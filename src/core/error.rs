use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Deadlock found when trying to get lock: {0}")]
    Deadlock(String),

    #[error("Lock wait timeout exceeded: {0}")]
    LockWaitTimeout(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/0 error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Variant name used to tag retry log lines, e.g. `[Deadlock]`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deadlock(_) => "Deadlock",
            Self::LockWaitTimeout(_) => "LockWaitTimeout",
            Self::ExecutionError(_) => "ExecutionError",
            Self::UnsupportedOperation(_) => "UnsupportedOperation",
            Self::LockError(_) => "LockError",
            Self::IoError(_) => "IoError",
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
