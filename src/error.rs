use std::io;
use thiserror::Error;

/// Every failure a drill can report.
/// Each variant is a distinct, matchable failure mode.
#[derive(Error, Debug)]
pub enum DrillError {
    #[error("capacity must be greater than zero (got {capacity})")]
    InvalidCapacity { capacity: usize },

    #[error("stack overflow: capacity {capacity} reached")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: nothing to pop")]
    StackUnderflow,

    #[error("queue overflow: capacity {capacity} reached")]
    QueueOverflow { capacity: usize },

    #[error("queue underflow: nothing to dequeue")]
    QueueUnderflow,

    #[error("age {age} is under the minimum of {minimum}")]
    Underage { age: u32, minimum: u32 },

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("attempted to divide by zero")]
    DivisionByZero,

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    #[error("amount must be positive (got {0})")]
    InvalidAmount(i64),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("book '{0}' is already issued")]
    AlreadyIssued(String),

    #[error("book '{0}' is not issued")]
    NotIssued(String),

    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("cannot parse '{input}' as an integer: {reason}")]
    ParseInt { input: String, reason: String },

    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("channel closed")]
    ChannelClosed,

    #[error("unknown drill: '{0}'")]
    UnknownDrill(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DrillError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn duplicate(kind: &'static str, id: impl ToString) -> Self {
        Self::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }

    pub fn parse_int(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseInt {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for DrillError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DrillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;
