//! Error types for clinic domain parsing

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid status '{0}'. Must be one of: Scheduled, Completed, Cancelled")]
    InvalidStatus(String),

    #[error("Invalid gender '{0}'. Must be one of: M, F, O")]
    InvalidGender(String),
}

pub type Result<T> = std::result::Result<T, Error>;
