use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("corrupt database file: {0}")]
    CorruptFile(String),
    #[error("page {page_num} out of bounds (max {max})")]
    PageOutOfRange { page_num: u32, max: u32 },
    #[error("table full")]
    TableFull,
    #[error("duplicate key {0}")]
    DuplicateKey(u32),
    #[error("cell index {index} out of range (cell count {max})")]
    InvalidCellIndex { index: u32, max: u32 },
    #[error("string is too long")]
    StringTooLong,
    #[error("string contains a NUL byte")]
    NulInString,
    #[error("ID must be positive")]
    NegativeId,
    #[error("syntax error: {0}")]
    SyntaxError(String),
    #[error("unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),
    #[error("unrecognized command '{0}'")]
    UnrecognizedCommand(String),
}

impl DbError {
    /// Errors after which the table is untouched and still usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DbError::TableFull
                | DbError::DuplicateKey(_)
                | DbError::StringTooLong
                | DbError::NulInString
                | DbError::NegativeId
                | DbError::SyntaxError(_)
                | DbError::UnrecognizedStatement(_)
                | DbError::UnrecognizedCommand(_)
        )
    }
}

pub type DbResult<T> = Result<T, DbError>;
