use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
        field: Option<String>,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the store is busy or locked by another
    // writer. The caller can retry the same operation with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        field: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str, field: Option<String>) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string(), field }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, field: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), field }
    }

    // shorthand for the "<field> is a required field" rejection
    pub fn required(field: &str) -> LibraryError {
        LibraryError::validation(format!("{} is a required field", field).as_str(), Some(field.to_string()))
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io error {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<tokio::task::JoinError> for LibraryError {
    fn from(err: tokio::task::JoinError) -> Self {
        LibraryError::runtime(
            format!("store task failed {:?}", err).as_str(), None)
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::DuplicateKey { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for Repository .
pub type LibraryResult<T> = Result<T, LibraryError>;

// Partition splits the records by their soft-delete flag
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Partition {
    #[default]
    Active,
    Trashed,
}

impl Partition {
    // value of the `deleted` column for rows in this partition
    pub fn deleted(&self) -> bool {
        match self {
            Partition::Active => false,
            Partition::Trashed => true,
        }
    }

    pub fn of(deleted: bool) -> Partition {
        if deleted { Partition::Trashed } else { Partition::Active }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Partition::Active => write!(f, "Active"),
            Partition::Trashed => write!(f, "Trashed"),
        }
    }
}

// PageRequest is a validated 1-based page with its size
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PageRequest {
    pub page: usize,
    pub take: usize,
}

impl PageRequest {
    pub fn new(page: usize, take: usize) -> LibraryResult<Self> {
        if take == 0 {
            return Err(LibraryError::validation("take must be a positive number", Some("take".to_string())));
        }
        Ok(PageRequest { page: page.max(1), take })
    }

    // normalizes raw query-string values, `page` falls back to 1 and `take` to `default_take`
    pub fn parse(page: Option<&str>, take: Option<&str>, default_take: usize) -> LibraryResult<Self> {
        let page = match page.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                LibraryError::validation(format!("page must be a number but was {}", raw).as_str(), Some("page".to_string()))
            })?,
            None => 1,
        };
        let take = match take.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                LibraryError::validation(format!("take must be a number but was {}", raw).as_str(), Some("take".to_string()))
            })?,
            None => i64::try_from(default_take).unwrap_or(i64::MAX),
        };
        if take <= 0 {
            return Err(LibraryError::validation("take must be a positive number", Some("take".to_string())));
        }
        let page = if page < 1 { 1 } else { usize::try_from(page).unwrap_or(usize::MAX) };
        let take = usize::try_from(take).unwrap_or(usize::MAX);
        PageRequest::new(page, take)
    }

    // saturates instead of overflowing, a page far past the end simply reads nothing
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.take)
    }
}

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // 1-based page number
    pub page: usize,
    // page size
    pub page_size: usize,
    // number of matching records across all pages
    pub total_count: usize,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: usize, page_size: usize,
                      total_count: usize, records: Vec<T>) -> Self {
        PaginatedResult {
            page,
            page_size,
            total_count,
            records,
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> PaginatedResult<U> {
        PaginatedResult::new(self.page, self.page_size, self.total_count,
                             self.records.iter().map(f).collect())
    }
}
