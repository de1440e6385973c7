//! Error handling for the radix engine and its command line front end

use std::io;
use thiserror::Error;

/// Errors surfaced to callers of the CLI and the I/O helpers.
///
/// The sort entry points themselves never fail; this type covers reading,
/// parsing and configuration.
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Is a directory: {file}")]
    IsDirectory { file: String },

    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid thread count: {message}")]
    InvalidThreadCount { message: String },

    #[error("Invalid threshold: {message}")]
    InvalidThreshold { message: String },

    #[error("disorder at line {line}")]
    NotSorted { line: usize },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::IsDirectory { .. }
            | SortError::Io(_) => crate::SORT_FAILURE,

            SortError::NotSorted { .. } => crate::EXIT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    pub fn is_directory(file: &str) -> Self {
        SortError::IsDirectory {
            file: file.to_string(),
        }
    }

    /// Create a parse error for a 1-based input line
    pub fn parse_error(line: usize, message: &str) -> Self {
        SortError::ParseError {
            line,
            message: message.to_string(),
        }
    }

    pub fn invalid_thread_count(message: &str) -> Self {
        SortError::InvalidThreadCount {
            message: message.to_string(),
        }
    }

    pub fn invalid_threshold(message: &str) -> Self {
        SortError::InvalidThreshold {
            message: message.to_string(),
        }
    }

    pub fn not_sorted(line: usize) -> Self {
        SortError::NotSorted { line }
    }

    pub fn internal(message: &str) -> Self {
        SortError::Internal {
            message: message.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Failure to fan a digit pass out to worker tasks.
///
/// Produced by the parallel counting pass and consumed by its caller, which
/// answers every variant with the sequential pass.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    #[error("histogram channel closed after {received} of {expected} partial histograms")]
    IncompleteFanIn { expected: usize, received: usize },

    #[error("worker panicked while counting")]
    WorkerPanicked,
}

/// Context trait for adding context to errors
pub trait SortContext<T> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SortError::file_not_found("x").exit_code(), crate::SORT_FAILURE);
        assert_eq!(SortError::not_sorted(3).exit_code(), crate::EXIT_FAILURE);
        assert_eq!(
            SortError::parse_error(1, "bad").exit_code(),
            crate::EXIT_FAILURE
        );
    }

    #[test]
    fn test_file_context_maps_not_found() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        match res.with_file_context("input.txt") {
            Err(SortError::FileNotFound { file }) => assert_eq!(file, "input.txt"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = SortError::parse_error(7, "invalid integer: abc");
        assert_eq!(err.to_string(), "line 7: invalid integer: abc");
    }
}
