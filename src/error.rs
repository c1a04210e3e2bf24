//! Error taxonomy for the engine.
//!
//! Three kinds of fatal condition reach `main`: a bad invocation (`Usage`),
//! an allocation that failed even after the prime step-down (`OutOfMemory`),
//! and a violated internal invariant (`Internal`). All three render as a
//! single line and carry the process to exit code 1; none are recovered
//! inside the core.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SimError {
    /// Bad flag combination, bad numeric argument, unreadable input/output.
    Usage(String),
    /// A file named on the command line, discovered via `-R`/`-i`, or
    /// given to `-o`, could not be opened for the direction it was needed.
    FileRead { path: PathBuf, source: std::io::Error },
    /// Allocation failed even after the prime table was stepped down to its
    /// smallest entry.
    OutOfMemory,
    /// An assertion about the engine's own data structures was violated.
    Internal(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Usage(msg) => write!(f, "{msg}"),
            SimError::FileRead { path, source } => {
                write!(f, "cannot open {}: {source}", path.display())
            }
            SimError::OutOfMemory => write!(f, "out of memory"),
            SimError::Internal(msg) => write!(f, "internal error, {msg}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
