//! Error types for the ISO engine
//!
//! This module defines the error types used throughout the engine,
//! covering validation, I/O, file corruption and resource failures.

use std::fmt;

/// Result type for ISO engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// ISO engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (graphics device, physics engine, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, body handle, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, physics world, subsystems)
    InitializationFailed(String),

    /// An object with this id already exists in the scene
    DuplicateObject(String),

    /// A `@key/...` model path names an alias that is not registered
    UnresolvedAlias(String),

    /// A model path that cannot be resolved at all (empty, `@` without separator)
    MalformedPath(String),

    /// File system error (missing file, unopenable file, write failure)
    Io(String),

    /// Scene file rejected as untrusted input (bad signature, bounds, truncation)
    CorruptSceneFile(String),

    /// The asset importer could not load a model
    AssetImport(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::DuplicateObject(id) => write!(f, "Duplicate object id: {}", id),
            Error::UnresolvedAlias(path) => write!(f, "Unresolved path alias: {}", path),
            Error::MalformedPath(path) => write!(f, "Malformed model path: '{}'", path),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::CorruptSceneFile(msg) => write!(f, "Corrupt scene file: {}", msg),
            Error::AssetImport(msg) => write!(f, "Asset import failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error::BackendError` with the same message
///
/// # Example
///
/// ```no_run
/// # use iso_engine::engine_err;
/// let err = engine_err!("iso::rapier", "Unknown body {}", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::iso::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use iso_engine::engine_bail;
/// # fn f() -> iso_engine::iso::Result<()> {
/// engine_bail!("iso::rapier", "Physics world not initialized");
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
