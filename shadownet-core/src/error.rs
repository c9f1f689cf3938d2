//! Error types for shadownet

use thiserror::Error;

/// Result type alias for shadownet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for shadownet
///
/// Every variant is fatal to startup; the running receive and transmit
/// paths never produce an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The named underlying interface does not exist
    #[error("Interface '{0}' not found")]
    NoSuchInterface(String),

    /// The underlying interface is not an Ethernet or loopback link
    #[error("Interface '{name}' has unsupported link type: {link_type}")]
    UnsupportedLinkType { name: String, link_type: String },

    /// The interface table has no room left for a new entry
    #[error("Interface table exhausted, cannot allocate '{0}'")]
    OutOfMemory(String),

    /// The registry rejected the interface
    #[error("Interface registration failed: {0}")]
    RegistrationFailed(String),

    /// A receive tap is already installed on the underlying interface
    #[error("Receive tap install failed: {0}")]
    TapInstallFailed(String),

    /// Host datalink access error
    #[error("Datalink error: {0}")]
    Datalink(String),
}

impl Error {
    /// Create a registration error with a custom message
    pub fn registration<S: Into<String>>(msg: S) -> Self {
        Error::RegistrationFailed(msg.into())
    }

    /// Create a datalink error with a custom message
    pub fn datalink<S: Into<String>>(msg: S) -> Self {
        Error::Datalink(msg.into())
    }
}
