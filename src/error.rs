//! Error types for RigScan-IO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// RigScan-IO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration serialization error
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Communication timeout
    #[error("Communication timeout")]
    Timeout,

    /// Invalid packet or response
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    /// Unknown device type in configuration
    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
