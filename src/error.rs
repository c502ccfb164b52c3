//! Error types for register access
//!
//! Errors are organized by domain:
//! - [`FieldError`]: a value or index does not fit the register layout
//! - [`IoError`]: polling a hardware flag did not finish in time
//! - [`DecodeError`]: a register held a value outside its documented encoding
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by the fallible helpers in this crate.

// =============================================================================
// Field Errors
// =============================================================================

/// Register layout errors
///
/// Raised before any bus access happens, so a failed call leaves the
/// hardware untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// Value does not fit in the field width
    ValueOutOfRange,
    /// Field is read-only and cannot be written
    NotWritable,
    /// Peripheral instance index does not exist on this chip
    InvalidInstance,
    /// Register slot index (filter, block, word, table entry) out of range
    InvalidSlot,
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldError::ValueOutOfRange => "value does not fit field",
            FieldError::NotWritable => "field is not writable",
            FieldError::InvalidInstance => "invalid peripheral instance",
            FieldError::InvalidSlot => "invalid register slot",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime polling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Hardware flag did not reach the expected state in time
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
        }
    }
}

// =============================================================================
// Decode Errors
// =============================================================================

/// Errors raised while interpreting register contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Stored CRC does not match the data it protects
    CrcMismatch,
    /// Field holds an encoding the hardware documents as reserved
    Reserved,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DecodeError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DecodeError::CrcMismatch => "CRC mismatch",
            DecodeError::Reserved => "reserved encoding",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Field(FieldError::ValueOutOfRange)) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     Err(Error::Decode(DecodeError::CrcMismatch)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Register layout error
    Field(FieldError),
    /// Polling error
    Io(IoError),
    /// Register contents error
    Decode(DecodeError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Field(e) => write!(f, "field: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Decode(e) => write!(f, "decode: {}", e.as_str()),
        }
    }
}

impl From<FieldError> for Error {
    fn from(e: FieldError) -> Self {
        Error::Field(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

/// Result type alias for fallible register operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for layout checks
pub type FieldResult<T> = core::result::Result<T, FieldError>;

/// Result type alias for register decoding
pub type DecodeResult<T> = core::result::Result<T, DecodeError>;

// =============================================================================
// Unit Tests
// =============================================================================
