//! # Error Types
//!
//! This module defines the error type shared by every component of the crate.
//! All failures are local and synchronous: they are reported to the caller at the
//! point of misuse and nothing is retried internally.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evocore::error::{GeneticError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::InvalidArgument(
//!             "Population size must be positive".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evocore::error::{GeneticError, OptionExt};
//!
//! fn required(value: Option<u32>) -> evocore::error::Result<u32> {
//!     value.ok_or_else_genetic(|| GeneticError::MissingValue("value".to_string()))
//! }
//!
//! assert_eq!(required(Some(3)).unwrap(), 3);
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an evolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// A configuration value or an argument is outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required collaborator was not supplied.
    #[error("Missing required value: {0}")]
    MissingValue(String),

    /// The operation is not available for this population variant.
    #[error("Operation not supported: {0}")]
    Unsupported(String),

    /// An iterator was advanced past its last element.
    #[error("No more elements")]
    NoMoreElements,

    /// An operation was called in the wrong lifecycle state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Selection was requested over an empty fitness vector.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A selection weight was negative, NaN or infinite.
    #[error("Numerical failure: {0}")]
    NumericalFailure(String),
}

/// A specialized Result type for this crate.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use evocore::error::{GeneticError, OptionExt};
///
/// let missing: Option<u8> = None;
/// let err = missing
///     .ok_or_else_genetic(|| GeneticError::MissingValue("initializer".to_string()))
///     .unwrap_err();
/// assert_eq!(err, GeneticError::MissingValue("initializer".to_string()));
/// ```
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
