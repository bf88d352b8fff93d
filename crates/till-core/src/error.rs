//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Rejected constructor/mutator input             │
//! │                                                                         │
//! │  till-store has no error type: a lookup that finds nothing returns     │
//! │  `None`, a removal that matches nothing returns `false`.               │
//! │                                                                         │
//! │  till-cli errors (app)                                                 │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::entity::EntityId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Not-found is a normal outcome inside the repositories. These variants
/// exist for callers that need to turn an empty lookup into a failure they
/// can report.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with the given name is in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No sale with the given id has been recorded.
    #[error("Sale not found: {0}")]
    SaleNotFound(EntityId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by fallible constructors and mutators, so an invalid entity is
/// never built.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Floating-point value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., a quantity typed as text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
