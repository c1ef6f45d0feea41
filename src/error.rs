//! # Error Handling
//!
//! Recoverable errors for the foveated transcoder. Anything in here is caused
//! by runtime input: a frame too small to split, a corrupt record file, an
//! unreadable image, a configuration file with impossible values.
//!
//! Programmer errors are *not* represented here. Broken preconditions inside
//! the transforms (focus wider than the crop, column indices outside the
//! frame, a reconstructed frame of the wrong size) panic through the
//! [`contract`](crate::contract) macros instead.
//!
//! ## Error Classification
//!
//! - `Config`: a configuration value is outside its allowed range
//! - `Validation`: runtime input (frame, record, elevation) fails a check
//! - `Processing`: a pixel operation failed
//! - `Io`: reading or writing a file failed
//! - `External`: a dependency (image codec, JSON) reported an error
//!
//! None of these are retryable: every transform is deterministic, so the
//! same input fails the same way every time.
//!
//! ## Usage
//!
//! ```rust
//! use fovea::error::{FoveaError, HasRecoverySuggestion};
//!
//! let error = FoveaError::validation("elevation", "focus band inside frame rows", "-95")
//!     .with_context("splitting 3600x1800 frame")
//!     .with_recovery_suggestion("use PolePolicy::Clamp or pass an elevation in 0..=180");
//!
//! assert_eq!(error.category(), "validation");
//! assert!(error.recovery_suggestion().is_some());
//! ```

use std::{error::Error as StdError, fmt};

/// Severity levels for errors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Errors that abort the current operation
    #[default]
    Error,
    /// Errors that leave nothing usable behind (e.g. a corrupt record)
    Critical,
}

/// Metadata about where an error occurred
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Error severity level
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result alias used throughout the library
pub type FoveaResult<T> = Result<T, FoveaError>;

/// Base error type for the transcoder
#[derive(Debug)]
pub enum FoveaError {
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Runtime input validation errors
    Validation {
        field: String,
        constraint: String,
        value: String,
        context: ErrorContext,
    },
    /// Pixel processing errors
    Processing {
        operation: String,
        reason: String,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
    /// External library errors
    External {
        library: String,
        source: Box<dyn StdError + Send + Sync>,
        context: ErrorContext,
    },
}

impl FoveaError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a validation error
    pub fn validation(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
            value: value.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a processing error
    pub fn processing(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Processing {
            operation: operation.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an external library error
    pub fn external(
        library: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            library: library.into(),
            source: Box::new(source),
            context: ErrorContext::new(),
        }
    }

    /// Attach the path an I/O error refers to
    pub fn with_path(mut self, p: impl Into<String>) -> Self {
        if let Self::Io { path, .. } = &mut self {
            *path = Some(p.into());
        }
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Set the operation that was being performed
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Set severity level
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Config { context, .. }
            | Self::Validation { context, .. }
            | Self::Processing { context, .. }
            | Self::Io { context, .. }
            | Self::External { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Config { context, .. }
            | Self::Validation { context, .. }
            | Self::Processing { context, .. }
            | Self::Io { context, .. }
            | Self::External { context, .. } => context,
        }
    }

    /// Short category name, stable enough for log fields
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Validation { .. } => "validation",
            Self::Processing { .. } => "processing",
            Self::Io { .. } => "io",
            Self::External { .. } => "external",
        }
    }
}

impl fmt::Display for FoveaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config {
                field,
                value,
                reason,
                ..
            } => write!(f, "Configuration error in '{field}' (value: {value}): {reason}"),
            Self::Validation {
                field,
                constraint,
                value,
                ..
            } => write!(
                f,
                "Validation failed for '{field}': expected {constraint}, got {value}"
            ),
            Self::Processing {
                operation, reason, ..
            } => write!(f, "Processing error during '{operation}': {reason}"),
            Self::Io {
                operation,
                path,
                source,
                ..
            } => match path {
                Some(p) => write!(f, "I/O error during '{operation}' on {p}: {source}"),
                None => write!(f, "I/O error during '{operation}': {source}"),
            },
            Self::External {
                library, source, ..
            } => write!(f, "{library} error: {source}"),
        }?;

        let ctx = self.context();
        if let Some(op) = &ctx.operation {
            write!(f, " [operation: {op}]")?;
        }
        if let Some(extra) = &ctx.context {
            write!(f, " ({extra})")?;
        }
        Ok(())
    }
}

impl StdError for FoveaError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::External { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Trait for errors that carry a severity
pub trait HasSeverity {
    fn severity(&self) -> ErrorSeverity;
}

impl HasSeverity for FoveaError {
    fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }
}

/// Trait for errors that may suggest a fix
pub trait HasRecoverySuggestion {
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for FoveaError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

/// Error conversion implementations
impl From<std::io::Error> for FoveaError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}

impl From<serde_json::Error> for FoveaError {
    fn from(error: serde_json::Error) -> Self {
        Self::external("serde_json", error)
    }
}

impl From<image::ImageError> for FoveaError {
    fn from(error: image::ImageError) -> Self {
        Self::external("image", error)
    }
}

impl From<fovea_scale::ScaleError> for FoveaError {
    fn from(error: fovea_scale::ScaleError) -> Self {
        Self::processing("scale", error.to_string())
    }
}
