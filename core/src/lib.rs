//! # softirqtop-core
//!
//! Core library for the softirqtop monitor providing shared functionality
//! for kernel counter monitoring.
//!
//! ## Features
//!
//! - **Common error types** - [`MonitorError`] with context and helpers
//! - **Source abstraction** - [`TextSource`] trait for raw counter text
//! - **Pseudo-file sources** - [`ProcFile`] for `/proc` style readings
//! - **Table formatting** - fixed-width cell helpers in [`format`]
//!
//! ## Quick Start
//!
//! ```rust
//! use softirqtop_core::{MonitorError, TextSource};
//!
//! // Implement the TextSource trait for your counter source
//! struct StaticSource(String);
//!
//! impl TextSource for StaticSource {
//!     fn read_raw(&mut self) -> Result<String, MonitorError> {
//!         Ok(self.0.clone())
//!     }
//!
//!     fn describe(&self) -> String {
//!         "static text".to_owned()
//!     }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Common error types for monitor operations.
///
/// Covers the failure modes shared by counter sources and parsers. Cycle
/// level failures degrade to a skipped refresh; none of these should
/// terminate the monitoring process.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// I/O error occurred while reading counter data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing counter data from text format.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse
        message: String,
        /// Optional source error for chaining
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Counter source is not available on this system.
    #[error("Source unavailable: {reason}")]
    Unavailable {
        /// Reason why the source is unavailable
        reason: String,
        /// Whether this is a temporary or permanent condition
        is_temporary: bool,
    },
}

impl MonitorError {
    /// Create a new parse error with a simple message.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new parse error with a source error.
    pub fn parse_with_source<S: Into<String>, E>(message: S, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new unavailable error.
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            is_temporary: false,
        }
    }

    /// Create a new temporary unavailable error.
    pub fn temporarily_unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            is_temporary: true,
        }
    }

    /// Check if this error represents a temporary condition.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        match self {
            Self::Unavailable { is_temporary, .. } => *is_temporary,
            Self::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

/// A provider of raw counter text.
///
/// One call to [`TextSource::read_raw`] corresponds to one point-in-time
/// reading. The read is synchronous and should be lightweight enough for
/// frequent polling.
pub trait TextSource {
    /// Read the current raw counter text.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read; the caller is
    /// expected to skip the current cycle and retry on the next one.
    fn read_raw(&mut self) -> Result<String, MonitorError>;

    /// Human-readable description of the source, for logging.
    fn describe(&self) -> String;

    /// Check if the source is available on this system.
    ///
    /// Default implementation returns `Ok(())`. Sources backed by system
    /// resources should override this.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not available.
    fn check_availability(&self) -> Result<(), MonitorError> {
        Ok(())
    }
}

/// A [`TextSource`] backed by a pseudo-file such as `/proc/softirqs`.
///
/// The whole file is re-read on every call, which is the only correct way
/// to obtain a fresh reading from procfs.
///
/// # Examples
///
/// ```rust,no_run
/// use softirqtop_core::{ProcFile, TextSource};
///
/// let mut source = ProcFile::new("/proc/softirqs");
/// let raw = source.read_raw()?;
/// assert!(raw.contains("TIMER"));
/// # Ok::<(), softirqtop_core::MonitorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProcFile {
    path: PathBuf,
}

impl ProcFile {
    /// Create a source reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for ProcFile {
    fn read_raw(&mut self) -> Result<String, MonitorError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn check_availability(&self) -> Result<(), MonitorError> {
        if !self.path.exists() {
            return Err(MonitorError::unavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }
        fs::read_to_string(&self.path)?;
        Ok(())
    }
}

/// Utility functions for formatting counter tables.
///
/// All cells are fixed width so that rendered columns align across the
/// header and every counter row.
pub mod format {
    /// Width of the counter-name label column.
    pub const LABEL_WIDTH: usize = 10;

    /// Width of each per-CPU value column.
    pub const CELL_WIDTH: usize = 15;

    /// Right-align text in a label-column cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use softirqtop_core::format;
    ///
    /// assert_eq!(format::label_cell("NET_RX"), "    NET_RX");
    /// assert_eq!(format::label_cell(""), "          ");
    /// ```
    #[must_use]
    pub fn label_cell(text: &str) -> String {
        format!("{text:>LABEL_WIDTH$}")
    }

    /// Right-align text in a per-CPU value cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use softirqtop_core::format;
    ///
    /// assert_eq!(format::value_cell("CPU0"), "           CPU0");
    /// ```
    #[must_use]
    pub fn value_cell(text: &str) -> String {
        format!("{text:>CELL_WIDTH$}")
    }

    /// Format a per-second rate value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use softirqtop_core::format;
    ///
    /// assert_eq!(format::per_second(42), "42/s");
    /// assert_eq!(format::per_second(-3), "-3/s");
    /// ```
    #[must_use]
    pub fn per_second(value: i64) -> String {
        format!("{value}/s")
    }
}
