use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Type Reference Errors
/// - [`Error::MalformedTypeRef`] - A [`crate::metadata::typesystem::TypeRef`] violated a structural invariant
/// - [`Error::UnsupportedModifier`] - A type shape outside the set the encoder can express
/// - [`Error::RecursionLimit`] - Generic argument nesting exceeded the configured depth
///
/// ## Resolution Errors
/// - [`Error::UnresolvedAssembly`] - An assembly reference could not be mapped to a display identity
/// - [`Error::FileError`] - Filesystem I/O errors while probing search paths
///
/// ## Parsing Errors
/// - [`Error::Malformed`] - An assembly display name or qualified type name could not be parsed
///
/// # Examples
///
/// ```rust
/// use typeident::{Error, metadata::typename::parse_qualified_name};
///
/// match parse_qualified_name("System.String") {
///     Ok(_) => unreachable!("an unqualified name has no assembly"),
///     Err(Error::Malformed { message, .. }) => eprintln!("rejected: {message}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Text input could not be parsed.
    ///
    /// Raised by the assembly display-name and qualified type-name parsers. The error
    /// includes the source location where the malformation was detected for debugging
    /// purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A type reference violated a structural invariant at construction.
    ///
    /// Covers generic argument counts that disagree with the declared arity, array
    /// ranks outside `1..=32`, empty simple names and open generic definitions used
    /// as generic arguments. Such input is never silently repaired.
    #[error("Malformed type reference - {0}")]
    MalformedTypeRef(String),

    /// An assembly reference could not be mapped to a display identity.
    ///
    /// The associated value is the simple name of the reference. Resolution failures
    /// are always propagated; a guessed qualifier would produce a plausible but wrong
    /// name.
    #[error("Unable to resolve assembly '{0}'")]
    UnresolvedAssembly(String),

    /// The type shape cannot be expressed as an assembly-qualified name.
    ///
    /// Raised for modifier combinations the runtime never produces (e.g. a by-ref that
    /// is not outermost) and for signature shapes with no qualified name (generic
    /// parameters, function pointers).
    #[error("Unsupported type shape - {0}")]
    UnsupportedModifier(String),

    /// Recursion limit reached.
    ///
    /// Generic arguments nested deeper than the encoder's configured limit. The
    /// associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while probing assembly search paths.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}
