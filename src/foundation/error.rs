//! Error handling for ww-core.
//!
//! Every failure a pipeline can report lives in one [`Error`] enum. Errors
//! carry all of their diagnostic context, since the library never logs on
//! the caller's behalf and never swallows an error raised upstream.

use thiserror::Error;

/// The main error type for ww-core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A source handed to a pipeline constructor is not iterable.
    #[error(
        "argument {value:?} of type \"{type_name}\" (in position {position}) is not iterable; \
         a pipeline only accepts sequences"
    )]
    NotIterable {
        /// Position of the offending argument among the sources.
        position: usize,
        /// Type name of the offending argument.
        type_name: &'static str,
        /// Debug rendering of the offending argument.
        value: String,
    },

    /// An integer index reached past the end of the sequence.
    #[error("index \"{index}\" out of range")]
    IndexOutOfRange {
        /// The index that was requested.
        index: isize,
    },

    /// No element satisfied a predicate before the sequence ran out.
    #[error("no match for {predicate}")]
    NoMatch {
        /// Type name of the predicate that never matched.
        predicate: &'static str,
    },

    /// A slice boundary or step cannot be used.
    #[error("invalid slice boundary '{value}': {reason}")]
    InvalidBoundary {
        /// Rendering of the rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A size argument (chunk size, window size) is out of range.
    #[error("{name} must be greater than 0, not {value}")]
    InvalidSize {
        /// Name of the argument.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// A sample asked for more elements than the sequence holds.
    #[error("sample larger than population: {requested} requested, {available} available")]
    SampleTooLarge {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements available.
        available: usize,
    },

    /// The pipeline was split by `tee` and can no longer be read directly.
    #[error("can't iterate on a pipeline after tee() has been called on it")]
    Forked,

    /// A deduplication key produced a fingerprint that cannot be hashed.
    #[error(
        "the 'key' function returned a non hashable fingerprint of type '{fingerprint_type}' \
         when receiving '{element}'; make sure it always returns a hashable value \
         (immutable primitives and tuples of them are hashable, lists, sets and maps are not)"
    )]
    Unhashable {
        /// Type of the offending fingerprint.
        fingerprint_type: &'static str,
        /// Debug rendering of the element that produced it.
        element: String,
    },

    /// An option map could not be turned into typed options.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while reading option maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A key was renamed; the old spelling is refused rather than ignored.
    #[error("\"{old}\" doesn't exist. Instead, use \"{new}\"")]
    RenamedArgument {
        /// The retired key.
        old: &'static str,
        /// The key to use instead.
        new: &'static str,
    },

    /// A key is not understood by the option set.
    #[error("unknown option \"{key}\" for {options}")]
    UnknownKey {
        /// The unknown key.
        key: String,
        /// The option set that was being read.
        options: &'static str,
    },

    /// A key holds a value of the wrong type.
    #[error("option \"{key}\" expects {expected}")]
    WrongType {
        /// The key holding the bad value.
        key: String,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// The value is not an option map at all.
    #[error("expected an option map")]
    NotAMap,
}

impl Error {
    /// Builds an [`Error::InvalidBoundary`].
    pub fn invalid_boundary(value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidBoundary {
            value: value.to_string(),
            reason,
        }
    }
}

/// A specialized Result type for ww-core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Extension trait turning "nothing found" into a pipeline error.
pub trait ErrorContext<T> {
    /// Maps an absent value to [`Error::IndexOutOfRange`].
    fn or_out_of_range(self, index: isize) -> Result<T>;

    /// Maps an absent value to [`Error::NoMatch`] for the given predicate type.
    fn or_no_match<P: ?Sized>(self) -> Result<T>;
}

impl<T> ErrorContext<T> for Option<T> {
    fn or_out_of_range(self, index: isize) -> Result<T> {
        self.ok_or(Error::IndexOutOfRange { index })
    }

    fn or_no_match<P: ?Sized>(self) -> Result<T> {
        self.ok_or(Error::NoMatch {
            predicate: core::any::type_name::<P>(),
        })
    }
}
