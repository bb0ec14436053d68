use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Errors only arise while constructing a toy; the running control loop never fails.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A configured range has its minimum above its maximum.
    #[display("{name} range is empty: {min}..={max}")]
    EmptyRange {
        /// Which [`ToyConfig`](crate::ToyConfig) field is wrong.
        name: &'static str,
        /// Configured minimum.
        min: u64,
        /// Configured maximum.
        max: u64,
    },

    /// A configured value falls outside the limits it must respect.
    #[display("{name} value {value} is outside {min}..={max}")]
    OutOfRange {
        /// Which [`ToyConfig`](crate::ToyConfig) field is wrong.
        name: &'static str,
        /// The offending value.
        value: u64,
        /// Lowest accepted value.
        min: u64,
        /// Highest accepted value.
        max: u64,
    },
}
