//! Source locations carried by error types.

use derive_more::Display;

/// Where an error was raised, captured with `#[track_caller]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{}:{}", file, line)]
pub struct ErrorLocation {
    /// Source file where error occurred.
    pub file: &'static str,
    /// Line number where error occurred.
    pub line: u32,
}

impl ErrorLocation {
    /// Location of the caller, looking through `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}
