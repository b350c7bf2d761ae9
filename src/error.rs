//! Process-boundary error type. Internal modules use plain `io::Error`;
//! this wraps it with the handful of failure modes that can actually
//! reach the process exit code (§6: stdin/file I/O and field-spec parsing).

use std::io;

use crate::field::FieldSpecError;

#[derive(Debug, thiserror::Error)]
pub enum NeedlefindError {
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),

    #[error("invalid field spec: {0}")]
    FieldSpec(#[from] FieldSpecError),
}

impl NeedlefindError {
    /// Exit code per the process contract: I/O failures are 2, everything
    /// else (bad arguments) is also 2 — only "ran fine, found no matches"
    /// gets its own code (1), and that's not an error at all.
    pub fn exit_code(&self) -> i32 {
        match self {
            NeedlefindError::Input(_) => 2,
            NeedlefindError::FieldSpec(_) => 2,
        }
    }
}
